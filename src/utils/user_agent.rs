//! Coarse browser and OS detection from the User-Agent header.
//!
//! Intentionally shallow: analytics only needs a handful of stable family
//! labels, not full UA parsing or version extraction.

/// Label used when detection finds nothing recognizable.
pub const UNKNOWN: &str = "(unknown)";

/// Detects the browser family from a User-Agent string.
pub fn detect_browser(ua: &str) -> &'static str {
    if ua.contains("Safari") {
        // Chrome and Chromium both embed "Safari" in their UA.
        if ua.contains("Chrome") {
            "Chrome"
        } else if ua.contains("Chromium") {
            "Chromium"
        } else {
            "Safari"
        }
    } else if ua.contains("Chromium") {
        "Chromium"
    } else if ua.contains("IEMobile") {
        "IEMobile"
    } else if ua.contains("MSIE") {
        "Internet Explorer"
    } else if ua.contains("Opera") || ua.contains("OPR") {
        "Opera"
    } else {
        UNKNOWN
    }
}

/// Detects the operating system family from a User-Agent string.
pub fn detect_os(ua: &str) -> &'static str {
    if ua.contains("iPhone") {
        "iOS"
    } else if ua.contains("Android") {
        "Android"
    } else if ua.contains("Macintosh") {
        "Macintosh"
    } else if ua.contains("Windows Phone") {
        "Windows Mobile"
    } else if ua.contains("Windows") {
        "Windows"
    } else {
        UNKNOWN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHROME_WIN: &str =
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/120.0 Safari/537.36";
    const SAFARI_MAC: &str =
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 Safari/605.1.15";
    const SAFARI_IPHONE: &str =
        "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 Safari/604.1";
    const OPERA_ANDROID: &str =
        "Mozilla/5.0 (Linux; Android 14) AppleWebKit/537.36 Chrome/120.0 Safari/537.36 OPR/76.2";

    #[test]
    fn test_detect_browser_families() {
        assert_eq!(detect_browser(CHROME_WIN), "Chrome");
        assert_eq!(detect_browser(SAFARI_MAC), "Safari");
        assert_eq!(detect_browser("Mozilla/4.0 (compatible; MSIE 8.0)"), "Internet Explorer");
        assert_eq!(detect_browser(OPERA_ANDROID), "Chrome"); // Safari+Chrome outranks OPR
        assert_eq!(detect_browser("Opera/9.80 (X11; Linux)"), "Opera");
        assert_eq!(detect_browser("curl/8.4.0"), UNKNOWN);
        assert_eq!(detect_browser(""), UNKNOWN);
    }

    #[test]
    fn test_detect_os_families() {
        assert_eq!(detect_os(CHROME_WIN), "Windows");
        assert_eq!(detect_os(SAFARI_MAC), "Macintosh");
        assert_eq!(detect_os(SAFARI_IPHONE), "iOS");
        assert_eq!(detect_os(OPERA_ANDROID), "Android");
        assert_eq!(detect_os("Mozilla/5.0 (Windows Phone 10.0)"), "Windows Mobile");
        assert_eq!(detect_os("curl/8.4.0"), UNKNOWN);
    }
}
