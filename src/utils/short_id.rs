//! Base-62 short identifier encoding.
//!
//! Maps a counter value to a compact string over `[a-z][A-Z][0-9]`. The
//! digit order is least-significant first and is deliberately not reversed;
//! the mapping only has to be deterministic and injective, not numerically
//! readable.

/// Size of the encoding alphabet: 26 lowercase + 26 uppercase + 10 digits.
const ALPHABET_LEN: u64 = 62;

/// Encodes `n` as a base-62 string.
///
/// Deterministic: the same input always yields the same output. Output
/// length grows logarithmically with the input; `0` and any `n < 62` encode
/// to a single character.
///
/// # Examples
///
/// ```
/// use publink::utils::short_id::encode;
///
/// assert_eq!(encode(0), "a");
/// assert_eq!(encode(1), "b");
/// assert_eq!(encode(61), "9");
/// assert_eq!(encode(62), "ab");
/// ```
pub fn encode(mut n: u64) -> String {
    let mut out = String::new();
    loop {
        out.push(digit_char(n % ALPHABET_LEN));
        n /= ALPHABET_LEN;
        if n == 0 {
            break;
        }
    }
    out
}

/// Decodes a string produced by [`encode`] back to its integer value.
///
/// Returns `None` for the empty string, for characters outside the alphabet,
/// and on overflow.
pub fn decode(s: &str) -> Option<u64> {
    if s.is_empty() {
        return None;
    }
    let mut value: u64 = 0;
    // Digits were emitted least-significant first, so fold from the right.
    for ch in s.chars().rev() {
        let digit = digit_value(ch)?;
        value = value.checked_mul(ALPHABET_LEN)?.checked_add(digit)?;
    }
    Some(value)
}

/// Returns true when `s` is non-empty and entirely within the alphabet.
pub fn is_valid(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| digit_value(c).is_some())
}

/// Maps a digit in `[0, 62)` onto the three alphabet bands.
fn digit_char(d: u64) -> char {
    debug_assert!(d < ALPHABET_LEN);
    match d {
        0..=25 => (b'a' + d as u8) as char,
        26..=51 => (b'A' + (d - 26) as u8) as char,
        _ => (b'0' + (d - 52) as u8) as char,
    }
}

fn digit_value(c: char) -> Option<u64> {
    match c {
        'a'..='z' => Some(c as u64 - 'a' as u64),
        'A'..='Z' => Some(26 + c as u64 - 'A' as u64),
        '0'..='9' => Some(52 + c as u64 - '0' as u64),
        _ => None,
    }
}
