//! Click event model: request metadata, derived dimensions, and the
//! real-time payload published on every visit.

use serde::Serialize;

use crate::domain::entities::analytics::ClickAnalytics;
use crate::utils::user_agent::{UNKNOWN, detect_browser, detect_os};

/// Label recorded when a visit carries no referrer.
pub const NOT_SET: &str = "(not set)";

/// Raw request metadata handed in by the routing layer.
///
/// All fields are optional to handle missing headers gracefully; the core
/// derives stable categorical labels from whatever is present.
#[derive(Debug, Clone, Default)]
pub struct VisitMeta {
    pub remote_addr: Option<String>,
    pub forwarded_for: Option<String>,
    pub user_agent: Option<String>,
    pub accept_language: Option<String>,
    pub referer: Option<String>,
}

impl VisitMeta {
    /// Derives the four categorical dimensions recorded for this visit.
    ///
    /// - referrer: the Referer header, or [`NOT_SET`] when empty
    /// - language: first `Accept-Language` entry, lowercased
    /// - browser / OS: detected from the User-Agent string
    pub fn dims(&self) -> ClickDims {
        let referrer = match self.referer.as_deref() {
            Some(r) if !r.is_empty() => r.to_string(),
            _ => NOT_SET.to_string(),
        };

        let language = self
            .accept_language
            .as_deref()
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_lowercase())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| UNKNOWN.to_string());

        let ua = self.user_agent.as_deref().unwrap_or("");
        ClickDims {
            referrer,
            language,
            browser: detect_browser(ua).to_string(),
            os_name: detect_os(ua).to_string(),
        }
    }

    /// Client IP, preferring the proxy-forwarded address over the socket
    /// address.
    pub fn client_ip(&self) -> String {
        self.forwarded_for
            .clone()
            .filter(|v| !v.is_empty())
            .or_else(|| self.remote_addr.clone())
            .unwrap_or_else(|| UNKNOWN.to_string())
    }
}

/// The four categorical labels extracted from one visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickDims {
    pub referrer: String,
    pub language: String,
    pub browser: String,
    pub os_name: String,
}

/// One click, as published to the real-time channel.
///
/// Transient: serialized into the publish payload and discarded. Never
/// persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ClickEvent {
    pub ip: String,
    pub referer: String,
    pub language: String,
    pub browser: String,
    #[serde(rename = "os")]
    pub os_name: String,
}

impl ClickEvent {
    /// Builds the event from the visit's derived dimensions.
    pub fn new(ip: String, dims: &ClickDims) -> Self {
        Self {
            ip,
            referer: dims.referrer.clone(),
            language: dims.language.clone(),
            browser: dims.browser.clone(),
            os_name: dims.os_name.clone(),
        }
    }
}

/// Wire payload for the real-time channel: the click plus a snapshot of the
/// link's analytics after the visit was recorded.
#[derive(Debug, Clone, Serialize)]
pub struct ClickMessage {
    pub data: ClickAnalytics,
    pub click: ClickEvent,
}
