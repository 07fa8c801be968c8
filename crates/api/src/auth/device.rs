//! Device metadata extraction from request headers.
//!
//! Produces the `device_name` / `user_agent` / `ip_address` triple recorded
//! on sessions and login history entries. Parsing is best-effort: a request
//! with no recognizable user agent still authenticates, it just gets an
//! "Unknown" descriptor.

use axum::http::header::USER_AGENT;
use axum::http::HeaderMap;

/// Device metadata extracted from one request.
#[derive(Debug, Clone, Default)]
pub struct DeviceInfo {
    /// Human-readable descriptor, e.g. "Chrome on Windows".
    pub device_name: Option<String>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}

/// Extract device metadata from request headers.
///
/// The client IP comes from `X-Forwarded-For` (first hop) or `X-Real-IP`;
/// there is no direct socket address behind a reverse proxy.
pub fn device_info(headers: &HeaderMap) -> DeviceInfo {
    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let device_name = user_agent.as_deref().map(parse_device_name);

    let ip_address = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        });

    DeviceInfo {
        device_name,
        user_agent,
        ip_address,
    }
}

/// Derive a "Browser on OS" descriptor from a user-agent string.
fn parse_device_name(user_agent: &str) -> String {
    // Order matters: Edge and Opera UAs also contain "Chrome", and every
    // WebKit UA contains "Safari".
    let browser = if user_agent.contains("Edg") {
        "Edge"
    } else if user_agent.contains("OPR") || user_agent.contains("Opera") {
        "Opera"
    } else if user_agent.contains("Chrome") {
        "Chrome"
    } else if user_agent.contains("Firefox") {
        "Firefox"
    } else if user_agent.contains("Safari") {
        "Safari"
    } else {
        "Unknown Browser"
    };

    let os = if user_agent.contains("Windows") {
        "Windows"
    } else if user_agent.contains("Android") {
        "Android"
    } else if user_agent.contains("iPhone") || user_agent.contains("iPad") {
        "iOS"
    } else if user_agent.contains("Mac OS") {
        "Mac OS"
    } else if user_agent.contains("Linux") {
        "Linux"
    } else {
        "Unknown OS"
    };

    format!("{browser} on {os}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_chrome_on_windows() {
        let ua = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                  (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
        assert_eq!(parse_device_name(ua), "Chrome on Windows");
    }

    #[test]
    fn test_edge_is_not_reported_as_chrome() {
        let ua = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                  (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.0.0";
        assert_eq!(parse_device_name(ua), "Edge on Windows");
    }

    #[test]
    fn test_firefox_on_linux() {
        let ua = "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0";
        assert_eq!(parse_device_name(ua), "Firefox on Linux");
    }

    #[test]
    fn test_unrecognized_agent() {
        assert_eq!(parse_device_name("curl/8.4.0"), "Unknown Browser on Unknown OS");
    }

    #[test]
    fn test_device_info_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static("Mozilla/5.0 (Windows NT 10.0) Chrome/120.0 Safari/537.36"),
        );
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );

        let info = device_info(&headers);
        assert_eq!(info.device_name.as_deref(), Some("Chrome on Windows"));
        assert_eq!(info.ip_address.as_deref(), Some("203.0.113.7"));
        assert!(info.user_agent.is_some());
    }

    #[test]
    fn test_empty_headers() {
        let info = device_info(&HeaderMap::new());
        assert!(info.device_name.is_none());
        assert!(info.user_agent.is_none());
        assert!(info.ip_address.is_none());
    }
}
