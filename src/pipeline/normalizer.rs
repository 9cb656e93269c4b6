use url::{Host, Url};

use crate::core::error::SentinelError;
use crate::core::types::ScannedUrl;

/// Upper bound callers enforce on raw input before scanning.
pub const MAX_URL_LENGTH: usize = 2048;

pub fn check_input_length(raw: &str) -> Result<(), SentinelError> {
    let len = raw.chars().count();
    if len > MAX_URL_LENGTH {
        return Err(SentinelError::InputTooLong(len, MAX_URL_LENGTH));
    }
    Ok(())
}

/// Trim, lower-case, default to `http://` and parse.
pub fn normalize(raw: &str) -> Result<ScannedUrl, SentinelError> {
    let mut candidate = raw.trim().to_lowercase();
    if !candidate.starts_with("http://") && !candidate.starts_with("https://") {
        candidate = format!("http://{}", candidate);
    }

    let parsed = Url::parse(&candidate)?;
    let (hostname, is_ip) = match parsed.host() {
        Some(Host::Domain(d)) if !d.is_empty() => (d.to_string(), false),
        Some(Host::Ipv4(ip)) => (ip.to_string(), true),
        Some(Host::Ipv6(ip)) => (format!("[{}]", ip), true),
        _ => return Err(SentinelError::InvalidUrl(format!("no host in {}", candidate))),
    };

    let mut path = parsed.path().to_string();
    if let Some(q) = parsed.query() {
        path.push('?');
        path.push_str(q);
    }
    if let Some(f) = parsed.fragment() {
        path.push('#');
        path.push_str(f);
    }

    Ok(ScannedUrl {
        scheme: parsed.scheme().to_string(),
        hostname,
        path,
        port: parsed.port(),
        href: parsed.to_string(),
        is_ip,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepends_scheme_and_lowercases() {
        let url = normalize("  PayPal.COM/Login?Next=1 ").unwrap();
        assert_eq!(url.scheme, "http");
        assert_eq!(url.hostname, "paypal.com");
        assert_eq!(url.path, "/login?next=1");
        assert_eq!(url.href, "http://paypal.com/login?next=1");
        assert_eq!(url.port, None);
        assert!(!url.is_ip);
    }

    #[test]
    fn keeps_explicit_non_default_port() {
        let url = normalize("https://example.com:8443/a#frag").unwrap();
        assert!(url.is_https());
        assert_eq!(url.port, Some(8443));
        assert_eq!(url.path, "/a#frag");

        let default_port = normalize("https://example.com:443/").unwrap();
        assert_eq!(default_port.port, None);
    }

    #[test]
    fn detects_ip_literals() {
        assert!(normalize("http://192.168.1.1/login").unwrap().is_ip);
        let v6 = normalize("http://[::1]:8080/").unwrap();
        assert!(v6.is_ip);
        assert_eq!(v6.hostname, "[::1]");
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(normalize("http://"), Err(SentinelError::InvalidUrl(_))));
        assert!(matches!(normalize("exa mple.com:99999"), Err(SentinelError::InvalidUrl(_))));
        assert!(normalize("").is_err());
    }

    #[test]
    fn input_length_is_bounded() {
        assert!(check_input_length(&"a".repeat(MAX_URL_LENGTH)).is_ok());
        assert!(matches!(
            check_input_length(&"a".repeat(MAX_URL_LENGTH + 1)),
            Err(SentinelError::InputTooLong(2049, 2048))
        ));
    }
}
