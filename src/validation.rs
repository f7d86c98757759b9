use std::net::IpAddr;

use url::Url;

use crate::IpValidationError;

/// `true` only for parseable absolute `http`/`https` URLs.
pub fn is_valid_url(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    match Url::parse(s) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Dotted-quad IPv4 or IPv6 in full or compressed form.
pub fn is_valid_ip(s: &str) -> bool {
    s.parse::<IpAddr>().is_ok()
}

/// Checks a non-empty list of addresses, stopping at the first bad one.
pub fn validate_ips<S: AsRef<str>>(ips: &[S]) -> Result<(), IpValidationError> {
    if ips.is_empty() {
        return Err(IpValidationError::Empty);
    }
    for ip in ips {
        let ip: &str = ip.as_ref();
        if !is_valid_ip(ip) {
            return Err(IpValidationError::Invalid(ip.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_url() {
        assert!(!is_valid_url(""));
        assert!(!is_valid_url("not a url"));
        assert!(!is_valid_url("ftp://x"));
        assert!(!is_valid_url("example.com/path"));
        assert!(is_valid_url("http://a.b"));
        assert!(is_valid_url("https://a.b/c"));
        assert!(is_valid_url("HTTPS://A.B"));
    }

    #[test]
    fn test_validate_ips() {
        let empty: [&str; 0] = [];
        let err = validate_ips(&empty).unwrap_err();
        assert!(err.to_string().contains("IP"));

        assert_eq!(validate_ips(&["1.2.3.4"]), Ok(()));
        assert_eq!(validate_ips(&["::1"]), Ok(()));
        assert_eq!(validate_ips(&["2001:db8:0:0:0:0:2:1", "2001:db8::2:1"]), Ok(()));

        let err = validate_ips(&["999.1.1.1"]).unwrap_err();
        assert!(err.to_string().contains("999.1.1.1"));
    }

    #[test]
    fn test_first_failure_wins() {
        let ips = vec!["1.1.1.1".to_string(), "256.0.0.1".to_string(), "bad".to_string()];
        assert_eq!(
            validate_ips(&ips),
            Err(IpValidationError::Invalid("256.0.0.1".to_string()))
        );
    }

    #[test]
    fn test_ipv4_shape() {
        assert!(!is_valid_ip("1.2.3"));
        assert!(!is_valid_ip("1.2.3.4.5"));
        assert!(!is_valid_ip("01.2.3.4"));
        assert!(!is_valid_ip(" 1.2.3.4"));
        assert!(is_valid_ip("0.0.0.0"));
        assert!(is_valid_ip("255.255.255.255"));
    }
}
