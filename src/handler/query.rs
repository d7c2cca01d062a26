//! Query string handling
//!
//! The location arrives as `?location=<key>`, form-url-encoded.

/// Name of the query parameter selecting the location
pub const LOCATION_PARAM: &str = "location";

/// First `location` value in `query`, decoded. Other parameters are ignored.
pub fn location_param(query: Option<&str>) -> Option<String> {
    url::form_urlencoded::parse(query?.as_bytes())
        .find(|(name, _)| name == LOCATION_PARAM)
        .map(|(_, value)| value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent() {
        assert_eq!(location_param(None), None);
        assert_eq!(location_param(Some("")), None);
        assert_eq!(location_param(Some("page=2")), None);
    }

    #[test]
    fn test_plain_value() {
        assert_eq!(
            location_param(Some("location=Chester_County_Pennsylvania")),
            Some("Chester_County_Pennsylvania".to_string())
        );
    }

    #[test]
    fn test_decoding() {
        assert_eq!(
            location_param(Some("location=New%20York_State")),
            Some("New York_State".to_string())
        );
        assert_eq!(
            location_param(Some("x=1&location=New+York")),
            Some("New York".to_string())
        );
        assert_eq!(
            location_param(Some("location=..%2F..%2Fetc%2Fpasswd")),
            Some("../../etc/passwd".to_string())
        );
    }

    #[test]
    fn test_first_wins_and_empty_value() {
        assert_eq!(location_param(Some("location=a&location=b")), Some("a".to_string()));
        assert_eq!(location_param(Some("location=")), Some(String::new()));
    }
}
