//! Input coercion for identifiers and pagination

use crate::config::Config;
use crate::contract::{EntitlementError, PageRequest};

/// Parse a path-supplied entitlement ID.
///
/// A missing (blank) ID is a bad request. Anything that is present but not
/// a valid ID cannot match a row, so it is reported as not found.
pub fn parse_entitlement_id(raw: &str) -> Result<i32, EntitlementError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EntitlementError::bad_request("Entitlement ID is required"));
    }
    trimmed
        .parse::<i32>()
        .map_err(|_| EntitlementError::not_found(trimmed))
}

/// Lenient integer parse used for query-string pagination values
pub fn parse_page_value(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    trimmed.parse::<i64>().ok().or_else(|| {
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(|v| v.trunc() as i64)
    })
}

/// Clamp caller-supplied pagination into a usable window.
///
/// - missing, zero or negative `limit` falls back to the default page size
/// - `limit` is capped at `max_page_size`
/// - missing or negative `offset` becomes 0
pub fn coerce_page(limit: Option<i64>, offset: Option<i64>, config: &Config) -> PageRequest {
    let max = config.max_page_size.max(1);
    let limit = match limit {
        Some(l) if l > 0 => (l as u64).min(max),
        _ => config.default_page_size.clamp(1, max),
    };
    let offset = offset.filter(|o| *o > 0).map_or(0, |o| o as u64);
    PageRequest { limit, offset }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entitlement_id_valid() {
        assert_eq!(parse_entitlement_id("7"), Ok(7));
        assert_eq!(parse_entitlement_id(" 42 "), Ok(42));
    }

    #[test]
    fn test_parse_entitlement_id_blank_is_bad_request() {
        assert!(matches!(
            parse_entitlement_id(""),
            Err(EntitlementError::BadRequest { .. })
        ));
        assert!(matches!(
            parse_entitlement_id("   "),
            Err(EntitlementError::BadRequest { .. })
        ));
    }

    #[test]
    fn test_parse_entitlement_id_malformed_is_not_found() {
        assert_eq!(
            parse_entitlement_id("abc"),
            Err(EntitlementError::not_found("abc"))
        );
        assert_eq!(
            parse_entitlement_id("99999999999"),
            Err(EntitlementError::not_found("99999999999"))
        );
    }

    #[test]
    fn test_parse_page_value() {
        assert_eq!(parse_page_value("10"), Some(10));
        assert_eq!(parse_page_value(" -3 "), Some(-3));
        assert_eq!(parse_page_value("12.9"), Some(12));
        assert_eq!(parse_page_value("ten"), None);
        assert_eq!(parse_page_value(""), None);
        assert_eq!(parse_page_value("NaN"), None);
    }

    #[test]
    fn test_coerce_page_defaults() {
        let config = Config::default();
        assert_eq!(
            coerce_page(None, None, &config),
            PageRequest { limit: 20, offset: 0 }
        );
    }

    #[test]
    fn test_coerce_page_rejects_zero_and_negative() {
        let config = Config::default();
        assert_eq!(
            coerce_page(Some(0), Some(-5), &config),
            PageRequest { limit: 20, offset: 0 }
        );
        assert_eq!(
            coerce_page(Some(-1), Some(3), &config),
            PageRequest { limit: 20, offset: 3 }
        );
    }

    #[test]
    fn test_coerce_page_caps_limit() {
        let config = Config {
            max_page_size: 50,
            ..Config::default()
        };
        assert_eq!(
            coerce_page(Some(10_000), Some(20), &config),
            PageRequest { limit: 50, offset: 20 }
        );
        assert_eq!(
            coerce_page(Some(10), Some(20), &config),
            PageRequest { limit: 10, offset: 20 }
        );
    }
}
