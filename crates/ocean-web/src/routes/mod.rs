//! Route handlers.

pub mod health;
pub mod knowledge_graph;
pub mod news;
pub mod pages;

use ocean_core::OceanError;

/// Parse an optional `limit` query value. Blank means `default`; anything
/// else must be a positive integer and is capped at `max`.
pub(crate) fn parse_limit(raw: Option<&str>, default: i64, max: i64) -> Result<i64, OceanError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(default),
        Some(s) => match s.parse::<i64>() {
            Ok(n) if n > 0 => Ok(n.min(max)),
            _ => Err(OceanError::invalid("limit", format!("expected a positive integer, got '{}'", s))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_limit() {
        assert_eq!(parse_limit(None, 10, 1000).unwrap(), 10);
        assert_eq!(parse_limit(Some(" "), 10, 1000).unwrap(), 10);
        assert_eq!(parse_limit(Some("25"), 10, 1000).unwrap(), 25);
        assert_eq!(parse_limit(Some("5000"), 10, 1000).unwrap(), 1000);
        assert!(parse_limit(Some("0"), 10, 1000).is_err());
        assert!(parse_limit(Some("ten"), 10, 1000).is_err());
    }
}
