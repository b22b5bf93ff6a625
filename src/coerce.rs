//! Numeric coercion for replikator's string-encoded values.
//!
//! Every number replikator reports is a JSON string. The fallback on parse
//! failure differs by field: replication lag falls back to -1 so that a
//! stopped or unreadable channel is distinguishable from a genuine zero lag,
//! while all other fields (sizes, capacities, timestamps) fall back to 0.

/// Parses a replication lag value. Returns -1 when the field is absent or
/// not numeric, which is the case for a stopped replication channel.
pub fn lag(raw: &str) -> f64 {
    raw.parse().unwrap_or(-1.0)
}

/// Parses any other numeric field. Returns 0 when the field is absent or
/// not numeric.
pub fn metric(raw: &str) -> f64 {
    raw.parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lag_parses_plain_integer() {
        assert_eq!(lag("5"), 5.0);
    }

    #[test]
    fn lag_parses_float() {
        assert_eq!(lag("2.5"), 2.5);
    }

    #[test]
    fn lag_falls_back_to_sentinel() {
        assert_eq!(lag(""), -1.0);
        assert_eq!(lag("n/a"), -1.0);
    }

    #[test]
    fn lag_zero_is_not_the_sentinel() {
        assert_eq!(lag("0"), 0.0);
    }

    #[test]
    fn metric_parses_large_values() {
        assert_eq!(metric("107374182400"), 107374182400.0);
    }

    #[test]
    fn metric_falls_back_to_zero() {
        assert_eq!(metric(""), 0.0);
        assert_eq!(metric("12GB"), 0.0);
    }
}
