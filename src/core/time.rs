use chrono::{DateTime, Utc};

pub const FIXED_TIME_ENV: &str = "URL_SENTINEL_FIXED_TIME";

/// Current time, or the RFC 3339 instant in `URL_SENTINEL_FIXED_TIME` when set.
pub fn now_utc() -> DateTime<Utc> {
    if let Ok(value) = std::env::var(FIXED_TIME_ENV) {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&value) {
            return dt.with_timezone(&Utc);
        }
    }
    Utc::now()
}

/// Whole days elapsed from `then` to `now`, truncated toward zero.
pub fn age_in_days(then: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    now.signed_duration_since(then).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_days_are_truncated() {
        let then = DateTime::parse_from_rfc3339("2025-01-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let now = DateTime::parse_from_rfc3339("2025-01-31T11:59:59Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(age_in_days(then, now), 29);
    }
}
