use chrono::{DateTime, Utc};

const MILLIS_PER_HOUR: f64 = 60.0 * 60.0 * 1000.0;

pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

pub fn now_utc_millis() -> i64 {
    now_utc().timestamp_millis()
}

/// Timestamps are stored as unix epoch milliseconds.
pub fn from_millis(millis: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or_default()
}

/// Fractional hours elapsed from `earlier` to `later`.
pub fn hours_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> f64 {
    (later - earlier).num_milliseconds() as f64 / MILLIS_PER_HOUR
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn hours_between_is_fractional() {
        let now = from_millis(1_700_000_000_000);
        assert_eq!(hours_between(now - Duration::minutes(90), now), 1.5);
        assert_eq!(hours_between(now, now), 0.0);
    }

    #[test]
    fn millis_survive_conversion() {
        let millis = 1_712_345_678_901;
        assert_eq!(from_millis(millis).timestamp_millis(), millis);
    }
}
