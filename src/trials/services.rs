use time::{Duration, OffsetDateTime};

use super::repo_types::Test;

/// Every test runs for exactly this many days.
pub const TEST_DURATION_DAYS: i64 = 3;

pub fn finish_date(start: OffsetDateTime) -> OffsetDateTime {
    start + Duration::days(TEST_DURATION_DAYS)
}

/// Informational only: completion is caller-triggered and ignores this.
pub fn is_expired(test: &Test, now: OffsetDateTime) -> bool {
    now >= test.finish_date
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;
    use uuid::Uuid;

    fn test_started(start: OffsetDateTime) -> Test {
        Test {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            item_id: "3017620425035".into(),
            start_date: start,
            finish_date: finish_date(start),
            completed: false,
            result: None,
            created_at: start,
            updated_at: start,
        }
    }

    #[test]
    fn finish_is_three_days_after_start() {
        let start = datetime!(2024-02-27 22:15 UTC);
        assert_eq!(finish_date(start), datetime!(2024-03-01 22:15 UTC));
    }

    #[test]
    fn expiry_is_relative_to_finish_date() {
        let start = datetime!(2024-05-01 08:00 UTC);
        let t = test_started(start);
        assert!(!is_expired(&t, start));
        assert!(!is_expired(&t, datetime!(2024-05-04 07:59 UTC)));
        assert!(is_expired(&t, datetime!(2024-05-04 08:00 UTC)));
    }
}
