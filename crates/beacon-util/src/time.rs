//! Wall-clock time helper
//!
//! All sample timestamps come from this single function so the rest of the
//! workspace never calls `Local::now()` directly.

use chrono::{DateTime, Local};

/// Get the current wall-clock time
pub fn now() -> DateTime<Local> {
    Local::now()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_is_monotonic_enough() {
        let a = now();
        let b = now();
        assert!(b >= a);
    }

    #[test]
    fn now_round_trips_rfc3339() {
        let t = now();
        let parsed = DateTime::parse_from_rfc3339(&t.to_rfc3339()).unwrap();
        assert_eq!(parsed.with_timezone(&Local), t);
    }
}
