use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

static LAST_ISSUED: AtomicI64 = AtomicI64::new(i64::MIN);

/// Millisecond-resolution epoch timestamp used to order cell and store updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub const fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    /// Current wall-clock time.
    ///
    /// Strictly increasing within the process: two calls in the same
    /// millisecond still yield distinct, ordered values.
    pub fn now() -> Self {
        let wall = Utc::now().timestamp_millis();
        let mut last = LAST_ISSUED.load(Ordering::Relaxed);
        loop {
            let next = if wall > last { wall } else { last + 1 };
            match LAST_ISSUED.compare_exchange_weak(last, next, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return Timestamp(next),
                Err(observed) => last = observed,
            }
        }
    }

    /// Resolves an optional caller-supplied timestamp, falling back to `now`.
    pub fn or_now(at: Option<Timestamp>) -> Self {
        at.unwrap_or_else(Timestamp::now)
    }

    pub fn as_millis(&self) -> i64 {
        self.0
    }

    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.0).single()
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Timestamp(millis)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(at: DateTime<Utc>) -> Self {
        Timestamp(at.timestamp_millis())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(at) => write!(f, "{}", at.to_rfc3339()),
            None => write!(f, "{}ms", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_is_strictly_increasing() {
        let mut previous = Timestamp::now();
        for _ in 0..1_000 {
            let next = Timestamp::now();
            assert!(next > previous);
            previous = next;
        }
    }

    #[test]
    fn or_now_prefers_supplied_timestamp() {
        let at = Timestamp::from_millis(42);
        assert_eq!(Timestamp::or_now(Some(at)), at);
        assert!(Timestamp::or_now(None) > at);
    }

    #[test]
    fn serializes_as_plain_number() {
        let json = serde_json::to_string(&Timestamp::from_millis(2234443)).unwrap();
        assert_eq!(json, "2234443");
    }

    #[test]
    fn display_uses_rfc3339() {
        let at = Timestamp::from_millis(0);
        assert_eq!(at.to_string(), "1970-01-01T00:00:00+00:00");
    }
}
