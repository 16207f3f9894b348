//! Identifier generation for topics and words
//!
//! Identifiers are millisecond timestamps, which keeps them compatible with
//! documents written by other clients. Two creations in the same millisecond
//! would collide, so the generator never hands out a value less than or equal
//! to the previous one and skips identifiers already present in the collection.

use chrono::{DateTime, Utc};

#[derive(Debug, Default, Clone)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next identifier for `now`, skipping any value for which `taken` returns true
    pub fn next(&mut self, now: DateTime<Utc>, taken: impl Fn(i64) -> bool) -> i64 {
        let mut candidate = now.timestamp_millis().max(self.last + 1);
        while taken(candidate) {
            candidate += 1;
        }
        self.last = candidate;
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_instant_yields_distinct_ids() {
        let mut ids = IdGenerator::new();
        let now = Utc::now();

        let a = ids.next(now, |_| false);
        let b = ids.next(now, |_| false);
        let c = ids.next(now, |_| false);
        assert_eq!(a, now.timestamp_millis());
        assert!(a < b && b < c);
    }

    #[test]
    fn test_skips_taken_ids() {
        let mut ids = IdGenerator::new();
        let now = Utc::now();
        let base = now.timestamp_millis();

        let id = ids.next(now, |candidate| candidate == base || candidate == base + 1);
        assert_eq!(id, base + 2);
    }
}
