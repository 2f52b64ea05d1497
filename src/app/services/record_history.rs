//! Bounded history of recently received records
//!
//! Holds the latest records delivered by a record source, evicting the oldest
//! once capacity is reached. The history is an owned value; callers decide
//! where it lives and who may push into it.

use std::collections::VecDeque;

use crate::app::models::InverterRecord;
use crate::constants::DEFAULT_HISTORY_CAPACITY;

/// Fixed-capacity FIFO of records, oldest first
#[derive(Debug, Clone, PartialEq)]
pub struct RecordHistory {
    records: VecDeque<InverterRecord>,
    capacity: usize,
}

impl RecordHistory {
    /// Create a history holding at most `capacity` records (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a record, returning the evicted oldest record when full
    pub fn push(&mut self, record: InverterRecord) -> Option<InverterRecord> {
        let evicted = if self.records.len() == self.capacity {
            self.records.pop_front()
        } else {
            None
        };
        self.records.push_back(record);
        evicted
    }

    /// Most recently pushed record
    pub fn latest(&self) -> Option<&InverterRecord> {
        self.records.back()
    }

    /// Records from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &InverterRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Snapshot of the history, oldest first
    pub fn to_vec(&self) -> Vec<InverterRecord> {
        self.records.iter().cloned().collect()
    }
}

impl Default for RecordHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl Extend<InverterRecord> for RecordHistory {
    fn extend<I: IntoIterator<Item = InverterRecord>>(&mut self, iter: I) {
        for record in iter {
            self.push(record);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> InverterRecord {
        let mut record = InverterRecord::default();
        record.user.id = id.to_string();
        record
    }

    fn ids(history: &RecordHistory) -> Vec<String> {
        history.iter().map(|r| r.user.id.clone()).collect()
    }

    #[test]
    fn test_push_and_latest() {
        let mut history = RecordHistory::new(3);
        assert!(history.is_empty());
        assert!(history.latest().is_none());

        assert!(history.push(record("a")).is_none());
        assert!(history.push(record("b")).is_none());

        assert_eq!(history.len(), 2);
        assert_eq!(history.latest().unwrap().user.id, "b");
    }

    #[test]
    fn test_oldest_evicted_at_capacity() {
        let mut history = RecordHistory::new(2);
        history.push(record("a"));
        history.push(record("b"));

        let evicted = history.push(record("c"));
        assert_eq!(evicted.unwrap().user.id, "a");
        assert_eq!(ids(&history), vec!["b", "c"]);
        assert_eq!(history.len(), history.capacity());
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let mut history = RecordHistory::new(0);
        history.push(record("a"));
        history.push(record("b"));

        assert_eq!(history.capacity(), 1);
        assert_eq!(ids(&history), vec!["b"]);
    }

    #[test]
    fn test_extend_clear_and_snapshot() {
        let mut history = RecordHistory::default();
        assert_eq!(history.capacity(), DEFAULT_HISTORY_CAPACITY);

        history.extend(["a", "b", "c"].into_iter().map(record));
        let snapshot = history.to_vec();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot[0].user.id, "a");

        history.clear();
        assert!(history.is_empty());
        assert_eq!(snapshot.len(), 3);
    }
}
