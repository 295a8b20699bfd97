//! # In-Memory Journal
//!
//! Vector-backed [`EventJournal`], the journal used by tests and by
//! single-process deployments.

use crate::ports::outbound::{EventJournal, JournalEntry};
use shared_types::{Address, Log};

/// Journal kept in a `Vec`.
#[derive(Debug, Default, Clone)]
pub struct InMemoryJournal {
    entries: Vec<JournalEntry>,
}

impl InMemoryJournal {
    /// Creates an empty journal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries emitted by `emitter`, in order.
    #[must_use]
    pub fn by_emitter(&self, emitter: Address) -> Vec<JournalEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.log.emitter == emitter)
            .cloned()
            .collect()
    }
}

impl EventJournal for InMemoryJournal {
    fn append(&mut self, log: Log) -> u64 {
        let sequence = self.entries.len() as u64;
        self.entries.push(JournalEntry { sequence, log });
        sequence
    }

    fn len(&self) -> u64 {
        self.entries.len() as u64
    }

    fn since(&self, from: u64) -> Vec<JournalEntry> {
        let start = usize::try_from(from).unwrap_or(usize::MAX);
        self.entries.get(start..).map_or_else(Vec::new, <[_]>::to_vec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::PlusDEvent;

    fn created(n: u8) -> Log {
        Log::new(
            Address::repeat_byte(0xfa),
            PlusDEvent::ConsignmentCreated {
                consignment: Address::repeat_byte(n),
            },
        )
    }

    #[test]
    fn test_sequences_are_dense() {
        let mut journal = InMemoryJournal::new();
        assert!(journal.is_empty());
        assert_eq!(journal.append(created(1)), 0);
        assert_eq!(journal.append(created(2)), 1);
        assert_eq!(journal.len(), 2);
    }

    #[test]
    fn test_since() {
        let mut journal = InMemoryJournal::new();
        for n in 0..5 {
            journal.append(created(n));
        }
        let tail = journal.since(3);
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[0].sequence, 3);
        assert!(journal.since(5).is_empty());
        assert!(journal.since(u64::MAX).is_empty());
    }

    #[test]
    fn test_filters() {
        let mut journal = InMemoryJournal::new();
        journal.append(created(1));
        journal.append(Log::new(
            Address::repeat_byte(1),
            PlusDEvent::RequirementsVerified,
        ));

        assert_eq!(journal.by_event("RequirementsVerified").len(), 1);
        assert_eq!(journal.by_event("ConsignmentCreated")[0].sequence, 0);
        assert_eq!(journal.by_emitter(Address::repeat_byte(1)).len(), 1);
    }

    #[test]
    fn test_entries_serialize() {
        let mut journal = InMemoryJournal::new();
        journal.append(created(7));
        let json = serde_json::to_value(&journal.since(0)[0]).unwrap();
        assert_eq!(json["sequence"], 0);
        assert_eq!(json["log"]["event"]["event"], "ConsignmentCreated");
    }
}
