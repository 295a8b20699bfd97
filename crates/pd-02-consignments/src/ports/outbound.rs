//! # Driven Port (SPI - Outbound)
//!
//! Where committed events go. The journal is append-only; sequence numbers
//! start at 0 and have no gaps.

use serde::{Deserialize, Serialize};
use shared_types::Log;

/// A log together with its position in the journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Position, starting at 0.
    pub sequence: u64,
    /// The committed log.
    pub log: Log,
}

/// Append-only store of committed events.
pub trait EventJournal: Send + Sync {
    /// Appends `log` and returns its sequence number.
    fn append(&mut self, log: Log) -> u64;

    /// Number of entries.
    fn len(&self) -> u64;

    /// True if nothing was journaled yet.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries with `sequence >= from`, in order.
    fn since(&self, from: u64) -> Vec<JournalEntry>;

    /// Entries whose event has the given name, e.g. `ConsignmentCreated`.
    fn by_event(&self, name: &str) -> Vec<JournalEntry> {
        self.since(0)
            .into_iter()
            .filter(|entry| entry.log.event.name() == name)
            .collect()
    }
}
