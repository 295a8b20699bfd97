//! # Adapters Layer (Outer Hexagon)

pub mod journal;

pub use journal::InMemoryJournal;
