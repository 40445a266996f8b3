//! Core types for the analyst edit history: ledger entries, field-level
//! changes, event summaries, and the display rules applied to them.

/// Undo/redo direction of an entry or change.
pub mod action;
/// Field-level changes recorded inside a ledger entry.
pub mod change;
/// Ledger entries.
pub mod entry;
/// Analysis event summaries supplied by the event source.
pub mod event;
/// Display rules and ingestion policy.
pub mod rules;

pub use action::HistoryAction;
pub use change::{HistoryChange, HypothesisChangeInformation};
pub use entry::HistoryEntry;
pub use event::{EventStatus, EventSummary};
pub use rules::{DEFAULT_CREATE_EVENT_SENTINEL, DisplayRules, InvariantPolicy};
