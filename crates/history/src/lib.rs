//! Undo/redo history engine for analyst edit ledgers.
//!
//! The ledger arrives from an external history service as an ordered list of
//! [`HistoryEntry`] values (oldest first). This crate derives everything the
//! history display needs from that snapshot:
//!
//! * [`ledger`]: pure scans over the ledger (counts, boundary lookups, the
//!   "would this change be touched" predicate).
//! * [`format`]: reshaping of entries for display.
//! * [`intent`]: the action-intent pointer driven by hover and modifier keys.
//! * [`rows`]: per-row display flags and undo/redo boundary markers.
//!
//! All state the engine reads is passed explicitly through a
//! [`HistoryContext`]. Nothing here performs I/O; mutations are issued by the
//! `rewind-dispatch` crate.
//!
//! [`HistoryEntry`]: rewind_primitives::HistoryEntry

pub mod context;
pub mod error;
pub mod filter;
pub mod format;
pub mod intent;
pub mod ledger;
pub mod rows;

pub use context::HistoryContext;
pub use error::{LedgerError, Result};
pub use filter::{IncludeAll, RowFilter};
pub use format::{filter_irrelevant_changes, format_create_event_history};
pub use intent::{ActionIntent, ActionIntentTracker, ChangeScope, IntentState};
pub use ledger::{
	LedgerViolation, action_type_of, can_perform_action, check_invariants, count_of_type,
	does_change_affect_event, does_entry_affect_event, index_of, is_affected,
	last_included_index_of_type, last_included_of_type, next_priority_redo,
	next_priority_redo_index,
};
pub use rows::{Boundary, ChangeRow, DisplayFlags, HistoryRow, RowBody, compose_rows, display_flags};
