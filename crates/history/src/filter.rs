//! Caller-supplied row inclusion.

use rewind_primitives::{HistoryChange, HistoryEntry};

/// Decides which ledger rows take part in the history display.
///
/// Excluded rows are still listed (as hidden rows) but are never chosen as
/// the global undo target.
pub trait RowFilter: Send + Sync {
	/// Returns `true` if the entry is shown and eligible as an undo target.
	fn includes_entry(&self, entry: &HistoryEntry) -> bool;

	/// Returns `true` if a change counts toward the default (non event-mode)
	/// preview after the modifier key is released.
	fn includes_change(&self, change: &HistoryChange) -> bool {
		let _ = change;
		true
	}
}

/// Filter that includes every row.
#[derive(Debug, Clone, Copy, Default)]
pub struct IncludeAll;

impl RowFilter for IncludeAll {
	fn includes_entry(&self, _entry: &HistoryEntry) -> bool {
		true
	}
}

impl<F> RowFilter for F
where
	F: Fn(&HistoryEntry) -> bool + Send + Sync,
{
	fn includes_entry(&self, entry: &HistoryEntry) -> bool {
		self(entry)
	}
}
