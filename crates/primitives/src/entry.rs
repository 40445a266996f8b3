use serde::{Deserialize, Serialize};

use crate::HistoryChange;

/// One atomic analyst action in the ledger.
///
/// Entries are appended by the history service and only ever replaced by a
/// fresh ledger snapshot; the engine never mutates them in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
	pub id: String,
	pub description: String,
	#[serde(default)]
	pub changes: Vec<HistoryChange>,
	/// `Some(1)` marks the entry a global redo would reapply next. Entries
	/// that are not redoable carry no meaningful value.
	#[serde(default)]
	pub redo_priority_order: Option<i64>,
}

impl HistoryEntry {
	pub fn new(
		id: impl Into<String>,
		description: impl Into<String>,
		changes: Vec<HistoryChange>,
	) -> Self {
		Self {
			id: id.into(),
			description: description.into(),
			changes,
			redo_priority_order: None,
		}
	}

	#[must_use]
	pub fn with_redo_priority(mut self, order: i64) -> Self {
		self.redo_priority_order = Some(order);
		self
	}

	/// Returns `true` if this entry is the next global redo target.
	pub fn is_next_redo(&self) -> bool {
		self.redo_priority_order == Some(1)
	}
}
