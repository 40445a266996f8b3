use serde::{Deserialize, Serialize};

use crate::HistoryAction;

/// Server-provided description of what a change did to a hypothesis.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HypothesisChangeInformation {
	/// Human-readable action, e.g. "Reject signal detection".
	pub user_action: String,
}

/// One field-level mutation inside a [`HistoryEntry`].
///
/// [`HistoryEntry`]: crate::HistoryEntry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryChange {
	pub id: String,
	/// `Some(true)` while applied (undoable), `Some(false)` once undone
	/// (redoable). `None` when the server omitted the flag.
	#[serde(default)]
	pub active: Option<bool>,
	/// Event touched by this change; `None` for orphaned changes.
	#[serde(default)]
	pub event_id: Option<String>,
	/// Set by the server when applying this change produced a conflict.
	#[serde(default)]
	pub conflict_created: bool,
	#[serde(default)]
	pub hypothesis_change_information: HypothesisChangeInformation,
}

impl HistoryChange {
	/// Creates an applied change that can be undone.
	pub fn undoable(id: impl Into<String>, user_action: impl Into<String>) -> Self {
		Self::with_active(id, user_action, Some(true))
	}

	/// Creates an undone change that can be redone.
	pub fn redoable(id: impl Into<String>, user_action: impl Into<String>) -> Self {
		Self::with_active(id, user_action, Some(false))
	}

	/// Creates a change with an explicit (possibly absent) `active` flag.
	pub fn with_active(
		id: impl Into<String>,
		user_action: impl Into<String>,
		active: Option<bool>,
	) -> Self {
		Self {
			id: id.into(),
			active,
			event_id: None,
			conflict_created: false,
			hypothesis_change_information: HypothesisChangeInformation {
				user_action: user_action.into(),
			},
		}
	}

	/// Ties the change to an analysis event.
	#[must_use]
	pub fn with_event(mut self, event_id: impl Into<String>) -> Self {
		self.event_id = Some(event_id.into());
		self
	}

	/// Marks the change as having produced a conflict.
	#[must_use]
	pub fn with_conflict(mut self) -> Self {
		self.conflict_created = true;
		self
	}

	pub fn user_action(&self) -> &str {
		&self.hypothesis_change_information.user_action
	}

	/// Direction this change would move in, or `None` if `active` is unknown.
	pub fn action(&self) -> Option<HistoryAction> {
		self.active.map(HistoryAction::from_active)
	}

	pub fn is_orphaned(&self) -> bool {
		self.event_id.is_none()
	}
}
