use std::fmt;

use serde::{Deserialize, Serialize};

/// Direction of a history operation.
///
/// An entry or change is classified [`Undo`] while it is applied and can be
/// reverted, and [`Redo`] once it has been reverted and can be reapplied.
///
/// [`Undo`]: HistoryAction::Undo
/// [`Redo`]: HistoryAction::Redo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryAction {
	Undo,
	Redo,
}

impl HistoryAction {
	/// Classifies a change by its `active` flag.
	pub const fn from_active(active: bool) -> Self {
		if active { Self::Undo } else { Self::Redo }
	}
}

impl fmt::Display for HistoryAction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Undo => f.write_str("undo"),
			Self::Redo => f.write_str("redo"),
		}
	}
}
