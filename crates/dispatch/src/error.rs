//! Error types for history mutations.

use std::fmt;

use thiserror::Error;

/// The mutation calls exposed by a history service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
	/// Global undo of a number of steps.
	Undo,
	/// Global redo of a number of steps.
	Redo,
	/// Global undo back to a specific entry.
	UndoById,
	/// Global redo up to a specific entry.
	RedoById,
	/// Event-scoped undo of a number of steps.
	UndoEventHistory,
	/// Event-scoped redo of a number of steps.
	RedoEventHistory,
	/// Event-scoped undo back to a specific entry.
	UndoEventHistoryById,
	/// Event-scoped redo up to a specific entry.
	RedoEventHistoryById,
}

impl Operation {
	/// Returns `true` for the event-scoped calls.
	pub const fn is_event_scoped(self) -> bool {
		matches!(
			self,
			Self::UndoEventHistory
				| Self::RedoEventHistory
				| Self::UndoEventHistoryById
				| Self::RedoEventHistoryById
		)
	}
}

impl fmt::Display for Operation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Undo => "undo",
			Self::Redo => "redo",
			Self::UndoById => "undo by id",
			Self::RedoById => "redo by id",
			Self::UndoEventHistory => "undo event history",
			Self::RedoEventHistory => "redo event history",
			Self::UndoEventHistoryById => "undo event history by id",
			Self::RedoEventHistoryById => "redo event history by id",
		})
	}
}

/// Errors surfaced by a history service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
	/// The service refused the mutation.
	#[error("history service rejected {operation}: {reason}")]
	Rejected {
		/// The call that was refused.
		operation: Operation,
		/// Reason reported by the service.
		reason: String,
	},
	/// The service could not be reached.
	#[error("history service unavailable: {0}")]
	Unavailable(String),
}

/// Result type for history mutations.
pub type Result<T> = std::result::Result<T, Error>;
