//! Row composition for the history display.
//!
//! Every time the ledger or the action-intent pointer changes, each row is
//! re-derived from scratch: the entry is reshaped for display, each change
//! gets a set of [`DisplayFlags`], and the row learns whether it sits on the
//! undo/redo boundary. Rendering consumes these values literally.

use rewind_primitives::{HistoryAction, HistoryChange, HistoryEntry};

use crate::HistoryContext;
use crate::format::{filter_irrelevant_changes, format_create_event_history};
use crate::intent::ActionIntent;
use crate::ledger::{
	does_change_affect_event, is_affected, last_included_index_of_type, next_priority_redo_index,
};

/// Display state of one change (or the OR of several).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayFlags {
	/// Confirming the current pointer would touch this change.
	pub is_affected: bool,
	/// Touches the open event.
	pub is_associated: bool,
	/// Touches an event marked complete.
	pub is_completed: bool,
	pub is_in_conflict: bool,
	/// Touches no event.
	pub is_orphaned: bool,
	/// Affected by an event-mode pointer.
	pub is_event_reset: bool,
	pub entry_type: HistoryAction,
}

impl DisplayFlags {
	/// Combines two flag sets: booleans are OR-ed, and `Undo` wins the entry
	/// type.
	#[must_use]
	pub fn merge(self, other: Self) -> Self {
		Self {
			is_affected: self.is_affected || other.is_affected,
			is_associated: self.is_associated || other.is_associated,
			is_completed: self.is_completed || other.is_completed,
			is_in_conflict: self.is_in_conflict || other.is_in_conflict,
			is_orphaned: self.is_orphaned || other.is_orphaned,
			is_event_reset: self.is_event_reset || other.is_event_reset,
			entry_type: if self.entry_type == HistoryAction::Undo {
				HistoryAction::Undo
			} else {
				other.entry_type
			},
		}
	}

	/// Folds child flags into a parent row's flags. `None` if no child has
	/// any.
	pub fn aggregate(flags: impl IntoIterator<Item = Self>) -> Option<Self> {
		flags.into_iter().reduce(Self::merge)
	}
}

/// Derives the flags of `change`, which lives in the ledger entry at `index`.
///
/// Returns `None` when the change's `active` flag is unknown; such a change
/// has no displayable row.
pub fn display_flags(
	change: &HistoryChange,
	index: usize,
	ctx: &HistoryContext,
	intent: Option<&ActionIntent>,
) -> Option<DisplayFlags> {
	let entry_type = change.action()?;
	let affected = is_affected(change, index, intent, ctx.entries());
	Some(DisplayFlags {
		is_affected: affected,
		is_associated: ctx
			.open_event_id()
			.is_some_and(|event_id| does_change_affect_event(change, event_id)),
		is_completed: change
			.event_id
			.as_deref()
			.is_some_and(|event_id| ctx.is_event_completed(event_id)),
		is_in_conflict: change.conflict_created,
		is_orphaned: change.is_orphaned(),
		is_event_reset: affected && intent.is_some_and(|intent| intent.is_event_mode),
		entry_type,
	})
}

/// Position of the undo/redo boundary in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Boundary {
	/// Last included undoable entry.
	pub next_undo: Option<usize>,
	/// Entry holding redo priority 1.
	pub next_redo: Option<usize>,
}

impl Boundary {
	pub fn compute(ctx: &HistoryContext) -> Self {
		let filter = ctx.row_filter();
		Self {
			next_undo: last_included_index_of_type(
				ctx.entries(),
				|entry| filter.includes_entry(entry),
				HistoryAction::Undo,
			),
			next_redo: next_priority_redo_index(ctx.entries()),
		}
	}

	pub fn is_undo_target(&self, index: usize) -> bool {
		self.next_undo == Some(index)
	}

	pub fn is_redo_target(&self, index: usize) -> bool {
		self.next_redo == Some(index)
	}

	/// Undo target sits directly above the redo target. With nothing left to
	/// undo, a redo target on the first row also counts.
	pub fn is_adjacent(&self) -> bool {
		match (self.next_undo, self.next_redo) {
			(Some(undo), Some(redo)) => undo + 1 == redo,
			(None, Some(redo)) => redo == 0,
			_ => false,
		}
	}

	/// Both targets fall on the row at `index`, so a single merged marker is
	/// drawn there.
	pub fn is_joined_at(&self, index: usize) -> bool {
		self.next_redo == Some(index) && self.next_undo == Some(index)
	}
}

/// Message and flags of one change line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRow {
	pub change_id: String,
	pub message: String,
	pub flags: Option<DisplayFlags>,
}

/// What a row renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowBody {
	/// Single-change entry. `change` is `None` if every change was filtered
	/// out.
	Single { change: Option<ChangeRow> },
	/// Collapsible parent row for multi-change and event-creation entries.
	/// `summary` also covers the creation change promoted to the
	/// description.
	Multiple {
		summary: Option<DisplayFlags>,
		children: Vec<ChangeRow>,
	},
	/// Entry excluded by the row filter; only its first message is shown.
	Hidden { message: String },
}

/// One composed row of the history display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
	pub index: usize,
	/// The entry as displayed (irrelevant changes removed, creation entries
	/// reformatted).
	pub entry: HistoryEntry,
	/// The ledger entry as received. Activation must use this one: the
	/// displayed entry of a creation row may have lost its only change.
	pub source: HistoryEntry,
	pub is_first_row: bool,
	pub undo_target: bool,
	pub redo_target: bool,
	pub undo_redo_adjacent: bool,
	pub undo_redo_joined: bool,
	pub body: RowBody,
}

impl HistoryRow {
	/// Flags for the whole row: the single change's, or the aggregate of the
	/// children's.
	pub fn flags(&self) -> Option<DisplayFlags> {
		match &self.body {
			RowBody::Single { change } => change.as_ref().and_then(|change| change.flags),
			RowBody::Multiple { summary, .. } => *summary,
			RowBody::Hidden { .. } => None,
		}
	}
}

/// Composes every row of the ledger against the current pointer.
pub fn compose_rows(ctx: &HistoryContext, intent: Option<&ActionIntent>) -> Vec<HistoryRow> {
	let boundary = Boundary::compute(ctx);
	let adjacent = boundary.is_adjacent();
	let rules = ctx.rules();

	ctx.entries()
		.iter()
		.enumerate()
		.map(|(index, original)| {
			let filtered = filter_irrelevant_changes(original, rules);
			let is_create_event = filtered.description == rules.create_event_description;
			// The promoted creation change still counts toward the parent row.
			let (entry, unformatted) = if is_create_event {
				(format_create_event_history(&filtered, rules), Some(filtered))
			} else {
				(filtered, None)
			};

			let change_row = |change: &HistoryChange| ChangeRow {
				change_id: change.id.clone(),
				message: change.user_action().to_string(),
				flags: display_flags(change, index, ctx, intent),
			};

			let body = if !ctx.row_filter().includes_entry(&entry) {
				RowBody::Hidden {
					message: entry
						.changes
						.first()
						.map(|change| change.user_action().to_string())
						.unwrap_or_default(),
				}
			} else if entry.changes.len() > 1 || is_create_event {
				let summary = DisplayFlags::aggregate(
					unformatted
						.as_ref()
						.unwrap_or(&entry)
						.changes
						.iter()
						.filter_map(|change| display_flags(change, index, ctx, intent)),
				);
				RowBody::Multiple {
					summary,
					children: entry.changes.iter().map(change_row).collect(),
				}
			} else {
				RowBody::Single {
					change: entry.changes.first().map(change_row),
				}
			};

			HistoryRow {
				index,
				is_first_row: index == 0,
				undo_target: boundary.is_undo_target(index),
				redo_target: boundary.is_redo_target(index),
				undo_redo_adjacent: adjacent,
				undo_redo_joined: boundary.is_joined_at(index),
				entry,
				source: original.clone(),
				body,
			}
		})
		.collect()
}
