//! Pure scans over an ordered history ledger.
//!
//! The ledger is ordered oldest first; an entry's index is its position in
//! time. Undo walks backward from the undo/redo boundary and redo walks
//! forward from it, so "the entry an undo would reach" is always found by
//! scanning from the end, and "the entry a redo would reach" is the one the
//! server flags with `redo_priority_order == 1`.
//!
//! Lookups return `None` where a sentinel index would otherwise be used.

use std::collections::HashSet;
use std::fmt;

use rewind_primitives::{HistoryAction, HistoryChange, HistoryEntry};
use tracing::trace;

use crate::intent::ActionIntent;

/// Counts entries that can perform `action`.
pub fn count_of_type(entries: &[HistoryEntry], action: HistoryAction) -> usize {
	entries
		.iter()
		.filter(|entry| can_perform_action(&entry.changes, action) == Some(true))
		.count()
}

/// Returns whether any change in `changes` can perform `action`.
///
/// `None` means "cannot determine" (an empty change list) and must not be
/// read as `false` by callers that distinguish the two.
pub fn can_perform_action(changes: &[HistoryChange], action: HistoryAction) -> Option<bool> {
	if changes.is_empty() {
		return None;
	}
	let wanted = action == HistoryAction::Undo;
	Some(changes.iter().any(|change| change.active == Some(wanted)))
}

/// Classifies an entry: [`HistoryAction::Undo`] if it holds any undoable
/// change, otherwise [`HistoryAction::Redo`].
pub fn action_type_of(entry: &HistoryEntry) -> HistoryAction {
	match can_perform_action(&entry.changes, HistoryAction::Undo) {
		Some(true) => HistoryAction::Undo,
		_ => HistoryAction::Redo,
	}
}

/// Position of the entry with `entry_id`. With duplicate ids the last match
/// wins.
pub fn index_of(entries: &[HistoryEntry], entry_id: &str) -> Option<usize> {
	entries.iter().rposition(|entry| entry.id == entry_id)
}

/// Index of the last entry of type `action` accepted by `is_included`.
pub fn last_included_index_of_type(
	entries: &[HistoryEntry],
	is_included: impl Fn(&HistoryEntry) -> bool,
	action: HistoryAction,
) -> Option<usize> {
	entries
		.iter()
		.rposition(|entry| action_type_of(entry) == action && is_included(entry))
}

/// Entry form of [`last_included_index_of_type`].
pub fn last_included_of_type(
	entries: &[HistoryEntry],
	is_included: impl Fn(&HistoryEntry) -> bool,
	action: HistoryAction,
) -> Option<&HistoryEntry> {
	last_included_index_of_type(entries, is_included, action).map(|index| &entries[index])
}

/// The entry a global redo would reapply next.
///
/// If several entries claim priority 1 the first one wins. The violation is
/// reported once at ingestion by [`check_invariants`].
pub fn next_priority_redo(entries: &[HistoryEntry]) -> Option<&HistoryEntry> {
	next_priority_redo_index(entries).map(|index| &entries[index])
}

/// Index form of [`next_priority_redo`].
pub fn next_priority_redo_index(entries: &[HistoryEntry]) -> Option<usize> {
	let mut matches = entries
		.iter()
		.enumerate()
		.filter(|(_, entry)| entry.is_next_redo())
		.map(|(index, _)| index);
	let first = matches.next()?;
	if let Some(second) = matches.next() {
		trace!(
			first,
			second,
			first_id = %entries[first].id,
			second_id = %entries[second].id,
			"multiple entries hold redo priority 1; using the first"
		);
	}
	Some(first)
}

/// Returns `true` if any change in the entry touches `event_id`.
pub fn does_entry_affect_event(entry: &HistoryEntry, event_id: &str) -> bool {
	entry
		.changes
		.iter()
		.any(|change| does_change_affect_event(change, event_id))
}

/// Returns `true` if the change touches `event_id`. Orphaned changes touch
/// no event.
pub fn does_change_affect_event(change: &HistoryChange, event_id: &str) -> bool {
	change.event_id.as_deref() == Some(event_id)
}

/// Whether confirming `intent` right now would touch `change`, which lives in
/// the entry at `index`.
///
/// An undo targeting index `k` reverts every matching change at index `>= k`
/// (it walks back from the boundary to `k`); a redo targeting `k` reapplies
/// every matching change at index `<= k`.
pub fn is_affected(
	change: &HistoryChange,
	index: usize,
	intent: Option<&ActionIntent>,
	entries: &[HistoryEntry],
) -> bool {
	let Some(intent) = intent else {
		return false;
	};
	let (Some(entry_id), Some(entry_type)) = (intent.entry_id.as_deref(), intent.entry_type) else {
		return false;
	};
	if change.action() != Some(entry_type) || !intent.is_change_included(change) {
		return false;
	}
	// A target missing from a freshly pushed ledger affects nothing.
	let Some(hover_index) = index_of(entries, entry_id) else {
		return false;
	};
	match entry_type {
		HistoryAction::Undo => hover_index <= index,
		HistoryAction::Redo => hover_index >= index,
	}
}

/// A ledger invariant broken by a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerViolation {
	/// An entry carries no changes.
	EmptyChanges { entry_id: String },
	/// Two entries share an id.
	DuplicateEntryId { entry_id: String },
	/// More than one entry holds redo priority 1.
	DuplicateRedoPriority { first: usize, second: usize },
	/// The last undoable entry sits after the priority redo entry.
	BoundaryAfterRedo { undo_index: usize, redo_index: usize },
}

impl fmt::Display for LedgerViolation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::EmptyChanges { entry_id } => write!(f, "entry {entry_id} has no changes"),
			Self::DuplicateEntryId { entry_id } => write!(f, "entry id {entry_id} appears more than once"),
			Self::DuplicateRedoPriority { first, second } => {
				write!(f, "entries at {first} and {second} both hold redo priority 1")
			}
			Self::BoundaryAfterRedo {
				undo_index,
				redo_index,
			} => write!(
				f,
				"last undoable entry {undo_index} is after the priority redo entry {redo_index}"
			),
		}
	}
}

/// Lists every invariant the ledger breaks, in ledger order.
pub fn check_invariants(entries: &[HistoryEntry]) -> Vec<LedgerViolation> {
	let mut violations = Vec::new();
	let mut seen = HashSet::new();
	let mut redo_index: Option<usize> = None;

	for (index, entry) in entries.iter().enumerate() {
		if entry.changes.is_empty() {
			violations.push(LedgerViolation::EmptyChanges {
				entry_id: entry.id.clone(),
			});
		}
		if !seen.insert(entry.id.as_str()) {
			violations.push(LedgerViolation::DuplicateEntryId {
				entry_id: entry.id.clone(),
			});
		}
		if entry.is_next_redo() {
			match redo_index {
				Some(first) => violations.push(LedgerViolation::DuplicateRedoPriority {
					first,
					second: index,
				}),
				None => redo_index = Some(index),
			}
		}
	}

	let undo_index = entries
		.iter()
		.rposition(|entry| can_perform_action(&entry.changes, HistoryAction::Undo) == Some(true));
	if let (Some(undo_index), Some(redo_index)) = (undo_index, redo_index)
		&& undo_index > redo_index
	{
		violations.push(LedgerViolation::BoundaryAfterRedo {
			undo_index,
			redo_index,
		});
	}

	violations
}
