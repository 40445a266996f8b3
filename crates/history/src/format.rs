//! Reshaping of ledger entries for display.

use rewind_primitives::{DisplayRules, HistoryEntry};

/// Drops changes whose user action is on the denylist.
///
/// This is a projection: applying it twice yields the same entry.
pub fn filter_irrelevant_changes(entry: &HistoryEntry, rules: &DisplayRules) -> HistoryEntry {
	HistoryEntry {
		id: entry.id.clone(),
		description: entry.description.clone(),
		changes: entry
			.changes
			.iter()
			.filter(|change| !rules.is_irrelevant(change.user_action()))
			.cloned()
			.collect(),
		redo_priority_order: entry.redo_priority_order,
	}
}

/// Promotes the event-creation change of an entry to its description.
///
/// When exactly one change's user action contains the creation sentinel,
/// that change is removed from the list and its user action replaces the
/// description. With no match, or an ambiguous one, the entry is returned
/// unchanged.
pub fn format_create_event_history(entry: &HistoryEntry, rules: &DisplayRules) -> HistoryEntry {
	let sentinel = rules.create_event_user_action.as_str();
	let mut matches = entry
		.changes
		.iter()
		.enumerate()
		.filter(|(_, change)| change.user_action().contains(sentinel))
		.map(|(index, _)| index);

	let (Some(index), None) = (matches.next(), matches.next()) else {
		return entry.clone();
	};

	let mut formatted = entry.clone();
	let creation = formatted.changes.remove(index);
	formatted.description = creation.hypothesis_change_information.user_action;
	formatted
}
