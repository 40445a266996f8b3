//! Action-intent tracking.
//!
//! The [`ActionIntentTracker`] owns the single pointer describing what would
//! happen if the analyst confirmed an undo or redo right now. Hovering a row
//! or one of the global buttons sets it, holding the modifier key switches it
//! to event mode, and leaving the row clears it.
//!
//! ```text
//!            hover_* / key_down / key_up
//!  NoIntent ─────────────────────────────► HasIntent(pointer)
//!     ▲                                        │  ▲
//!     └──────────────── clear ─────────────────┘  └─ hover_* / key_*
//! ```
//!
//! Confirming an action does not pass through the tracker; the dispatcher
//! reads [`ActionIntentTracker::current`] and leaves the pointer as is.

use std::fmt;
use std::sync::Arc;

use rewind_primitives::{HistoryAction, HistoryChange, HistoryEntry};
use tracing::trace;

use crate::HistoryContext;
use crate::filter::RowFilter;
use crate::ledger::{
	action_type_of, does_change_affect_event, does_entry_affect_event, last_included_of_type,
	next_priority_redo,
};

/// Which changes a pointer covers.
#[derive(Clone)]
pub enum ChangeScope {
	/// Every change (global mode).
	All,
	/// No change (event mode on an entry that does not touch the open event).
	Nothing,
	/// Only changes touching this event.
	Event(String),
	/// Changes accepted by the caller's row filter.
	Filtered(Arc<dyn RowFilter>),
}

impl ChangeScope {
	/// Scope for a pointer aimed at `entry`.
	///
	/// Outside event mode everything is included. In event mode only changes
	/// touching the open event are, and nothing is if the entry does not
	/// touch it (or no event is open).
	pub fn for_entry(entry: &HistoryEntry, open_event_id: Option<&str>, event_mode: bool) -> Self {
		if !event_mode {
			return Self::All;
		}
		match open_event_id {
			Some(event_id) if does_entry_affect_event(entry, event_id) => {
				Self::Event(event_id.to_string())
			}
			_ => Self::Nothing,
		}
	}

	pub fn includes(&self, change: &HistoryChange) -> bool {
		match self {
			Self::All => true,
			Self::Nothing => false,
			Self::Event(event_id) => does_change_affect_event(change, event_id),
			Self::Filtered(filter) => filter.includes_change(change),
		}
	}
}

impl fmt::Debug for ChangeScope {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::All => f.write_str("All"),
			Self::Nothing => f.write_str("Nothing"),
			Self::Event(event_id) => f.debug_tuple("Event").field(event_id).finish(),
			Self::Filtered(_) => f.write_str("Filtered(..)"),
		}
	}
}

/// The pointer: target entry, direction, and scope of the next action.
#[derive(Debug, Clone)]
pub struct ActionIntent {
	/// Targeted entry. `None` only when a modifier key press created the
	/// pointer before anything was hovered.
	pub entry_id: Option<String>,
	pub entry_type: Option<HistoryAction>,
	/// Scoped to the open event rather than the whole ledger.
	pub is_event_mode: bool,
	pub scope: ChangeScope,
}

impl ActionIntent {
	/// Global-mode pointer at `entry_id`.
	pub fn global(entry_id: impl Into<String>, entry_type: HistoryAction) -> Self {
		Self {
			entry_id: Some(entry_id.into()),
			entry_type: Some(entry_type),
			is_event_mode: false,
			scope: ChangeScope::All,
		}
	}

	pub fn is_change_included(&self, change: &HistoryChange) -> bool {
		self.scope.includes(change)
	}

	/// Returns `true` if the scope covers at least one change of `entry`.
	pub fn includes_entry(&self, entry: &HistoryEntry) -> bool {
		entry
			.changes
			.iter()
			.any(|change| self.is_change_included(change))
	}
}

/// Tracker state.
#[derive(Debug, Clone, Default)]
pub enum IntentState {
	#[default]
	NoIntent,
	HasIntent(ActionIntent),
}

/// Owner of the live action-intent pointer.
#[derive(Debug, Clone, Default)]
pub struct ActionIntentTracker {
	state: IntentState,
}

impl ActionIntentTracker {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn state(&self) -> &IntentState {
		&self.state
	}

	/// Returns the live pointer, if any.
	pub fn current(&self) -> Option<&ActionIntent> {
		match &self.state {
			IntentState::NoIntent => None,
			IntentState::HasIntent(intent) => Some(intent),
		}
	}

	/// Hovering the global undo button: aim at the last included undoable
	/// entry.
	pub fn hover_undo_button(&mut self, ctx: &HistoryContext) {
		let filter = ctx.row_filter();
		let target = last_included_of_type(
			ctx.entries(),
			|entry| filter.includes_entry(entry),
			HistoryAction::Undo,
		);
		self.aim_global(target, HistoryAction::Undo);
	}

	/// Hovering the global redo button: aim at the priority redo entry.
	pub fn hover_redo_button(&mut self, ctx: &HistoryContext) {
		self.aim_global(next_priority_redo(ctx.entries()), HistoryAction::Redo);
	}

	fn aim_global(&mut self, target: Option<&HistoryEntry>, action: HistoryAction) {
		self.state = match target {
			Some(entry) => {
				trace!(entry = %entry.id, %action, "intent: global button");
				IntentState::HasIntent(ActionIntent::global(entry.id.clone(), action))
			}
			None => {
				trace!(%action, "intent: nothing to target");
				IntentState::NoIntent
			}
		};
	}

	/// Hovering a ledger row.
	pub fn hover_entry(&mut self, ctx: &HistoryContext, entry: &HistoryEntry, modifier_held: bool) {
		let entry_type = action_type_of(entry);
		trace!(entry = %entry.id, %entry_type, event_mode = modifier_held, "intent: hover entry");
		self.state = IntentState::HasIntent(ActionIntent {
			entry_id: Some(entry.id.clone()),
			entry_type: Some(entry_type),
			is_event_mode: modifier_held,
			scope: ChangeScope::for_entry(entry, ctx.open_event_id(), modifier_held),
		});
	}

	/// Modifier pressed while focused on `entry`: switch to event mode,
	/// keeping the current target.
	pub fn key_down(&mut self, ctx: &HistoryContext, entry: &HistoryEntry, modifier_held: bool) {
		if !modifier_held {
			return;
		}
		let (entry_id, entry_type) = self.target();
		trace!(entry = %entry.id, "intent: event mode on");
		self.state = IntentState::HasIntent(ActionIntent {
			entry_id,
			entry_type,
			is_event_mode: true,
			scope: ChangeScope::for_entry(entry, ctx.open_event_id(), true),
		});
	}

	/// Modifier released: back to global mode under the caller's row filter,
	/// keeping the current target.
	pub fn key_up(&mut self, ctx: &HistoryContext, modifier_held: bool) {
		if modifier_held {
			return;
		}
		let (entry_id, entry_type) = self.target();
		trace!("intent: event mode off");
		self.state = IntentState::HasIntent(ActionIntent {
			entry_id,
			entry_type,
			is_event_mode: false,
			scope: ChangeScope::Filtered(ctx.shared_row_filter()),
		});
	}

	/// Mouse left a row or button.
	pub fn clear(&mut self) {
		if matches!(self.state, IntentState::HasIntent(_)) {
			trace!("intent: cleared");
		}
		self.state = IntentState::NoIntent;
	}

	fn target(&self) -> (Option<String>, Option<HistoryAction>) {
		match self.current() {
			Some(intent) => (intent.entry_id.clone(), intent.entry_type),
			None => (None, None),
		}
	}
}
