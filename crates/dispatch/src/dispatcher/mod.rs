//! Mutation dispatcher and gesture mapping.
//!
//! ```text
//! gesture ──► HistoryDispatcher ──► HistoryService (external)
//!              │   pending++ before await, pending-- on completion
//!              └─ reads the live ActionIntent, never writes it
//! ```
//!
//! Concurrent calls are not serialized: two rapid undos are both in flight
//! and the counter reads 2 until both settle. Completion order is the
//! service's concern; display state is re-derived from the next ledger.

use std::sync::Arc;

use rewind_history::{ActionIntent, action_type_of};
use rewind_primitives::{HistoryAction, HistoryEntry};
use tokio::sync::watch;
use tracing::{debug, trace};

use crate::{ActionHandlers, HistoryService, Operation, PendingCounter, Result};

/// What a dispatched call was aimed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
	/// A number of steps from the boundary.
	Quantity(u32),
	/// A specific ledger entry.
	Entry(String),
}

/// Record of the call a gesture resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
	/// One of the service's mutation calls.
	Service {
		/// The call made.
		operation: Operation,
		/// Its argument.
		target: Target,
	},
	/// A caller-supplied handler from [`ActionHandlers`].
	Handler {
		/// Table key the handler was found under.
		action: HistoryAction,
		/// Entry passed to the handler.
		entry_id: String,
	},
}

impl Dispatched {
	fn service(operation: Operation, target: Target) -> Self {
		trace!(%operation, event_scoped = operation.is_event_scoped(), "dispatch: service call done");
		Self::Service { operation, target }
	}

	/// Returns `true` if the gesture resolved to an event-scoped call.
	/// Handlers always run at global scope.
	pub fn is_event_scoped(&self) -> bool {
		match self {
			Self::Service { operation, .. } => operation.is_event_scoped(),
			Self::Handler { .. } => false,
		}
	}
}

/// Issues history mutations and tracks outstanding global calls.
#[derive(Clone)]
pub struct HistoryDispatcher {
	service: Arc<dyn HistoryService>,
	pending: PendingCounter,
}

impl std::fmt::Debug for HistoryDispatcher {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("HistoryDispatcher")
			.field("pending", &self.pending.get())
			.finish_non_exhaustive()
	}
}

impl HistoryDispatcher {
	/// Creates a dispatcher over `service`.
	pub fn new(service: Arc<dyn HistoryService>) -> Self {
		Self {
			service,
			pending: PendingCounter::new(),
		}
	}

	/// Number of global quantity calls awaiting the service.
	pub fn pending(&self) -> usize {
		self.pending.get()
	}

	/// Receiver for "N operations pending" displays.
	pub fn subscribe_pending(&self) -> watch::Receiver<usize> {
		self.pending.subscribe()
	}

	/// Global undo of `quantity` steps. Counted as pending while in flight.
	pub async fn undo(&self, quantity: u32) -> Result<()> {
		let _pending = self.pending.begin();
		trace!(quantity, pending = self.pending.get(), "dispatch: undo");
		self.service
			.undo(quantity)
			.await
			.inspect_err(|error| debug!(%error, quantity, "undo failed"))
	}

	/// Global redo of `quantity` steps. Counted as pending while in flight.
	pub async fn redo(&self, quantity: u32) -> Result<()> {
		let _pending = self.pending.begin();
		trace!(quantity, pending = self.pending.get(), "dispatch: redo");
		self.service
			.redo(quantity)
			.await
			.inspect_err(|error| debug!(%error, quantity, "redo failed"))
	}

	/// Global undo back to `entry_id`.
	pub async fn undo_by_id(&self, entry_id: &str) -> Result<()> {
		trace!(entry = entry_id, "dispatch: undo by id");
		self.service
			.undo_by_id(entry_id)
			.await
			.inspect_err(|error| debug!(%error, entry = entry_id, "undo by id failed"))
	}

	/// Global redo up to `entry_id`.
	pub async fn redo_by_id(&self, entry_id: &str) -> Result<()> {
		trace!(entry = entry_id, "dispatch: redo by id");
		self.service
			.redo_by_id(entry_id)
			.await
			.inspect_err(|error| debug!(%error, entry = entry_id, "redo by id failed"))
	}

	/// Event-scoped undo of `quantity` steps.
	pub async fn undo_event_history(&self, quantity: u32) -> Result<()> {
		trace!(quantity, "dispatch: undo event history");
		self.service
			.undo_event_history(quantity)
			.await
			.inspect_err(|error| debug!(%error, quantity, "undo event history failed"))
	}

	/// Event-scoped redo of `quantity` steps.
	pub async fn redo_event_history(&self, quantity: u32) -> Result<()> {
		trace!(quantity, "dispatch: redo event history");
		self.service
			.redo_event_history(quantity)
			.await
			.inspect_err(|error| debug!(%error, quantity, "redo event history failed"))
	}

	/// Event-scoped undo back to `entry_id`.
	pub async fn undo_event_history_by_id(&self, entry_id: &str) -> Result<()> {
		trace!(entry = entry_id, "dispatch: undo event history by id");
		self.service
			.undo_event_history_by_id(entry_id)
			.await
			.inspect_err(|error| debug!(%error, entry = entry_id, "undo event history by id failed"))
	}

	/// Event-scoped redo up to `entry_id`.
	pub async fn redo_event_history_by_id(&self, entry_id: &str) -> Result<()> {
		trace!(entry = entry_id, "dispatch: redo event history by id");
		self.service
			.redo_event_history_by_id(entry_id)
			.await
			.inspect_err(|error| debug!(%error, entry = entry_id, "redo event history by id failed"))
	}

	/// Activates a ledger row (click, modifier-click, or Enter).
	///
	/// With the modifier held and an event-mode pointer that covers the
	/// entry, the event-scoped by-id call matching the entry's type is
	/// issued. Otherwise the handler registered for that type runs. Returns
	/// `Ok(None)` if no handler is registered.
	pub async fn activate_entry(
		&self,
		entry: &HistoryEntry,
		modifier_held: bool,
		intent: Option<&ActionIntent>,
		handlers: &ActionHandlers,
	) -> Result<Option<Dispatched>> {
		let action = action_type_of(entry);
		let event_scoped =
			modifier_held && intent.is_some_and(|intent| intent.is_event_mode && intent.includes_entry(entry));

		if event_scoped {
			let operation = match action {
				HistoryAction::Undo => {
					self.undo_event_history_by_id(&entry.id).await?;
					Operation::UndoEventHistoryById
				}
				HistoryAction::Redo => {
					self.redo_event_history_by_id(&entry.id).await?;
					Operation::RedoEventHistoryById
				}
			};
			return Ok(Some(Dispatched::service(operation, Target::Entry(entry.id.clone()))));
		}

		let Some(handler) = handlers.get(action) else {
			trace!(entry = %entry.id, %action, "dispatch: no handler registered");
			return Ok(None);
		};
		trace!(entry = %entry.id, %action, "dispatch: global handler");
		handler.perform(&entry.id).await?;
		Ok(Some(Dispatched::Handler {
			action,
			entry_id: entry.id.clone(),
		}))
	}

	/// Activates the global undo or redo button (or its shortcut) for one
	/// step. The modifier selects the event-scoped call.
	pub async fn activate_button(&self, action: HistoryAction, modifier_held: bool) -> Result<Dispatched> {
		let operation = match (action, modifier_held) {
			(HistoryAction::Undo, false) => {
				self.undo(1).await?;
				Operation::Undo
			}
			(HistoryAction::Redo, false) => {
				self.redo(1).await?;
				Operation::Redo
			}
			(HistoryAction::Undo, true) => {
				self.undo_event_history(1).await?;
				Operation::UndoEventHistory
			}
			(HistoryAction::Redo, true) => {
				self.redo_event_history(1).await?;
				Operation::RedoEventHistory
			}
		};
		Ok(Dispatched::service(operation, Target::Quantity(1)))
	}
}

#[cfg(test)]
mod tests;
