//! Caller-supplied handlers for plain (global) row activation.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use rewind_primitives::HistoryAction;

use crate::{HistoryService, Result};

/// Action run when a row is activated without the event-mode modifier.
#[async_trait]
pub trait EntryHandler: Send + Sync {
	/// Performs the action for the activated entry.
	async fn perform(&self, entry_id: &str) -> Result<()>;
}

/// Lookup table from an entry's action type to its handler.
#[derive(Clone, Default)]
pub struct ActionHandlers {
	handlers: HashMap<HistoryAction, Arc<dyn EntryHandler>>,
}

impl ActionHandlers {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Table that jumps straight to the activated entry with the global
	/// by-id calls.
	pub fn by_id(service: Arc<dyn HistoryService>) -> Self {
		Self::new()
			.with(HistoryAction::Undo, ServiceById::new(Arc::clone(&service), HistoryAction::Undo))
			.with(HistoryAction::Redo, ServiceById::new(service, HistoryAction::Redo))
	}

	/// Registers the handler for `action`, replacing any previous one.
	#[must_use]
	pub fn with(mut self, action: HistoryAction, handler: impl EntryHandler + 'static) -> Self {
		self.handlers.insert(action, Arc::new(handler));
		self
	}

	/// Returns the handler for `action`.
	pub fn get(&self, action: HistoryAction) -> Option<&Arc<dyn EntryHandler>> {
		self.handlers.get(&action)
	}
}

impl fmt::Debug for ActionHandlers {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_set().entries(self.handlers.keys()).finish()
	}
}

/// Handler issuing the global `undo_by_id` / `redo_by_id` call.
pub struct ServiceById {
	service: Arc<dyn HistoryService>,
	action: HistoryAction,
}

impl ServiceById {
	/// Creates a handler for `action` backed by `service`.
	pub fn new(service: Arc<dyn HistoryService>, action: HistoryAction) -> Self {
		Self { service, action }
	}
}

#[async_trait]
impl EntryHandler for ServiceById {
	async fn perform(&self, entry_id: &str) -> Result<()> {
		match self.action {
			HistoryAction::Undo => self.service.undo_by_id(entry_id).await,
			HistoryAction::Redo => self.service.redo_by_id(entry_id).await,
		}
	}
}
