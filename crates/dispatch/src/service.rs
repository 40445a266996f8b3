//! The external history service.

use async_trait::async_trait;

use crate::Result;

/// Mutating endpoint of the service that owns the ledger.
///
/// Implementations are backed by a network client (or a fake in tests). A
/// successful call is followed by a new ledger snapshot delivered through
/// whatever channel feeds the history context; the return value only
/// reports success or failure.
#[async_trait]
pub trait HistoryService: Send + Sync {
	/// Undoes `quantity` steps at global scope.
	async fn undo(&self, quantity: u32) -> Result<()>;

	/// Redoes `quantity` steps at global scope.
	async fn redo(&self, quantity: u32) -> Result<()>;

	/// Undoes back to and including the entry `entry_id`.
	async fn undo_by_id(&self, entry_id: &str) -> Result<()>;

	/// Redoes up to and including the entry `entry_id`.
	async fn redo_by_id(&self, entry_id: &str) -> Result<()>;

	/// Undoes `quantity` steps touching the open event.
	async fn undo_event_history(&self, quantity: u32) -> Result<()>;

	/// Redoes `quantity` steps touching the open event.
	async fn redo_event_history(&self, quantity: u32) -> Result<()>;

	/// Undoes the open event's changes back to the entry `entry_id`.
	async fn undo_event_history_by_id(&self, entry_id: &str) -> Result<()>;

	/// Redoes the open event's changes up to the entry `entry_id`.
	async fn redo_event_history_by_id(&self, entry_id: &str) -> Result<()>;
}
