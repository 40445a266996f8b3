//! Undo/redo mutation dispatch.
//!
//! This crate sequences calls to an external [`HistoryService`]; it does not
//! implement transport. The service stays authoritative: no optimistic state
//! is applied here, and every successful call is expected to be followed by a
//! fresh ledger push from which all display state is re-derived.
//!
//! * [`HistoryDispatcher`]: the eight mutation calls plus gesture mapping.
//! * [`PendingCounter`]: "N operations pending" for global quantity calls.
//! * [`ActionHandlers`]: caller-supplied handlers for plain row clicks.

#![warn(missing_docs)]

pub mod dispatcher;
pub mod error;
pub mod handlers;
pub mod pending;
pub mod service;

pub use dispatcher::{Dispatched, HistoryDispatcher, Target};
pub use error::{Error, Operation, Result};
pub use handlers::{ActionHandlers, EntryHandler, ServiceById};
pub use pending::{PendingCounter, PendingGuard};
pub use service::HistoryService;
