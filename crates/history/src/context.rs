//! Snapshot of everything the history engine reads.

use std::fmt;
use std::sync::Arc;

use rewind_primitives::{DisplayRules, EventSummary, HistoryEntry, InvariantPolicy};
use tracing::{debug, warn};

use crate::error::{LedgerError, Result};
use crate::filter::{IncludeAll, RowFilter};
use crate::ledger::check_invariants;

/// Immutable view of the ledger and its collaborators for one derivation
/// pass.
///
/// The ledger, open event and events-in-range list are owned by external
/// collaborators; a new context is built whenever any of them changes.
#[derive(Clone)]
pub struct HistoryContext {
	entries: Vec<HistoryEntry>,
	open_event_id: Option<String>,
	events_in_time_range: Vec<EventSummary>,
	row_filter: Arc<dyn RowFilter>,
	rules: DisplayRules,
}

impl HistoryContext {
	/// Wraps a ledger snapshot without validating it.
	pub fn new(entries: Vec<HistoryEntry>) -> Self {
		Self {
			entries,
			open_event_id: None,
			events_in_time_range: Vec::new(),
			row_filter: Arc::new(IncludeAll),
			rules: DisplayRules::default(),
		}
	}

	/// Wraps a ledger snapshot after checking its invariants.
	///
	/// Under [`InvariantPolicy::Tolerant`] every violation is logged and the
	/// snapshot is kept; under [`InvariantPolicy::Strict`] the first one is
	/// returned as an error.
	pub fn ingest(entries: Vec<HistoryEntry>, policy: InvariantPolicy) -> Result<Self> {
		let violations = check_invariants(&entries);
		debug!(entries = entries.len(), violations = violations.len(), ?policy, "ledger ingested");
		match policy {
			InvariantPolicy::Strict => {
				if let Some(violation) = violations.into_iter().next() {
					return Err(LedgerError::Invariant(violation));
				}
			}
			InvariantPolicy::Tolerant => {
				for violation in &violations {
					warn!(%violation, "ledger invariant violated");
				}
			}
		}
		Ok(Self::new(entries))
	}

	#[must_use]
	pub fn with_open_event(mut self, event_id: impl Into<String>) -> Self {
		self.open_event_id = Some(event_id.into());
		self
	}

	#[must_use]
	pub fn with_events(mut self, events: Vec<EventSummary>) -> Self {
		self.events_in_time_range = events;
		self
	}

	#[must_use]
	pub fn with_row_filter(mut self, filter: impl RowFilter + 'static) -> Self {
		self.row_filter = Arc::new(filter);
		self
	}

	#[must_use]
	pub fn with_rules(mut self, rules: DisplayRules) -> Self {
		self.rules = rules;
		self
	}

	pub fn entries(&self) -> &[HistoryEntry] {
		&self.entries
	}

	pub fn open_event_id(&self) -> Option<&str> {
		self.open_event_id.as_deref()
	}

	pub fn events_in_time_range(&self) -> &[EventSummary] {
		&self.events_in_time_range
	}

	pub fn row_filter(&self) -> &dyn RowFilter {
		self.row_filter.as_ref()
	}

	/// Shared handle to the row filter, for pointers that outlive this pass.
	pub fn shared_row_filter(&self) -> Arc<dyn RowFilter> {
		Arc::clone(&self.row_filter)
	}

	pub fn rules(&self) -> &DisplayRules {
		&self.rules
	}

	/// Looks up an entry by id (last match wins).
	pub fn entry(&self, entry_id: &str) -> Option<&HistoryEntry> {
		self.entries.iter().rev().find(|entry| entry.id == entry_id)
	}

	/// Returns `true` if `event_id` names an event in range marked complete.
	pub fn is_event_completed(&self, event_id: &str) -> bool {
		self.events_in_time_range
			.iter()
			.find(|event| event.id == event_id)
			.is_some_and(EventSummary::is_complete)
	}
}

impl fmt::Debug for HistoryContext {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("HistoryContext")
			.field("entries", &self.entries.len())
			.field("open_event_id", &self.open_event_id)
			.field("events_in_time_range", &self.events_in_time_range.len())
			.field("rules", &self.rules)
			.finish_non_exhaustive()
	}
}
