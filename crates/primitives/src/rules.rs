use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Default description and user-action text identifying event creation.
pub const DEFAULT_CREATE_EVENT_SENTINEL: &str = "Create event";

/// Externally supplied rules for reshaping entries before display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DisplayRules {
	/// User-action strings mapped to whether changes carrying them are hidden.
	pub irrelevant_user_actions: HashMap<String, bool>,
	/// Entry description that marks an event-creation entry.
	pub create_event_description: String,
	/// Substring of a change's user action that marks the creation change.
	pub create_event_user_action: String,
}

impl Default for DisplayRules {
	fn default() -> Self {
		Self {
			irrelevant_user_actions: HashMap::new(),
			create_event_description: DEFAULT_CREATE_EVENT_SENTINEL.to_string(),
			create_event_user_action: DEFAULT_CREATE_EVENT_SENTINEL.to_string(),
		}
	}
}

impl DisplayRules {
	/// Adds a user action to the denylist.
	#[must_use]
	pub fn hiding(mut self, user_action: impl Into<String>) -> Self {
		self.irrelevant_user_actions.insert(user_action.into(), true);
		self
	}

	/// Returns `true` if changes with this user action are noise.
	pub fn is_irrelevant(&self, user_action: &str) -> bool {
		self.irrelevant_user_actions
			.get(user_action)
			.copied()
			.unwrap_or(false)
	}
}

/// How ledger invariant violations are treated at ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvariantPolicy {
	/// Log each violation and keep the ledger.
	#[default]
	Tolerant,
	/// Reject the ledger on the first violation.
	Strict,
}
