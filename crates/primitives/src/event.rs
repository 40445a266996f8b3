use serde::{Deserialize, Serialize};

/// Workflow status of an analysis event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
	#[default]
	NotStarted,
	InProgress,
	AwaitingReview,
	ReadyForRefinement,
	NotComplete,
	Complete,
	/// Status reported by a newer server that this build does not know.
	#[serde(other)]
	Unknown,
}

/// The slice of an analysis event the history display needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
	pub id: String,
	#[serde(default)]
	pub status: EventStatus,
}

impl EventSummary {
	pub fn new(id: impl Into<String>, status: EventStatus) -> Self {
		Self {
			id: id.into(),
			status,
		}
	}

	pub fn is_complete(&self) -> bool {
		self.status == EventStatus::Complete
	}
}
