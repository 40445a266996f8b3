//! Error types for ledger ingestion.

use thiserror::Error;

use crate::ledger::LedgerViolation;

/// Errors raised when a ledger snapshot is ingested under a strict policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
	/// The snapshot breaks a ledger invariant.
	#[error("ledger invariant violated: {0}")]
	Invariant(LedgerViolation),
}

/// Result type for ledger ingestion.
pub type Result<T> = std::result::Result<T, LedgerError>;
