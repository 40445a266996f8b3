//! Configuration for the rewind history engine.
//!
//! Configuration is written in TOML and holds the display rules used to
//! reshape ledger entries plus the ledger ingestion policy.
//!
//! # Configuration Files
//!
//! The default location is `$XDG_CONFIG_HOME/rewind/history.toml` (or the
//! platform equivalent). Every section is optional:
//!
//! ```toml
//! [display]
//! create-event-description = "Create event"
//! create-event-user-action = "Create event"
//!
//! [display.irrelevant-user-actions]
//! "Update event preferred location" = true
//!
//! [ledger]
//! invariants = "strict"
//! ```

pub mod error;

use std::path::{Path, PathBuf};

pub use error::{ConfigError, Result};
use rewind_primitives::{DisplayRules, InvariantPolicy};
use serde::Deserialize;
use tracing::debug;

/// File name looked up inside the `rewind` config directory.
pub const CONFIG_FILE_NAME: &str = "history.toml";

/// Parsed configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
	/// Rules for reshaping entries before display.
	pub display: DisplayRules,
	/// Ledger ingestion settings.
	pub ledger: LedgerConfig,
}

/// Ledger ingestion settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LedgerConfig {
	/// How invariant violations in an incoming ledger are treated.
	pub invariants: InvariantPolicy,
}

impl Config {
	/// Parses configuration from a TOML string.
	pub fn parse(input: &str) -> Result<Self> {
		let config: Self = toml::from_str(input)?;
		config.validate()?;
		Ok(config)
	}

	/// Loads configuration from `path`.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		let config = Self::parse(&content)?;
		debug!(path = %path.display(), hidden = config.display.irrelevant_user_actions.len(), "config: loaded");
		Ok(config)
	}

	/// Loads `path` if given, else the default location if it exists, else
	/// the defaults.
	pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
		if let Some(path) = path {
			return Self::load(path);
		}
		match default_path() {
			Some(path) if path.is_file() => Self::load(path),
			_ => Ok(Self::default()),
		}
	}

	fn validate(&self) -> Result<()> {
		if self.display.create_event_description.is_empty() {
			return Err(ConfigError::EmptySentinel("create-event-description"));
		}
		if self.display.create_event_user_action.is_empty() {
			return Err(ConfigError::EmptySentinel("create-event-user-action"));
		}
		Ok(())
	}
}

/// `<config dir>/rewind/history.toml`, or `None` if the platform has no
/// config directory.
pub fn default_path() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join("rewind").join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests;
