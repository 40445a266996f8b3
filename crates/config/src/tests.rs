use std::io::Write;

use rewind_primitives::{DEFAULT_CREATE_EVENT_SENTINEL, InvariantPolicy};

use super::*;

#[test]
fn empty_input_gives_defaults() {
	let config = Config::parse("").unwrap();
	assert_eq!(config, Config::default());
	assert_eq!(config.display.create_event_description, DEFAULT_CREATE_EVENT_SENTINEL);
	assert_eq!(config.ledger.invariants, InvariantPolicy::Tolerant);
}

#[test]
fn full_config() {
	let config = Config::parse(
		r#"
[display]
create-event-description = "New event"
create-event-user-action = "New event"

[display.irrelevant-user-actions]
"Update event preferred location" = true
"Change filter" = false

[ledger]
invariants = "strict"
"#,
	)
	.unwrap();

	assert_eq!(config.display.create_event_description, "New event");
	assert!(config.display.is_irrelevant("Update event preferred location"));
	assert!(!config.display.is_irrelevant("Change filter"));
	assert!(!config.display.is_irrelevant("Reject detection"));
	assert_eq!(config.ledger.invariants, InvariantPolicy::Strict);
}

#[test]
fn partial_display_section_keeps_other_defaults() {
	let config = Config::parse("[display]\ncreate-event-user-action = \"Build event\"\n").unwrap();
	assert_eq!(config.display.create_event_user_action, "Build event");
	assert_eq!(config.display.create_event_description, DEFAULT_CREATE_EVENT_SENTINEL);
}

#[test]
fn empty_sentinel_is_rejected() {
	let err = Config::parse("[display]\ncreate-event-description = \"\"\n").unwrap_err();
	assert!(matches!(err, ConfigError::EmptySentinel("create-event-description")));
}

#[test]
fn unknown_policy_is_a_parse_error() {
	let err = Config::parse("[ledger]\ninvariants = \"lenient\"\n").unwrap_err();
	assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn unknown_section_is_a_parse_error() {
	assert!(matches!(Config::parse("[theme]\nname = \"dark\"\n"), Err(ConfigError::Toml(_))));
}

#[test]
fn load_from_file() {
	let mut file = tempfile::NamedTempFile::new().unwrap();
	writeln!(file, "[ledger]\ninvariants = \"strict\"").unwrap();

	let config = Config::load(file.path()).unwrap();
	assert_eq!(config.ledger.invariants, InvariantPolicy::Strict);
	assert_eq!(Config::load_or_default(Some(file.path())).unwrap(), config);
}

#[test]
fn missing_file_reports_its_path() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("absent.toml");
	match Config::load(&path) {
		Err(ConfigError::Io { path: reported, .. }) => assert_eq!(reported, path),
		other => panic!("expected an I/O error, got {other:?}"),
	}
}

#[test]
fn default_path_ends_in_rewind_dir() {
	if let Some(path) = default_path() {
		assert!(path.ends_with("rewind/history.toml"));
	}
}
