//! Offline inspector for history ledger snapshots.
//!
//! Loads a ledger (JSON array of entries), applies the configured display
//! rules, optionally places the action-intent pointer, and prints the
//! composed rows.

mod render;

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use rewind_config::Config;
use rewind_history::{ActionIntentTracker, HistoryContext, compose_rows};
use rewind_primitives::{EventSummary, HistoryEntry};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

/// Global button to hover.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Button {
	Undo,
	Redo,
}

/// Inspector command line arguments.
#[derive(Parser, Debug)]
#[command(name = "rewind-inspect")]
#[command(about = "Print the history display rows for a ledger snapshot")]
struct Args {
	/// Ledger snapshot (JSON array of history entries)
	#[arg(short, long, value_name = "PATH")]
	ledger: PathBuf,

	/// Configuration file (defaults to the user config location)
	#[arg(short, long, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Events in the current time range (JSON array)
	#[arg(short, long, value_name = "PATH")]
	events: Option<PathBuf>,

	/// Id of the open event
	#[arg(long, value_name = "ID")]
	open_event: Option<String>,

	/// Hover the entry with this id
	#[arg(long, value_name = "ENTRY_ID", conflicts_with = "hover_button")]
	hover: Option<String>,

	/// Hover a global undo/redo button
	#[arg(long, value_enum)]
	hover_button: Option<Button>,

	/// Hold the event-mode modifier while hovering
	#[arg(long, requires = "hover")]
	event_mode: bool,

	/// Verbose logging
	#[arg(short, long)]
	verbose: bool,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn std::error::Error>> {
	let content = std::fs::read_to_string(path)
		.map_err(|error| format!("failed to read {}: {error}", path.display()))?;
	Ok(serde_json::from_str(&content)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	let subscriber = tracing_subscriber::fmt()
		.with_max_level(if args.verbose {
			tracing::Level::DEBUG
		} else {
			tracing::Level::INFO
		})
		.with_writer(std::io::stderr)
		.finish();

	tracing::subscriber::set_global_default(subscriber)?;

	let config = Config::load_or_default(args.config.as_deref())?;
	let entries: Vec<HistoryEntry> = read_json(&args.ledger)?;
	info!(ledger = %args.ledger.display(), entries = entries.len(), "Loaded ledger");

	let mut ctx = HistoryContext::ingest(entries, config.ledger.invariants)?.with_rules(config.display);
	if let Some(path) = &args.events {
		let events: Vec<EventSummary> = read_json(path)?;
		debug!(events = events.len(), "Loaded events");
		ctx = ctx.with_events(events);
	}
	if let Some(event_id) = args.open_event {
		ctx = ctx.with_open_event(event_id);
	}

	let mut tracker = ActionIntentTracker::new();
	match (&args.hover, args.hover_button) {
		(Some(entry_id), _) => match ctx.entry(entry_id).cloned() {
			Some(entry) => tracker.hover_entry(&ctx, &entry, args.event_mode),
			None => warn!(entry = %entry_id, "Hovered entry is not in the ledger"),
		},
		(None, Some(Button::Undo)) => tracker.hover_undo_button(&ctx),
		(None, Some(Button::Redo)) => tracker.hover_redo_button(&ctx),
		(None, None) => {}
	}

	let rows = compose_rows(&ctx, tracker.current());
	print!("{}", render::render_rows(&rows));
	Ok(())
}
