//! Plain-text rendering of composed rows.

use std::fmt::Write;

use rewind_history::{DisplayFlags, HistoryRow, RowBody};

const BOUNDARY: &str = "     ---- undo | redo ----";

/// One letter per flag, `.` when clear: affected, associated, completed,
/// conflict, orphaned, event reset.
fn flag_column(flags: Option<DisplayFlags>) -> String {
	let Some(flags) = flags else {
		return "------ ----".to_string();
	};
	let letters = [
		(flags.is_affected, 'A'),
		(flags.is_associated, 'S'),
		(flags.is_completed, 'C'),
		(flags.is_in_conflict, 'X'),
		(flags.is_orphaned, 'O'),
		(flags.is_event_reset, 'E'),
	];
	let mut column: String = letters
		.iter()
		.map(|&(set, letter)| if set { letter } else { '.' })
		.collect();
	column.push(' ');
	column.push_str(&flags.entry_type.to_string());
	column
}

fn marker(row: &HistoryRow) -> &'static str {
	if row.undo_redo_joined {
		"UR"
	} else if row.undo_target {
		"U "
	} else if row.redo_target {
		"R "
	} else {
		"  "
	}
}

/// Renders rows top to bottom, drawing the boundary line between adjacent
/// undo and redo targets.
pub fn render_rows(rows: &[HistoryRow]) -> String {
	let mut out = String::new();
	for row in rows {
		if row.redo_target && row.undo_redo_adjacent {
			let _ = writeln!(out, "{BOUNDARY}");
		}
		let _ = writeln!(
			out,
			"{} {:>3} {} {}",
			marker(row),
			row.index,
			flag_column(row.flags()),
			row.entry.description
		);
		match &row.body {
			RowBody::Single { .. } => {}
			RowBody::Multiple { children, .. } => {
				for child in children {
					let _ = writeln!(out, "         {} {}", flag_column(child.flags), child.message);
				}
			}
			RowBody::Hidden { message } => {
				let _ = writeln!(out, "         (hidden) {message}");
			}
		}
	}
	out
}
