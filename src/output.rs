//! Rendering of the timetable as JavaScript snippets.
//!
//! Two blocks are produced: the `schedules` object pasted into `index.html`
//! and the EagleVail-only `SCHEDULES` object pasted into `widget.js`.

use anyhow::Result;
use std::io::{self, Write};
use tracing::debug;

use crate::gtfs::Direction;
use crate::route::StopGroup;
use crate::schedule::{DirectionTimes, Timetable};

/// Logs the timetable as pretty-printed JSON.
pub fn log_timetable_json(timetable: &Timetable) -> Result<()> {
    debug!("{}", serde_json::to_string_pretty(timetable)?);
    Ok(())
}

/// `'5:38','6:23'`
fn quoted_list(times: &[String]) -> String {
    times
        .iter()
        .map(|t| format!("'{t}'"))
        .collect::<Vec<_>>()
        .join(",")
}

fn write_directions<W: Write>(out: &mut W, times: &DirectionTimes, indent: &str) -> io::Result<()> {
    for direction in Direction::ALL {
        writeln!(
            out,
            "{indent}{}: [{}],",
            direction.label(),
            quoted_list(times.get(direction))
        )?;
    }
    Ok(())
}

/// Writes both snippets, each preceded by a comment naming its destination.
pub fn write_snippets<W: Write>(out: &mut W, timetable: &Timetable) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "// For index.html schedules object:")?;
    writeln!(out, "const schedules = {{")?;
    for (group, times) in timetable.iter() {
        writeln!(out, "  {}: {{", group.name())?;
        write_directions(out, times, "    ")?;
        writeln!(out, "  }},")?;
    }
    writeln!(out, "}};")?;

    writeln!(out)?;
    writeln!(out, "// For widget.js SCHEDULES (EagleVail only):")?;
    writeln!(out, "const SCHEDULES = {{")?;
    write_directions(out, timetable.group(StopGroup::EagleVail), "  ")?;
    writeln!(out, "}};")?;

    Ok(())
}

/// Renders the snippets in memory, then writes them to stdout in one go.
pub fn print_snippets(timetable: &Timetable) -> Result<()> {
    let mut buf = Vec::new();
    write_snippets(&mut buf, timetable)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(&buf)?;
    stdout.flush()?;

    Ok(())
}
