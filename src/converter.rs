use std::io::{BufRead, Write};

use anyhow::{Result, Context};
use log::{debug, trace};

use crate::shifter::{is_time_range_line, shift_range_line, ShiftedLine};
use crate::timecode::Dialect;

// @module: Line-by-line stream conversion

/// State of the converter while walking a file.
///
/// `Suppressing` is entered when a time-range line resolves to full deletion
/// and lasts until the blank line closing that caption block. The index line
/// preceding a deleted range has already been emitted by then and stays in
/// the output; only the lines after the range are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConverterState {
    Passthrough,
    Suppressing,
}

/// Drives the transformation of a whole subtitle stream: shifts every
/// time-range line, drops caption blocks whose range fell before the start
/// of the timeline, and passes everything else through unchanged.
pub struct StreamConverter {
    dialect: Dialect,
    offset_seconds: f64,
}

impl StreamConverter {
    pub fn new(dialect: Dialect, offset_seconds: f64) -> Self {
        StreamConverter { dialect, offset_seconds }
    }

    /// Convert `reader` into `writer`, one line at a time, and return the
    /// number of deleted subtitle entries.
    ///
    /// Every input line is either written back with a trailing newline or
    /// suppressed. The first malformed time-range line or unreadable line
    /// aborts the whole run; partial output may already be on disk by then.
    pub fn convert<R: BufRead, W: Write>(&self, reader: R, writer: &mut W) -> Result<usize> {
        let mut state = ConverterState::Passthrough;
        let mut deleted_subs = 0usize;

        for line in reader.lines() {
            let line = line.context("Failed to read line from input")?;

            if is_time_range_line(&line, self.dialect) {
                match shift_range_line(&line, self.dialect, self.offset_seconds)? {
                    ShiftedLine::Deleted => {
                        deleted_subs += 1;
                        state = ConverterState::Suppressing;
                        debug!("Deleting block for range shifted before 00:00:00.000: {}", line);
                    }
                    // A kept range does not touch the suppression state: the
                    // block being suppressed ends at its blank line, not here
                    ShiftedLine::Kept(new_line) => {
                        writeln!(writer, "{}", new_line)
                            .context("Failed to write line to output")?;
                    }
                }
                continue;
            }

            match state {
                ConverterState::Suppressing => {
                    // Caption text of the deleted block; the blank separator
                    // itself is consumed as well
                    if line.is_empty() {
                        state = ConverterState::Passthrough;
                    }
                    trace!("Suppressed line: {}", line);
                }
                ConverterState::Passthrough => {
                    writeln!(writer, "{}", line)
                        .context("Failed to write line to output")?;
                }
            }
        }

        Ok(deleted_subs)
    }
}
