use std::fmt;
use std::path::Path;

use anyhow::{Result, Context};

use crate::errors::SubtitleError;

// @module: Timecode parsing, arithmetic and formatting

/// Serialized width of a timecode: `HH:MM:SS.mmm` is always 12 characters.
pub const TIMECODE_WIDTH: usize = 12;

/// Decimal separator convention distinguishing the two supported subtitle
/// text formats. Fixed once per run by the input file's extension, never
/// detected per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// SubRip (`.srt`): comma decimal separator, `00:00:00,000`
    Srt,
    /// WebVTT (`.vtt`): period decimal separator, `00:00:00.000`
    Vtt,
}

impl Dialect {
    /// Determine the dialect from a file extension. Returns `None` for
    /// anything other than `.srt`/`.vtt` so the caller can reject the file
    /// before any processing starts.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_string_lossy().to_lowercase();
        match ext.as_str() {
            "srt" => Some(Dialect::Srt),
            "vtt" => Some(Dialect::Vtt),
            _ => None,
        }
    }

    /// The decimal separator between seconds and milliseconds.
    pub fn separator(self) -> char {
        match self {
            Dialect::Srt => ',',
            Dialect::Vtt => '.',
        }
    }
}

/// A timestamp on the subtitle timeline, held as a total millisecond count.
///
/// Parsing and formatting use the canonical period separator; dialect
/// substitution happens at the line level in the shifter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timecode {
    total_ms: u64,
}

/// Result of shifting a timecode: either a new position on the timeline, or
/// the deletion sentinel when the shifted time falls before its start.
/// Deletion is normal data, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftedTime {
    At(Timecode),
    Deleted,
}

impl Timecode {
    /// Build a timecode directly from a millisecond count.
    pub fn from_milliseconds(total_ms: u64) -> Self {
        Timecode { total_ms }
    }

    /// Parse the canonical `HH:MM:SS.mmm` form (2-2-2-3 digits, exactly 12
    /// characters). Any malformed field is an unrecoverable error for the
    /// whole run; there is no per-line recovery.
    pub fn parse(text: &str) -> Result<Self> {
        let bytes = text.as_bytes();
        if bytes.len() != TIMECODE_WIDTH
            || bytes[2] != b':'
            || bytes[5] != b':'
            || bytes[8] != b'.'
        {
            return Err(SubtitleError::MalformedTimecode(text.to_string()).into());
        }

        let hours: u64 = text[0..2].parse()
            .with_context(|| format!("Failed to parse hours in timecode: {}", text))?;
        let minutes: u64 = text[3..5].parse()
            .with_context(|| format!("Failed to parse minutes in timecode: {}", text))?;
        // Seconds and milliseconds parse together as `SS.mmm`
        let seconds: f64 = text[6..12].parse()
            .with_context(|| format!("Failed to parse seconds in timecode: {}", text))?;

        Ok(Timecode {
            total_ms: hours * 3_600_000 + minutes * 60_000 + (seconds * 1000.0).round() as u64,
        })
    }

    /// Total milliseconds since the start of the timeline.
    pub fn total_milliseconds(self) -> u64 {
        self.total_ms
    }

    /// Shift by a signed number of seconds (fractional allowed). A negative
    /// result means the timestamp now lies before the start of the timeline
    /// and is reported as `Deleted`.
    pub fn shift(self, offset_seconds: f64) -> ShiftedTime {
        let delta_ms = (offset_seconds * 1000.0).round() as i64;
        let shifted = self.total_ms as i64 + delta_ms;
        if shifted < 0 {
            ShiftedTime::Deleted
        } else {
            ShiftedTime::At(Timecode { total_ms: shifted as u64 })
        }
    }
}

impl fmt::Display for Timecode {
    /// Render as `HH:MM:SS.mmm` with fixed-width zero padding. The seconds
    /// field is 6 characters wide including the decimal point (`03.140`).
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let hours = self.total_ms / 3_600_000;
        let minutes = (self.total_ms % 3_600_000) / 60_000;
        let seconds = (self.total_ms % 60_000) as f64 / 1000.0;
        write!(f, "{:02}:{:02}:{:06.3}", hours, minutes, seconds)
    }
}
