use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::SubtitleError;
use crate::timecode::{Dialect, ShiftedTime, Timecode, TIMECODE_WIDTH};

// @module: Time-range line recognition and shifting

// @const: Time-range patterns, one per dialect
static SRT_TIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{2}:\d{2}:\d{2},\d{3}").unwrap()
});
static VTT_TIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{2}:\d{2}:\d{2}\.\d{3}").unwrap()
});

/// Fixed column layout of a time-range line:
///
/// ```text
/// 00:00:01.913 --> 00:00:04.328
/// 0         1          2
/// 01234567890123456789012345678
/// ```
pub const ARROW: &str = " --> ";
pub const ARROW_START: usize = TIMECODE_WIDTH;
pub const END_START: usize = ARROW_START + ARROW.len();
pub const RANGE_WIDTH: usize = END_START + TIMECODE_WIDTH;

/// Whether a line carries a time range in the given dialect.
///
/// Purely lexical: `99:99:99.999` still matches. Semantic field validation
/// is not this tool's job.
pub fn is_time_range_line(line: &str, dialect: Dialect) -> bool {
    match dialect {
        Dialect::Srt => SRT_TIME_REGEX.is_match(line),
        Dialect::Vtt => VTT_TIME_REGEX.is_match(line),
    }
}

/// Outcome of shifting a time-range line: the rewritten line, or the
/// deletion marker telling the converter to drop the whole caption block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShiftedLine {
    Kept(String),
    Deleted,
}

/// Shift both timecodes of a time-range line by `offset_seconds`.
///
/// The line must start with `<12 chars> --> <12 chars>` in the file's native
/// separator; anything after column 29 (VTT cue settings) is carried over
/// verbatim. A line that matched the classifier but violates this column
/// layout is malformed input and aborts the run.
///
/// Policy on negative results:
/// - both timecodes deleted: the whole line (and block) is deleted;
/// - start deleted, end kept: start clamps to `00:00:00.000` so a caption
///   straddling the timeline start survives, truncated;
/// - start kept, end deleted: only possible for an out-of-order range, the
///   cue is degenerate and the whole line is deleted.
pub fn shift_range_line(line: &str, dialect: Dialect, offset_seconds: f64) -> Result<ShiftedLine> {
    // get() rather than indexing: a multibyte character inside the range
    // columns must surface as malformed input, not a slice panic
    let range = line
        .get(..RANGE_WIDTH)
        .filter(|range| range.is_ascii() && &range[ARROW_START..END_START] == ARROW)
        .ok_or_else(|| SubtitleError::MalformedRangeLine(line.to_string()))?;

    // Timecode::parse wants the canonical period separator
    let canonical = match dialect {
        Dialect::Srt => range.replacen(',', ".", 2),
        Dialect::Vtt => range.to_string(),
    };

    let start = Timecode::parse(&canonical[..TIMECODE_WIDTH])?;
    let end = Timecode::parse(&canonical[END_START..RANGE_WIDTH])?;

    let new_range = match (start.shift(offset_seconds), end.shift(offset_seconds)) {
        (ShiftedTime::Deleted, ShiftedTime::Deleted) => return Ok(ShiftedLine::Deleted),
        (ShiftedTime::At(_), ShiftedTime::Deleted) => return Ok(ShiftedLine::Deleted),
        (ShiftedTime::Deleted, ShiftedTime::At(end)) => {
            format!("{}{}{}", Timecode::from_milliseconds(0), ARROW, end)
        }
        (ShiftedTime::At(start), ShiftedTime::At(end)) => {
            format!("{}{}{}", start, ARROW, end)
        }
    };

    // Formatting always produces periods; restore the native separator
    let new_range = match dialect {
        Dialect::Srt => new_range.replacen('.', ",", 2),
        Dialect::Vtt => new_range,
    };

    Ok(ShiftedLine::Kept(format!("{}{}", new_range, &line[RANGE_WIDTH..])))
}
