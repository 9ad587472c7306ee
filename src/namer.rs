use anyhow::{Result, Context};
use once_cell::sync::Lazy;
use regex::Regex;

// @module: Output filename derivation

// @const: Re-processing tag left in filenames by earlier runs, e.g. "{+2.50_Sec}_"
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([+-]\d+\.\d+)_Sec\}_").unwrap()
});

/// Whether a filename already carries a re-processing tag from an earlier run.
pub fn is_tagged(name: &str) -> bool {
    TAG_REGEX.is_match(name)
}

/// Derive the output filename from the input filename and the offset.
///
/// A fresh name gets `{+X.XX_Sec}_` prepended (`-` for a negative offset,
/// `+` for zero). A name that already carries a tag from an earlier run has
/// the new offset added onto the first tag's value and that tag replaced in
/// place, so repeated runs converge on a single tag holding the cumulative
/// shift instead of stacking tags.
pub fn name_output(input_name: &str, offset_seconds: f64) -> Result<String> {
    if let Some(caps) = TAG_REGEX.captures(input_name) {
        let tag = caps.get(0).expect("regex match has a whole-match group");
        let previous: f64 = caps[1].parse()
            .with_context(|| format!("Failed to parse offset tag in filename: {}", input_name))?;

        Ok(format!(
            "{}{}{}",
            &input_name[..tag.start()],
            format_tag(previous + offset_seconds),
            &input_name[tag.end()..]
        ))
    } else {
        Ok(format!("{}{}", format_tag(offset_seconds), input_name))
    }
}

/// Render the cumulative offset as a filename tag with two decimal places;
/// zero gets the `+` sign.
fn format_tag(value: f64) -> String {
    if value >= 0.0 {
        format!("{{+{:.2}_Sec}}_", value)
    } else {
        format!("{{{:.2}_Sec}}_", value)
    }
}
