use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Result, Context, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn, debug};
use walkdir::WalkDir;

use crate::converter::StreamConverter;
use crate::errors::SubtitleError;
use crate::namer::{is_tagged, name_output};
use crate::timecode::Dialect;

// @module: Application controller for subtitle shifting

/// Result of converting one subtitle file.
#[derive(Debug)]
pub struct ConversionReport {
    /// Path of the newly written file
    pub output_path: PathBuf,

    /// Entries dropped because they were shifted before the start of the timeline
    pub deleted_subs: usize,
}

impl ConversionReport {
    /// The status text shown to the user after a successful conversion.
    pub fn status_message(&self) -> String {
        match self.deleted_subs {
            0 => "Success.".to_string(),
            1 => "Success.\nOne subtitle was deleted at the beginning of the file.".to_string(),
            n => format!(
                "Success.\n{} subtitles were deleted at the beginning of the file.",
                n
            ),
        }
    }
}

/// Main application controller for subtitle shifting
pub struct Controller {
    // @field: Signed offset applied to every timecode, in seconds
    offset_seconds: f64,

    // @field: Also reprocess files whose name already carries an offset tag
    include_tagged: bool,
}

impl Controller {
    // @method: Create a new controller with the given offset
    pub fn new(offset_seconds: f64, include_tagged: bool) -> Self {
        Controller { offset_seconds, include_tagged }
    }

    /// Process a single subtitle file or every subtitle file in a directory.
    pub fn run<P: AsRef<Path>>(&self, input_path: P) -> Result<()> {
        let input_path = input_path.as_ref();

        if input_path.is_file() {
            let report = self.convert_file(input_path)?;
            println!("{}", report.status_message());
            println!("Filename = {}", report.output_path.display());
            Ok(())
        } else if input_path.is_dir() {
            self.run_folder(input_path)
        } else {
            Err(anyhow!("Input path does not exist: {:?}", input_path))
        }
    }

    /// Convert one subtitle file, writing the shifted copy next to it under
    /// its tagged name, and report the deletion count.
    pub fn convert_file(&self, input: &Path) -> Result<ConversionReport> {
        let dialect = Dialect::from_path(input)
            .ok_or_else(|| SubtitleError::UnsupportedExtension(input.display().to_string()))?;

        let file_name = input.file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or_else(|| anyhow!("Input path has no file name: {:?}", input))?;
        let output_name = name_output(&file_name, self.offset_seconds)?;
        let output_path = input.parent().unwrap_or(Path::new(".")).join(&output_name);

        debug!("Converting {:?} -> {:?} ({:+.3}s)", input, output_path, self.offset_seconds);

        let input_file = File::open(input)
            .with_context(|| format!("Failed to open subtitle file: {}", input.display()))?;
        let output_file = File::create(&output_path)
            .with_context(|| format!("Failed to create output file: {}", output_path.display()))?;
        let mut writer = BufWriter::new(output_file);

        let converter = StreamConverter::new(dialect, self.offset_seconds);
        let deleted_subs = converter.convert(BufReader::new(input_file), &mut writer)?;
        writer.flush()
            .with_context(|| format!("Failed to flush output file: {}", output_path.display()))?;

        Ok(ConversionReport { output_path, deleted_subs })
    }

    /// Convert every subtitle file found under `dir` with the same offset.
    /// Any failing file aborts the whole batch, matching the single-file
    /// fatal-on-first-error behavior.
    fn run_folder(&self, dir: &Path) -> Result<()> {
        let mut files = Self::find_subtitle_files(dir)?;

        if !self.include_tagged {
            let before = files.len();
            files.retain(|path| {
                path.file_name()
                    .map(|name| !is_tagged(&name.to_string_lossy()))
                    .unwrap_or(true)
            });
            let skipped = before - files.len();
            if skipped > 0 {
                info!("Skipping {} already-tagged file(s); pass --include-tagged to reprocess them", skipped);
            }
        }

        if files.is_empty() {
            warn!("No subtitle files (.srt/.vtt) found in {:?}", dir);
            return Ok(());
        }

        let progress_bar = ProgressBar::new(files.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style);

        let mut total_deleted = 0usize;
        for file in &files {
            progress_bar.set_message(
                file.file_name().map(|name| name.to_string_lossy().to_string()).unwrap_or_default()
            );

            let report = self.convert_file(file)?;
            total_deleted += report.deleted_subs;
            info!("Wrote {}", report.output_path.display());

            progress_bar.inc(1);
        }
        progress_bar.finish_with_message("done");

        println!("Success.\nProcessed {} file(s).", files.len());
        if total_deleted > 0 {
            println!(
                "{} subtitle(s) were deleted at the beginning of the file(s).",
                total_deleted
            );
        }
        Ok(())
    }

    /// Find all `.srt`/`.vtt` files under a directory, sorted for a stable
    /// processing order.
    pub fn find_subtitle_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() && Dialect::from_path(path).is_some() {
                result.push(path.to_path_buf());
            }
        }

        result.sort();
        Ok(result)
    }
}
