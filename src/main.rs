// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand, ValueEnum, CommandFactory};
use clap_complete::{generate, Shell};
use log::{LevelFilter, Log, Metadata, Record, Level, SetLoggerError};

use app_controller::Controller;
use timecode::Dialect;

mod app_controller;
mod converter;
mod errors;
mod namer;
mod shifter;
mod timecode;

/// CLI wrapper for LevelFilter to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LevelFilter {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LevelFilter::Error,
            CliLogLevel::Warn => LevelFilter::Warn,
            CliLogLevel::Info => LevelFilter::Info,
            CliLogLevel::Debug => LevelFilter::Debug,
            CliLogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Shift subtitle timestamps by a signed offset (default command)
    Shift(ShiftArgs),

    /// Generate shell completions for subshift
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ShiftArgs {
    /// Input subtitle file (.srt or .vtt) or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Offset in seconds, fractional and negative values allowed
    #[arg(value_name = "SECONDS", allow_hyphen_values = true)]
    seconds: f64,

    /// Also reprocess files whose name already carries an offset tag (directory mode)
    #[arg(long)]
    include_tagged: bool,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// subshift - shift subtitle timestamps
///
/// Shifts every timestamp in an .srt or .vtt subtitle file by a fixed signed
/// offset and writes the result to a new file with a cumulative-offset tag in
/// its name.
#[derive(Parser, Debug)]
#[command(name = "subshift")]
#[command(version = "1.0.0")]
#[command(about = "Shift subtitle timestamps by a signed offset in seconds")]
#[command(long_about = "subshift rewrites every time-range line of a subtitle file, adding a signed
offset in seconds, and writes the result next to the input under a tagged name.
Entries that end up before 00:00:00.000 are deleted; an entry straddling the
start of the timeline is kept, clamped to zero.

EXAMPLES:
    subshift movie.srt 2.5                  # Delay all subtitles by 2.5 seconds
    subshift movie.vtt -1.5                 # Advance all subtitles by 1.5 seconds
    subshift {+2.50_Sec}_movie.srt -0.5     # Re-shift; tag becomes {+2.00_Sec}_
    subshift /media/season1/ 3              # Shift every .srt/.vtt in a directory
    subshift completions bash > subshift.bash

OUTPUT NAMING:
    The output filename is the input filename prepended with {+X.XX_Sec}_ (or
    {-X.XX_Sec}_ for negative offsets). Running subshift on an already-tagged
    file updates the tag's value in place instead of adding a second tag.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input subtitle file (.srt or .vtt) or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Offset in seconds, fractional and negative values allowed
    #[arg(value_name = "SECONDS", allow_hyphen_values = true)]
    seconds: Option<f64>,

    /// Also reprocess files whose name already carries an offset tag (directory mode)
    #[arg(long)]
    include_tagged: bool,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        // log::max_level() is the single source of truth, so a later
        // --log-level change through set_max_level takes effect
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default;
    // --log-level updates the max level afterwards
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subshift", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Shift(args)) => run_shift(args),
        None => {
            // Default behavior - use top-level args so plain
            // `subshift file.srt 2.5` works without a subcommand
            let input_path = cli.input_path.ok_or_else(|| {
                anyhow!("INPUT_PATH is required when no subcommand is specified")
            })?;
            let seconds = cli.seconds.ok_or_else(|| {
                anyhow!("SECONDS is required when no subcommand is specified")
            })?;

            run_shift(ShiftArgs {
                input_path,
                seconds,
                include_tagged: cli.include_tagged,
                log_level: cli.log_level,
            })
        }
    }
}

fn run_shift(options: ShiftArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = options.log_level {
        log::set_max_level(cmd_log_level.into());
    }

    // Reject unsupported extensions before any processing starts
    if options.input_path.is_file() && Dialect::from_path(&options.input_path).is_none() {
        eprintln!("Please specify either an .srt or .vtt file as input.");
        std::process::exit(1);
    }

    let controller = Controller::new(options.seconds, options.include_tagged);
    controller.run(&options.input_path)
}
