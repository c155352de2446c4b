//! Console and file logging for the icallgen CLI
//!
//! Every message is appended to `icallgen.log` in the user config directory.
//! What reaches the terminal depends on the verbosity set at startup: warnings,
//! errors and success lines always show (success lines can be silenced with
//! `--no-stdout`), debug lines need `-v` and step traces need `-vv`.

use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

const LOG_FILE_NAME: &str = "icallgen.log";
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

struct LoggerState {
    verbosity: u8,
    no_stdout: bool,
    log_file: Option<PathBuf>,
    spinner: Option<ProgressBar>,
}

static STATE: Mutex<LoggerState> = Mutex::new(LoggerState {
    verbosity: 0,
    no_stdout: false,
    log_file: None,
    spinner: None,
});

/// Message severity, ordered from chattiest to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Step,
    Debug,
    Info,
    Success,
    Warn,
    Error,
}

impl Level {
    fn tag(self) -> &'static str {
        match self {
            Level::Step => "STEP",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Success => "SUCCESS",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }

    /// Minimum verbosity at which the message reaches the console
    fn console_verbosity(self) -> u8 {
        match self {
            Level::Step => 2,
            Level::Debug | Level::Info => 1,
            Level::Success | Level::Warn | Level::Error => 0,
        }
    }

    fn prefix(self) -> Option<ColoredString> {
        match self {
            Level::Step => Some("TRACE:".dimmed()),
            Level::Debug => Some("DEBUG:".blue().bold()),
            Level::Info => None,
            Level::Success => Some("\u{2714}".green().bold()),
            Level::Warn => Some("warning:".yellow().bold()),
            Level::Error => Some("Error:".red().bold()),
        }
    }
}

fn with_state<T>(f: impl FnOnce(&mut LoggerState) -> T) -> Option<T> {
    STATE.lock().ok().map(|mut state| f(&mut state))
}

/// Current verbosity (0 = default, 1 = `-v`, 2+ = `-vv`)
pub fn get_verbosity() -> u8 {
    with_state(|state| state.verbosity).unwrap_or(0)
}

/// Whether success lines are kept off the console
pub fn get_no_stdout() -> bool {
    with_state(|state| state.no_stdout).unwrap_or(false)
}

/// `tracing` filter directive matching the current verbosity
pub fn verbosity_to_filter() -> &'static str {
    match get_verbosity() {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

/// Set verbosity and start a fresh log file for this run
pub fn init_with_verbosity(verbosity: u8, no_stdout: bool) -> Result<(), String> {
    with_state(|state| {
        state.verbosity = verbosity;
        state.no_stdout = no_stdout;
    });

    let log_dir = log_dir()?;
    fs::create_dir_all(&log_dir).map_err(|e| format!("Failed to create log directory: {}", e))?;

    // One log per run
    let log_file = log_dir.join(LOG_FILE_NAME);
    if log_file.exists() {
        let _ = fs::remove_file(&log_file);
    }

    with_state(|state| state.log_file = Some(log_file))
        .ok_or_else(|| "Logger state lock poisoned".to_string())
}

fn log_dir() -> Result<PathBuf, String> {
    #[cfg(not(target_os = "windows"))]
    let dir = dirs::home_dir()
        .ok_or("Could not determine home directory")?
        .join(".config")
        .join("icallgen");

    #[cfg(target_os = "windows")]
    let dir = dirs::config_dir()
        .ok_or("Could not determine config directory")?
        .join("icallgen");

    Ok(dir)
}

fn append_to_file(path: &Path, level: Level, message: &str) {
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let _ = writeln!(file, "[{}] {} {}", timestamp, level.tag(), message);
    }
}

fn emit(level: Level, message: &str) {
    let (log_file, verbosity, no_stdout, spinner) = with_state(|state| {
        (
            state.log_file.clone(),
            state.verbosity,
            state.no_stdout,
            state.spinner.clone(),
        )
    })
    .unwrap_or((None, 0, false, None));

    if let Some(path) = log_file {
        append_to_file(&path, level, message);
    }

    if verbosity < level.console_verbosity() || (level == Level::Success && no_stdout) {
        return;
    }
    let line = match level.prefix() {
        Some(prefix) => format!("{} {}", prefix, message),
        None => message.to_string(),
    };
    // Keep console lines from tearing through a running spinner
    match spinner {
        Some(spinner) => spinner.suspend(|| eprintln!("{}", line)),
        None => eprintln!("{}", line),
    }
}

pub fn step(message: &str) {
    emit(Level::Step, message);
}

pub fn debug(message: &str) {
    emit(Level::Debug, message);
}

pub fn info(message: &str) {
    emit(Level::Info, message);
}

pub fn success(message: &str) {
    emit(Level::Success, message);
}

pub fn warn(message: &str) {
    emit(Level::Warn, message);
}

pub fn error(message: &str) {
    emit(Level::Error, message);
}

/// Path of this run's log file, once initialized
pub fn log_path() -> Option<PathBuf> {
    with_state(|state| state.log_file.clone()).flatten()
}

/// Show a spinner while a batch runs; skipped when verbose output or
/// `--no-stdout` is active
pub fn spinner_start(message: &str) {
    if get_verbosity() > 0 || get_no_stdout() {
        return;
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(SPINNER_FRAMES)
        .template("{spinner:.cyan} {msg}")
    {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message(message.to_string());

    with_state(|state| {
        if let Some(previous) = state.spinner.replace(spinner) {
            previous.finish_and_clear();
        }
    });
}

pub fn spinner_stop() {
    if let Some(Some(spinner)) = with_state(|state| state.spinner.take()) {
        spinner.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn test_console_thresholds() {
        assert_eq!(Level::Error.console_verbosity(), 0);
        assert_eq!(Level::Warn.console_verbosity(), 0);
        assert_eq!(Level::Debug.console_verbosity(), 1);
        assert_eq!(Level::Step.console_verbosity(), 2);
    }

    #[test]
    fn test_tags_are_distinct() {
        let levels = [
            Level::Step,
            Level::Debug,
            Level::Info,
            Level::Success,
            Level::Warn,
            Level::Error,
        ];
        let mut tags: Vec<&str> = levels.iter().map(|l| l.tag()).collect();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), levels.len());
    }

    #[test]
    fn test_log_file_line_format() {
        let path = std::env::temp_dir().join(format!("icallgen-logger-{}.log", std::process::id()));
        append_to_file(&path, Level::Warn, "Unknown type 'vec3'");
        let content = fs::read_to_string(&path).unwrap_or_default();
        let _ = fs::remove_file(&path);
        assert!(content.ends_with("] WARN Unknown type 'vec3'\n"));
        assert!(content.starts_with('['));
    }
}
