use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

static LOG_FILE: Mutex<Option<PathBuf>> = Mutex::new(None);
static VERBOSITY: Mutex<u8> = Mutex::new(0);
static PROGRESS: Mutex<Option<ProgressBar>> = Mutex::new(None);

const LOG_FILE_NAME: &str = "plugscript.log";

/// Get the current verbosity level
pub fn get_verbosity() -> u8 {
    VERBOSITY.lock().ok().map(|v| *v).unwrap_or(0)
}

/// Initialize the logger with a verbosity level
/// 0 = warn only, 1 = debug (-v), 2 = trace (-vv)
pub fn init_with_verbosity(verbosity: u8) -> Result<(), String> {
    if let Ok(mut v) = VERBOSITY.lock() {
        *v = verbosity;
    }

    init()
}

fn init() -> Result<(), String> {
    let config_dir = get_config_dir()?;
    fs::create_dir_all(&config_dir)
        .map_err(|e| format!("Failed to create config directory: {}", e))?;

    let log_file = config_dir.join(LOG_FILE_NAME);

    // Truncate log file on each run
    if log_file.exists() {
        let _ = fs::remove_file(&log_file);
    }

    let mut guard = LOG_FILE
        .lock()
        .map_err(|_| "Log file lock poisoned".to_string())?;
    *guard = Some(log_file);

    Ok(())
}

fn get_config_dir() -> Result<PathBuf, String> {
    #[cfg(not(target_os = "windows"))]
    let config_dir = dirs::home_dir()
        .ok_or("Could not determine home directory")?
        .join(".config")
        .join("plugscript");

    #[cfg(target_os = "windows")]
    let config_dir = dirs::config_dir()
        .ok_or("Could not determine config directory")?
        .join("plugscript");

    Ok(config_dir)
}

fn write_to_log(message: &str) {
    if let Ok(guard) = LOG_FILE.lock() {
        if let Some(ref log_path) = *guard {
            if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(log_path) {
                let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
                let _ = writeln!(file, "[{}] {}", timestamp, message);
            }
        }
    }
}

/// Print to stderr without tearing an active progress bar
fn console(line: String) {
    let active = PROGRESS.lock().ok().and_then(|guard| guard.clone());
    match active {
        Some(bar) => bar.suspend(|| eprintln!("{}", line)),
        None => eprintln!("{}", line),
    }
}

/// Log an informational message (to console if verbose >= 1, always to file)
pub fn info(message: &str) {
    write_to_log(&format!("INFO {}", message));
    if get_verbosity() >= 1 {
        console(message.to_string());
    }
}

/// Log a debug message (to console if verbose >= 1, always to file)
pub fn debug(message: &str) {
    write_to_log(&format!("DEBUG {}", message));
    if get_verbosity() >= 1 {
        console(format!("{} {}", "DEBUG:".blue().bold(), message));
    }
}

/// Log a trace-level step (console only at -vv)
pub fn step(message: &str) {
    write_to_log(&format!("STEP: {}", message));
    if get_verbosity() >= 2 {
        console(format!("TRACE: {}", message));
    }
}

/// Log a warning message (to both file and console)
pub fn warn(message: &str) {
    write_to_log(&format!("WARN {}", message));
    console(format!("{} {}", "warning:".yellow().bold(), message));
}

/// Log an error message (to both file and console)
pub fn error(message: &str) {
    write_to_log(&format!("ERROR {}", message));
    console(format!("{} {}", "Error:".red().bold(), message));
}

/// Log a success message
pub fn success(message: &str) {
    write_to_log(&format!("SUCCESS {}", message));
    let check = "\u{2714}".green().bold();
    console(format!("{} {}", check, message));
}

/// Get the log file path for display
pub fn get_log_path() -> Option<PathBuf> {
    LOG_FILE.lock().ok().and_then(|guard| guard.clone())
}

/// Print the log file path to the user
pub fn show_log_path() {
    if let Some(path) = get_log_path() {
        eprintln!("Log file: {}", path.display());
    } else if let Ok(config_dir) = get_config_dir() {
        eprintln!("Log file: {}", config_dir.join(LOG_FILE_NAME).display());
    } else {
        eprintln!("Log file location not available");
    }
}

/// Start a ten-segment progress bar (only if not verbose)
pub fn progress_start() {
    if get_verbosity() > 0 {
        return;
    }

    let bar = ProgressBar::new(100);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("[{bar:10}] {pos:>3}% {msg}")
        .map(|style| style.progress_chars("=>-"))
    {
        bar.set_style(style);
    }

    if let Ok(mut guard) = PROGRESS.lock() {
        *guard = Some(bar);
    }
}

/// Move the progress bar to `fraction` (0.0..=1.0) and show `message`
///
/// Messages are also written to the log file; in verbose mode, where no bar
/// is drawn, they are printed as trace steps instead.
pub fn progress_update(fraction: f64, message: &str) {
    step(message);
    if let Ok(guard) = PROGRESS.lock() {
        if let Some(bar) = guard.as_ref() {
            let position = (fraction.clamp(0.0, 1.0) * 100.0).round() as u64;
            bar.set_position(position);
            bar.set_message(message.to_string());
        }
    }
}

/// Remove the progress bar from the terminal
pub fn progress_finish() {
    if let Ok(mut guard) = PROGRESS.lock() {
        if let Some(bar) = guard.take() {
            bar.finish_and_clear();
        }
    }
}

/// Format an elapsed duration as "H hours, M minutes, S seconds"
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let seconds = total % 60;
    let minutes = (total / 60) % 60;
    let hours = (total / 3600) % 24;
    format!("{} hours, {} minutes, {} seconds", hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(
            format_elapsed(Duration::from_millis(999)),
            "0 hours, 0 minutes, 0 seconds"
        );
        assert_eq!(
            format_elapsed(Duration::from_secs(3725)),
            "1 hours, 2 minutes, 5 seconds"
        );
    }

    #[test]
    fn test_progress_update_without_bar_is_noop() {
        progress_update(0.5, "Translating");
        progress_finish();
        assert!(PROGRESS.lock().map(|g| g.is_none()).unwrap_or(false));
    }
}
