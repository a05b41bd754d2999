//! Console + file logger behind the `log` facade.

use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Writes every record to stdout and appends it to a log file.
struct FileLogger {
    log_path: PathBuf,
}

impl FileLogger {
    fn append(&self, line: &str) {
        if let Ok(mut file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
        {
            let _ = file.write_all(line.as_bytes());
        }
    }
}

/// Formats a log line with timestamp and level.
fn format_line(level: log::Level, msg: &std::fmt::Arguments<'_>) -> String {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    format!("[{}] {:<5} {}\n", timestamp, level, msg)
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record.level(), record.args());
        print!("{}", line);
        self.append(&line);
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
    }
}

/// Installs the logger. Safe to call more than once; only the first call wins.
pub fn init(level: LevelFilter) {
    let logger = FileLogger {
        log_path: crate::paths::get_log_file(),
    };
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(level);
    }
}

/// Changes the active level, e.g. after config.json has been read.
pub fn set_level(level: LevelFilter) {
    log::set_max_level(level);
}

/// Logs panics to the log file even if the logger was never installed.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        let msg = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        let location = panic_info
            .location()
            .map(|loc| format!(" at {}:{}:{}", loc.file(), loc.line(), loc.column()))
            .unwrap_or_default();

        let log_msg = format!("[PANIC]{} {}\n", location, msg);
        eprint!("{}", log_msg);
        FileLogger {
            log_path: crate::paths::get_log_file(),
        }
        .append(&log_msg);
    }));
}
