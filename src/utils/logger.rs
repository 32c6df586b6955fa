use chrono::Local;
use log::{LevelFilter, Metadata, Record, SetLoggerError};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

static LOGGER: Mutex<Option<Logger>> = Mutex::new(None);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogMessage {
    pub level: String,
    pub target: String,
    pub message: String,
    pub timestamp: String,
}

pub struct Logger {
    max_recent_logs: usize,
    recent_logs: Mutex<VecDeque<LogMessage>>,
    console_logging_enabled: Mutex<bool>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl Logger {
    fn new(max_recent_logs: usize) -> Self {
        Logger {
            max_recent_logs,
            recent_logs: Mutex::new(VecDeque::with_capacity(max_recent_logs)),
            console_logging_enabled: Mutex::new(true),
        }
    }

    /// Installs the logger as the `log` backend. Calling it again swaps the
    /// buffer but the backend itself can only be registered once.
    pub fn init(max_recent_logs: usize, level: LevelFilter) -> Result<(), SetLoggerError> {
        *lock(&LOGGER) = Some(Logger::new(max_recent_logs));

        log::set_logger(&LoggerImplementation)?;
        log::set_max_level(level);

        Ok(())
    }

    fn log(&self, record: &Record) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let log_message = LogMessage {
            level: record.level().to_string(),
            target: record.target().to_string(),
            message: record.args().to_string(),
            timestamp,
        };

        if *lock(&self.console_logging_enabled) {
            println!(
                "[{}] {} - {}: {}",
                log_message.timestamp, log_message.level, log_message.target, log_message.message
            );
        }

        self.push(log_message);
    }

    fn push(&self, log_message: LogMessage) {
        if self.max_recent_logs == 0 {
            return;
        }
        let mut recent_logs = lock(&self.recent_logs);
        while recent_logs.len() >= self.max_recent_logs {
            recent_logs.pop_front();
        }
        recent_logs.push_back(log_message);
    }

    pub fn get_recent_logs(&self) -> Vec<LogMessage> {
        lock(&self.recent_logs).iter().cloned().collect()
    }

    pub fn set_console_logging(&self, enabled: bool) {
        *lock(&self.console_logging_enabled) = enabled;
    }
}

struct LoggerImplementation;

impl log::Log for LoggerImplementation {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Some(logger) = lock(&LOGGER).as_ref() {
                logger.log(record);
            }
        }
    }

    fn flush(&self) {}
}

pub fn get_recent_logs() -> Vec<LogMessage> {
    lock(&LOGGER)
        .as_ref()
        .map(|logger| logger.get_recent_logs())
        .unwrap_or_default()
}

pub fn set_console_logging(enabled: bool) {
    if let Some(logger) = lock(&LOGGER).as_ref() {
        logger.set_console_logging(enabled);
    }
}

pub fn clear_logs() {
    if let Some(logger) = lock(&LOGGER).as_ref() {
        lock(&logger.recent_logs).clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    fn message(text: &str) -> LogMessage {
        LogMessage {
            level: "INFO".to_string(),
            target: "gritchamber_lib".to_string(),
            message: text.to_string(),
            timestamp: String::new(),
        }
    }

    #[test]
    fn buffer_keeps_only_most_recent_messages() {
        let logger = Logger::new(2);
        logger.push(message("one"));
        logger.push(message("two"));
        logger.push(message("three"));

        let texts: Vec<String> = logger
            .get_recent_logs()
            .into_iter()
            .map(|m| m.message)
            .collect();
        assert_eq!(texts, ["two", "three"]);
    }

    #[test]
    fn zero_capacity_buffer_stays_empty() {
        let logger = Logger::new(0);
        logger.push(message("dropped"));
        assert!(logger.get_recent_logs().is_empty());
    }

    #[test]
    fn records_are_captured_with_level_and_target() {
        let logger = Logger::new(4);
        logger.set_console_logging(false);
        logger.log(
            &Record::builder()
                .args(format_args!("sized {} chambers", 3))
                .level(Level::Warn)
                .target("batch")
                .build(),
        );

        let logs = logger.get_recent_logs();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].level, "WARN");
        assert_eq!(logs[0].target, "batch");
        assert_eq!(logs[0].message, "sized 3 chambers");
        assert_eq!(logs[0].timestamp.len(), "2024-01-01 00:00:00".len());
    }
}
