//! In-process log buffer for pipeline runs
//!
//! Entries are pushed through a bounded channel to a background thread that keeps the
//! most recent [`LOG_CAPACITY`] of them. Logging never blocks: when the channel is full
//! the entry is dropped. The [`send_log!`](crate::send_log) macro also forwards every
//! message to the `log` facade so a host application's logger sees it.

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU8, Ordering};

/// Re-exported so [`send_log!`](crate::send_log) works in crates that do not depend on `log`
pub use ::log;

pub const LOG_CAPACITY: usize = 1000;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Debug,
            1 => LogLevel::Info,
            2 => LogLevel::Warn,
            _ => LogLevel::Error,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    /// Module path style origin, e.g. "pipeline::sign"
    ///
    /// Owned so entries can be built from runtime names and read back from JSON.
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<HashMap<String, serde_json::Value>>,
}

/// Fixed-size ring of the newest entries
struct RingBuffer {
    entries: Vec<LogEntry>,
    head: usize,
    capacity: usize,
}

impl RingBuffer {
    fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            head: 0,
            capacity,
        }
    }

    fn push(&mut self, entry: LogEntry) {
        if self.entries.len() < self.capacity {
            self.entries.push(entry);
        } else {
            self.entries[self.head] = entry;
            self.head = (self.head + 1) % self.capacity;
        }
    }

    /// Oldest first
    fn snapshot(&self) -> Vec<LogEntry> {
        let mut out = Vec::with_capacity(self.entries.len());
        out.extend_from_slice(&self.entries[self.head..]);
        out.extend_from_slice(&self.entries[..self.head]);
        out
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.head = 0;
    }
}

enum LogCommand {
    Record(LogEntry),
    Snapshot(Sender<Vec<LogEntry>>),
    Clear,
}

pub struct Logger {
    sender: Sender<LogCommand>,
    min_level: AtomicU8,
}

impl Logger {
    pub fn new() -> Self {
        Self::with_capacity(LOG_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity.max(1));
        let capacity = capacity.max(1);

        std::thread::spawn(move || Self::run(receiver, capacity));

        Self {
            sender,
            min_level: AtomicU8::new(LogLevel::Debug as u8),
        }
    }

    fn run(receiver: Receiver<LogCommand>, capacity: usize) {
        let mut ring = RingBuffer::new(capacity);
        for command in receiver {
            match command {
                LogCommand::Record(entry) => ring.push(entry),
                LogCommand::Snapshot(reply) => {
                    let _ = reply.send(ring.snapshot());
                }
                LogCommand::Clear => ring.clear(),
            }
        }
    }

    pub fn log(&self, level: LogLevel, message: &str, source: &str) {
        self.record(level, message, source, None);
    }

    /// Log with structured key/value context
    pub fn log_with_context(
        &self,
        level: LogLevel,
        message: &str,
        source: &str,
        context: HashMap<String, serde_json::Value>,
    ) {
        self.record(level, message, source, Some(context));
    }

    fn record(
        &self,
        level: LogLevel,
        message: &str,
        source: &str,
        context: Option<HashMap<String, serde_json::Value>>,
    ) {
        if level < self.min_level() {
            return;
        }
        let entry = LogEntry {
            timestamp: Utc::now(),
            level,
            message: message.to_string(),
            source: source.to_string(),
            context,
        };
        let _ = self.sender.try_send(LogCommand::Record(entry));
    }

    pub fn set_min_level(&self, level: LogLevel) {
        self.min_level.store(level as u8, Ordering::Relaxed);
    }

    pub fn min_level(&self) -> LogLevel {
        LogLevel::from_u8(self.min_level.load(Ordering::Relaxed))
    }

    /// Everything buffered so far, oldest first
    pub fn entries(&self) -> Vec<LogEntry> {
        let (reply_tx, reply_rx) = bounded(1);
        if self.sender.send(LogCommand::Snapshot(reply_tx)).is_ok() {
            reply_rx.recv().unwrap_or_default()
        } else {
            Vec::new()
        }
    }

    pub fn clear(&self) {
        let _ = self.sender.send(LogCommand::Clear);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static::lazy_static! {
    pub static ref LOGGER: Logger = Logger::new();
}

/// Log to [`LOGGER`] and the `log` facade in one go
///
/// ```ignore
/// send_log!(LogLevel::Info, "pipeline::send", "Sent {}", file.name);
/// ```
#[macro_export]
macro_rules! send_log {
    ($level:expr, $source:expr, $($arg:tt)*) => {{
        let level: $crate::logger::LogLevel = $level;
        let message = format!($($arg)*);
        $crate::logger::LOGGER.log(level, &message, $source);
        match level {
            $crate::logger::LogLevel::Error => $crate::logger::log::error!(target: $source, "{}", message),
            $crate::logger::LogLevel::Warn => $crate::logger::log::warn!(target: $source, "{}", message),
            $crate::logger::LogLevel::Info => $crate::logger::log::info!(target: $source, "{}", message),
            $crate::logger::LogLevel::Debug => $crate::logger::log::debug!(target: $source, "{}", message),
        }
    }};
}
