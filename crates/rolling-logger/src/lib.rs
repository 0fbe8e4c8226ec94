//! Rolling Logger
//!
//! A `tracing` layer that formats every event into one line, keeps the most
//! recent lines in a fixed-size circular buffer, and forwards each line to a
//! pluggable sink (the browser console, stderr, ...).

use std::collections::VecDeque;
use std::fmt::{self, Write as _};
use std::sync::{Arc, Mutex, OnceLock};

use thiserror::Error;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

pub const DEFAULT_CAPACITY: usize = 500;

/// Receives every formatted line
pub type Sink = Box<dyn Fn(&Level, &str) + Send + Sync>;

static GLOBAL: OnceLock<RollingBuffer> = OnceLock::new();

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("logger already initialized")]
    AlreadyInitialized,
    #[error("failed to install subscriber: {0}")]
    Subscriber(String),
}

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub app_name: String,
    pub capacity: usize,
    pub max_level: Level,
}

impl LoggerConfig {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            capacity: DEFAULT_CAPACITY,
            max_level: Level::INFO,
        }
    }

    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_max_level(mut self, level: Level) -> Self {
        self.max_level = level;
        self
    }
}

/// Bounded line store; the oldest line is dropped once full
#[derive(Debug, Clone)]
pub struct RollingBuffer {
    lines: Arc<Mutex<VecDeque<String>>>,
    capacity: usize,
}

impl RollingBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    pub fn push(&self, line: String) {
        let Ok(mut lines) = self.lines.lock() else {
            return;
        };
        if lines.len() == self.capacity {
            lines.pop_front();
        }
        lines.push_back(line);
    }

    /// Up to `count` most recent lines, oldest first
    pub fn recent(&self, count: usize) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => {
                let skip = lines.len().saturating_sub(count);
                lines.iter().skip(skip).cloned().collect()
            }
            Err(_) => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.lock().map(|lines| lines.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Layer that feeds a [`RollingBuffer`] and an optional [`Sink`]
pub struct RollingLayer {
    app_name: String,
    buffer: RollingBuffer,
    sink: Option<Sink>,
}

impl RollingLayer {
    pub fn new(app_name: impl Into<String>, buffer: RollingBuffer, sink: Option<Sink>) -> Self {
        Self {
            app_name: app_name.into(),
            buffer,
            sink,
        }
    }

    fn record(&self, level: &Level, target: &str, body: &str) {
        let line = format_line(&self.app_name, level, target, body);
        if let Some(sink) = &self.sink {
            sink(level, &line);
        }
        self.buffer.push(line);
    }
}

impl<S: Subscriber> Layer<S> for RollingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);
        self.record(metadata.level(), metadata.target(), &visitor.finish());
    }
}

fn format_line(app_name: &str, level: &Level, target: &str, body: &str) -> String {
    format!(
        "{} {:<5} [{}] {}: {}",
        chrono::Local::now().format("%H:%M:%S%.3f"),
        level,
        app_name,
        target,
        body
    )
}

#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
}

impl LineVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.fields.trim_start().to_string()
        } else {
            format!("{}{}", self.message, self.fields)
        }
    }
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

/// Install the rolling layer as the global subscriber.
pub fn init_logger(config: LoggerConfig, sink: Option<Sink>) -> Result<(), LoggerError> {
    let buffer = RollingBuffer::new(config.capacity);
    GLOBAL
        .set(buffer.clone())
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    tracing_subscriber::registry()
        .with(LevelFilter::from_level(config.max_level))
        .with(RollingLayer::new(config.app_name, buffer, sink))
        .try_init()
        .map_err(|e| LoggerError::Subscriber(e.to_string()))
}

/// Most recent lines from the global buffer; empty before [`init_logger`]
pub fn recent(count: usize) -> Vec<String> {
    GLOBAL
        .get()
        .map(|buffer| buffer.recent(count))
        .unwrap_or_default()
}
