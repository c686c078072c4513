// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context as _, Result};
use std::fmt::Write as _;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use time::OffsetDateTime;
use tracing::Subscriber;
use tracing::field::{Field, Visit};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

/// Oldest entries are dropped once the buffer reaches this size.
pub const MAX_LOG_ENTRIES: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
    Debug,
}

impl LogLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Debug => "DEBUG",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: OffsetDateTime,
    pub level: LogLevel,
    pub message: String,
}

#[derive(Debug, Default)]
struct StoreInner {
    entries: Vec<LogEntry>,
    suppress: bool,
}

/// Bounded in-memory log buffer shared between the capture layer and the
/// terminal client. Snapshot reads, explicit clear, and a suppress flag
/// controlling whether entries are also echoed to stderr.
#[derive(Debug, Clone, Default)]
pub struct LogStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl LogStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push(&self, level: LogLevel, message: &str) {
        let message = message.trim();
        if message.is_empty() {
            return;
        }

        let entry = LogEntry {
            timestamp: OffsetDateTime::now_utc(),
            level,
            message: message.to_owned(),
        };

        let mut inner = self.lock();
        if !inner.suppress {
            eprintln!("[{}] {}", level.as_str(), message);
        }
        inner.entries.push(entry);
        if inner.entries.len() > MAX_LOG_ENTRIES {
            inner.entries.remove(0);
        }
    }

    /// Snapshot of all captured entries, oldest first.
    pub fn logs(&self) -> Vec<LogEntry> {
        self.lock().entries.clone()
    }

    pub fn clear(&self) {
        self.lock().entries.clear();
    }

    /// Mute or unmute the stderr echo. Captured entries are kept either way.
    pub fn set_suppress(&self, suppress: bool) {
        self.lock().suppress = suppress;
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Route all `tracing` events in this process into the store. Fails if a
    /// global subscriber is already set.
    pub fn install_capture(&self) -> Result<()> {
        tracing_subscriber::registry()
            .with(CaptureLayer {
                store: self.clone(),
            })
            .try_init()
            .context("install log capture subscriber")
    }
}

struct CaptureLayer {
    store: LogStore,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let level = match *event.metadata().level() {
            tracing::Level::ERROR => LogLevel::Error,
            tracing::Level::WARN => LogLevel::Warn,
            tracing::Level::INFO => LogLevel::Info,
            tracing::Level::DEBUG | tracing::Level::TRACE => LogLevel::Debug,
        };

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        self.store.push(level, &visitor.rendered);
    }
}

#[derive(Default)]
struct MessageVisitor {
    rendered: String,
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.append(field.name(), value);
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.append(field.name(), &format!("{value:?}"));
    }
}

impl MessageVisitor {
    fn append(&mut self, name: &str, value: &str) {
        if name == "message" {
            if self.rendered.is_empty() {
                self.rendered = value.to_owned();
            } else {
                self.rendered = format!("{value} {}", self.rendered);
            }
        } else {
            if !self.rendered.is_empty() {
                self.rendered.push(' ');
            }
            let _ = write!(self.rendered, "{name}={value}");
        }
    }
}
