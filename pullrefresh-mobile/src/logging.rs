//! Logging configuration for the browser
//!
//! Formats `tracing` events with `tracing-subscriber` and forwards each line to
//! the matching `console` method.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wasm_bindgen::JsValue;

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,     // log level (trace, debug, info, warn, error)
    pub with_target: bool, // prefix lines with the module path
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            with_target: true,
        }
    }
}

impl LoggingConfig {
    /// Install the console subscriber and the panic hook.
    ///
    /// Fails if a global subscriber is already set.
    pub fn init(&self) -> Result<(), Box<dyn std::error::Error>> {
        console_error_panic_hook::set_once();

        let env_filter = EnvFilter::try_new(&self.level)?;

        // No clock on wasm32-unknown-unknown, and the console adds its own
        let console_layer = fmt::layer()
            .without_time()
            .with_target(self.with_target)
            .with_level(true)
            .with_ansi(false)
            .with_writer(ConsoleMakeWriter);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .try_init()?;

        tracing::debug!("Logging initialized - level: {}", self.level);

        Ok(())
    }
}

/// Which `console` method a line goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLevel {
    Debug,
    Log,
    Warn,
    Error,
}

impl From<&Level> for ConsoleLevel {
    fn from(level: &Level) -> Self {
        match *level {
            Level::ERROR => ConsoleLevel::Error,
            Level::WARN => ConsoleLevel::Warn,
            Level::INFO => ConsoleLevel::Log,
            _ => ConsoleLevel::Debug,
        }
    }
}

struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(ConsoleLevel::Log)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(meta.level().into())
    }
}

/// Buffers one formatted event and emits it when dropped
struct ConsoleWriter {
    level: ConsoleLevel,
    buffer: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: ConsoleLevel) -> Self {
        Self {
            level,
            buffer: Vec::new(),
        }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }

        let line = JsValue::from_str(String::from_utf8_lossy(&self.buffer).trim_end());
        match self.level {
            ConsoleLevel::Debug => web_sys::console::debug_1(&line),
            ConsoleLevel::Log => web_sys::console::log_1(&line),
            ConsoleLevel::Warn => web_sys::console::warn_1(&line),
            ConsoleLevel::Error => web_sys::console::error_1(&line),
        }

        self.buffer.clear();
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let _ = io::Write::flush(self);
    }
}
