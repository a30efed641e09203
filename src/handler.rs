use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::clock::{Clock, SystemClock};
use crate::config::HandlerConfig;
use crate::error::Result;
use crate::keys;
use crate::pattern::CompiledPattern;
use crate::render::{PatternRender, Render};
use crate::value::Record;

/// Layout of the `time` field handlers stamp on each record.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Severity of a log call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Fatal = 5,
}

impl Level {
    /// Name stored under `level`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
        }
    }

    /// Number stored under `levelValue`.
    pub const fn value(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Trace | log::Level::Debug => Level::Debug,
            log::Level::Info => Level::Info,
            log::Level::Warn => Level::Warn,
            log::Level::Error => Level::Error,
        }
    }
}

/// Destination-side logging handler.
///
/// A handler completes a record (level, time, deployment metadata), renders it
/// and writes it. Logging never reports failure to the caller: a record that
/// cannot be encoded or written is dropped and reported through `tracing`.
pub trait Handler: Send + Sync {
    /// Completes, renders and writes one record.
    fn log(&self, level: Level, record: Record);

    /// Recompiles the output pattern, keeping the current JSON/text mode.
    ///
    /// Records already being rendered finish with the previous pattern.
    fn set_format(&self, format: &str);

    fn flush(&self) -> Result<()>;

    fn close(&self) -> Result<()> {
        self.flush()
    }
}

/// A [`Handler`] writing newline-terminated records to any `io::Write`.
///
/// Each record is rendered outside the sink lock and then written, together
/// with its trailing newline, in a single `write_all` under the lock, so lines
/// from concurrent callers never interleave.
///
/// # Examples
///
/// ```
/// use pattern_logger::{record, Handler, HandlerConfig, Level, WriterHandler};
///
/// let handler = WriterHandler::new(Vec::new(), &HandlerConfig::default().with_format("%L %M"));
/// handler.log(Level::Warn, record! { "log" => "disk almost full" });
/// assert_eq!(handler.into_inner(), b"WARN disk almost full\n");
/// ```
pub struct WriterHandler<W> {
    render: RwLock<Arc<PatternRender>>,
    sink: Mutex<W>,
    config: HandlerConfig,
    clock: Arc<dyn Clock>,
}

impl<W: Write + Send> WriterHandler<W> {
    pub fn new(writer: W, config: &HandlerConfig) -> Self {
        Self {
            render: RwLock::new(Arc::new(config.build_render())),
            sink: Mutex::new(writer),
            config: config.clone(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the clock used for the `time` field and for time directives.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        let current = self.render.get_mut();
        *current = Arc::new(
            PatternRender::from_plan(current.plan().clone(), current.is_json())
                .with_clock(Arc::clone(&clock)),
        );
        self.clock = clock;
        self
    }

    /// Snapshot of the renderer in use right now.
    pub fn current_render(&self) -> Arc<PatternRender> {
        Arc::clone(&*self.render.read())
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    /// Consumes the handler and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.sink.into_inner()
    }

    fn complete(&self, level: Level, record: &mut Record) {
        record.insert(keys::LEVEL, level.as_str());
        record.insert(keys::LEVEL_VALUE, level.value());
        record.insert(keys::TIME, self.clock.now().format(TIME_FORMAT).to_string());
        self.config.apply_metadata(record);
    }

    fn write_record(&self, record: &Record) -> Result<()> {
        let render = self.current_render();
        let mut line = render.render_bytes(record)?;
        line.push(b'\n');
        self.sink.lock().write_all(&line)?;
        Ok(())
    }
}

impl<W: Write + Send> Handler for WriterHandler<W> {
    fn log(&self, level: Level, mut record: Record) {
        self.complete(level, &mut record);
        if let Err(err) = self.write_record(&record) {
            tracing::warn!(error = %err, %level, "dropping log record");
        }
    }

    fn set_format(&self, format: &str) {
        let json = self.render.read().is_json();
        let next = PatternRender::from_plan(CompiledPattern::compile(format), json)
            .with_clock(Arc::clone(&self.clock));
        *self.render.write() = Arc::new(next);
        tracing::debug!(format, json, "handler format replaced");
    }

    fn flush(&self) -> Result<()> {
        self.sink.lock().flush()?;
        Ok(())
    }
}

impl<W> fmt::Debug for WriterHandler<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterHandler")
            .field("render", &*self.render.read())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Handler writing to standard error with `config`.
pub fn stderr_handler(config: &HandlerConfig) -> WriterHandler<io::Stderr> {
    WriterHandler::new(io::stderr(), config)
}

/// JSON handler on standard error using the default pattern.
pub fn json_stderr_handler() -> WriterHandler<io::Stderr> {
    stderr_handler(&HandlerConfig::default().with_json(true))
}
