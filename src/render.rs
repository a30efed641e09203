use std::fmt;
use std::io;
use std::sync::Arc;

use crate::buffer_pool::BufferPool;
use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::pattern::CompiledPattern;
use crate::value::Record;

/// Headroom added to a plan's literal text when sizing fresh buffers.
const FIELD_HEADROOM: usize = 128;

/// Turns a [`Record`] into output bytes.
///
/// Implementations are shared across threads and must not retain the record
/// after a call returns. None of the methods append a line separator.
pub trait Render: Send + Sync {
    /// Renders `record` and writes the result to `w` in one `write_all`.
    ///
    /// Nothing is written when encoding fails.
    fn render(&self, w: &mut dyn io::Write, record: &Record) -> Result<()>;

    /// Renders `record` into a new byte vector.
    fn render_bytes(&self, record: &Record) -> Result<Vec<u8>>;

    /// Best-effort string form: an encoding failure yields an empty string.
    fn render_string(&self, record: &Record) -> String;
}

/// The pattern/JSON renderer.
///
/// In text mode the compiled plan is applied step by step into a buffer
/// borrowed from the renderer's own [`BufferPool`]. In JSON mode the plan is
/// ignored and the whole record is encoded, with no pooling.
///
/// # Examples
///
/// ```
/// use pattern_logger::{record, PatternRender, Render};
///
/// let text = PatternRender::new("%L %M");
/// let json = PatternRender::json("%L %M");
/// let rec = record! { "level" => "INFO", "log" => "boot" };
///
/// assert_eq!(text.render_string(&rec), "INFO boot");
/// let decoded: serde_json::Value = serde_json::from_slice(&json.render_bytes(&rec).unwrap()).unwrap();
/// assert_eq!(decoded["log"], "boot");
/// ```
pub struct PatternRender {
    plan: CompiledPattern,
    json: bool,
    pool: BufferPool,
    clock: Arc<dyn Clock>,
}

impl PatternRender {
    /// Text-mode renderer for `format`.
    pub fn new(format: &str) -> Self {
        Self::from_plan(CompiledPattern::compile(format), false)
    }

    /// JSON-mode renderer. `format` is compiled but never used for output.
    pub fn json(format: &str) -> Self {
        Self::from_plan(CompiledPattern::compile(format), true)
    }

    pub fn from_plan(plan: CompiledPattern, json: bool) -> Self {
        let pool = BufferPool::with_buffer_capacity(plan.literal_len() + FIELD_HEADROOM);
        Self {
            plan,
            json,
            pool,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the clock read by time and date directives.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn plan(&self) -> &CompiledPattern {
        &self.plan
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Scratch buffers currently idle in this renderer's pool.
    pub fn idle_buffers(&self) -> usize {
        self.pool.idle()
    }

    fn encode(&self, record: &Record) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(record)?)
    }
}

impl Render for PatternRender {
    fn render(&self, w: &mut dyn io::Write, record: &Record) -> Result<()> {
        if self.json {
            let data = self.encode(record)?;
            w.write_all(&data)?;
            return Ok(());
        }
        let mut buf = self.pool.acquire();
        self.plan.write_to(&mut buf, record, self.clock.as_ref());
        w.write_all(buf.as_bytes())?;
        Ok(())
    }

    fn render_bytes(&self, record: &Record) -> Result<Vec<u8>> {
        if self.json {
            return self.encode(record);
        }
        let mut buf = self.pool.acquire();
        self.plan.write_to(&mut buf, record, self.clock.as_ref());
        Ok(buf.to_bytes())
    }

    fn render_string(&self, record: &Record) -> String {
        if self.json {
            return serde_json::to_string(record).unwrap_or_default();
        }
        let mut buf = self.pool.acquire();
        self.plan.write_to(&mut buf, record, self.clock.as_ref());
        buf.as_str().to_owned()
    }
}

impl fmt::Debug for PatternRender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternRender")
            .field("plan", &self.plan)
            .field("json", &self.json)
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}
