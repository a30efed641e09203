//! # Pattern Logger
//!
//! Renders structured log records into bytes, either as a full JSON object or
//! through a compact pattern string such as `"%D %T %L [%s] %M"`.
//!
//! * **Compile once**: a pattern is parsed a single time into an immutable plan
//!   of literal runs and directives
//! * **Render often**: plans are shared read-only across threads, and text-mode
//!   renders borrow scratch buffers from a per-renderer pool
//!
//! ## Directives
//!
//! | directive | output |
//! |---|---|
//! | `%T` / `%t` | wall clock `hh:mm:ss.mmm` / `hh:mm` |
//! | `%D` / `%d` | date `yyyy/mm/dd` / `mm/dd` |
//! | `%L` | `level` field |
//! | `%f` | `source` field as is |
//! | `%i` / `%e` / `%z` | `instanceID` / `deployEnv` / `zone` fields |
//! | `%S` / `%s` | full / basename of `source`, `unknown:0` when missing |
//! | `%M` | extra fields as `key=value`, then the `log` message |
//!
//! Any other `%x` sequence, and a trailing `%`, is copied through literally.
//!
//! ## Quick Start
//!
//! ```
//! use pattern_logger::{record, PatternRender, Render};
//!
//! let render = PatternRender::new("%L [%s] %M");
//! let rec = record! {
//!     "level" => "INFO",
//!     "source" => "/srv/app/main.rs:42",
//!     "log" => "boot",
//! };
//! assert_eq!(render.render_string(&rec), "INFO [main.rs:42] boot");
//! ```

pub mod value;
pub mod keys;
pub mod clock;
pub mod directive;
pub mod pattern;
pub mod buffer_pool;
pub mod render;
pub mod error;
pub mod config;
pub mod handler;
pub mod bridge;

pub use value::{Record, Value};
pub use clock::{Clock, FixedClock, SystemClock};
pub use directive::Directive;
pub use pattern::{compile, CompiledPattern, Step, DEFAULT_PATTERN};
pub use buffer_pool::{BufferPool, PooledBuffer};
pub use render::{PatternRender, Render};
pub use error::{Error, Result};
pub use config::HandlerConfig;
pub use handler::{json_stderr_handler, stderr_handler, Handler, Level, WriterHandler};
pub use bridge::PatternLogger;
