use std::fmt::Write;

use crate::clock::Clock;
use crate::keys;
use crate::value::{Record, Value};

/// Fallback for `%S` / `%s` when the record has no string `source`.
pub const UNKNOWN_SOURCE: &str = "unknown:0";

const LONG_TIME: &str = "%H:%M:%S%.3f";
const SHORT_TIME: &str = "%H:%M";
const LONG_DATE: &str = "%Y/%m/%d";
const SHORT_DATE: &str = "%m/%d";

/// The closed set of single-character pattern directives.
///
/// Each variant resolves to display text for one record. Resolution is pure
/// except for the time and date variants, which read the supplied clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    /// `%T`: `hh:mm:ss.mmm`
    LongTime,
    /// `%t`: `hh:mm`
    ShortTime,
    /// `%D`: `yyyy/mm/dd`
    LongDate,
    /// `%d`: `mm/dd`
    ShortDate,
    /// `%L`
    Level,
    /// `%f`: `source` exactly as stored
    Source,
    /// `%i`
    InstanceId,
    /// `%e`
    DeployEnv,
    /// `%z`
    Zone,
    /// `%S`
    LongSource,
    /// `%s`
    ShortSource,
    /// `%M`
    Message,
}

impl Directive {
    /// Every directive, in registry order.
    pub const ALL: [Directive; 12] = [
        Directive::LongTime,
        Directive::ShortTime,
        Directive::LongDate,
        Directive::ShortDate,
        Directive::Level,
        Directive::Source,
        Directive::InstanceId,
        Directive::DeployEnv,
        Directive::Zone,
        Directive::LongSource,
        Directive::ShortSource,
        Directive::Message,
    ];

    /// Looks up the directive bound to `c`, if any.
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'T' => Some(Directive::LongTime),
            't' => Some(Directive::ShortTime),
            'D' => Some(Directive::LongDate),
            'd' => Some(Directive::ShortDate),
            'L' => Some(Directive::Level),
            'f' => Some(Directive::Source),
            'i' => Some(Directive::InstanceId),
            'e' => Some(Directive::DeployEnv),
            'z' => Some(Directive::Zone),
            'S' => Some(Directive::LongSource),
            's' => Some(Directive::ShortSource),
            'M' => Some(Directive::Message),
            _ => None,
        }
    }

    /// Byte-level lookup used by the compiler. Directive characters are ASCII.
    #[inline]
    pub(crate) const fn from_byte(b: u8) -> Option<Self> {
        if b.is_ascii() {
            Self::from_char(b as char)
        } else {
            None
        }
    }

    /// The character that selects this directive in a pattern.
    pub const fn as_char(self) -> char {
        match self {
            Directive::LongTime => 'T',
            Directive::ShortTime => 't',
            Directive::LongDate => 'D',
            Directive::ShortDate => 'd',
            Directive::Level => 'L',
            Directive::Source => 'f',
            Directive::InstanceId => 'i',
            Directive::DeployEnv => 'e',
            Directive::Zone => 'z',
            Directive::LongSource => 'S',
            Directive::ShortSource => 's',
            Directive::Message => 'M',
        }
    }

    /// Appends this directive's output for `record` to `out`.
    pub fn write_to(self, out: &mut String, record: &Record, clock: &dyn Clock) {
        match self {
            Directive::LongTime => write_now(out, clock, LONG_TIME),
            Directive::ShortTime => write_now(out, clock, SHORT_TIME),
            Directive::LongDate => write_now(out, clock, LONG_DATE),
            Directive::ShortDate => write_now(out, clock, SHORT_DATE),
            Directive::Level => write_field(out, record, keys::LEVEL),
            Directive::Source => write_field(out, record, keys::SOURCE),
            Directive::InstanceId => write_field(out, record, keys::INSTANCE_ID),
            Directive::DeployEnv => write_field(out, record, keys::DEPLOY_ENV),
            Directive::Zone => write_field(out, record, keys::ZONE),
            Directive::LongSource => out.push_str(source_of(record).unwrap_or(UNKNOWN_SOURCE)),
            Directive::ShortSource => {
                out.push_str(source_of(record).map_or(UNKNOWN_SOURCE, base_name))
            }
            Directive::Message => write_message(out, record),
        }
    }

    /// Convenience form of [`Directive::write_to`] returning a new string.
    pub fn resolve(self, record: &Record, clock: &dyn Clock) -> String {
        let mut out = String::new();
        self.write_to(&mut out, record, clock);
        out
    }
}

fn write_now(out: &mut String, clock: &dyn Clock, fmt: &str) {
    // Writing into a String cannot fail.
    let _ = write!(out, "{}", clock.now().format(fmt));
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::String(s) => out.push_str(s),
        other => {
            let _ = write!(out, "{}", other);
        }
    }
}

/// Single-key lookup; a missing key renders as nothing.
fn write_field(out: &mut String, record: &Record, key: &str) {
    if let Some(value) = record.get(key) {
        write_value(out, value);
    }
}

fn source_of(record: &Record) -> Option<&str> {
    record.get(keys::SOURCE).and_then(Value::as_str)
}

/// Last slash-separated element of `path`, ignoring trailing slashes.
///
/// An empty path yields `"."` and a path made only of slashes yields `"/"`.
pub fn base_name(path: &str) -> &str {
    if path.is_empty() {
        return ".";
    }
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/";
    }
    match trimmed.rfind('/') {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

/// `%M`: each extra field as `key=value` followed by a space, then the message.
///
/// Extra fields come out in the record's iteration order, which is unspecified.
fn write_message(out: &mut String, record: &Record) {
    let mut message = None;
    for (key, value) in record {
        if key == keys::LOG {
            message = Some(value);
            continue;
        }
        if keys::is_internal_key(key) {
            continue;
        }
        out.push_str(key);
        out.push('=');
        write_value(out, value);
        out.push(' ');
    }
    if let Some(value) = message {
        write_value(out, value);
    }
}
