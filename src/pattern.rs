use crate::clock::Clock;
use crate::directive::Directive;
use crate::value::Record;

/// Default layout used by handlers when no format is configured.
pub const DEFAULT_PATTERN: &str = "%D %T %L [%s] %M";

/// One step of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Constant text, always a maximal run between directives.
    Literal(Box<str>),
    /// A directive resolved against the record at render time.
    Directive(Directive),
}

impl Step {
    #[inline]
    pub fn write_to(&self, out: &mut String, record: &Record, clock: &dyn Clock) {
        match self {
            Step::Literal(text) => out.push_str(text),
            Step::Directive(directive) => directive.write_to(out, record, clock),
        }
    }
}

/// An immutable execution plan built from a pattern string.
///
/// Applying the steps in order gives the same text as interpreting the
/// pattern directly, left to right.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompiledPattern {
    steps: Box<[Step]>,
    /// Rough output size used to pre-size scratch buffers.
    literal_len: usize,
}

impl CompiledPattern {
    /// Parses `format` in a single left-to-right pass.
    ///
    /// Compilation never fails. A `%` that is not followed by a known directive
    /// character, including a `%` at the very end, is kept as literal text.
    /// Adjacent literal text is always merged into one step.
    ///
    /// # Examples
    ///
    /// ```
    /// # use pattern_logger::{CompiledPattern, Directive, Step};
    /// let plan = CompiledPattern::compile("[%L] %Q %M%");
    /// assert_eq!(plan.steps(), &[
    ///     Step::Literal("[".into()),
    ///     Step::Directive(Directive::Level),
    ///     Step::Literal("] %Q ".into()),
    ///     Step::Directive(Directive::Message),
    ///     Step::Literal("%".into()),
    /// ]);
    /// ```
    pub fn compile(format: &str) -> Self {
        let bytes = format.as_bytes();
        let mut steps = Vec::new();
        let mut literal_len = 0;
        let mut literal_start = 0;
        let mut i = 0;

        while i < bytes.len() {
            if bytes[i] != b'%' {
                i += 1;
                continue;
            }
            let directive = match bytes.get(i + 1).copied().and_then(Directive::from_byte) {
                Some(d) => d,
                None => {
                    // Not a directive: the '%' stays in the literal run and the
                    // next character is scanned on its own.
                    i += 1;
                    continue;
                }
            };
            // '%' and directive characters are ASCII, so both cut points fall on
            // char boundaries.
            if literal_start < i {
                literal_len += i - literal_start;
                steps.push(Step::Literal(format[literal_start..i].into()));
            }
            steps.push(Step::Directive(directive));
            i += 2;
            literal_start = i;
        }
        if literal_start < bytes.len() {
            literal_len += bytes.len() - literal_start;
            steps.push(Step::Literal(format[literal_start..].into()));
        }

        tracing::trace!(format, steps = steps.len(), "compiled pattern");
        Self {
            steps: steps.into_boxed_slice(),
            literal_len,
        }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Total length of the literal text in the plan.
    pub fn literal_len(&self) -> usize {
        self.literal_len
    }

    /// Returns true if the plan contains `directive`.
    pub fn uses(&self, directive: Directive) -> bool {
        self.steps.iter().any(|s| *s == Step::Directive(directive))
    }

    /// Appends the rendered text for `record` to `out`.
    pub fn write_to(&self, out: &mut String, record: &Record, clock: &dyn Clock) {
        for step in self.steps.iter() {
            step.write_to(out, record, clock);
        }
    }
}

/// Shorthand for [`CompiledPattern::compile`].
pub fn compile(format: &str) -> CompiledPattern {
    CompiledPattern::compile(format)
}
