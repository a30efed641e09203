use log::{Log, Metadata};

use crate::handler::Handler;
use crate::keys;
use crate::value::Record;

/// Adapter that routes `log` crate records into a [`Handler`].
///
/// The formatted message becomes `log` and the call site becomes `source`
/// (`file:line`). Every record is forwarded; gating is left to
/// `log::set_max_level`.
#[derive(Debug)]
pub struct PatternLogger<H> {
    handler: H,
}

impl<H: Handler> PatternLogger<H> {
    pub fn new(handler: H) -> Self {
        Self { handler }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn into_inner(self) -> H {
        self.handler
    }

    fn to_record(record: &log::Record<'_>) -> Record {
        let mut rec = Record::with_capacity(6);
        rec.insert(keys::LOG, record.args().to_string());
        if let Some(file) = record.file() {
            let source = match record.line() {
                Some(line) => format!("{}:{}", file, line),
                None => file.to_owned(),
            };
            rec.insert(keys::SOURCE, source);
        }
        rec
    }
}

impl<H: Handler> Log for PatternLogger<H> {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        self.handler.log(record.level().into(), Self::to_record(record));
    }

    fn flush(&self) {
        if let Err(err) = self.handler.flush() {
            tracing::warn!(error = %err, "failed to flush log handler");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn test_source_from_call_site() {
        let rec = PatternLogger::<crate::WriterHandler<Vec<u8>>>::to_record(
            &log::Record::builder()
                .args(format_args!("hello {}", 7))
                .file(Some("src/net/conn.rs"))
                .line(Some(88))
                .build(),
        );
        assert_eq!(rec.get("log"), Some(&Value::from("hello 7")));
        assert_eq!(rec.get("source"), Some(&Value::from("src/net/conn.rs:88")));
    }

    #[test]
    fn test_missing_file_leaves_source_unset() {
        let rec = PatternLogger::<crate::WriterHandler<Vec<u8>>>::to_record(
            &log::Record::builder().args(format_args!("bare")).build(),
        );
        assert!(!rec.contains_key("source"));
    }
}
