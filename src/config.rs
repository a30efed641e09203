use serde::Deserialize;

use crate::error::{Error, Result};
use crate::keys;
use crate::render::PatternRender;
use crate::value::Record;

pub use crate::pattern::DEFAULT_PATTERN;

/// Handler settings.
///
/// Every field is optional in serialized form. Metadata fields, when set, are
/// added to each record under their reserved keys unless the record already
/// carries a value there.
///
/// # Examples
///
/// ```
/// # use pattern_logger::HandlerConfig;
/// let config = HandlerConfig::from_json(r#"{ "format": "%L %M", "zone": "eu-1" }"#).unwrap();
/// assert_eq!(config.format, "%L %M");
/// assert!(!config.json);
/// assert_eq!(config.zone.as_deref(), Some("eu-1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "snake_case", deny_unknown_fields)]
pub struct HandlerConfig {
    /// Pattern string; ignored for output when `json` is set.
    pub format: String,
    /// Encode whole records as JSON instead of using `format`.
    pub json: bool,
    pub instance_id: Option<String>,
    pub app_id: Option<String>,
    pub deploy_env: Option<String>,
    pub zone: Option<String>,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_PATTERN.to_owned(),
            json: false,
            instance_id: None,
            app_id: None,
            deploy_env: None,
            zone: None,
        }
    }
}

impl HandlerConfig {
    /// Parses a JSON config document.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Builds a renderer for this config's format and mode.
    pub fn build_render(&self) -> PatternRender {
        if self.json {
            PatternRender::json(&self.format)
        } else {
            PatternRender::new(&self.format)
        }
    }

    /// Adds the configured metadata fields missing from `record`.
    pub fn apply_metadata(&self, record: &mut Record) {
        let fields = [
            (keys::INSTANCE_ID, &self.instance_id),
            (keys::APP_ID, &self.app_id),
            (keys::DEPLOY_ENV, &self.deploy_env),
            (keys::ZONE, &self.zone),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                record.insert_if_absent(key, value.as_str());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record;
    use crate::value::Value;

    #[test]
    fn test_empty_document_uses_defaults() {
        assert_eq!(HandlerConfig::from_json("{}").unwrap(), HandlerConfig::default());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = HandlerConfig::from_json(r#"{ "fromat": "%M" }"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_metadata_does_not_override_record() {
        let config = HandlerConfig {
            app_id: Some("billing".into()),
            zone: Some("eu-1".into()),
            ..HandlerConfig::default()
        };
        let mut rec = record! { "zone" => "us-2" };
        config.apply_metadata(&mut rec);
        assert_eq!(rec.get("zone"), Some(&Value::from("us-2")));
        assert_eq!(rec.get("appID"), Some(&Value::from("billing")));
        assert!(!rec.contains_key("instanceID"));
    }
}
