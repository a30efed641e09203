use std::collections::HashSet;

use lazy_static::lazy_static;

/// Reserved record keys.
///
/// These names form the only schema shared with record producers, so spelling
/// and casing are fixed.
pub const LEVEL: &str = "level";
pub const LEVEL_VALUE: &str = "levelValue";
pub const TIME: &str = "time";
pub const SOURCE: &str = "source";
pub const INSTANCE_ID: &str = "instanceID";
pub const APP_ID: &str = "appID";
pub const DEPLOY_ENV: &str = "deployEnv";
pub const ZONE: &str = "zone";
/// The free-text message body.
pub const LOG: &str = "log";

lazy_static! {
    /// Keys that already have a dedicated directive or carry handler metadata.
    static ref INTERNAL_KEYS: HashSet<&'static str> = [
        LEVEL,
        LEVEL_VALUE,
        TIME,
        SOURCE,
        INSTANCE_ID,
        APP_ID,
        DEPLOY_ENV,
        ZONE,
    ]
    .into_iter()
    .collect();
}

/// Returns true for keys that `%M` must not fold into its `key=value` list.
///
/// The message key itself is not internal: `%M` consumes it separately as the
/// trailing text.
pub fn is_internal_key(key: &str) -> bool {
    INTERNAL_KEYS.contains(key)
}

/// Returns true for keys that `%M` prints as `key=value`.
pub fn is_extra_key(key: &str) -> bool {
    key != LOG && !is_internal_key(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_keys_are_internal() {
        for key in ["level", "levelValue", "time", "source", "instanceID", "appID", "deployEnv", "zone"] {
            assert!(is_internal_key(key), "{} should be internal", key);
            assert!(!is_extra_key(key));
        }
    }

    #[test]
    fn test_message_key_is_neither_internal_nor_extra() {
        assert!(!is_internal_key(LOG));
        assert!(!is_extra_key(LOG));
    }

    #[test]
    fn test_casing_is_exact() {
        assert!(is_extra_key("Level"));
        assert!(is_extra_key("instanceId"));
        assert!(is_extra_key("user"));
    }
}
