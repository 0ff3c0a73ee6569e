use std::ffi::OsString;

use tracing::warn;

use super::source::ValueSource;

/// Reads values from the process environment.
///
/// With a prefix, `lookup("HOST")` reads `{prefix}HOST`.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    prefix: String,
}

impl EnvSource {
    /// Looks keys up verbatim.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prefixed(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn var_name(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}

impl ValueSource for EnvSource {
    fn lookup(&self, key: &str) -> Option<String> {
        let name = self.var_name(key);
        std::env::var_os(&name).and_then(|raw| into_unicode(&name, raw))
    }
}

fn into_unicode(name: &str, raw: OsString) -> Option<String> {
    match raw.into_string() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(var = name, "ignoring environment variable with non-unicode value");
            None
        }
    }
}
