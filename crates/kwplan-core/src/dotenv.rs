//! Minimal `KEY=value` dotfile reader used as the last credential source.
//!
//! Supported syntax is narrow: no `export` prefix, no escapes, no
//! interpolation. A missing or unreadable file is treated as empty.

use std::collections::BTreeMap;
use std::path::Path;

/// Default dotfile name, resolved relative to the working directory.
pub const DEFAULT_DOTENV_FILE: &str = ".env";

/// Parsed dotfile entries. Later duplicates overwrite earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DotEnv {
    entries: BTreeMap<String, String>,
}

impl DotEnv {
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                let parsed = Self::parse(&contents);
                tracing::debug!(path = %path.display(), entries = parsed.len(), "loaded dotfile");
                parsed
            }
            Err(error) => {
                tracing::debug!(path = %path.display(), %error, "dotfile not readable, ignoring");
                Self::default()
            }
        }
    }

    pub fn parse(contents: &str) -> Self {
        let mut entries = BTreeMap::new();

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            entries.insert(
                key.trim().to_string(),
                strip_quotes(value.trim()).to_string(),
            );
        }

        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for DotEnv
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Removes exactly one matching pair of surrounding quotes.
fn strip_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}
