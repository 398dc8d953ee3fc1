//! File-based preference store.
//!
//! [`FilePreferences`] keeps every preference in a single JSON object:
//!
//! ```text
//! {dir}/
//! +-- preferences.json   # {"preferred-comment-page-size": "10", ...}
//! ```
//!
//! Every `get` re-reads the file so several processes sharing the directory
//! see each other's writes. A missing or corrupt file reads as empty; the next
//! `set` replaces it.

use std::fs;
use std::path::PathBuf;

use serde_json::{Map, Value};

use crate::PreferenceStore;

const FILE_NAME: &str = "preferences.json";

/// [`PreferenceStore`] persisted as a JSON file inside a directory.
pub struct FilePreferences {
    path: PathBuf,
}

impl FilePreferences {
    /// Create a store backed by `{dir}/preferences.json`.
    ///
    /// Nothing is touched on disk until the first `set`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(FILE_NAME),
        }
    }

    fn load(&self) -> Map<String, Value> {
        let Ok(content) = fs::read_to_string(&self.path) else {
            return Map::new();
        };
        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                tracing::warn!(path = %self.path.display(), "preferences file is not a JSON object, ignoring");
                Map::new()
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "failed to parse preferences file: {e}");
                Map::new()
            }
        }
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        match self.load().remove(key)? {
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        }
    }

    fn set(&self, key: &str, value: &str) {
        let mut map = self.load();
        map.insert(key.to_owned(), Value::String(value.to_owned()));

        if let Some(parent) = self.path.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            tracing::warn!("failed to create preferences directory: {e}");
            return;
        }

        let body = match serde_json::to_string_pretty(&Value::Object(map)) {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("failed to serialize preferences: {e}");
                return;
            }
        };
        if let Err(e) = fs::write(&self.path, body) {
            tracing::warn!(path = %self.path.display(), "failed to write preferences: {e}");
        } else {
            tracing::debug!(key, value, "preference stored");
        }
    }
}
