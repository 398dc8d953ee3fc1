//! Persisted preferences for Folio.
//!
//! A [`PreferenceStore`] is a tiny string key-value store that survives
//! restarts. Consumers never see storage errors: a failed read is a miss and
//! a failed write is logged and dropped.
//!
//! # Implementations
//!
//! - [`NullPreferences`]: never stores anything
//! - [`MemoryPreferences`]: process-local map, used in tests and when
//!   persistence is disabled
//! - [`FilePreferences`]: JSON object file on disk
//!
//! # Example
//!
//! ```
//! use folio_prefs::{MemoryPreferences, PreferenceStore};
//!
//! let prefs = MemoryPreferences::new();
//! prefs.set("theme", "dark");
//! assert_eq!(prefs.get("theme").as_deref(), Some("dark"));
//! ```

mod file;
pub use file::FilePreferences;

use std::collections::HashMap;
use std::sync::RwLock;

/// String key-value store for user preferences.
pub trait PreferenceStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if absent or unreadable.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str);
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Box<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value);
    }
}

/// No-op [`PreferenceStore`]: every `get` misses, every `set` is discarded.
pub struct NullPreferences;

impl PreferenceStore for NullPreferences {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) {}
}

/// In-memory [`PreferenceStore`].
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryPreferences {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style initial value, for seeding tests.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_value(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.write().unwrap().insert(key.into(), value.into());
        self
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.write() {
            values.insert(key.to_owned(), value.to_owned());
        }
    }
}
