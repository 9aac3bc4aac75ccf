use std::collections::HashMap;

use crate::errors::CoreError;

use super::traits::KeyValueStore;

/// Volatile store backed by a `HashMap`. Contents vanish with the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a value already present under `key`.
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut values = HashMap::new();
        values.insert(key.into(), value.into());
        Self { values }
    }

    /// Raw stored value, bypassing the `Result` of the trait method.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), CoreError> {
        self.values.remove(key);
        Ok(())
    }
}
