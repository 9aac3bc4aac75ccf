use crate::errors::CoreError;

/// Host-provided persistent key-value storage.
///
/// The ledger only ever needs a single string value under a fixed key,
/// read once at startup and overwritten in full after every change. Hosts
/// plug in whatever they have: a directory on disk, browser local
/// storage, or an in-memory map for tests.
pub trait KeyValueStore {
    /// Human-readable name of this backend (for logs/errors).
    fn name(&self) -> &str;

    /// Read the value stored under `key`, or `None` if absent.
    ///
    /// A value that exists but cannot be decoded as text is reported as
    /// `CoreError::Deserialization`, not as an I/O failure.
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError>;

    /// Delete the value under `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), CoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), CoreError> {
        (**self).remove(key)
    }
}
