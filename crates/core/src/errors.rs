use thiserror::Error;

/// Unified error type for the entire expense-tracker-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Input ───────────────────────────────────────────────────────
    /// The only error a user can trigger: a bad amount, an empty
    /// category or an empty description.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ── Storage ─────────────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("File I/O error: {0}")]
    FileIO(String),

    #[error("Storage error ({backend}): {message}")]
    Storage {
        backend: String,
        message: String,
    },

    // ── Configuration ───────────────────────────────────────────────
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

impl CoreError {
    /// `true` for errors caused by what the user typed, as opposed to
    /// failures of the host storage.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, CoreError::InvalidInput(_))
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
