use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::CoreError;
use crate::models::expense::Expense;
use crate::models::ledger::Ledger;

use super::traits::KeyValueStore;

/// High-level storage operations: ledger ⇄ JSON snapshot ⇄ key-value store.
pub struct StorageManager;

impl StorageManager {
    /// Serialize a ledger to its durable form: a compact JSON array.
    pub fn to_json(ledger: &Ledger) -> Result<String, CoreError> {
        serde_json::to_string(ledger)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize ledger: {e}")))
    }

    /// Strictly parse a snapshot. Any malformed or invalid record fails the
    /// whole parse.
    pub fn from_json(json: &str) -> Result<Ledger, CoreError> {
        let expenses: Vec<Expense> = serde_json::from_str(json)
            .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize ledger: {e}")))?;
        if let Some(bad) = expenses.iter().position(|e| !e.is_valid()) {
            return Err(CoreError::Deserialization(format!(
                "Record {bad} has a non-positive amount or an empty field"
            )));
        }
        Ok(Ledger { expenses })
    }

    /// Load the ledger stored under `key`.
    ///
    /// - absent value → empty ledger
    /// - value that is not text or not a JSON array → empty ledger (logged)
    /// - array with unreadable or invalid records → those records dropped (logged)
    ///
    /// Only a failure of the store itself is an error.
    pub fn load_ledger<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Result<Ledger, CoreError> {
        let raw = match store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(store = store.name(), key, "no stored ledger, starting empty");
                return Ok(Ledger::new());
            }
            Err(CoreError::Deserialization(reason)) => {
                warn!(store = store.name(), key, %reason, "stored ledger is unreadable, discarding");
                return Ok(Ledger::new());
            }
            Err(e) => return Err(e),
        };

        let items = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(items)) => items,
            Ok(other) => {
                warn!(store = store.name(), key, kind = json_kind(&other), "stored ledger is not an array, discarding");
                return Ok(Ledger::new());
            }
            Err(e) => {
                warn!(store = store.name(), key, error = %e, "stored ledger is not valid JSON, discarding");
                return Ok(Ledger::new());
            }
        };

        let total = items.len();
        let expenses: Vec<Expense> = items
            .into_iter()
            .filter_map(|item| serde_json::from_value::<Expense>(item).ok())
            .filter(Expense::is_valid)
            .collect();

        let dropped = total - expenses.len();
        if dropped > 0 {
            warn!(store = store.name(), key, dropped, kept = expenses.len(), "dropped unreadable expense records");
        }

        Ok(Ledger { expenses })
    }

    /// Overwrite the value under `key` with the full ledger snapshot.
    pub fn save_ledger<S: KeyValueStore + ?Sized>(
        store: &mut S,
        key: &str,
        ledger: &Ledger,
    ) -> Result<(), CoreError> {
        let json = Self::to_json(ledger)?;
        store.set(key, &json)?;
        debug!(store = store.name(), key, expenses = ledger.len(), bytes = json.len(), "ledger persisted");
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
