use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single recorded expense.
///
/// Expenses are never edited after creation: the only way to change the
/// ledger is to add a new one or delete an existing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Stable identifier, survives deletes of neighbouring entries.
    /// Older snapshots written without one get a fresh id on load.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    /// Spent amount (always positive, currency-agnostic)
    pub amount: f64,

    /// Free-form category label, matched exactly (case-sensitive)
    pub category: String,

    /// Free-form description
    pub description: String,

    /// Moment the expense was recorded, serialized as RFC 3339
    pub date: DateTime<Utc>,
}

impl Expense {
    /// Create an expense stamped with the current time.
    pub fn new(amount: f64, category: impl Into<String>, description: impl Into<String>) -> Self {
        Self::recorded_at(amount, category, description, Utc::now())
    }

    /// Create an expense with an explicit timestamp (imports, tests).
    pub fn recorded_at(
        amount: f64,
        category: impl Into<String>,
        description: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            category: category.into(),
            description: description.into(),
            date,
        }
    }

    /// Whether the record satisfies the ledger invariants.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.amount.is_finite()
            && self.amount > 0.0
            && !self.category.trim().is_empty()
            && !self.description.trim().is_empty()
    }
}
