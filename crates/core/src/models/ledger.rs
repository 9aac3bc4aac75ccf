use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::expense::Expense;

/// Ordered collection of all recorded expenses, oldest first.
///
/// Serializes as a bare JSON array, which is the durable snapshot format.
/// Mutation goes through `LedgerService` so the invariants on every
/// element hold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    pub(crate) expenses: Vec<Expense>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Expense> {
        self.expenses.get(index)
    }

    /// All expenses in insertion order.
    #[must_use]
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Expense> {
        self.expenses.iter()
    }

    /// Current position of the expense with the given id.
    #[must_use]
    pub fn position_of(&self, id: Uuid) -> Option<usize> {
        self.expenses.iter().position(|e| e.id == id)
    }

    #[must_use]
    pub fn last(&self) -> Option<&Expense> {
        self.expenses.last()
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Expense;
    type IntoIter = std::slice::Iter<'a, Expense>;

    fn into_iter(self) -> Self::IntoIter {
        self.expenses.iter()
    }
}
