use std::collections::HashMap;

use crate::models::ledger::Ledger;
use crate::models::summary::{CategoryTotal, Summary};

/// Computes the overall and per-category totals of a ledger.
pub struct SummaryService;

impl SummaryService {
    pub fn new() -> Self {
        Self
    }

    /// Recompute the summary from scratch.
    ///
    /// Categories are grouped by exact string match and keep the order in
    /// which they first appear in the ledger.
    pub fn compute_summary(&self, ledger: &Ledger) -> Summary {
        let mut total = 0.0;
        let mut by_category: Vec<CategoryTotal> = Vec::new();
        let mut slots: HashMap<&str, usize> = HashMap::new();

        for expense in ledger {
            total += expense.amount;
            match slots.get(expense.category.as_str()) {
                Some(&slot) => by_category[slot].total += expense.amount,
                None => {
                    slots.insert(expense.category.as_str(), by_category.len());
                    by_category.push(CategoryTotal {
                        category: expense.category.clone(),
                        total: expense.amount,
                    });
                }
            }
        }

        Summary {
            count: ledger.len(),
            total,
            by_category,
        }
    }
}

impl Default for SummaryService {
    fn default() -> Self {
        Self::new()
    }
}
