use serde::{Deserialize, Serialize};

/// Aggregate totals derived from the ledger.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of expenses that went into the totals
    pub count: usize,

    /// Sum of all amounts
    pub total: f64,

    /// Per-category sums, in order of each category's first appearance
    pub by_category: Vec<CategoryTotal>,
}

/// Sum of amounts for one exact category label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

impl Summary {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Total for a category label, or `None` if it never appears.
    #[must_use]
    pub fn category_total(&self, category: &str) -> Option<f64> {
        self.by_category
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.total)
    }

    /// Category labels in display order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        self.by_category.iter().map(|c| c.category.as_str()).collect()
    }
}
