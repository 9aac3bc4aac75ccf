use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Delete affordance attached to one rendered list line.
///
/// Carries both the position at render time and the expense id, so a
/// handle from an outdated render can be told apart from a current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteHandle {
    pub index: usize,
    pub id: Uuid,
}

/// One line of the expense list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub line: String,
    pub delete: DeleteHandle,
}

/// Rendered expense list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListView {
    /// Nothing recorded yet
    Empty { placeholder: String },
    /// One item per expense, in ledger order
    Items(Vec<ListItem>),
}

impl ListView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, ListView::Empty { .. })
    }

    /// Items of a non-empty list (empty slice for the placeholder).
    #[must_use]
    pub fn items(&self) -> &[ListItem] {
        match self {
            ListView::Empty { .. } => &[],
            ListView::Items(items) => items,
        }
    }

    /// Display lines, the placeholder counting as a single line.
    #[must_use]
    pub fn lines(&self) -> Vec<&str> {
        match self {
            ListView::Empty { placeholder } => vec![placeholder.as_str()],
            ListView::Items(items) => items.iter().map(|i| i.line.as_str()).collect(),
        }
    }
}

/// Rendered summary panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SummaryView {
    /// Nothing to summarize
    Empty { placeholder: String },
    /// Overall total followed by per-category lines
    Totals {
        total_line: String,
        heading: String,
        category_lines: Vec<String>,
    },
}

impl SummaryView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, SummaryView::Empty { .. })
    }

    #[must_use]
    pub fn lines(&self) -> Vec<&str> {
        match self {
            SummaryView::Empty { placeholder } => vec![placeholder.as_str()],
            SummaryView::Totals {
                total_line,
                heading,
                category_lines,
            } => {
                let mut lines = vec![total_line.as_str(), heading.as_str()];
                lines.extend(category_lines.iter().map(String::as_str));
                lines
            }
        }
    }
}

/// The pair of views produced after every change to the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedViews {
    pub list: ListView,
    pub summary: SummaryView,
}
