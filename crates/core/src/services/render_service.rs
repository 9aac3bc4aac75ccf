use std::fmt::Write;

use chrono::{DateTime, Local, Utc};

use crate::models::ledger::Ledger;
use crate::models::settings::Settings;
use crate::models::summary::Summary;
use crate::models::view::{DeleteHandle, ListItem, ListView, SummaryView};

pub const EMPTY_LIST_PLACEHOLDER: &str = "No expenses recorded yet.";
pub const EMPTY_SUMMARY_PLACEHOLDER: &str = "No summary to show.";
pub const SUMMARY_HEADING: &str = "Expenses by Category:";

const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

/// 2^53: below this every whole number of cents is an exact `f64`.
const EXACT_CENTS_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Turns the ledger and its summary into display-ready views.
///
/// Every call renders from scratch; nothing is cached between renders.
pub struct RenderService;

impl RenderService {
    pub fn new() -> Self {
        Self
    }

    /// Format an amount in the configured currency, e.g. `1 234,50 kr`.
    ///
    /// Two decimals, rounded half away from zero; digits grouped in threes.
    /// Works on the float directly, so amounts beyond any integer range
    /// still print every digit.
    pub fn format_amount(&self, settings: &Settings, amount: f64) -> String {
        let abs = amount.abs();
        let cents = abs * 100.0;
        let rounded = if cents < EXACT_CENTS_LIMIT {
            cents.round() / 100.0
        } else {
            abs
        };
        let negative = amount < 0.0 && rounded > 0.0;
        let body = format!("{rounded:.2}");
        let (whole, fraction) = body.split_once('.').unwrap_or((body.as_str(), "00"));

        let mut out = String::with_capacity(body.len() + whole.len() / 3 + 8);
        if negative {
            out.push('\u{2212}');
        }
        out.push_str(&group_digits(whole, settings.grouping_separator));
        out.push(settings.decimal_separator);
        out.push_str(fraction);
        if !settings.currency_symbol.is_empty() {
            out.push('\u{a0}');
            out.push_str(&settings.currency_symbol);
        }
        out
    }

    /// Format a timestamp as a local calendar date.
    pub fn format_date(&self, settings: &Settings, date: DateTime<Utc>) -> String {
        let local = date.with_timezone(&Local);
        let mut out = String::new();
        if write!(out, "{}", local.format(&settings.date_format)).is_err() {
            out.clear();
            let _ = write!(out, "{}", local.format(FALLBACK_DATE_FORMAT));
        }
        out
    }

    /// Render one line per expense, each carrying its delete affordance.
    pub fn render_list(&self, settings: &Settings, ledger: &Ledger) -> ListView {
        if ledger.is_empty() {
            return ListView::Empty {
                placeholder: EMPTY_LIST_PLACEHOLDER.to_string(),
            };
        }

        let items = ledger
            .iter()
            .enumerate()
            .map(|(index, expense)| ListItem {
                line: format!(
                    "{} - {} ({}) - {}",
                    expense.description,
                    self.format_amount(settings, expense.amount),
                    expense.category,
                    self.format_date(settings, expense.date),
                ),
                delete: DeleteHandle {
                    index,
                    id: expense.id,
                },
            })
            .collect();

        ListView::Items(items)
    }

    pub fn render_summary(&self, settings: &Settings, summary: &Summary) -> SummaryView {
        if summary.is_empty() {
            return SummaryView::Empty {
                placeholder: EMPTY_SUMMARY_PLACEHOLDER.to_string(),
            };
        }

        SummaryView::Totals {
            total_line: format!("Total Expenses: {}", self.format_amount(settings, summary.total)),
            heading: SUMMARY_HEADING.to_string(),
            category_lines: summary
                .by_category
                .iter()
                .map(|c| format!("{}: {}", c.category, self.format_amount(settings, c.total)))
                .collect(),
        }
    }
}

impl Default for RenderService {
    fn default() -> Self {
        Self::new()
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }
    grouped
}
