use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::expense::Expense;
use crate::models::ledger::Ledger;
use crate::models::view::DeleteHandle;

/// Validates input and applies add/delete to a ledger.
///
/// No I/O and no rendering; operates on a borrowed ledger only.
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    /// Parse the amount field as typed by the user.
    ///
    /// The whole trimmed string must be a decimal number with `.` as the
    /// separator. Unlike lenient prefix parsing, `"12kr"` is rejected rather
    /// than read as 12, and `"1,5"` rather than read as 1.
    pub fn parse_amount(&self, text: &str) -> Result<f64, CoreError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(CoreError::InvalidInput("Amount is required".into()));
        }
        let amount: f64 = trimmed
            .parse()
            .map_err(|_| CoreError::InvalidInput(format!("Amount '{trimmed}' is not a number")))?;
        Self::check_amount(amount)?;
        Ok(amount)
    }

    /// Build a new expense from raw input, stamped with the current time.
    ///
    /// Category and description are stored trimmed.
    pub fn create_expense(
        &self,
        amount: f64,
        category: &str,
        description: &str,
    ) -> Result<Expense, CoreError> {
        Self::check_amount(amount)?;
        let category = category.trim();
        if category.is_empty() {
            return Err(CoreError::InvalidInput("Category must not be empty".into()));
        }
        let description = description.trim();
        if description.is_empty() {
            return Err(CoreError::InvalidInput("Description must not be empty".into()));
        }
        Ok(Expense::new(amount, category, description))
    }

    /// Append an expense to the end of the ledger.
    pub fn add(&self, ledger: &mut Ledger, expense: Expense) -> Result<(), CoreError> {
        if !expense.is_valid() {
            return Err(CoreError::InvalidInput(format!(
                "Expense {} has a non-positive amount or an empty field",
                expense.id
            )));
        }
        ledger.expenses.push(expense);
        Ok(())
    }

    /// Remove the expense at `index`. Later entries shift down by one.
    /// Returns `None` (ledger untouched) when `index` is out of range.
    pub fn delete(&self, ledger: &mut Ledger, index: usize) -> Option<Expense> {
        if index < ledger.expenses.len() {
            Some(ledger.expenses.remove(index))
        } else {
            None
        }
    }

    /// Remove the expense with the given id, wherever it currently sits.
    pub fn delete_by_id(&self, ledger: &mut Ledger, id: Uuid) -> Option<Expense> {
        let index = ledger.position_of(id)?;
        self.delete(ledger, index)
    }

    /// Remove the expense a rendered delete affordance points at.
    ///
    /// Only succeeds while the entry at `handle.index` still has
    /// `handle.id`; a handle from an outdated render is a no-op.
    pub fn delete_handle(&self, ledger: &mut Ledger, handle: DeleteHandle) -> Option<Expense> {
        match ledger.get(handle.index) {
            Some(expense) if expense.id == handle.id => self.delete(ledger, handle.index),
            _ => None,
        }
    }

    fn check_amount(amount: f64) -> Result<(), CoreError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(CoreError::InvalidInput(
                "Amount must be a positive number".into(),
            ));
        }
        Ok(())
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}
