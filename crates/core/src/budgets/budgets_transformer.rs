//! Field mapping between the budget record and its transfer objects.

use super::budgets_model::{Budget, BudgetDto, BudgetInput};

impl From<Budget> for BudgetDto {
    fn from(budget: Budget) -> Self {
        Self {
            id: budget.id(),
            year: budget.year,
            expected_total: budget.expected_total,
        }
    }
}

impl From<&Budget> for BudgetDto {
    fn from(budget: &Budget) -> Self {
        Self {
            id: budget.id(),
            year: budget.year,
            expected_total: budget.expected_total,
        }
    }
}

/// A new record with a fresh identifier.
impl From<BudgetInput> for Budget {
    fn from(input: BudgetInput) -> Self {
        Budget::new(input.year, input.expected_total)
    }
}

impl Budget {
    /// Overwrites `year` and `expected_total` from the input. The identifier is kept.
    pub fn apply(mut self, input: BudgetInput) -> Self {
        self.year = input.year;
        self.expected_total = input.expected_total;
        self
    }
}
