use crate::budgets::budgets_model::{Budget, BudgetInput};
use crate::errors::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Trait for budget repository operations
#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    fn get_budget(&self, budget_id: &Uuid) -> Result<Option<Budget>>;
    fn get_budget_by_year(&self, year: i32) -> Result<Option<Budget>>;
    fn exists_by_year(&self, year: i32) -> Result<bool>;
    fn list_budgets(&self) -> Result<Vec<Budget>>;
    /// Inserts the budget, or replaces the stored row with the same id.
    async fn save_budget(&self, budget: Budget) -> Result<Budget>;
    async fn delete_budget(&self, budget_id: Uuid) -> Result<usize>;
}

/// Trait for budget service operations
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    fn get_budget(&self, budget_id: &Uuid) -> Result<Budget>;
    fn get_budget_by_year(&self, year: i32) -> Result<Budget>;
    fn get_budgets(&self) -> Result<Vec<Budget>>;
    async fn create_budget(&self, input: BudgetInput) -> Result<Budget>;
    async fn update_budget(&self, budget_id: &Uuid, input: BudgetInput) -> Result<Budget>;
    async fn delete_budget(&self, budget_id: &Uuid) -> Result<()>;
}
