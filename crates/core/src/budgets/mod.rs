//! Budgets module - domain models, transfer mapping, services, and traits.

mod budgets_model;
mod budgets_service;
mod budgets_traits;
mod budgets_transformer;

pub use budgets_model::{Budget, BudgetDto, BudgetInput};
pub use budgets_service::BudgetService;
pub use budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
