pub mod budgets_model;
pub mod budgets_service;
pub mod budgets_traits;

#[cfg(test)]
mod budgets_model_tests;

pub use budgets_model::*;
pub use budgets_service::BudgetService;
pub use budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
