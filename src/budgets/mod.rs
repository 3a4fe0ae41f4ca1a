pub(crate) mod budgets_errors;
pub(crate) mod budgets_model;
pub(crate) mod budgets_repository;
pub(crate) mod budgets_service;
pub(crate) mod budgets_traits;

pub use budgets_errors::BudgetError;
pub use budgets_model::{Budget, BudgetDB, BudgetFilter, BudgetPeriod, BudgetUpdate, NewBudget};
pub use budgets_repository::BudgetRepository;
pub use budgets_service::BudgetService;
pub use budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
