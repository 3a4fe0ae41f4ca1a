use super::budgets_model::*;
use crate::Result;
use async_trait::async_trait;

/// Trait defining the contract for the budget store accessor.
#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    fn find(&self, user_id: &str, filter: &BudgetFilter) -> Result<Vec<Budget>>;
    fn find_active_monthly(&self, user_id: &str, year: i32, month: i32) -> Result<Vec<Budget>>;
    fn get(&self, user_id: &str, budget_id: &str) -> Result<Budget>;
    async fn create(&self, user_id: &str, new_budget: NewBudget) -> Result<Budget>;
    async fn update(&self, user_id: &str, update: BudgetUpdate) -> Result<Budget>;
    async fn delete(&self, user_id: &str, budget_id: &str) -> Result<Budget>;
}

/// Trait defining the contract for budget service operations.
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    fn get_budgets(&self, user_id: &str, filter: &BudgetFilter) -> Result<Vec<Budget>>;
    fn get_budget(&self, user_id: &str, budget_id: &str) -> Result<Budget>;
    async fn create_budget(&self, user_id: &str, new_budget: NewBudget) -> Result<Budget>;
    async fn update_budget(&self, user_id: &str, update: BudgetUpdate) -> Result<Budget>;
    async fn delete_budget(&self, user_id: &str, budget_id: &str) -> Result<Budget>;
}
