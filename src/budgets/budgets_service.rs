use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use crate::budgets::budgets_model::*;
use crate::budgets::budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use crate::Result;

/// Service for managing per-category budgets
pub struct BudgetService {
    budget_repository: Arc<dyn BudgetRepositoryTrait>,
}

impl BudgetService {
    /// Creates a new BudgetService instance with an injected repository
    pub fn new(budget_repository: Arc<dyn BudgetRepositoryTrait>) -> Self {
        Self { budget_repository }
    }
}

#[async_trait]
impl BudgetServiceTrait for BudgetService {
    fn get_budgets(&self, user_id: &str, filter: &BudgetFilter) -> Result<Vec<Budget>> {
        self.budget_repository.find(user_id, filter)
    }

    fn get_budget(&self, user_id: &str, budget_id: &str) -> Result<Budget> {
        self.budget_repository.get(user_id, budget_id)
    }

    async fn create_budget(&self, user_id: &str, new_budget: NewBudget) -> Result<Budget> {
        debug!(
            "Creating {} budget for category {}",
            new_budget.period, new_budget.category
        );
        self.budget_repository.create(user_id, new_budget).await
    }

    async fn update_budget(&self, user_id: &str, update: BudgetUpdate) -> Result<Budget> {
        debug!("Updating budget {}", update.id);
        self.budget_repository.update(user_id, update).await
    }

    async fn delete_budget(&self, user_id: &str, budget_id: &str) -> Result<Budget> {
        debug!("Deleting budget {}", budget_id);
        self.budget_repository.delete(user_id, budget_id).await
    }
}
