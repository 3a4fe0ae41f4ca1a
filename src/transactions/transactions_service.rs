use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use crate::transactions::transactions_model::*;
use crate::transactions::transactions_traits::{
    TransactionRepositoryTrait, TransactionServiceTrait,
};
use crate::Result;

/// Service for recording and querying transactions
pub struct TransactionService {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
}

impl TransactionService {
    /// Creates a new TransactionService instance with an injected repository
    pub fn new(transaction_repository: Arc<dyn TransactionRepositoryTrait>) -> Self {
        Self {
            transaction_repository,
        }
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    fn get_transactions(
        &self,
        user_id: &str,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>> {
        self.transaction_repository.find(user_id, filter)
    }

    fn get_transaction(&self, user_id: &str, transaction_id: &str) -> Result<Transaction> {
        self.transaction_repository.get(user_id, transaction_id)
    }

    fn get_balance_summary(&self, user_id: &str) -> Result<BalanceSummary> {
        let income = self
            .transaction_repository
            .sum_for_user_by_type(user_id, TransactionType::Income)?;
        let expense = self
            .transaction_repository
            .sum_for_user_by_type(user_id, TransactionType::Expense)?;
        let total_transactions = self.transaction_repository.count_for_user(user_id)?;

        Ok(BalanceSummary {
            income,
            expense,
            balance: income - expense,
            total_transactions,
        })
    }

    async fn create_transaction(
        &self,
        user_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction> {
        debug!("Creating transaction '{}'", new_transaction.title);
        self.transaction_repository
            .create(user_id, new_transaction)
            .await
    }

    async fn update_transaction(
        &self,
        user_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction> {
        debug!("Updating transaction {}", update.id);
        self.transaction_repository.update(user_id, update).await
    }

    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<Transaction> {
        debug!("Deleting transaction {}", transaction_id);
        self.transaction_repository
            .delete(user_id, transaction_id)
            .await
    }
}
