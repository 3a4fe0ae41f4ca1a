use super::transactions_model::*;
use crate::Result;
use async_trait::async_trait;

/// Trait defining the contract for the transaction store accessor.
/// Reads run on any pool connection; writes go through the writer actor.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    fn find(&self, user_id: &str, filter: &TransactionFilter) -> Result<Vec<Transaction>>;
    fn find_recent(&self, user_id: &str, limit: i64) -> Result<Vec<Transaction>>;
    fn get(&self, user_id: &str, transaction_id: &str) -> Result<Transaction>;
    fn count_for_user(&self, user_id: &str) -> Result<i64>;
    fn sum_for_user_by_type(
        &self,
        user_id: &str,
        transaction_type: TransactionType,
    ) -> Result<f64>;
    async fn create(&self, user_id: &str, new_transaction: NewTransaction) -> Result<Transaction>;
    async fn update(&self, user_id: &str, update: TransactionUpdate) -> Result<Transaction>;
    async fn delete(&self, user_id: &str, transaction_id: &str) -> Result<Transaction>;
}

/// Trait defining the contract for transaction service operations.
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    fn get_transactions(&self, user_id: &str, filter: &TransactionFilter)
        -> Result<Vec<Transaction>>;
    fn get_transaction(&self, user_id: &str, transaction_id: &str) -> Result<Transaction>;
    fn get_balance_summary(&self, user_id: &str) -> Result<BalanceSummary>;
    async fn create_transaction(
        &self,
        user_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction>;
    async fn update_transaction(
        &self,
        user_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction>;
    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<Transaction>;
}
