use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{get_connection, WriteHandle};
use crate::schema::transactions;
use crate::transactions::transactions_errors::TransactionError;
use crate::transactions::transactions_model::*;
use crate::transactions::transactions_traits::TransactionRepositoryTrait;
use crate::Result;

/// Repository for managing transaction data in the database
pub struct TransactionRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository instance
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn into_domain(rows: Vec<TransactionDB>) -> Result<Vec<Transaction>> {
    rows.into_iter()
        .map(|row| Transaction::try_from(row).map_err(Into::into))
        .collect()
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    fn find(&self, user_id: &str, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = transactions::table
            .filter(transactions::user_id.eq(user_id))
            .into_boxed();

        if let Some(transaction_type) = filter.transaction_type {
            query = query.filter(transactions::transaction_type.eq(transaction_type.as_str()));
        }
        if let Some(category) = filter.category {
            query = query.filter(transactions::category.eq(category.as_str()));
        }
        if let Some(start) = filter.start_date {
            query = query.filter(transactions::date.ge(start.naive_utc()));
        }
        if let Some(end) = filter.end_date {
            query = query.filter(transactions::date.le(end.naive_utc()));
        }

        let rows = query
            .select(TransactionDB::as_select())
            .order(transactions::date.desc())
            .load::<TransactionDB>(&mut conn)?;

        into_domain(rows)
    }

    fn find_recent(&self, user_id: &str, limit: i64) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = transactions::table
            .filter(transactions::user_id.eq(user_id))
            .select(TransactionDB::as_select())
            .order(transactions::created_at.desc())
            .limit(limit)
            .load::<TransactionDB>(&mut conn)?;

        into_domain(rows)
    }

    fn get(&self, user_id: &str, transaction_id: &str) -> Result<Transaction> {
        let mut conn = get_connection(&self.pool)?;

        let row = transactions::table
            .filter(transactions::id.eq(transaction_id))
            .filter(transactions::user_id.eq(user_id))
            .select(TransactionDB::as_select())
            .first::<TransactionDB>(&mut conn)
            .optional()?
            .ok_or_else(|| {
                TransactionError::NotFound(format!("Transaction {} not found", transaction_id))
            })?;

        Ok(Transaction::try_from(row).map_err(crate::Error::from)?)
    }

    fn count_for_user(&self, user_id: &str) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;

        Ok(transactions::table
            .filter(transactions::user_id.eq(user_id))
            .count()
            .get_result::<i64>(&mut conn)?)
    }

    fn sum_for_user_by_type(
        &self,
        user_id: &str,
        transaction_type: TransactionType,
    ) -> Result<f64> {
        let mut conn = get_connection(&self.pool)?;

        let total: Option<f64> = transactions::table
            .filter(transactions::user_id.eq(user_id))
            .filter(transactions::transaction_type.eq(transaction_type.as_str()))
            .select(diesel::dsl::sum(transactions::amount))
            .first(&mut conn)?;

        Ok(total.unwrap_or(0.0))
    }

    async fn create(&self, user_id: &str, new_transaction: NewTransaction) -> Result<Transaction> {
        new_transaction.validate().map_err(crate::Error::from)?;

        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let now = Utc::now().naive_utc();
                let date = match new_transaction.date {
                    Some(ref raw) => parse_date_input(raw).map_err(crate::Error::from)?,
                    None => now,
                };

                let row = TransactionDB {
                    id: Uuid::new_v4().to_string(),
                    user_id,
                    title: new_transaction.title,
                    amount: new_transaction.amount,
                    transaction_type: new_transaction.transaction_type.as_str().to_string(),
                    category: new_transaction.category.as_str().to_string(),
                    date,
                    created_at: now,
                    updated_at: now,
                };

                let inserted = diesel::insert_into(transactions::table)
                    .values(&row)
                    .get_result::<TransactionDB>(conn)?;

                Ok(Transaction::try_from(inserted).map_err(crate::Error::from)?)
            })
            .await
    }

    async fn update(&self, user_id: &str, update: TransactionUpdate) -> Result<Transaction> {
        update.validate().map_err(crate::Error::from)?;

        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let mut row = transactions::table
                    .filter(transactions::id.eq(&update.id))
                    .filter(transactions::user_id.eq(&user_id))
                    .select(TransactionDB::as_select())
                    .first::<TransactionDB>(conn)
                    .optional()?
                    .ok_or_else(|| {
                        TransactionError::NotFound(format!("Transaction {} not found", update.id))
                    })?;

                if let Some(title) = update.title {
                    row.title = title;
                }
                if let Some(amount) = update.amount {
                    row.amount = amount;
                }
                if let Some(transaction_type) = update.transaction_type {
                    row.transaction_type = transaction_type.as_str().to_string();
                }
                if let Some(category) = update.category {
                    row.category = category.as_str().to_string();
                }
                if let Some(ref raw) = update.date {
                    row.date = parse_date_input(raw).map_err(crate::Error::from)?;
                }
                row.updated_at = Utc::now().naive_utc();

                let updated = diesel::update(transactions::table.find(&row.id))
                    .set(&row)
                    .get_result::<TransactionDB>(conn)?;

                Ok(Transaction::try_from(updated).map_err(crate::Error::from)?)
            })
            .await
    }

    async fn delete(&self, user_id: &str, transaction_id: &str) -> Result<Transaction> {
        let user_id = user_id.to_string();
        let transaction_id = transaction_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let row = transactions::table
                    .filter(transactions::id.eq(&transaction_id))
                    .filter(transactions::user_id.eq(&user_id))
                    .select(TransactionDB::as_select())
                    .first::<TransactionDB>(conn)
                    .optional()?
                    .ok_or_else(|| {
                        TransactionError::NotFound(format!(
                            "Transaction {} not found",
                            transaction_id
                        ))
                    })?;

                diesel::delete(transactions::table.find(&row.id)).execute(conn)?;

                Ok(Transaction::try_from(row).map_err(crate::Error::from)?)
            })
            .await
    }
}
