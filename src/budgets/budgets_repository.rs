use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::budgets::budgets_errors::BudgetError;
use crate::budgets::budgets_model::*;
use crate::budgets::budgets_traits::BudgetRepositoryTrait;
use crate::db::{get_connection, WriteHandle};
use crate::schema::budgets;
use crate::Result;

/// Repository for managing budget data in the database
pub struct BudgetRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl BudgetRepository {
    /// Creates a new BudgetRepository instance
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn into_domain(rows: Vec<BudgetDB>) -> Result<Vec<Budget>> {
    rows.into_iter()
        .map(|row| Budget::try_from(row).map_err(Into::into))
        .collect()
}

#[async_trait]
impl BudgetRepositoryTrait for BudgetRepository {
    fn find(&self, user_id: &str, filter: &BudgetFilter) -> Result<Vec<Budget>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = budgets::table
            .filter(budgets::user_id.eq(user_id))
            .into_boxed();

        if let Some(year) = filter.year {
            query = query.filter(budgets::year.eq(year));
        }
        if let Some(month) = filter.month {
            query = query.filter(budgets::month.eq(month));
        }
        if let Some(period) = filter.period {
            query = query.filter(budgets::period.eq(period.as_str()));
        }
        if filter.active_only {
            query = query.filter(budgets::is_active.eq(true));
        }

        let rows = query
            .select(BudgetDB::as_select())
            .order(budgets::category.asc())
            .load::<BudgetDB>(&mut conn)?;

        into_domain(rows)
    }

    fn find_active_monthly(&self, user_id: &str, year: i32, month: i32) -> Result<Vec<Budget>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = budgets::table
            .filter(budgets::user_id.eq(user_id))
            .filter(budgets::year.eq(year))
            .filter(budgets::month.eq(month))
            .filter(budgets::period.eq(BudgetPeriod::Monthly.as_str()))
            .filter(budgets::is_active.eq(true))
            .select(BudgetDB::as_select())
            .order(budgets::category.asc())
            .load::<BudgetDB>(&mut conn)?;

        into_domain(rows)
    }

    fn get(&self, user_id: &str, budget_id: &str) -> Result<Budget> {
        let mut conn = get_connection(&self.pool)?;

        let row = budgets::table
            .filter(budgets::id.eq(budget_id))
            .filter(budgets::user_id.eq(user_id))
            .select(BudgetDB::as_select())
            .first::<BudgetDB>(&mut conn)
            .optional()?
            .ok_or_else(|| BudgetError::NotFound(format!("Budget {} not found", budget_id)))?;

        Ok(Budget::try_from(row).map_err(crate::Error::from)?)
    }

    async fn create(&self, user_id: &str, new_budget: NewBudget) -> Result<Budget> {
        new_budget.validate().map_err(crate::Error::from)?;

        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Budget> {
                let now = Utc::now().naive_utc();
                // Yearly budgets carry no month, whatever the input said.
                let month = match new_budget.period {
                    BudgetPeriod::Monthly => new_budget.month,
                    BudgetPeriod::Yearly => None,
                };

                let row = BudgetDB {
                    id: Uuid::new_v4().to_string(),
                    user_id,
                    category: new_budget.category.as_str().to_string(),
                    amount: new_budget.amount,
                    period: new_budget.period.as_str().to_string(),
                    year: new_budget.year,
                    month,
                    is_active: true,
                    description: new_budget.description,
                    created_at: now,
                    updated_at: now,
                };

                let inserted = diesel::insert_into(budgets::table)
                    .values(&row)
                    .get_result::<BudgetDB>(conn)
                    .map_err(BudgetError::from)
                    .map_err(crate::Error::from)?;

                Ok(Budget::try_from(inserted).map_err(crate::Error::from)?)
            })
            .await
    }

    async fn update(&self, user_id: &str, update: BudgetUpdate) -> Result<Budget> {
        update.validate().map_err(crate::Error::from)?;

        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Budget> {
                let mut row = budgets::table
                    .filter(budgets::id.eq(&update.id))
                    .filter(budgets::user_id.eq(&user_id))
                    .select(BudgetDB::as_select())
                    .first::<BudgetDB>(conn)
                    .optional()?
                    .ok_or_else(|| {
                        BudgetError::NotFound(format!("Budget {} not found", update.id))
                    })?;

                if let Some(amount) = update.amount {
                    row.amount = amount;
                }
                if let Some(description) = update.description {
                    row.description = Some(description);
                }
                if let Some(is_active) = update.is_active {
                    row.is_active = is_active;
                }
                row.updated_at = Utc::now().naive_utc();

                let updated = diesel::update(budgets::table.find(&row.id))
                    .set(&row)
                    .get_result::<BudgetDB>(conn)?;

                Ok(Budget::try_from(updated).map_err(crate::Error::from)?)
            })
            .await
    }

    async fn delete(&self, user_id: &str, budget_id: &str) -> Result<Budget> {
        let user_id = user_id.to_string();
        let budget_id = budget_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Budget> {
                let row = budgets::table
                    .filter(budgets::id.eq(&budget_id))
                    .filter(budgets::user_id.eq(&user_id))
                    .select(BudgetDB::as_select())
                    .first::<BudgetDB>(conn)
                    .optional()?
                    .ok_or_else(|| {
                        BudgetError::NotFound(format!("Budget {} not found", budget_id))
                    })?;

                diesel::delete(budgets::table.find(&row.id)).execute(conn)?;

                Ok(Budget::try_from(row).map_err(crate::Error::from)?)
            })
            .await
    }
}
