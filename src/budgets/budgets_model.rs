use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::budgets::budgets_errors::BudgetError;
use crate::constants::BUDGET_DESCRIPTION_MAX_LEN;
use crate::transactions::transactions_model::timestamp_format;
use crate::transactions::Category;

/// Reporting period a budget applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Monthly,
    Yearly,
}

impl BudgetPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetPeriod::Monthly => "monthly",
            BudgetPeriod::Yearly => "yearly",
        }
    }
}

impl FromStr for BudgetPeriod {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monthly" => Ok(BudgetPeriod::Monthly),
            "yearly" => Ok(BudgetPeriod::Yearly),
            other => Err(BudgetError::InvalidData(format!(
                "Unknown budget period: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain model representing a per-category spend ceiling
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub user_id: String,
    pub category: Category,
    pub amount: f64,
    pub period: BudgetPeriod,
    pub year: i32,
    /// Present iff the period is monthly; 1-12.
    pub month: Option<i32>,
    pub is_active: bool,
    pub description: Option<String>,
    #[serde(with = "timestamp_format")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp_format")]
    pub updated_at: DateTime<Utc>,
}

/// Database model for budgets
#[derive(Queryable, Selectable, Identifiable, Insertable, AsChangeset, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::budgets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BudgetDB {
    pub id: String,
    pub user_id: String,
    pub category: String,
    pub amount: f64,
    pub period: String,
    pub year: i32,
    pub month: Option<i32>,
    pub is_active: bool,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for defining a new budget
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    pub category: Category,
    pub amount: f64,
    pub period: BudgetPeriod,
    pub year: i32,
    pub month: Option<i32>,
    pub description: Option<String>,
}

impl NewBudget {
    /// Validates the new budget data
    pub fn validate(&self) -> Result<(), BudgetError> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(BudgetError::InvalidData(
                "Amount must be a positive number".to_string(),
            ));
        }
        match (self.period, self.month) {
            (BudgetPeriod::Monthly, None) => {
                return Err(BudgetError::InvalidData(
                    "Month is required for monthly budgets".to_string(),
                ));
            }
            (_, Some(month)) if !(1..=12).contains(&month) => {
                return Err(BudgetError::InvalidData(
                    "Month must be between 1 and 12".to_string(),
                ));
            }
            _ => {}
        }
        validate_description(self.description.as_deref())?;
        Ok(())
    }
}

/// Input model for updating an existing budget. Only the amount, description
/// and active flag are mutable; the period key is fixed at creation.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUpdate {
    pub id: String,
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

impl BudgetUpdate {
    /// Validates the budget update data
    pub fn validate(&self) -> Result<(), BudgetError> {
        if self.id.trim().is_empty() {
            return Err(BudgetError::InvalidData(
                "Budget ID is required for updates".to_string(),
            ));
        }
        if let Some(amount) = self.amount {
            if !amount.is_finite() || amount <= 0.0 {
                return Err(BudgetError::InvalidData(
                    "Amount must be a positive number".to_string(),
                ));
            }
        }
        validate_description(self.description.as_deref())?;
        Ok(())
    }
}

/// Query filter used by the budget store accessor.
#[derive(Debug, Clone, Default)]
pub struct BudgetFilter {
    pub year: Option<i32>,
    pub month: Option<i32>,
    pub period: Option<BudgetPeriod>,
    /// Reports only consider active budgets; listings may include inactive ones.
    pub active_only: bool,
}

fn validate_description(description: Option<&str>) -> Result<(), BudgetError> {
    if let Some(description) = description {
        if description.chars().count() > BUDGET_DESCRIPTION_MAX_LEN {
            return Err(BudgetError::InvalidData(format!(
                "Description cannot exceed {} characters",
                BUDGET_DESCRIPTION_MAX_LEN
            )));
        }
    }
    Ok(())
}

// Conversion implementations
impl TryFrom<BudgetDB> for Budget {
    type Error = BudgetError;

    fn try_from(db: BudgetDB) -> Result<Self, Self::Error> {
        Ok(Self {
            id: db.id,
            user_id: db.user_id,
            category: db
                .category
                .parse()
                .map_err(|e: crate::transactions::TransactionError| {
                    BudgetError::InvalidData(e.to_string())
                })?,
            amount: db.amount,
            period: db.period.parse()?,
            year: db.year,
            month: db.month,
            is_active: db.is_active,
            description: db.description,
            created_at: DateTime::from_naive_utc_and_offset(db.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(db.updated_at, Utc),
        })
    }
}
