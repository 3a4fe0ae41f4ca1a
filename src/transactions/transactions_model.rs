use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::TRANSACTION_TITLE_MAX_LEN;
use crate::transactions::transactions_errors::TransactionError;

/// Direction of a money movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl FromStr for TransactionType {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(TransactionError::InvalidData(format!(
                "Unknown transaction type: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Spending/earning category. Canonical and required on every transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Transport,
    Health,
    Education,
    Rent,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Health => "health",
            Category::Education => "education",
            Category::Rent => "rent",
            Category::Other => "other",
        }
    }
}

impl FromStr for Category {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "food" => Ok(Category::Food),
            "transport" => Ok(Category::Transport),
            "health" => Ok(Category::Health),
            "education" => Ok(Category::Education),
            "rent" => Ok(Category::Rent),
            "other" => Ok(Category::Other),
            other => Err(TransactionError::InvalidData(format!(
                "Unknown category: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain model representing a recorded transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: Category,
    #[serde(with = "timestamp_format")]
    pub date: DateTime<Utc>,
    #[serde(with = "timestamp_format")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp_format")]
    pub updated_at: DateTime<Utc>,
}

/// Database model for transactions
#[derive(Queryable, Selectable, Identifiable, Insertable, AsChangeset, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub amount: f64,
    pub transaction_type: String,
    pub category: String,
    pub date: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for recording a new transaction
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub title: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: Category,
    /// RFC3339 or YYYY-MM-DD; defaults to the creation instant when absent.
    pub date: Option<String>,
}

impl NewTransaction {
    /// Validates the new transaction data
    pub fn validate(&self) -> Result<(), TransactionError> {
        validate_title(&self.title)?;
        validate_amount(self.amount)?;
        if let Some(ref date) = self.date {
            validate_date_format(date)?;
        }
        Ok(())
    }
}

/// Input model for updating an existing transaction. Absent fields are
/// left untouched.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    pub id: String,
    pub title: Option<String>,
    pub amount: Option<f64>,
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    pub category: Option<Category>,
    pub date: Option<String>,
}

impl TransactionUpdate {
    /// Validates the transaction update data
    pub fn validate(&self) -> Result<(), TransactionError> {
        if self.id.trim().is_empty() {
            return Err(TransactionError::InvalidData(
                "Transaction ID is required for updates".to_string(),
            ));
        }
        if let Some(ref title) = self.title {
            validate_title(title)?;
        }
        if let Some(amount) = self.amount {
            validate_amount(amount)?;
        }
        if let Some(ref date) = self.date {
            validate_date_format(date)?;
        }
        Ok(())
    }
}

/// Query filter used by the transaction store accessor.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub transaction_type: Option<TransactionType>,
    pub category: Option<Category>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

/// All-time balance summary for one user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSummary {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
    pub total_transactions: i64,
}

fn validate_title(title: &str) -> Result<(), TransactionError> {
    if title.trim().is_empty() {
        return Err(TransactionError::InvalidData(
            "Title cannot be empty".to_string(),
        ));
    }
    if title.chars().count() > TRANSACTION_TITLE_MAX_LEN {
        return Err(TransactionError::InvalidData(format!(
            "Title cannot exceed {} characters",
            TRANSACTION_TITLE_MAX_LEN
        )));
    }
    Ok(())
}

fn validate_amount(amount: f64) -> Result<(), TransactionError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(TransactionError::InvalidData(
            "Amount must be a positive number".to_string(),
        ));
    }
    Ok(())
}

fn validate_date_format(date: &str) -> Result<(), TransactionError> {
    if DateTime::parse_from_rfc3339(date).is_err()
        && NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err()
    {
        return Err(TransactionError::InvalidData(
            "Invalid date format. Expected ISO 8601/RFC3339 or YYYY-MM-DD".to_string(),
        ));
    }
    Ok(())
}

/// Parses a user-supplied date string, accepting RFC3339 or date-only input.
/// Date-only values are anchored at noon UTC.
pub(crate) fn parse_date_input(date: &str) -> Result<NaiveDateTime, TransactionError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return Ok(dt.naive_utc());
    }
    if let Ok(d) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Ok(d.and_hms_opt(12, 0, 0).unwrap_or_default());
    }
    Err(TransactionError::InvalidData(format!(
        "Invalid date format: {}",
        date
    )))
}

// Custom serialization for timestamps to ensure consistent ISO 8601 formatting
pub(crate) mod timestamp_format {
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        if let Ok(dt) = DateTime::parse_from_rfc3339(&s) {
            return Ok(dt.with_timezone(&Utc));
        }

        // Date-only values are anchored at noon UTC.
        if let Ok(date) = NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
            return Ok(Utc.from_utc_datetime(&date.and_hms_opt(12, 0, 0).unwrap_or_default()));
        }

        Err(serde::de::Error::custom(format!(
            "Invalid timestamp format: {}. Expected ISO 8601/RFC3339 or YYYY-MM-DD",
            s
        )))
    }
}

// Conversion implementations
impl TryFrom<TransactionDB> for Transaction {
    type Error = TransactionError;

    fn try_from(db: TransactionDB) -> Result<Self, Self::Error> {
        Ok(Self {
            id: db.id,
            user_id: db.user_id,
            title: db.title,
            amount: db.amount,
            transaction_type: db.transaction_type.parse()?,
            category: db.category.parse()?,
            date: DateTime::from_naive_utc_and_offset(db.date, Utc),
            created_at: DateTime::from_naive_utc_and_offset(db.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(db.updated_at, Utc),
        })
    }
}
