use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::reports::variance::Variation;
use crate::transactions::transactions_model::timestamp_format;
use crate::transactions::{Category, Transaction, TransactionType};

/// Per-category aggregate over a transaction set. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category: Category,
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
    pub transaction_count: i64,
}

/// Income/expense/balance totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthMetrics {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
    pub transaction_count: i64,
}

/// Month-over-month variations for the three dashboard metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthVariations {
    pub income: Variation,
    pub expense: Variation,
    pub balance: Variation,
}

/// Current-month metrics with their variations against the previous month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentMonthSnapshot {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
    pub transaction_count: i64,
    pub variations: MonthVariations,
}

/// All-time totals over the user's entire transaction history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallTotals {
    pub total_income: f64,
    pub total_expense: f64,
    pub total_balance: f64,
    pub total_transactions: i64,
}

/// One entry of the top-expense-categories list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAmount {
    pub category: Category,
    pub amount: f64,
}

/// Trimmed transaction shape for the dashboard's recent-activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentTransaction {
    pub id: String,
    pub title: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: Category,
    #[serde(with = "timestamp_format")]
    pub date: DateTime<Utc>,
}

impl From<Transaction> for RecentTransaction {
    fn from(transaction: Transaction) -> Self {
        Self {
            id: transaction.id,
            title: transaction.title,
            amount: transaction.amount,
            transaction_type: transaction.transaction_type,
            category: transaction.category,
            date: transaction.date,
        }
    }
}

/// Full dashboard response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub current_month: CurrentMonthSnapshot,
    pub last_month: MonthMetrics,
    pub overall: OverallTotals,
    pub top_categories: Vec<CategoryAmount>,
    pub recent_transactions: Vec<RecentTransaction>,
}

/// Resolved period echoed back on period-scoped reports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPeriod {
    pub year: i32,
    pub month: u32,
}

/// Period header of the monthly report, with a locale month name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReportPeriod {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
}

/// Monthly report: totals plus a per-category breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub period: MonthlyReportPeriod,
    pub summary: MonthMetrics,
    pub categories: Vec<CategorySummary>,
}

/// Four-valued classification of budget consumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BudgetStatus {
    Ok,
    Warning,
    Exceeded,
    NoBudget,
}

/// One line of the budget-vs-spend report. `budget_id` is `None` on
/// synthetic lines for categories with spend but no configured budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetReportLine {
    pub budget_id: Option<String>,
    pub category: Category,
    pub budget_amount: f64,
    pub spent_amount: f64,
    pub remaining_amount: f64,
    pub percentage: f64,
    pub status: BudgetStatus,
    pub description: Option<String>,
}

/// Report-level budget totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetReportTotals {
    pub total_budget: f64,
    pub total_spent: f64,
    pub total_remaining: f64,
}

/// Full budget-vs-spend report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetReport {
    pub period: ReportPeriod,
    pub report: Vec<BudgetReportLine>,
    pub summary: BudgetReportTotals,
}
