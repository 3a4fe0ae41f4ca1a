use chrono::{Datelike, Utc};
use log::debug;
use std::sync::Arc;

use crate::budgets::BudgetRepositoryTrait;
use crate::constants::{DASHBOARD_RECENT_TRANSACTIONS, DASHBOARD_TOP_CATEGORIES, MONTH_NAMES};
use crate::reports::aggregation::{expense_totals_by_category, group_by_category, sum_by_type};
use crate::reports::budget_comparison::compare_budgets;
use crate::reports::period::{current_month_start, month_bounds, previous_month_bounds};
use crate::reports::reports_model::*;
use crate::reports::reports_traits::ReportsServiceTrait;
use crate::reports::variance::{balance_variation, flow_variation};
use crate::transactions::{TransactionFilter, TransactionRepositoryTrait, TransactionType};
use crate::Result;

/// Assembles the dashboard, monthly and budget reports from the injected
/// store accessors. Holds no state of its own; every call recomputes from
/// storage (freshness over performance).
pub struct ReportsService {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    budget_repository: Arc<dyn BudgetRepositoryTrait>,
}

impl ReportsService {
    /// Creates a new ReportsService instance with injected store accessors
    pub fn new(
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        budget_repository: Arc<dyn BudgetRepositoryTrait>,
    ) -> Self {
        Self {
            transaction_repository,
            budget_repository,
        }
    }
}

impl ReportsServiceTrait for ReportsService {
    fn get_dashboard(&self, user_id: &str) -> Result<DashboardSnapshot> {
        debug!("Assembling dashboard for user {}", user_id);
        let now = Utc::now();

        // Current month is open-ended on the right, matching the listing
        // semantics for records dated later in the month.
        let current_filter = TransactionFilter {
            start_date: Some(current_month_start(now)),
            ..Default::default()
        };
        let current = self.transaction_repository.find(user_id, &current_filter)?;

        let previous = previous_month_bounds(now);
        let previous_filter = TransactionFilter {
            start_date: Some(previous.start),
            end_date: Some(previous.end),
            ..Default::default()
        };
        let last = self.transaction_repository.find(user_id, &previous_filter)?;

        let current_income = sum_by_type(&current, TransactionType::Income);
        let current_expense = sum_by_type(&current, TransactionType::Expense);
        let current_balance = current_income - current_expense;

        let last_income = sum_by_type(&last, TransactionType::Income);
        let last_expense = sum_by_type(&last, TransactionType::Expense);
        let last_balance = last_income - last_expense;

        let mut top_categories: Vec<CategoryAmount> = expense_totals_by_category(&current)
            .into_iter()
            .map(|(category, amount)| CategoryAmount { category, amount })
            .collect();
        // Stable sort keeps first-encounter order on ties.
        top_categories.sort_by(|a, b| b.amount.total_cmp(&a.amount));
        top_categories.truncate(DASHBOARD_TOP_CATEGORIES);

        let recent_transactions = self
            .transaction_repository
            .find_recent(user_id, DASHBOARD_RECENT_TRANSACTIONS)?
            .into_iter()
            .map(RecentTransaction::from)
            .collect();

        let total_income = self
            .transaction_repository
            .sum_for_user_by_type(user_id, TransactionType::Income)?;
        let total_expense = self
            .transaction_repository
            .sum_for_user_by_type(user_id, TransactionType::Expense)?;
        let total_transactions = self.transaction_repository.count_for_user(user_id)?;

        Ok(DashboardSnapshot {
            current_month: CurrentMonthSnapshot {
                income: current_income,
                expense: current_expense,
                balance: current_balance,
                transaction_count: current.len() as i64,
                variations: MonthVariations {
                    income: flow_variation(current_income, last_income),
                    expense: flow_variation(current_expense, last_expense),
                    balance: balance_variation(current_balance, last_balance),
                },
            },
            last_month: MonthMetrics {
                income: last_income,
                expense: last_expense,
                balance: last_balance,
                transaction_count: last.len() as i64,
            },
            overall: OverallTotals {
                total_income,
                total_expense,
                total_balance: total_income - total_expense,
                total_transactions,
            },
            top_categories,
            recent_transactions,
        })
    }

    fn get_monthly_report(&self, user_id: &str, year: i32, month: u32) -> Result<MonthlyReport> {
        // Validates the month before any store access.
        let bounds = month_bounds(year, month)?;
        debug!(
            "Assembling monthly report for user {} ({}-{:02})",
            user_id, year, month
        );

        let filter = TransactionFilter {
            start_date: Some(bounds.start),
            end_date: Some(bounds.end),
            ..Default::default()
        };
        let transactions = self.transaction_repository.find(user_id, &filter)?;

        let income = sum_by_type(&transactions, TransactionType::Income);
        let expense = sum_by_type(&transactions, TransactionType::Expense);

        let mut categories = group_by_category(&transactions);
        categories.sort_by(|a, b| b.balance.total_cmp(&a.balance));

        Ok(MonthlyReport {
            period: MonthlyReportPeriod {
                year,
                month,
                month_name: MONTH_NAMES[(month - 1) as usize].to_string(),
            },
            summary: MonthMetrics {
                income,
                expense,
                balance: income - expense,
                transaction_count: transactions.len() as i64,
            },
            categories,
        })
    }

    fn get_budget_report(
        &self,
        user_id: &str,
        year: Option<i32>,
        month: Option<u32>,
    ) -> Result<BudgetReport> {
        let now = Utc::now();
        let year = year.unwrap_or_else(|| now.year());
        let month = month.unwrap_or_else(|| now.month());

        let bounds = month_bounds(year, month)?;
        debug!(
            "Assembling budget report for user {} ({}-{:02})",
            user_id, year, month
        );

        let budgets = self
            .budget_repository
            .find_active_monthly(user_id, year, month as i32)?;

        let expense_filter = TransactionFilter {
            transaction_type: Some(TransactionType::Expense),
            start_date: Some(bounds.start),
            end_date: Some(bounds.end),
            ..Default::default()
        };
        let expenses = self.transaction_repository.find(user_id, &expense_filter)?;
        let expenses_by_category = expense_totals_by_category(&expenses);

        let comparison = compare_budgets(&budgets, &expenses_by_category);

        Ok(BudgetReport {
            period: ReportPeriod { year, month },
            report: comparison.lines,
            summary: comparison.totals,
        })
    }

    fn get_category_summary(&self, user_id: &str) -> Result<Vec<CategorySummary>> {
        let transactions = self
            .transaction_repository
            .find(user_id, &TransactionFilter::default())?;

        let mut summaries = group_by_category(&transactions);
        summaries.sort_by(|a, b| b.balance.total_cmp(&a.balance));
        Ok(summaries)
    }
}
