use super::reports_model::*;
use crate::Result;

/// Trait defining the contract for the report assemblers. All reports are
/// read-only and compute from an immutable per-request snapshot.
pub trait ReportsServiceTrait: Send + Sync {
    /// Current/previous month metrics, variations, top categories, recent
    /// activity and all-time totals.
    fn get_dashboard(&self, user_id: &str) -> Result<DashboardSnapshot>;

    /// Totals and per-category breakdown for one explicit month.
    /// Fails with a validation error when the month is outside 1-12,
    /// before any store access.
    fn get_monthly_report(&self, user_id: &str, year: i32, month: u32) -> Result<MonthlyReport>;

    /// Budget-vs-spend comparison; defaults to the current calendar month
    /// when year/month are omitted.
    fn get_budget_report(
        &self,
        user_id: &str,
        year: Option<i32>,
        month: Option<u32>,
    ) -> Result<BudgetReport>;

    /// All-time per-category aggregates, sorted descending by balance.
    fn get_category_summary(&self, user_id: &str) -> Result<Vec<CategorySummary>>;
}
