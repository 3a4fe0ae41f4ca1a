pub(crate) mod aggregation;
pub(crate) mod budget_comparison;
pub(crate) mod period;
pub(crate) mod reports_model;
pub(crate) mod reports_service;
pub(crate) mod reports_traits;
pub(crate) mod variance;

#[cfg(test)]
mod reports_service_tests;

pub use aggregation::{expense_totals_by_category, group_by_category, sum_by_type};
pub use budget_comparison::{compare_budgets, BudgetComparison};
pub use period::{current_month_start, month_bounds, previous_month_bounds, MonthBounds};
pub use reports_model::{
    BudgetReport, BudgetReportLine, BudgetReportTotals, BudgetStatus, CategoryAmount,
    CategorySummary, CurrentMonthSnapshot, DashboardSnapshot, MonthMetrics, MonthVariations,
    MonthlyReport, MonthlyReportPeriod, OverallTotals, RecentTransaction, ReportPeriod,
};
pub use reports_service::ReportsService;
pub use reports_traits::ReportsServiceTrait;
pub use variance::{balance_variation, flow_variation, Trend, Variation};
