use std::collections::HashMap;

use crate::budgets::Budget;
use crate::constants::{BUDGET_EXCEEDED_THRESHOLD, BUDGET_WARNING_THRESHOLD};
use crate::reports::reports_model::{BudgetReportLine, BudgetReportTotals, BudgetStatus};
use crate::transactions::Category;

/// Lines plus totals produced by the budget-vs-spend comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetComparison {
    pub lines: Vec<BudgetReportLine>,
    pub totals: BudgetReportTotals,
}

/// Joins configured budgets against per-category expense totals.
///
/// Two passes, both pure and order-independent before the final sort: pass 1
/// builds one line per budget, pass 2 appends a synthetic `no-budget` line
/// for every category that has spend but no configured budget. Lines are then
/// sorted descending by spent amount.
pub fn compare_budgets(
    budgets: &[Budget],
    expenses_by_category: &[(Category, f64)],
) -> BudgetComparison {
    let spent_lookup: HashMap<Category, f64> = expenses_by_category.iter().copied().collect();

    let mut lines: Vec<BudgetReportLine> = budgets
        .iter()
        .map(|budget| {
            let spent = spent_lookup.get(&budget.category).copied().unwrap_or(0.0);
            let percentage = if budget.amount > 0.0 {
                round_two(spent / budget.amount * 100.0)
            } else {
                0.0
            };

            BudgetReportLine {
                budget_id: Some(budget.id.clone()),
                category: budget.category,
                budget_amount: budget.amount,
                spent_amount: spent,
                remaining_amount: budget.amount - spent,
                percentage,
                status: status_for(percentage),
                description: budget.description.clone(),
            }
        })
        .collect();

    let budgeted: std::collections::HashSet<Category> =
        budgets.iter().map(|b| b.category).collect();
    for &(category, spent) in expenses_by_category {
        if !budgeted.contains(&category) {
            lines.push(BudgetReportLine {
                budget_id: None,
                category,
                budget_amount: 0.0,
                spent_amount: spent,
                remaining_amount: -spent,
                percentage: 0.0,
                status: BudgetStatus::NoBudget,
                description: Some("No budget defined".to_string()),
            });
        }
    }

    lines.sort_by(|a, b| b.spent_amount.total_cmp(&a.spent_amount));

    let total_budget: f64 = budgets.iter().map(|b| b.amount).sum();
    let total_spent: f64 = expenses_by_category.iter().map(|(_, spent)| spent).sum();

    BudgetComparison {
        lines,
        totals: BudgetReportTotals {
            total_budget,
            total_spent,
            total_remaining: total_budget - total_spent,
        },
    }
}

fn status_for(percentage: f64) -> BudgetStatus {
    if percentage > BUDGET_EXCEEDED_THRESHOLD {
        BudgetStatus::Exceeded
    } else if percentage > BUDGET_WARNING_THRESHOLD {
        BudgetStatus::Warning
    } else {
        BudgetStatus::Ok
    }
}

/// Rounds half-up at the second decimal place.
fn round_two(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
