use std::collections::HashMap;

use crate::reports::reports_model::CategorySummary;
use crate::transactions::{Category, Transaction, TransactionType};

/// Sums the amounts of all transactions matching `transaction_type`.
/// An empty match set yields 0.0.
pub fn sum_by_type(transactions: &[Transaction], transaction_type: TransactionType) -> f64 {
    transactions
        .iter()
        .filter(|t| t.transaction_type == transaction_type)
        .map(|t| t.amount)
        .sum()
}

/// Groups transactions by category, accumulating income, expense and count.
/// Results keep first-encounter order; categories absent from the input never
/// appear. Balance is derived after the fold completes so it is not subject
/// to order-dependent rounding drift.
pub fn group_by_category(transactions: &[Transaction]) -> Vec<CategorySummary> {
    let mut index: HashMap<Category, usize> = HashMap::new();
    let mut summaries: Vec<CategorySummary> = Vec::new();

    for transaction in transactions {
        let position = *index.entry(transaction.category).or_insert_with(|| {
            summaries.push(CategorySummary {
                category: transaction.category,
                total_income: 0.0,
                total_expense: 0.0,
                balance: 0.0,
                transaction_count: 0,
            });
            summaries.len() - 1
        });

        let summary = &mut summaries[position];
        match transaction.transaction_type {
            TransactionType::Income => summary.total_income += transaction.amount,
            TransactionType::Expense => summary.total_expense += transaction.amount,
        }
        summary.transaction_count += 1;
    }

    for summary in &mut summaries {
        summary.balance = summary.total_income - summary.total_expense;
    }

    summaries
}

/// Totals expense amounts per category, in first-encounter order. Income
/// transactions are ignored.
pub fn expense_totals_by_category(transactions: &[Transaction]) -> Vec<(Category, f64)> {
    let mut index: HashMap<Category, usize> = HashMap::new();
    let mut totals: Vec<(Category, f64)> = Vec::new();

    for transaction in transactions {
        if transaction.transaction_type != TransactionType::Expense {
            continue;
        }
        let position = *index.entry(transaction.category).or_insert_with(|| {
            totals.push((transaction.category, 0.0));
            totals.len() - 1
        });
        totals[position].1 += transaction.amount;
    }

    totals
}
