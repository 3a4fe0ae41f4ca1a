use async_trait::async_trait;
use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::budgets::{
    Budget, BudgetFilter, BudgetPeriod, BudgetRepositoryTrait, BudgetUpdate, NewBudget,
};
use crate::reports::period::previous_month_bounds;
use crate::reports::reports_model::BudgetStatus;
use crate::reports::variance::Trend;
use crate::reports::{ReportsService, ReportsServiceTrait};
use crate::transactions::{
    Category, NewTransaction, Transaction, TransactionFilter, TransactionRepositoryTrait,
    TransactionType, TransactionUpdate,
};
use crate::Result;

const USER: &str = "user-1";

struct MockTransactionRepository {
    transactions: Vec<Transaction>,
    find_calls: AtomicUsize,
}

impl MockTransactionRepository {
    fn new(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions,
            find_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl TransactionRepositoryTrait for MockTransactionRepository {
    fn find(&self, user_id: &str, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .transactions
            .iter()
            .filter(|t| t.user_id == user_id)
            .filter(|t| {
                filter
                    .transaction_type
                    .map_or(true, |ty| t.transaction_type == ty)
            })
            .filter(|t| filter.category.map_or(true, |c| t.category == c))
            .filter(|t| filter.start_date.map_or(true, |start| t.date >= start))
            .filter(|t| filter.end_date.map_or(true, |end| t.date <= end))
            .cloned()
            .collect())
    }

    fn find_recent(&self, user_id: &str, limit: i64) -> Result<Vec<Transaction>> {
        let mut owned: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        owned.truncate(limit as usize);
        Ok(owned)
    }

    fn get(&self, _user_id: &str, _transaction_id: &str) -> Result<Transaction> {
        unimplemented!()
    }

    fn count_for_user(&self, user_id: &str) -> Result<i64> {
        Ok(self
            .transactions
            .iter()
            .filter(|t| t.user_id == user_id)
            .count() as i64)
    }

    fn sum_for_user_by_type(
        &self,
        user_id: &str,
        transaction_type: TransactionType,
    ) -> Result<f64> {
        Ok(self
            .transactions
            .iter()
            .filter(|t| t.user_id == user_id && t.transaction_type == transaction_type)
            .map(|t| t.amount)
            .sum())
    }

    async fn create(&self, _user_id: &str, _new: NewTransaction) -> Result<Transaction> {
        unimplemented!()
    }

    async fn update(&self, _user_id: &str, _update: TransactionUpdate) -> Result<Transaction> {
        unimplemented!()
    }

    async fn delete(&self, _user_id: &str, _transaction_id: &str) -> Result<Transaction> {
        unimplemented!()
    }
}

struct MockBudgetRepository {
    budgets: Vec<Budget>,
}

#[async_trait]
impl BudgetRepositoryTrait for MockBudgetRepository {
    fn find(&self, user_id: &str, filter: &BudgetFilter) -> Result<Vec<Budget>> {
        Ok(self
            .budgets
            .iter()
            .filter(|b| b.user_id == user_id)
            .filter(|b| filter.year.map_or(true, |y| b.year == y))
            .filter(|b| filter.month.map_or(true, |m| b.month == Some(m)))
            .filter(|b| filter.period.map_or(true, |p| b.period == p))
            .filter(|b| !filter.active_only || b.is_active)
            .cloned()
            .collect())
    }

    fn find_active_monthly(&self, user_id: &str, year: i32, month: i32) -> Result<Vec<Budget>> {
        self.find(
            user_id,
            &BudgetFilter {
                year: Some(year),
                month: Some(month),
                period: Some(BudgetPeriod::Monthly),
                active_only: true,
            },
        )
    }

    fn get(&self, _user_id: &str, _budget_id: &str) -> Result<Budget> {
        unimplemented!()
    }

    async fn create(&self, _user_id: &str, _new: NewBudget) -> Result<Budget> {
        unimplemented!()
    }

    async fn update(&self, _user_id: &str, _update: BudgetUpdate) -> Result<Budget> {
        unimplemented!()
    }

    async fn delete(&self, _user_id: &str, _budget_id: &str) -> Result<Budget> {
        unimplemented!()
    }
}

fn transaction(
    id: &str,
    amount: f64,
    transaction_type: TransactionType,
    category: Category,
    date: DateTime<Utc>,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        user_id: USER.to_string(),
        title: format!("tx {}", id),
        amount,
        transaction_type,
        category,
        date,
        created_at: date,
        updated_at: date,
    }
}

fn budget(id: &str, category: Category, amount: f64, year: i32, month: i32) -> Budget {
    let now = Utc::now();
    Budget {
        id: id.to_string(),
        user_id: USER.to_string(),
        category,
        amount,
        period: BudgetPeriod::Monthly,
        year,
        month: Some(month),
        is_active: true,
        description: None,
        created_at: now,
        updated_at: now,
    }
}

fn service(
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
) -> (ReportsService, Arc<MockTransactionRepository>) {
    let transaction_repository = Arc::new(MockTransactionRepository::new(transactions));
    let budget_repository = Arc::new(MockBudgetRepository { budgets });
    let service = ReportsService::new(transaction_repository.clone(), budget_repository);
    (service, transaction_repository)
}

fn mid_previous_month() -> DateTime<Utc> {
    previous_month_bounds(Utc::now()).start + Duration::hours(36)
}

#[test]
fn dashboard_income_variance_matches_month_over_month_change() {
    let (service, _) = service(
        vec![
            transaction(
                "prev",
                1000.0,
                TransactionType::Income,
                Category::Other,
                mid_previous_month(),
            ),
            transaction(
                "cur",
                1200.0,
                TransactionType::Income,
                Category::Other,
                Utc::now(),
            ),
        ],
        vec![],
    );

    let dashboard = service.get_dashboard(USER).unwrap();
    assert_eq!(dashboard.current_month.income, 1200.0);
    assert_eq!(dashboard.last_month.income, 1000.0);
    assert_eq!(dashboard.current_month.variations.income.value, 20.0);
    assert_eq!(dashboard.current_month.variations.income.trend, Trend::Up);
}

#[test]
fn dashboard_variance_guard_fires_when_previous_month_is_empty() {
    // No previous-month data: the guard yields 0/stable, not a 100% jump.
    let (service, _) = service(
        vec![transaction(
            "cur",
            500.0,
            TransactionType::Income,
            Category::Other,
            Utc::now(),
        )],
        vec![],
    );

    let dashboard = service.get_dashboard(USER).unwrap();
    let variation = dashboard.current_month.variations.income;
    assert_eq!(variation.value, 0.0);
    assert_eq!(variation.trend, Trend::Stable);
}

#[test]
fn dashboard_top_categories_are_sorted_truncated_and_tie_stable() {
    let now = Utc::now();
    let (service, _) = service(
        vec![
            transaction("a", 50.0, TransactionType::Expense, Category::Food, now),
            transaction("b", 90.0, TransactionType::Expense, Category::Rent, now),
            // Transport ties with Food; Food was encountered first.
            transaction("c", 50.0, TransactionType::Expense, Category::Transport, now),
            transaction("d", 10.0, TransactionType::Expense, Category::Health, now),
            transaction("e", 20.0, TransactionType::Expense, Category::Education, now),
            transaction("f", 5.0, TransactionType::Expense, Category::Other, now),
        ],
        vec![],
    );

    let dashboard = service.get_dashboard(USER).unwrap();
    assert_eq!(dashboard.top_categories.len(), 5);
    let order: Vec<Category> = dashboard
        .top_categories
        .iter()
        .map(|c| c.category)
        .collect();
    assert_eq!(
        order,
        vec![
            Category::Rent,
            Category::Food,
            Category::Transport,
            Category::Education,
            Category::Health,
        ]
    );
}

#[test]
fn dashboard_overall_totals_span_all_time() {
    let now = Utc::now();
    let ancient = Utc.with_ymd_and_hms(2020, 3, 10, 12, 0, 0).unwrap();
    let (service, _) = service(
        vec![
            transaction("old", 900.0, TransactionType::Income, Category::Other, ancient),
            transaction("cur", 100.0, TransactionType::Expense, Category::Food, now),
        ],
        vec![],
    );

    let dashboard = service.get_dashboard(USER).unwrap();
    // The ancient record is outside the current month but counted overall.
    assert_eq!(dashboard.current_month.income, 0.0);
    assert_eq!(dashboard.overall.total_income, 900.0);
    assert_eq!(dashboard.overall.total_expense, 100.0);
    assert_eq!(dashboard.overall.total_balance, 800.0);
    assert_eq!(dashboard.overall.total_transactions, 2);
}

#[test]
fn dashboard_recent_feed_is_newest_first_and_capped_at_five() {
    let base = Utc.with_ymd_and_hms(2025, 7, 1, 8, 0, 0).unwrap();
    let transactions: Vec<Transaction> = (0..7)
        .map(|i| {
            transaction(
                &format!("tx-{}", i),
                10.0 + i as f64,
                TransactionType::Expense,
                Category::Food,
                base + Duration::days(i),
            )
        })
        .collect();
    let (service, _) = service(transactions, vec![]);

    let dashboard = service.get_dashboard(USER).unwrap();
    assert_eq!(dashboard.recent_transactions.len(), 5);
    assert_eq!(dashboard.recent_transactions[0].id, "tx-6");
    assert_eq!(dashboard.recent_transactions[4].id, "tx-2");
}

#[test]
fn dashboard_is_idempotent_over_fixed_stored_state() {
    let (service, _) = service(
        vec![
            transaction(
                "prev",
                300.0,
                TransactionType::Expense,
                Category::Rent,
                mid_previous_month(),
            ),
            transaction(
                "cur",
                450.0,
                TransactionType::Income,
                Category::Other,
                Utc::now(),
            ),
        ],
        vec![],
    );

    let first = serde_json::to_value(service.get_dashboard(USER).unwrap()).unwrap();
    let second = serde_json::to_value(service.get_dashboard(USER).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn dashboard_serializes_under_contract_field_names() {
    let (service, _) = service(
        vec![transaction(
            "cur",
            75.0,
            TransactionType::Expense,
            Category::Food,
            Utc::now(),
        )],
        vec![],
    );

    let json = serde_json::to_value(service.get_dashboard(USER).unwrap()).unwrap();
    assert!(json["currentMonth"]["variations"]["income"]["trend"].is_string());
    assert!(json["currentMonth"]["transactionCount"].is_number());
    assert!(json["lastMonth"].is_object());
    assert!(json["overall"]["totalBalance"].is_number());
    assert!(json["topCategories"].is_array());
    assert_eq!(json["recentTransactions"][0]["type"], "expense");
}

#[test]
fn monthly_report_rejects_out_of_range_month_before_any_store_call() {
    let (service, transaction_repository) = service(vec![], vec![]);

    assert!(service.get_monthly_report(USER, 2025, 13).is_err());
    assert!(service.get_monthly_report(USER, 2025, 0).is_err());
    assert_eq!(transaction_repository.find_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn monthly_report_totals_and_breakdown_sorted_by_balance() {
    let july = |day| Utc.with_ymd_and_hms(2025, 7, day, 12, 0, 0).unwrap();
    let (service, _) = service(
        vec![
            transaction("a", 2000.0, TransactionType::Income, Category::Other, july(1)),
            transaction("b", 800.0, TransactionType::Expense, Category::Rent, july(3)),
            transaction("c", 120.0, TransactionType::Expense, Category::Food, july(5)),
            // Outside the requested month; must not leak in.
            transaction(
                "d",
                999.0,
                TransactionType::Expense,
                Category::Food,
                Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap(),
            ),
        ],
        vec![],
    );

    let report = service.get_monthly_report(USER, 2025, 7).unwrap();
    assert_eq!(report.period.month_name, "July");
    assert_eq!(report.summary.income, 2000.0);
    assert_eq!(report.summary.expense, 920.0);
    assert_eq!(report.summary.balance, 1080.0);
    assert_eq!(report.summary.transaction_count, 3);

    let balances: Vec<f64> = report.categories.iter().map(|c| c.balance).collect();
    assert_eq!(balances, vec![2000.0, -120.0, -800.0]);
}

#[test]
fn monthly_report_of_empty_month_is_zero_valued() {
    let (service, _) = service(vec![], vec![]);
    let report = service.get_monthly_report(USER, 2025, 2).unwrap();
    assert_eq!(report.summary.income, 0.0);
    assert_eq!(report.summary.expense, 0.0);
    assert_eq!(report.summary.balance, 0.0);
    assert!(report.categories.is_empty());
}

#[test]
fn budget_report_flags_warning_and_exceeded_lines() {
    let july = |day| Utc.with_ymd_and_hms(2025, 7, day, 12, 0, 0).unwrap();
    let (service, _) = service(
        vec![
            transaction("a", 450.0, TransactionType::Expense, Category::Food, july(2)),
            transaction("b", 600.0, TransactionType::Expense, Category::Rent, july(4)),
        ],
        vec![
            budget("bf", Category::Food, 500.0, 2025, 7),
            budget("br", Category::Rent, 500.0, 2025, 7),
        ],
    );

    let report = service.get_budget_report(USER, Some(2025), Some(7)).unwrap();
    let by_category: std::collections::HashMap<Category, _> = report
        .report
        .iter()
        .map(|l| (l.category, l.clone()))
        .collect();

    let food = &by_category[&Category::Food];
    assert_eq!(food.percentage, 90.00);
    assert_eq!(food.status, BudgetStatus::Warning);

    let rent = &by_category[&Category::Rent];
    assert_eq!(rent.percentage, 120.00);
    assert_eq!(rent.status, BudgetStatus::Exceeded);

    assert_eq!(report.summary.total_budget, 1000.0);
    assert_eq!(report.summary.total_spent, 1050.0);
    assert_eq!(report.summary.total_remaining, -50.0);
}

#[test]
fn budget_report_appends_no_budget_lines_for_unbudgeted_spend() {
    let july = |day| Utc.with_ymd_and_hms(2025, 7, day, 12, 0, 0).unwrap();
    let (service, _) = service(
        vec![
            transaction("a", 100.0, TransactionType::Expense, Category::Food, july(2)),
            transaction("b", 80.0, TransactionType::Expense, Category::Transport, july(3)),
        ],
        vec![budget("bf", Category::Food, 500.0, 2025, 7)],
    );

    let report = service.get_budget_report(USER, Some(2025), Some(7)).unwrap();
    let synthetic: Vec<_> = report
        .report
        .iter()
        .filter(|l| l.status == BudgetStatus::NoBudget)
        .collect();
    assert_eq!(synthetic.len(), 1);
    assert_eq!(synthetic[0].category, Category::Transport);
    assert_eq!(synthetic[0].budget_id, None);
    assert_eq!(synthetic[0].remaining_amount, -80.0);
}

#[test]
fn budget_report_defaults_to_current_month() {
    let now = Utc::now();
    let (service, _) = service(
        vec![transaction(
            "cur",
            200.0,
            TransactionType::Expense,
            Category::Food,
            now,
        )],
        vec![budget(
            "bf",
            Category::Food,
            400.0,
            now.year(),
            now.month() as i32,
        )],
    );

    let report = service.get_budget_report(USER, None, None).unwrap();
    assert_eq!(report.period.year, now.year());
    assert_eq!(report.period.month, now.month());
    assert_eq!(report.report.len(), 1);
    assert_eq!(report.report[0].spent_amount, 200.0);
    assert_eq!(report.report[0].percentage, 50.00);
}

#[test]
fn budget_report_ignores_inactive_budgets() {
    let july = |day| Utc.with_ymd_and_hms(2025, 7, day, 12, 0, 0).unwrap();
    let mut inactive = budget("bf", Category::Food, 500.0, 2025, 7);
    inactive.is_active = false;

    let (service, _) = service(
        vec![transaction(
            "a",
            100.0,
            TransactionType::Expense,
            Category::Food,
            july(2),
        )],
        vec![inactive],
    );

    let report = service.get_budget_report(USER, Some(2025), Some(7)).unwrap();
    // The only line is the synthetic one; the inactive budget never joins.
    assert_eq!(report.report.len(), 1);
    assert_eq!(report.report[0].status, BudgetStatus::NoBudget);
    assert_eq!(report.summary.total_budget, 0.0);
}

#[test]
fn category_summary_is_all_time_and_sorted_by_balance() {
    let (service, _) = service(
        vec![
            transaction(
                "a",
                500.0,
                TransactionType::Income,
                Category::Other,
                Utc.with_ymd_and_hms(2023, 1, 10, 0, 0, 0).unwrap(),
            ),
            transaction(
                "b",
                300.0,
                TransactionType::Expense,
                Category::Rent,
                Utc.with_ymd_and_hms(2024, 6, 2, 0, 0, 0).unwrap(),
            ),
            transaction(
                "c",
                50.0,
                TransactionType::Expense,
                Category::Food,
                Utc::now(),
            ),
        ],
        vec![],
    );

    let summaries = service.get_category_summary(USER).unwrap();
    let order: Vec<(Category, f64)> = summaries.iter().map(|s| (s.category, s.balance)).collect();
    assert_eq!(
        order,
        vec![
            (Category::Other, 500.0),
            (Category::Food, -50.0),
            (Category::Rent, -300.0),
        ]
    );
}

#[test]
fn reports_never_mix_users() {
    let mut foreign = transaction(
        "other-user",
        999.0,
        TransactionType::Income,
        Category::Other,
        Utc::now(),
    );
    foreign.user_id = "user-2".to_string();

    let (service, _) = service(vec![foreign], vec![]);
    let dashboard = service.get_dashboard(USER).unwrap();
    assert_eq!(dashboard.overall.total_transactions, 0);
    assert_eq!(dashboard.overall.total_income, 0.0);
}
