/// Consumption above this percentage of a budget flags the line as `warning`.
pub const BUDGET_WARNING_THRESHOLD: f64 = 80.0;

/// Consumption above this percentage of a budget flags the line as `exceeded`.
pub const BUDGET_EXCEEDED_THRESHOLD: f64 = 100.0;

/// Number of top expense categories shown on the dashboard.
pub const DASHBOARD_TOP_CATEGORIES: usize = 5;

/// Number of recently created transactions shown on the dashboard.
pub const DASHBOARD_RECENT_TRANSACTIONS: i64 = 5;

/// Maximum length of a transaction title.
pub const TRANSACTION_TITLE_MAX_LEN: usize = 100;

/// Maximum length of a budget description.
pub const BUDGET_DESCRIPTION_MAX_LEN: usize = 200;

/// English month names, indexed by `month - 1`.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];
