pub mod db;

pub mod budgets;
pub mod constants;
pub mod errors;
pub mod reports;
pub mod schema;
pub mod transactions;

pub use errors::{Error, Result};
