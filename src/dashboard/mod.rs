//! Dashboard module
//!
//! Provides the balance summary and the data behind the dashboard charts.
//! Includes functionality for filtering data by a date range.

mod aggregation;
mod handlers;

pub use handlers::{get_dashboard, get_summary};
