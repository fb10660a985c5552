//! Dashboard HTTP handlers.
//!
//! This module contains:
//! - The route handler for the balance summary
//! - The route handler for the dashboard data, optionally limited to a date range
//! - The query and response types used by the handlers

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{FromRef, Query, State, rejection::QueryRejection},
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    AppState, Error,
    auth::UserId,
    category::Category,
    dashboard::aggregation::{CategoryTotal, MonthlyTotal, expenses_by_category, monthly_totals},
    stores::{CategoryStore, Storage, TransactionStore},
    summary::{DualRunningBalances, Summary, calculate_dual_running_balances, calculate_summary},
    transaction::Transaction,
    validation::{self, ValidationErrors},
};

const INVALID_RANGE: &str = "A data final deve ser igual ou posterior à data inicial";

/// The state needed for the dashboard and summary routes.
#[derive(Clone)]
pub struct DashboardState {
    /// The store to read transactions and categories from.
    pub store: Arc<dyn Storage>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// The optional date range for the dashboard, both ends inclusive.
#[derive(Debug, Default, Deserialize)]
pub struct DateRangeQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// A validated, inclusive date range. A missing end is unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DateRange {
    from: Option<Date>,
    to: Option<Date>,
}

impl DateRange {
    fn contains(&self, date: Date) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

impl DateRangeQuery {
    fn validate(&self) -> Result<DateRange, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let from = self
            .from
            .as_deref()
            .and_then(|from| validation::date(&mut errors, "from", from));
        let to = self
            .to
            .as_deref()
            .and_then(|to| validation::date(&mut errors, "to", to));

        if let (Some(from), Some(to)) = (from, to)
            && to < from
        {
            errors.add("to", INVALID_RANGE);
        }

        errors.into_result(|| DateRange { from, to })
    }
}

/// Everything the dashboard needs to draw its cards and charts.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub summary: Summary,
    pub running_balances: DualRunningBalances,
    pub monthly_totals: Vec<MonthlyTotal>,
    pub expenses_by_category: Vec<CategoryTotal>,
    pub transaction_count: usize,
}

/// A route handler for the user's balance summary over all transactions.
pub async fn get_summary(
    State(state): State<DashboardState>,
    Extension(user_id): Extension<UserId>,
) -> Result<Json<Summary>, Error> {
    let transactions = state
        .store
        .get_all_transactions(user_id)
        .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?;

    Ok(Json(calculate_summary(&transactions)))
}

/// A route handler for the dashboard data.
///
/// The `from` and `to` query parameters limit the data to transactions
/// dated within the range, inclusive.
pub async fn get_dashboard(
    State(state): State<DashboardState>,
    Extension(user_id): Extension<UserId>,
    query: Result<Query<DateRangeQuery>, QueryRejection>,
) -> Result<Json<DashboardData>, Error> {
    let Query(query) = query?;
    let range = query.validate()?;

    let transactions: Vec<Transaction> = state
        .store
        .get_all_transactions(user_id)
        .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?
        .into_iter()
        .filter(|transaction| range.contains(transaction.date))
        .collect();
    let categories = state
        .store
        .get_all_categories(user_id)
        .inspect_err(|error| tracing::error!("could not get categories: {error}"))?;

    Ok(Json(build_dashboard_data(&transactions, &categories)))
}

fn build_dashboard_data(
    transactions: &[Transaction],
    categories: &[Category],
) -> DashboardData {
    DashboardData {
        summary: calculate_summary(transactions),
        running_balances: calculate_dual_running_balances(transactions),
        monthly_totals: monthly_totals(transactions),
        expenses_by_category: expenses_by_category(transactions, categories),
        transaction_count: transactions.len(),
    }
}
