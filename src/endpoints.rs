//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/cards/{card_id}', use [format_endpoint].

use std::fmt::Display;

/// The liveness probe, the only route that does not need a user ID.
pub const HEALTH: &str = "/api/health";
/// The route to list and create transactions.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route to access a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to list and create categories.
pub const CATEGORIES: &str = "/api/categories";
/// The route to access a single category.
pub const CATEGORY: &str = "/api/categories/{category_id}";
/// The route to list and create credit cards.
pub const CARDS: &str = "/api/cards";
/// The route to access a single credit card.
pub const CARD: &str = "/api/cards/{card_id}";
/// The route to list and create family members.
pub const FAMILY_MEMBERS: &str = "/api/family-members";
/// The route to access a single family member.
pub const FAMILY_MEMBER: &str = "/api/family-members/{family_member_id}";
/// The route to import transactions from a CSV bank statement.
pub const IMPORT: &str = "/api/import";
/// The route for the balance summary.
pub const SUMMARY: &str = "/api/summary";
/// The route for the dashboard data.
pub const DASHBOARD: &str = "/api/dashboard";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/users/{user_id}', '{user_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: impl Display) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
