//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Json, Router, middleware,
    routing::{get, post},
};
use serde_json::{Value, json};

use crate::{
    AppState,
    auth::user_guard,
    card::{
        create_card_endpoint, delete_card_endpoint, get_card_endpoint, get_cards_endpoint,
        update_card_endpoint,
    },
    category::{
        create_category_endpoint, delete_category_endpoint, get_categories_endpoint,
        get_category_endpoint, update_category_endpoint,
    },
    dashboard::{get_dashboard, get_summary},
    endpoints,
    family_member::{
        create_family_member_endpoint, delete_family_member_endpoint, get_family_member_endpoint,
        get_family_members_endpoint, update_family_member_endpoint,
    },
    import::import_transactions_endpoint,
    not_found::get_404_not_found,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
        get_transaction_endpoint, get_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new().route(endpoints::HEALTH, get(get_health));

    let protected_routes = Router::new()
        .route(
            endpoints::TRANSACTIONS,
            get(get_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            get(get_transaction_endpoint)
                .put(edit_transaction_endpoint)
                .delete(delete_transaction_endpoint),
        )
        .route(
            endpoints::CATEGORIES,
            get(get_categories_endpoint).post(create_category_endpoint),
        )
        .route(
            endpoints::CATEGORY,
            get(get_category_endpoint)
                .put(update_category_endpoint)
                .delete(delete_category_endpoint),
        )
        .route(
            endpoints::CARDS,
            get(get_cards_endpoint).post(create_card_endpoint),
        )
        .route(
            endpoints::CARD,
            get(get_card_endpoint)
                .put(update_card_endpoint)
                .delete(delete_card_endpoint),
        )
        .route(
            endpoints::FAMILY_MEMBERS,
            get(get_family_members_endpoint).post(create_family_member_endpoint),
        )
        .route(
            endpoints::FAMILY_MEMBER,
            get(get_family_member_endpoint)
                .put(update_family_member_endpoint)
                .delete(delete_family_member_endpoint),
        )
        .route(endpoints::IMPORT, post(import_transactions_endpoint))
        .route(endpoints::SUMMARY, get(get_summary))
        .route(endpoints::DASHBOARD, get(get_dashboard))
        .route_layer(middleware::from_fn(user_guard));

    protected_routes
        .merge(unprotected_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// Report that the server is up.
async fn get_health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
