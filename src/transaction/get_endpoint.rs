//! Defines the endpoints for listing transactions and getting a single transaction.

use axum::{
    Extension, Json,
    extract::{Path, State, rejection::PathRejection},
};

use crate::{
    AppState, Error,
    auth::UserId,
    stores::TransactionStore,
    transaction::{Transaction, TransactionId},
};

/// A route handler for listing the user's transactions, newest first.
pub async fn get_transactions_endpoint(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
) -> Result<Json<Vec<Transaction>>, Error> {
    state
        .store
        .get_all_transactions(user_id)
        .inspect_err(|error| tracing::error!("could not get transactions: {error}"))
        .map(Json)
}

/// A route handler for getting a single transaction by its ID.
pub async fn get_transaction_endpoint(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
    transaction_id: Result<Path<TransactionId>, PathRejection>,
) -> Result<Json<Transaction>, Error> {
    let Path(transaction_id) = transaction_id?;

    state
        .store
        .get_transaction(user_id, transaction_id)?
        .map(Json)
        .ok_or(Error::NotFound)
}
