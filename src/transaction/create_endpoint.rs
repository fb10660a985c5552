//! Defines the endpoint for creating a new transaction.

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    AppState, Error,
    auth::UserId,
    stores::TransactionStore,
    transaction::{
        Transaction, TransactionPayload,
        references::{References, check_references},
    },
};

/// A route handler for creating a new transaction, responds with the stored transaction.
pub async fn create_transaction_endpoint(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
    payload: Result<Json<TransactionPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Transaction>), Error> {
    let Json(payload) = payload?;
    let new_transaction = payload.validate_new()?;

    check_references(
        state.store.as_ref(),
        user_id,
        References {
            category_id: Some(new_transaction.category_id),
            card_id: new_transaction.card_id,
            family_member_id: new_transaction.family_member_id,
        },
    )?;

    let transaction = state
        .store
        .create_transaction(user_id, new_transaction)
        .inspect_err(|error| tracing::error!("could not create transaction: {error}"))?;

    Ok((StatusCode::CREATED, Json(transaction)))
}
