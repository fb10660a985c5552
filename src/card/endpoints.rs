//! Route handlers for credit cards.

use axum::{
    Extension, Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};

use crate::{
    AppState, Error,
    auth::UserId,
    card::{CardId, CardPayload, CreditCard},
    stores::CardStore,
};

/// A route handler for listing the user's cards, sorted by name.
pub async fn get_cards_endpoint(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
) -> Result<Json<Vec<CreditCard>>, Error> {
    state
        .store
        .get_all_cards(user_id)
        .inspect_err(|error| tracing::error!("could not get cards: {error}"))
        .map(Json)
}

pub async fn get_card_endpoint(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
    card_id: Result<Path<CardId>, PathRejection>,
) -> Result<Json<CreditCard>, Error> {
    let Path(card_id) = card_id?;

    state
        .store
        .get_card(user_id, card_id)?
        .map(Json)
        .ok_or(Error::NotFound)
}

pub async fn create_card_endpoint(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
    payload: Result<Json<CardPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<CreditCard>), Error> {
    let Json(payload) = payload?;
    let new_card = payload.validate_new()?;

    let card = state
        .store
        .create_card(user_id, new_card)
        .inspect_err(|error| tracing::error!("could not create card: {error}"))?;

    Ok((StatusCode::CREATED, Json(card)))
}

pub async fn update_card_endpoint(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
    card_id: Result<Path<CardId>, PathRejection>,
    payload: Result<Json<CardPayload>, JsonRejection>,
) -> Result<Json<CreditCard>, Error> {
    let Path(card_id) = card_id?;
    let Json(payload) = payload?;
    let update = payload.validate_update()?;

    state
        .store
        .update_card(user_id, card_id, &update)
        .inspect_err(|error| tracing::error!("could not update card {card_id}: {error}"))?
        .map(Json)
        .ok_or(Error::NotFound)
}

/// A route handler for deleting a card, transactions charged to it are kept.
pub async fn delete_card_endpoint(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
    card_id: Result<Path<CardId>, PathRejection>,
) -> Result<StatusCode, Error> {
    let Path(card_id) = card_id?;

    match state.store.delete_card(user_id, card_id)? {
        true => Ok(StatusCode::NO_CONTENT),
        false => Err(Error::NotFound),
    }
}
