//! Route handlers for the members of the user's household.

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
    family_member::{FamilyMember, FamilyMemberId, FamilyMemberPayload},
    stores::FamilyMemberStore,
};

pub async fn get_family_members_endpoint(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
) -> Result<Json<Vec<FamilyMember>>, Error> {
    state
        .store
        .get_all_family_members(user_id)
        .inspect_err(|error| tracing::error!("could not get family members: {error}"))
        .map(Json)
}

pub async fn get_family_member_endpoint(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
    member_id: Result<Path<FamilyMemberId>, PathRejection>,
) -> Result<Json<FamilyMember>, Error> {
    let Path(member_id) = member_id?;

    state
        .store
        .get_family_member(user_id, member_id)?
        .map(Json)
        .ok_or(Error::NotFound)
}

pub async fn create_family_member_endpoint(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
    payload: Result<Json<FamilyMemberPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<FamilyMember>), Error> {
    let Json(payload) = payload?;
    let new_member = payload.validate_new()?;

    let member = state
        .store
        .create_family_member(user_id, new_member)
        .inspect_err(|error| tracing::error!("could not create family member: {error}"))?;

    Ok((StatusCode::CREATED, Json(member)))
}

pub async fn update_family_member_endpoint(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
    member_id: Result<Path<FamilyMemberId>, PathRejection>,
    payload: Result<Json<FamilyMemberPayload>, JsonRejection>,
) -> Result<Json<FamilyMember>, Error> {
    let Path(member_id) = member_id?;
    let Json(payload) = payload?;
    let update = payload.validate_update()?;

    state
        .store
        .update_family_member(user_id, member_id, &update)
        .inspect_err(|error| {
            tracing::error!("could not update family member {member_id}: {error}")
        })?
        .map(Json)
        .ok_or(Error::NotFound)
}

pub async fn delete_family_member_endpoint(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
    member_id: Result<Path<FamilyMemberId>, PathRejection>,
) -> Result<StatusCode, Error> {
    let Path(member_id) = member_id?;

    match state.store.delete_family_member(user_id, member_id)? {
        true => Ok(StatusCode::NO_CONTENT),
        false => Err(Error::NotFound),
    }
}
