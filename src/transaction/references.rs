//! Checks that the entities a transaction points to exist.

use crate::{
    Error,
    auth::UserId,
    card::CardId,
    category::CategoryId,
    family_member::FamilyMemberId,
    stores::{CardStore, CategoryStore, FamilyMemberStore, Storage},
    validation::ValidationErrors,
};

pub(crate) const CATEGORY_NOT_FOUND: &str = "Categoria não encontrada";
pub(crate) const CARD_NOT_FOUND: &str = "Cartão não encontrado";
pub(crate) const FAMILY_MEMBER_NOT_FOUND: &str = "Membro da família não encontrado";

/// The IDs of other entities referenced by a transaction.
///
/// `None` means the reference is not being set, not that it is being cleared.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct References {
    pub category_id: Option<CategoryId>,
    pub card_id: Option<CardId>,
    pub family_member_id: Option<FamilyMemberId>,
}

/// Check that every referenced entity exists for `user_id`.
///
/// # Errors
/// Returns [Error::Validation] with an issue on each field that references a
/// missing entity, or any error from the store.
pub(crate) fn check_references(
    store: &dyn Storage,
    user_id: UserId,
    references: References,
) -> Result<(), Error> {
    let mut errors = ValidationErrors::new();

    if let Some(id) = references.category_id
        && store.get_category(user_id, id)?.is_none()
    {
        errors.add("categoryId", CATEGORY_NOT_FOUND);
    }

    if let Some(id) = references.card_id
        && store.get_card(user_id, id)?.is_none()
    {
        errors.add("cardId", CARD_NOT_FOUND);
    }

    if let Some(id) = references.family_member_id
        && store.get_family_member(user_id, id)?.is_none()
    {
        errors.add("familyMemberId", FAMILY_MEMBER_NOT_FOUND);
    }

    errors.into_result(|| ()).map_err(Error::from)
}
