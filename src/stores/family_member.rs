//! Defines the family member store trait.

use crate::{
    Error,
    auth::UserId,
    family_member::{FamilyMember, FamilyMemberId, FamilyMemberUpdate, NewFamilyMember},
};

/// Creates and retrieves the members of a family.
pub trait FamilyMemberStore {
    /// Get all of the user's family members, sorted by name.
    fn get_all_family_members(&self, user_id: UserId) -> Result<Vec<FamilyMember>, Error>;

    fn get_family_member(
        &self,
        user_id: UserId,
        id: FamilyMemberId,
    ) -> Result<Option<FamilyMember>, Error>;

    fn create_family_member(
        &self,
        user_id: UserId,
        member: NewFamilyMember,
    ) -> Result<FamilyMember, Error>;

    fn update_family_member(
        &self,
        user_id: UserId,
        id: FamilyMemberId,
        update: &FamilyMemberUpdate,
    ) -> Result<Option<FamilyMember>, Error>;

    fn delete_family_member(&self, user_id: UserId, id: FamilyMemberId) -> Result<bool, Error>;
}
