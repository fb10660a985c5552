//! The people in the household that transactions can be attributed to.

mod core;
mod endpoints;

pub use core::{
    FamilyMember, FamilyMemberId, FamilyMemberPayload, FamilyMemberUpdate, NewFamilyMember,
    Relationship,
};
pub use endpoints::{
    create_family_member_endpoint, delete_family_member_endpoint, get_family_member_endpoint,
    get_family_members_endpoint, update_family_member_endpoint,
};
