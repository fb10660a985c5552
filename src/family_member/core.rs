//! Defines the family member model and its create and update schemas.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    auth::UserId,
    transaction::UnknownVariant,
    validation::{self, ValidationErrors, required},
};

/// Alias for the ID type of family members.
pub type FamilyMemberId = Uuid;

const INVALID_NAME: &str = "Nome deve ter entre 1 e 100 caracteres";
const INVALID_RELATIONSHIP: &str = "Parentesco inválido";

/// How a family member is related to the account holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relationship {
    Titular,
    Conjuge,
    Filho,
    Filha,
    Pai,
    Mae,
    Outro,
}

impl Relationship {
    /// The string stored in the database and used in JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Relationship::Titular => "titular",
            Relationship::Conjuge => "conjuge",
            Relationship::Filho => "filho",
            Relationship::Filha => "filha",
            Relationship::Pai => "pai",
            Relationship::Mae => "mae",
            Relationship::Outro => "outro",
        }
    }
}

impl FromStr for Relationship {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "titular" => Ok(Relationship::Titular),
            "conjuge" => Ok(Relationship::Conjuge),
            "filho" => Ok(Relationship::Filho),
            "filha" => Ok(Relationship::Filha),
            "pai" => Ok(Relationship::Pai),
            "mae" => Ok(Relationship::Mae),
            "outro" => Ok(Relationship::Outro),
            other => Err(UnknownVariant(other.to_owned())),
        }
    }
}

/// A person whose spending is tracked under the account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMember {
    pub id: FamilyMemberId,
    pub user_id: UserId,
    pub name: String,
    pub relationship: Relationship,
}

impl FamilyMember {
    pub fn from_new(id: FamilyMemberId, user_id: UserId, new: NewFamilyMember) -> Self {
        Self {
            id,
            user_id,
            name: new.name,
            relationship: new.relationship,
        }
    }

    pub fn apply_update(&self, update: &FamilyMemberUpdate) -> Self {
        Self {
            id: self.id,
            user_id: self.user_id,
            name: update.name.clone().unwrap_or_else(|| self.name.clone()),
            relationship: update.relationship.unwrap_or(self.relationship),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewFamilyMember {
    pub name: String,
    pub relationship: Relationship,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FamilyMemberUpdate {
    pub name: Option<String>,
    pub relationship: Option<Relationship>,
}

/// The unvalidated fields of a family member as sent by a client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMemberPayload {
    pub name: Option<String>,
    pub relationship: Option<String>,
}

impl FamilyMemberPayload {
    /// Validate the payload as a new family member.
    ///
    /// # Errors
    /// Returns every field that is missing or invalid.
    pub fn validate_new(&self) -> Result<NewFamilyMember, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let fields = self.parse_fields(&mut errors);

        let name = required(&mut errors, "name", self.name.as_ref()).and(fields.name);
        let relationship = required(&mut errors, "relationship", self.relationship.as_ref())
            .and(fields.relationship);

        match (name, relationship) {
            (Some(name), Some(relationship)) if errors.is_empty() => {
                Ok(NewFamilyMember { name, relationship })
            }
            _ => Err(errors),
        }
    }

    /// Validate the payload as a partial update.
    ///
    /// # Errors
    /// Returns every field that is present but invalid.
    pub fn validate_update(&self) -> Result<FamilyMemberUpdate, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let fields = self.parse_fields(&mut errors);

        errors.into_result(|| fields)
    }

    fn parse_fields(&self, errors: &mut ValidationErrors) -> FamilyMemberUpdate {
        FamilyMemberUpdate {
            name: self
                .name
                .as_deref()
                .and_then(|name| validation::text(errors, "name", name, 1, 100, INVALID_NAME)),
            relationship: self.relationship.as_deref().and_then(|value| {
                validation::one_of::<Relationship>(
                    errors,
                    "relationship",
                    value,
                    INVALID_RELATIONSHIP,
                )
            }),
        }
    }
}
