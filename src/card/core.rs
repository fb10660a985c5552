//! Defines the credit card model and its create and update schemas.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    auth::UserId,
    transaction::UnknownVariant,
    validation::{self, ValidationErrors, required},
};

/// Alias for the ID type of credit cards.
pub type CardId = Uuid;

const INVALID_NAME: &str = "Nome deve ter entre 1 e 100 caracteres";
const INVALID_TYPE: &str = "Tipo de cartão deve ser 'physical' ou 'virtual'";
const INVALID_HOLDER: &str = "Titular deve ter entre 1 e 100 caracteres";
const INVALID_PURPOSE: &str = "Finalidade deve ter entre 1 e 100 caracteres";
const INVALID_LIMIT: &str = "Limite deve ser maior que zero";

/// Whether a card exists as plastic or only as a number for online purchases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Physical,
    Virtual,
}

impl CardType {
    /// The string stored in the database and used in JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            CardType::Physical => "physical",
            CardType::Virtual => "virtual",
        }
    }
}

impl FromStr for CardType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "physical" => Ok(CardType::Physical),
            "virtual" => Ok(CardType::Virtual),
            other => Err(UnknownVariant(other.to_owned())),
        }
    }
}

/// A credit card that transactions can be charged to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCard {
    pub id: CardId,
    pub user_id: UserId,
    pub name: String,
    /// The last four digits printed on the card.
    pub last_four_digits: String,
    #[serde(rename = "type")]
    pub card_type: CardType,
    /// The name of the person the card was issued to.
    pub holder: String,
    /// What the card is used for, e.g. 'Compras online'.
    pub purpose: String,
    pub color: String,
    pub limit: Option<f64>,
    /// The day of the month when the statement closes.
    pub closing_day: Option<u8>,
    /// The day of the month when the statement must be paid.
    pub due_day: Option<u8>,
}

impl CreditCard {
    pub fn from_new(id: CardId, user_id: UserId, new: NewCard) -> Self {
        Self {
            id,
            user_id,
            name: new.name,
            last_four_digits: new.last_four_digits,
            card_type: new.card_type,
            holder: new.holder,
            purpose: new.purpose,
            color: new.color,
            limit: new.limit,
            closing_day: new.closing_day,
            due_day: new.due_day,
        }
    }

    /// Apply the fields set in `update` to a copy of this card.
    pub fn apply_update(&self, update: &CardUpdate) -> Self {
        let mut card = self.clone();

        if let Some(ref name) = update.name {
            card.name = name.clone();
        }
        if let Some(ref last_four_digits) = update.last_four_digits {
            card.last_four_digits = last_four_digits.clone();
        }
        if let Some(card_type) = update.card_type {
            card.card_type = card_type;
        }
        if let Some(ref holder) = update.holder {
            card.holder = holder.clone();
        }
        if let Some(ref purpose) = update.purpose {
            card.purpose = purpose.clone();
        }
        if let Some(ref color) = update.color {
            card.color = color.clone();
        }
        if update.limit.is_some() {
            card.limit = update.limit;
        }
        if update.closing_day.is_some() {
            card.closing_day = update.closing_day;
        }
        if update.due_day.is_some() {
            card.due_day = update.due_day;
        }

        card
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCard {
    pub name: String,
    pub last_four_digits: String,
    pub card_type: CardType,
    pub holder: String,
    pub purpose: String,
    pub color: String,
    pub limit: Option<f64>,
    pub closing_day: Option<u8>,
    pub due_day: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardUpdate {
    pub name: Option<String>,
    pub last_four_digits: Option<String>,
    pub card_type: Option<CardType>,
    pub holder: Option<String>,
    pub purpose: Option<String>,
    pub color: Option<String>,
    pub limit: Option<f64>,
    pub closing_day: Option<u8>,
    pub due_day: Option<u8>,
}

/// The unvalidated fields of a credit card as sent by a client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPayload {
    pub name: Option<String>,
    pub last_four_digits: Option<String>,
    #[serde(rename = "type")]
    pub card_type: Option<String>,
    pub holder: Option<String>,
    pub purpose: Option<String>,
    pub color: Option<String>,
    pub limit: Option<f64>,
    pub closing_day: Option<i64>,
    pub due_day: Option<i64>,
}

impl CardPayload {
    /// Validate the payload as a new card.
    ///
    /// # Errors
    /// Returns every field that is missing or invalid.
    pub fn validate_new(&self) -> Result<NewCard, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let fields = self.parse_fields(&mut errors);

        let name = required(&mut errors, "name", self.name.as_ref()).and(fields.name);
        let last_four_digits =
            required(&mut errors, "lastFourDigits", self.last_four_digits.as_ref())
                .and(fields.last_four_digits);
        let card_type = required(&mut errors, "type", self.card_type.as_ref()).and(fields.card_type);
        let holder = required(&mut errors, "holder", self.holder.as_ref()).and(fields.holder);
        let purpose = required(&mut errors, "purpose", self.purpose.as_ref()).and(fields.purpose);
        let color = required(&mut errors, "color", self.color.as_ref()).and(fields.color);

        match (name, last_four_digits, card_type, holder, purpose, color) {
            (
                Some(name),
                Some(last_four_digits),
                Some(card_type),
                Some(holder),
                Some(purpose),
                Some(color),
            ) if errors.is_empty() => Ok(NewCard {
                name,
                last_four_digits,
                card_type,
                holder,
                purpose,
                color,
                limit: fields.limit,
                closing_day: fields.closing_day,
                due_day: fields.due_day,
            }),
            _ => Err(errors),
        }
    }

    /// Validate the payload as a partial update.
    ///
    /// # Errors
    /// Returns every field that is present but invalid.
    pub fn validate_update(&self) -> Result<CardUpdate, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let fields = self.parse_fields(&mut errors);

        errors.into_result(|| fields)
    }

    fn parse_fields(&self, errors: &mut ValidationErrors) -> CardUpdate {
        CardUpdate {
            name: self
                .name
                .as_deref()
                .and_then(|name| validation::text(errors, "name", name, 1, 100, INVALID_NAME)),
            last_four_digits: self
                .last_four_digits
                .as_deref()
                .and_then(|digits| validation::last_four_digits(errors, "lastFourDigits", digits)),
            card_type: self.card_type.as_deref().and_then(|value| {
                validation::one_of::<CardType>(errors, "type", value, INVALID_TYPE)
            }),
            holder: self.holder.as_deref().and_then(|holder| {
                validation::text(errors, "holder", holder, 1, 100, INVALID_HOLDER)
            }),
            purpose: self.purpose.as_deref().and_then(|purpose| {
                validation::text(errors, "purpose", purpose, 1, 100, INVALID_PURPOSE)
            }),
            color: self
                .color
                .as_deref()
                .and_then(|color| validation::hex_color(errors, "color", color)),
            limit: self
                .limit
                .and_then(|limit| validation::positive_amount(errors, "limit", limit, INVALID_LIMIT)),
            closing_day: self
                .closing_day
                .and_then(|day| validation::day_of_month(errors, "closingDay", day)),
            due_day: self
                .due_day
                .and_then(|day| validation::day_of_month(errors, "dueDay", day)),
        }
    }
}
