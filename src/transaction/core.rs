//! Defines the core data models for transactions.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

use crate::{
    auth::UserId, card::CardId, category::CategoryId, dates::iso_date,
    family_member::FamilyMemberId, validation::ValidationErrors,
};

/// Alias for the ID type of transactions.
pub type TransactionId = Uuid;

/// The message used when an installment transaction is missing its installment details.
pub const INSTALLMENTS_REQUIRED: &str =
    "Transações parceladas devem informar o número da parcela e o total de parcelas";

/// The message used when the installment number is past the last installment.
pub const INSTALLMENT_OUT_OF_RANGE: &str =
    "Número da parcela não pode ser maior que o total de parcelas";

/// The error for strings that do not name a variant of one of the domain enums.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown variant \"{0}\"")]
pub struct UnknownVariant(pub String);

/// Whether money came in or went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money that was earned.
    Income,
    /// Money that was spent.
    Expense,
}

impl TransactionType {
    /// The string stored in the database and used in JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    /// `amount` with the sign of this type: positive for income, negative for expenses.
    pub fn signed(&self, amount: f64) -> f64 {
        match self {
            TransactionType::Income => amount,
            TransactionType::Expense => -amount,
        }
    }
}

impl FromStr for TransactionType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(UnknownVariant(other.to_owned())),
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a transaction stands alone or is one installment of a larger purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionMode {
    /// A single, standalone transaction.
    Avulsa,
    /// One of several installments.
    Parcelada,
}

impl TransactionMode {
    /// The string stored in the database and used in JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionMode::Avulsa => "avulsa",
            TransactionMode::Parcelada => "parcelada",
        }
    }
}

impl FromStr for TransactionMode {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "avulsa" => Ok(TransactionMode::Avulsa),
            "parcelada" => Ok(TransactionMode::Parcelada),
            other => Err(UnknownVariant(other.to_owned())),
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The user account that owns the transaction.
    pub user_id: UserId,
    /// When the transaction happened.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// The amount of money, always positive. The sign comes from `transaction_type`.
    pub amount: f64,
    /// Whether the money was earned or spent.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The category the transaction belongs to.
    pub category_id: CategoryId,
    /// A text description of what the transaction was for.
    pub description: String,
    /// Whether this is a standalone transaction or an installment.
    pub mode: TransactionMode,
    /// Which installment this is, starting from 1.
    pub installment_number: Option<u32>,
    /// How many installments the purchase was split into.
    pub installments_total: Option<u32>,
    /// The credit card used to pay, if any.
    pub card_id: Option<CardId>,
    /// The family member responsible for the transaction, if any.
    pub family_member_id: Option<FamilyMemberId>,
    /// When the transaction is due to be paid or received.
    #[serde(default, with = "iso_date::option")]
    pub due_date: Option<Date>,
    /// Whether the money has actually changed hands.
    pub is_paid: bool,
    /// Whether the transaction repeats every month.
    pub is_recurring: bool,
}

impl Transaction {
    /// The amount with a positive sign for income and a negative sign for expenses.
    pub fn signed_amount(&self) -> f64 {
        self.transaction_type.signed(self.amount)
    }

    /// Create the transaction stored for `new` with the given ID and owner.
    pub fn from_new(id: TransactionId, user_id: UserId, new: NewTransaction) -> Self {
        Self {
            id,
            user_id,
            date: new.date,
            amount: new.amount,
            transaction_type: new.transaction_type,
            category_id: new.category_id,
            description: new.description,
            mode: new.mode,
            installment_number: new.installment_number,
            installments_total: new.installments_total,
            card_id: new.card_id,
            family_member_id: new.family_member_id,
            due_date: new.due_date,
            is_paid: new.is_paid,
            is_recurring: new.is_recurring,
        }
    }

    /// Apply the fields set in `update` to a copy of this transaction.
    ///
    /// Switching to [TransactionMode::Avulsa] clears the installment fields.
    ///
    /// # Errors
    /// Returns [ValidationErrors] if the merged transaction is an installment
    /// without its installment details.
    pub fn apply_update(&self, update: &TransactionUpdate) -> Result<Self, ValidationErrors> {
        let mut merged = self.clone();

        if let Some(date) = update.date {
            merged.date = date;
        }
        if let Some(amount) = update.amount {
            merged.amount = amount;
        }
        if let Some(transaction_type) = update.transaction_type {
            merged.transaction_type = transaction_type;
        }
        if let Some(category_id) = update.category_id {
            merged.category_id = category_id;
        }
        if let Some(ref description) = update.description {
            merged.description = description.clone();
        }
        if let Some(mode) = update.mode {
            merged.mode = mode;
        }
        if update.installment_number.is_some() {
            merged.installment_number = update.installment_number;
        }
        if update.installments_total.is_some() {
            merged.installments_total = update.installments_total;
        }
        if update.card_id.is_some() {
            merged.card_id = update.card_id;
        }
        if update.family_member_id.is_some() {
            merged.family_member_id = update.family_member_id;
        }
        if update.due_date.is_some() {
            merged.due_date = update.due_date;
        }
        if let Some(is_paid) = update.is_paid {
            merged.is_paid = is_paid;
        }
        if let Some(is_recurring) = update.is_recurring {
            merged.is_recurring = is_recurring;
        }

        if merged.mode == TransactionMode::Avulsa {
            merged.installment_number = None;
            merged.installments_total = None;
        }

        let mut errors = ValidationErrors::new();
        check_installments(
            &mut errors,
            Some(merged.mode),
            merged.installment_number,
            merged.installments_total,
        );

        errors.into_result(|| merged)
    }
}

/// A validated transaction that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub date: Date,
    pub amount: f64,
    pub transaction_type: TransactionType,
    pub category_id: CategoryId,
    pub description: String,
    pub mode: TransactionMode,
    pub installment_number: Option<u32>,
    pub installments_total: Option<u32>,
    pub card_id: Option<CardId>,
    pub family_member_id: Option<FamilyMemberId>,
    pub due_date: Option<Date>,
    pub is_paid: bool,
    pub is_recurring: bool,
}

impl NewTransaction {
    /// A paid, standalone transaction with no card or family member.
    pub fn simple(
        date: Date,
        amount: f64,
        transaction_type: TransactionType,
        category_id: CategoryId,
        description: &str,
    ) -> Self {
        Self {
            date,
            amount,
            transaction_type,
            category_id,
            description: description.to_owned(),
            mode: TransactionMode::Avulsa,
            installment_number: None,
            installments_total: None,
            card_id: None,
            family_member_id: None,
            due_date: None,
            is_paid: true,
            is_recurring: false,
        }
    }
}

/// A validated partial update, `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionUpdate {
    pub date: Option<Date>,
    pub amount: Option<f64>,
    pub transaction_type: Option<TransactionType>,
    pub category_id: Option<CategoryId>,
    pub description: Option<String>,
    pub mode: Option<TransactionMode>,
    pub installment_number: Option<u32>,
    pub installments_total: Option<u32>,
    pub card_id: Option<CardId>,
    pub family_member_id: Option<FamilyMemberId>,
    pub due_date: Option<Date>,
    pub is_paid: Option<bool>,
    pub is_recurring: Option<bool>,
}

/// Enforce the installment rules.
///
/// An installment transaction must carry both installment fields, otherwise
/// the issue is reported on `mode`. The installment number must not exceed
/// the total. Other modes ignore the installment fields.
pub(crate) fn check_installments(
    errors: &mut ValidationErrors,
    mode: Option<TransactionMode>,
    installment_number: Option<u32>,
    installments_total: Option<u32>,
) {
    if mode != Some(TransactionMode::Parcelada) {
        return;
    }

    match (installment_number, installments_total) {
        (Some(number), Some(total)) if number > total => {
            errors.add("installmentNumber", INSTALLMENT_OUT_OF_RANGE);
        }
        (Some(_), Some(_)) => {}
        _ => errors.add("mode", INSTALLMENTS_REQUIRED),
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;
    use uuid::Uuid;

    use crate::transaction::{
        INSTALLMENTS_REQUIRED, NewTransaction, Transaction, TransactionMode, TransactionType,
        TransactionUpdate,
    };

    fn installment() -> Transaction {
        let mut new = NewTransaction::simple(
            date!(2024 - 03 - 10),
            250.0,
            TransactionType::Expense,
            Uuid::new_v4(),
            "Geladeira",
        );
        new.mode = TransactionMode::Parcelada;
        new.installment_number = Some(2);
        new.installments_total = Some(10);

        Transaction::from_new(Uuid::new_v4(), Uuid::new_v4(), new)
    }

    #[test]
    fn signed_amount_is_negative_for_expenses() {
        let transaction = installment();

        assert_eq!(transaction.signed_amount(), -250.0);
        assert_eq!(TransactionType::Income.signed(250.0), 250.0);
    }

    #[test]
    fn update_only_changes_given_fields() {
        let transaction = installment();
        let update = TransactionUpdate {
            is_paid: Some(false),
            description: Some("Geladeira nova".to_owned()),
            ..Default::default()
        };

        let merged = transaction.apply_update(&update).unwrap();

        assert!(!merged.is_paid);
        assert_eq!(merged.description, "Geladeira nova");
        assert_eq!(merged.amount, transaction.amount);
        assert_eq!(merged.installment_number, Some(2));
    }

    #[test]
    fn switching_to_avulsa_clears_installments() {
        let transaction = installment();
        let update = TransactionUpdate {
            mode: Some(TransactionMode::Avulsa),
            ..Default::default()
        };

        let merged = transaction.apply_update(&update).unwrap();

        assert_eq!(merged.mode, TransactionMode::Avulsa);
        assert_eq!(merged.installment_number, None);
        assert_eq!(merged.installments_total, None);
    }

    #[test]
    fn switching_to_parcelada_without_installments_fails_on_mode() {
        let mut transaction = installment();
        transaction.mode = TransactionMode::Avulsa;
        transaction.installment_number = None;
        transaction.installments_total = None;
        let update = TransactionUpdate {
            mode: Some(TransactionMode::Parcelada),
            installment_number: Some(1),
            ..Default::default()
        };

        let errors = transaction.apply_update(&update).unwrap_err();

        assert_eq!(errors.issues().len(), 1);
        assert_eq!(errors.issues()[0].path, "mode");
        assert_eq!(errors.issues()[0].message, INSTALLMENTS_REQUIRED);
    }

    #[test]
    fn serializes_with_camel_case_and_iso_dates() {
        let transaction = installment();

        let json = serde_json::to_value(&transaction).unwrap();

        assert_eq!(json["type"], "expense");
        assert_eq!(json["mode"], "parcelada");
        assert_eq!(json["date"], "2024-03-10");
        assert_eq!(json["installmentsTotal"], 10);
        assert_eq!(json["isPaid"], true);
        assert!(json["dueDate"].is_null());
    }
}
