//! The JSON body accepted when creating or updating a transaction.

use serde::Deserialize;

use crate::{
    transaction::core::{
        NewTransaction, TransactionMode, TransactionType, TransactionUpdate, check_installments,
    },
    validation::{self, ValidationErrors, required},
};

const INVALID_AMOUNT: &str = "O valor deve ser maior que zero";
const INVALID_TYPE: &str = "Tipo deve ser 'income' ou 'expense'";
const INVALID_MODE: &str = "Modo deve ser 'avulsa' ou 'parcelada'";
const INVALID_DESCRIPTION: &str = "Descrição deve ter entre 1 e 200 caracteres";
const INVALID_INSTALLMENT: &str = "Parcela deve ser um número inteiro maior que zero";

/// The unvalidated fields of a transaction as sent by a client.
///
/// The same payload is used for creating and updating transactions. Use
/// [TransactionPayload::validate_new] or [TransactionPayload::validate_update]
/// to turn it into a typed value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPayload {
    pub date: Option<String>,
    pub amount: Option<f64>,
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    pub category_id: Option<String>,
    pub description: Option<String>,
    pub mode: Option<String>,
    pub installment_number: Option<i64>,
    pub installments_total: Option<i64>,
    pub card_id: Option<String>,
    pub family_member_id: Option<String>,
    pub due_date: Option<String>,
    pub is_paid: Option<bool>,
    pub is_recurring: Option<bool>,
}

impl TransactionPayload {
    /// Validate the payload as a new transaction, all required fields must be present.
    ///
    /// # Errors
    /// Returns every field that is missing or invalid. An installment
    /// transaction without both installment fields fails on `mode`.
    pub fn validate_new(&self) -> Result<NewTransaction, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let fields = self.parse_fields(&mut errors);

        let date = required(&mut errors, "date", self.date.as_ref()).and(fields.date);
        let amount = required(&mut errors, "amount", self.amount).and(fields.amount);
        let transaction_type = required(&mut errors, "type", self.transaction_type.as_ref())
            .and(fields.transaction_type);
        let category_id =
            required(&mut errors, "categoryId", self.category_id.as_ref()).and(fields.category_id);
        let description =
            required(&mut errors, "description", self.description.as_ref()).and(fields.description);
        let mode = required(&mut errors, "mode", self.mode.as_ref()).and(fields.mode);

        check_installments(
            &mut errors,
            mode,
            fields.installment_number,
            fields.installments_total,
        );

        match (
            date,
            amount,
            transaction_type,
            category_id,
            description,
            mode,
        ) {
            (
                Some(date),
                Some(amount),
                Some(transaction_type),
                Some(category_id),
                Some(description),
                Some(mode),
            ) if errors.is_empty() => {
                let (installment_number, installments_total) = match mode {
                    TransactionMode::Avulsa => (None, None),
                    TransactionMode::Parcelada => {
                        (fields.installment_number, fields.installments_total)
                    }
                };

                Ok(NewTransaction {
                    date,
                    amount,
                    transaction_type,
                    category_id,
                    description,
                    mode,
                    installment_number,
                    installments_total,
                    card_id: fields.card_id,
                    family_member_id: fields.family_member_id,
                    due_date: fields.due_date,
                    is_paid: self.is_paid.unwrap_or(false),
                    is_recurring: self.is_recurring.unwrap_or(false),
                })
            }
            _ => Err(errors),
        }
    }

    /// Validate the payload as a partial update, every field is optional.
    ///
    /// # Errors
    /// Returns every field that is present but invalid. Setting the mode to
    /// `parcelada` without both installment fields fails on `mode`.
    pub fn validate_update(&self) -> Result<TransactionUpdate, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let fields = self.parse_fields(&mut errors);

        check_installments(
            &mut errors,
            fields.mode,
            fields.installment_number,
            fields.installments_total,
        );

        errors.into_result(|| TransactionUpdate {
            date: fields.date,
            amount: fields.amount,
            transaction_type: fields.transaction_type,
            category_id: fields.category_id,
            description: fields.description,
            mode: fields.mode,
            installment_number: fields.installment_number,
            installments_total: fields.installments_total,
            card_id: fields.card_id,
            family_member_id: fields.family_member_id,
            due_date: fields.due_date,
            is_paid: self.is_paid,
            is_recurring: self.is_recurring,
        })
    }

    /// Check the format of every field that is present.
    fn parse_fields(&self, errors: &mut ValidationErrors) -> TransactionUpdate {
        TransactionUpdate {
            date: self
                .date
                .as_deref()
                .and_then(|date| validation::date(errors, "date", date)),
            amount: self.amount.and_then(|amount| {
                validation::positive_amount(errors, "amount", amount, INVALID_AMOUNT)
            }),
            transaction_type: self.transaction_type.as_deref().and_then(|value| {
                validation::one_of::<TransactionType>(errors, "type", value, INVALID_TYPE)
            }),
            category_id: self
                .category_id
                .as_deref()
                .and_then(|id| validation::uuid(errors, "categoryId", id)),
            description: self.description.as_deref().and_then(|description| {
                validation::text(
                    errors,
                    "description",
                    description,
                    1,
                    200,
                    INVALID_DESCRIPTION,
                )
            }),
            mode: self.mode.as_deref().and_then(|value| {
                validation::one_of::<TransactionMode>(errors, "mode", value, INVALID_MODE)
            }),
            installment_number: self
                .installment_number
                .and_then(|number| installment(errors, "installmentNumber", number)),
            installments_total: self
                .installments_total
                .and_then(|total| installment(errors, "installmentsTotal", total)),
            card_id: self
                .card_id
                .as_deref()
                .and_then(|id| validation::uuid(errors, "cardId", id)),
            family_member_id: self
                .family_member_id
                .as_deref()
                .and_then(|id| validation::uuid(errors, "familyMemberId", id)),
            due_date: self
                .due_date
                .as_deref()
                .and_then(|date| validation::date(errors, "dueDate", date)),
            is_paid: self.is_paid,
            is_recurring: self.is_recurring,
        }
    }
}

fn installment(errors: &mut ValidationErrors, path: &str, value: i64) -> Option<u32> {
    match u32::try_from(value) {
        Ok(value) if value >= 1 => Some(value),
        _ => {
            errors.add(path, INVALID_INSTALLMENT);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;
    use uuid::Uuid;

    use crate::{
        transaction::{
            INSTALLMENT_OUT_OF_RANGE, INSTALLMENTS_REQUIRED, TransactionMode, TransactionPayload,
            TransactionType,
        },
        validation::REQUIRED,
    };

    fn valid_payload() -> TransactionPayload {
        TransactionPayload {
            date: Some("2024-05-01".to_owned()),
            amount: Some(1200.0),
            transaction_type: Some("income".to_owned()),
            category_id: Some(Uuid::new_v4().to_string()),
            description: Some("Salário".to_owned()),
            mode: Some("avulsa".to_owned()),
            ..Default::default()
        }
    }

    #[test]
    fn valid_payload_creates_transaction_with_defaults() {
        let new = valid_payload().validate_new().unwrap();

        assert_eq!(new.date, date!(2024 - 05 - 01));
        assert_eq!(new.amount, 1200.0);
        assert_eq!(new.transaction_type, TransactionType::Income);
        assert_eq!(new.mode, TransactionMode::Avulsa);
        assert!(!new.is_paid);
        assert!(!new.is_recurring);
    }

    #[test]
    fn missing_fields_are_all_reported() {
        let errors = TransactionPayload::default().validate_new().unwrap_err();

        for path in ["date", "amount", "type", "categoryId", "description", "mode"] {
            assert!(errors.has_issue_for(path), "want an issue for {path}");
        }
        assert!(errors.issues().iter().all(|issue| issue.message == REQUIRED));
    }

    #[test]
    fn parcelada_without_installments_total_fails_on_mode() {
        let payload = TransactionPayload {
            mode: Some("parcelada".to_owned()),
            installment_number: Some(1),
            ..valid_payload()
        };

        let errors = payload.validate_new().unwrap_err();

        assert_eq!(errors.issues().len(), 1);
        assert_eq!(errors.issues()[0].path, "mode");
        assert_eq!(errors.issues()[0].message, INSTALLMENTS_REQUIRED);
    }

    #[test]
    fn parcelada_with_installments_is_valid() {
        let payload = TransactionPayload {
            mode: Some("parcelada".to_owned()),
            installment_number: Some(3),
            installments_total: Some(12),
            ..valid_payload()
        };

        let new = payload.validate_new().unwrap();

        assert_eq!(new.installment_number, Some(3));
        assert_eq!(new.installments_total, Some(12));
    }

    #[test]
    fn installment_number_cannot_exceed_total() {
        let payload = TransactionPayload {
            mode: Some("parcelada".to_owned()),
            installment_number: Some(13),
            installments_total: Some(12),
            ..valid_payload()
        };

        let errors = payload.validate_new().unwrap_err();

        assert_eq!(errors.issues()[0].path, "installmentNumber");
        assert_eq!(errors.issues()[0].message, INSTALLMENT_OUT_OF_RANGE);
    }

    #[test]
    fn avulsa_ignores_installment_range() {
        let payload = TransactionPayload {
            installment_number: Some(5),
            installments_total: Some(2),
            ..valid_payload()
        };

        let new = payload.validate_new().unwrap();

        assert_eq!(new.mode, TransactionMode::Avulsa);
        assert_eq!(new.installment_number, None);
        assert_eq!(new.installments_total, None);
    }

    #[test]
    fn avulsa_drops_installment_fields() {
        let payload = TransactionPayload {
            installment_number: Some(1),
            installments_total: Some(2),
            ..valid_payload()
        };

        let new = payload.validate_new().unwrap();

        assert_eq!(new.installment_number, None);
        assert_eq!(new.installments_total, None);
    }

    #[test]
    fn rejects_bad_formats() {
        let payload = TransactionPayload {
            amount: Some(0.0),
            transaction_type: Some("transfer".to_owned()),
            category_id: Some("abc".to_owned()),
            due_date: Some("01/02/2024".to_owned()),
            ..valid_payload()
        };

        let errors = payload.validate_new().unwrap_err();

        assert!(errors.has_issue_for("amount"));
        assert!(errors.has_issue_for("type"));
        assert!(errors.has_issue_for("categoryId"));
        assert!(errors.has_issue_for("dueDate"));
    }

    #[test]
    fn empty_update_is_valid() {
        let update = TransactionPayload::default().validate_update().unwrap();

        assert_eq!(update, Default::default());
    }

    #[test]
    fn update_setting_parcelada_requires_installments() {
        let payload = TransactionPayload {
            mode: Some("parcelada".to_owned()),
            ..Default::default()
        };

        let errors = payload.validate_update().unwrap_err();

        assert!(errors.has_issue_for("mode"));
    }

    #[test]
    fn deserializes_camel_case_json() {
        let payload: TransactionPayload = serde_json::from_str(
            r#"{"date": "2024-01-02", "amount": 10.5, "type": "expense", "isPaid": true, "installmentsTotal": 3}"#,
        )
        .unwrap();

        assert_eq!(payload.transaction_type.as_deref(), Some("expense"));
        assert_eq!(payload.is_paid, Some(true));
        assert_eq!(payload.installments_total, Some(3));
    }
}
