//! Defines the endpoint for updating an existing transaction.

use axum::{
    Extension, Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};

use crate::{
    AppState, Error,
    auth::UserId,
    stores::TransactionStore,
    transaction::{
        Transaction, TransactionId, TransactionPayload,
        references::{References, check_references},
    },
};

/// A route handler for updating a transaction, responds with the updated transaction.
///
/// Only the fields present in the request body are changed. The merged
/// transaction must still satisfy the installment rules. A missing
/// transaction is reported before any problem with the request body.
pub async fn edit_transaction_endpoint(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
    transaction_id: Result<Path<TransactionId>, PathRejection>,
    payload: Result<Json<TransactionPayload>, JsonRejection>,
) -> Result<Json<Transaction>, Error> {
    let Path(transaction_id) = transaction_id?;

    if state
        .store
        .get_transaction(user_id, transaction_id)?
        .is_none()
    {
        return Err(Error::NotFound);
    }

    let Json(payload) = payload?;
    let update = payload.validate_update()?;

    check_references(
        state.store.as_ref(),
        user_id,
        References {
            category_id: update.category_id,
            card_id: update.card_id,
            family_member_id: update.family_member_id,
        },
    )?;

    state
        .store
        .update_transaction(user_id, transaction_id, &update)
        .inspect_err(|error| {
            tracing::error!("could not update transaction {transaction_id}: {error}")
        })?
        .map(Json)
        .ok_or(Error::NotFound)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};
    use time::macros::date;
    use uuid::Uuid;

    use crate::{
        endpoints::{self, format_endpoint},
        stores::TransactionStore,
        test_utils::{TestApp, get_test_app},
        transaction::{
            INSTALLMENTS_REQUIRED, NewTransaction, Transaction, TransactionMode, TransactionType,
        },
    };

    fn create_test_transaction(app: &TestApp) -> Transaction {
        let category = app.create_category("Contas", TransactionType::Expense);

        app.state
            .store
            .create_transaction(
                app.user_id,
                NewTransaction::simple(
                    date!(2024 - 05 - 01),
                    89.9,
                    TransactionType::Expense,
                    category.id,
                    "Internet",
                ),
            )
            .unwrap()
    }

    #[tokio::test]
    async fn updates_only_given_fields() {
        let app = get_test_app();
        let transaction = create_test_transaction(&app);

        let response = app
            .put(&format_endpoint(endpoints::TRANSACTION, transaction.id))
            .json(&json!({ "isPaid": false, "description": "Internet fibra" }))
            .await;

        response.assert_status_ok();
        let updated: Transaction = response.json();
        assert!(!updated.is_paid);
        assert_eq!(updated.description, "Internet fibra");
        assert_eq!(updated.amount, transaction.amount);
        assert_eq!(updated.date, transaction.date);
    }

    #[tokio::test]
    async fn switching_to_installments_requires_installment_fields() {
        let app = get_test_app();
        let transaction = create_test_transaction(&app);

        let response = app
            .put(&format_endpoint(endpoints::TRANSACTION, transaction.id))
            .json(&json!({ "mode": "parcelada", "installmentNumber": 1 }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["issues"][0]["path"], "mode");
        assert_eq!(body["issues"][0]["message"], INSTALLMENTS_REQUIRED);
    }

    #[tokio::test]
    async fn can_switch_to_installments() {
        let app = get_test_app();
        let transaction = create_test_transaction(&app);

        let response = app
            .put(&format_endpoint(endpoints::TRANSACTION, transaction.id))
            .json(&json!({
                "mode": "parcelada",
                "installmentNumber": 3,
                "installmentsTotal": 12,
            }))
            .await;

        response.assert_status_ok();
        let updated: Transaction = response.json();
        assert_eq!(updated.mode, TransactionMode::Parcelada);
        assert_eq!(updated.installments_total, Some(12));
    }

    #[tokio::test]
    async fn rejects_unknown_card() {
        let app = get_test_app();
        let transaction = create_test_transaction(&app);

        let response = app
            .put(&format_endpoint(endpoints::TRANSACTION, transaction.id))
            .json(&json!({ "cardId": Uuid::new_v4() }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["issues"][0]["path"], "cardId");
    }

    #[tokio::test]
    async fn missing_transaction_is_not_found() {
        let app = get_test_app();

        app.put(&format_endpoint(endpoints::TRANSACTION, Uuid::new_v4()))
            .json(&json!({ "isPaid": true }))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn missing_transaction_is_not_found_before_checking_references() {
        let app = get_test_app();

        app.put(&format_endpoint(endpoints::TRANSACTION, Uuid::new_v4()))
            .json(&json!({ "cardId": Uuid::new_v4(), "amount": -5 }))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn transaction_of_other_user_is_not_found() {
        let app = get_test_app();
        let transaction = create_test_transaction(&app);

        app.server
            .put(&format_endpoint(endpoints::TRANSACTION, transaction.id))
            .add_header(crate::USER_ID_HEADER, Uuid::new_v4().to_string())
            .json(&json!({ "isPaid": false }))
            .await
            .assert_status_not_found();
    }
}
