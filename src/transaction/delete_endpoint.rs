use axum::{
    Extension,
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
};

use crate::{
    AppState, Error, auth::UserId, stores::TransactionStore, transaction::TransactionId,
};

/// A route handler for deleting a transaction, responds with 204 No Content.
pub async fn delete_transaction_endpoint(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
    transaction_id: Result<Path<TransactionId>, PathRejection>,
) -> Result<StatusCode, Error> {
    let Path(transaction_id) = transaction_id?;

    let deleted = state
        .store
        .delete_transaction(user_id, transaction_id)
        .inspect_err(|error| {
            tracing::error!("Could not delete transaction {transaction_id}: {error}")
        })?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use time::macros::date;
    use uuid::Uuid;

    use crate::{
        endpoints::{self, format_endpoint},
        stores::TransactionStore,
        test_utils::get_test_app,
        transaction::{NewTransaction, TransactionType},
    };

    #[tokio::test]
    async fn deletes_transaction() {
        let app = get_test_app();
        let category = app.create_category("Lazer", TransactionType::Expense);
        let transaction = app
            .state
            .store
            .create_transaction(
                app.user_id,
                NewTransaction::simple(
                    date!(2025 - 10 - 26),
                    1.23,
                    TransactionType::Expense,
                    category.id,
                    "Test",
                ),
            )
            .unwrap();

        app.delete(&format_endpoint(endpoints::TRANSACTION, transaction.id))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        assert_eq!(
            app.state.store.get_transaction(app.user_id, transaction.id),
            Ok(None)
        );
    }

    #[tokio::test]
    async fn missing_transaction_is_not_found() {
        let app = get_test_app();

        app.delete(&format_endpoint(endpoints::TRANSACTION, Uuid::new_v4()))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn malformed_id_is_not_found() {
        let app = get_test_app();

        app.delete(&format_endpoint(endpoints::TRANSACTION, "abc"))
            .await
            .assert_status_not_found();
    }
}
