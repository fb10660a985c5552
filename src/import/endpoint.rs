//! Defines the endpoint for importing transactions from a bank statement.

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;

use crate::{
    AppState, Error,
    auth::UserId,
    card::CardId,
    category::CategoryId,
    family_member::FamilyMemberId,
    import::csv::{StatementRow, parse_statement},
    stores::TransactionStore,
    transaction::{
        NewTransaction, References, Transaction, TransactionMode, TransactionType,
        check_references,
    },
    validation::{self, REQUIRED, ValidationErrors, required},
};

/// The request body for importing a CSV statement.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPayload {
    /// The text of the CSV file.
    pub content: Option<String>,
    /// The category given to every imported transaction.
    pub category_id: Option<String>,
    pub card_id: Option<String>,
    pub family_member_id: Option<String>,
    /// Whether the imported transactions are already settled, defaults to `true`.
    pub is_paid: Option<bool>,
}

/// A validated import request.
#[derive(Debug, Clone, PartialEq)]
struct ImportRequest {
    rows: Vec<StatementRow>,
    category_id: CategoryId,
    card_id: Option<CardId>,
    family_member_id: Option<FamilyMemberId>,
    is_paid: bool,
}

impl ImportPayload {
    fn validate(&self) -> Result<ImportRequest, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let content = required(&mut errors, "content", self.content.as_deref());
        let category_id = required(&mut errors, "categoryId", self.category_id.as_deref())
            .and_then(|id| validation::uuid(&mut errors, "categoryId", id));
        let card_id = self
            .card_id
            .as_deref()
            .and_then(|id| validation::uuid(&mut errors, "cardId", id));
        let family_member_id = self
            .family_member_id
            .as_deref()
            .and_then(|id| validation::uuid(&mut errors, "familyMemberId", id));

        let rows = match content {
            Some(content) if content.trim().is_empty() => {
                errors.add("content", REQUIRED);
                None
            }
            Some(content) => match parse_statement(content) {
                Ok(rows) => Some(rows),
                Err(row_errors) => {
                    for issue in row_errors.issues() {
                        errors.add(issue.path.clone(), issue.message.clone());
                    }
                    None
                }
            },
            None => None,
        };

        match (rows, category_id) {
            (Some(rows), Some(category_id)) if errors.is_empty() => Ok(ImportRequest {
                rows,
                category_id,
                card_id,
                family_member_id,
                is_paid: self.is_paid.unwrap_or(true),
            }),
            _ => Err(errors),
        }
    }
}

impl ImportRequest {
    fn into_transactions(self) -> Vec<NewTransaction> {
        self.rows
            .into_iter()
            .map(|row| {
                let transaction_type = if row.amount < 0.0 {
                    TransactionType::Expense
                } else {
                    TransactionType::Income
                };

                NewTransaction {
                    date: row.date,
                    amount: row.amount.abs(),
                    transaction_type,
                    category_id: self.category_id,
                    description: row.description,
                    mode: TransactionMode::Avulsa,
                    installment_number: None,
                    installments_total: None,
                    card_id: self.card_id,
                    family_member_id: self.family_member_id,
                    due_date: None,
                    is_paid: self.is_paid,
                    is_recurring: false,
                }
            })
            .collect()
    }
}

/// A route handler for importing every row of a CSV statement as a transaction.
///
/// Nothing is stored unless every row is valid. Responds with the created
/// transactions in the order they appear in the statement.
pub async fn import_transactions_endpoint(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
    payload: Result<Json<ImportPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Vec<Transaction>>), Error> {
    let Json(payload) = payload?;
    let request = payload.validate()?;

    check_references(
        state.store.as_ref(),
        user_id,
        References {
            category_id: Some(request.category_id),
            card_id: request.card_id,
            family_member_id: request.family_member_id,
        },
    )?;

    let transactions = state
        .store
        .create_transactions(user_id, request.into_transactions())
        .inspect_err(|error| tracing::error!("could not import transactions: {error}"))?;

    tracing::info!("imported {} transactions", transactions.len());

    Ok((StatusCode::CREATED, Json(transactions)))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};
    use time::macros::date;
    use uuid::Uuid;

    use crate::{
        endpoints,
        stores::TransactionStore,
        test_utils::get_test_app,
        transaction::{Transaction, TransactionMode, TransactionType},
        validation::REQUIRED,
    };

    const STATEMENT: &str = "data;descricao;valor\n\
        05/03/2024;Salário;4.500,00\n\
        06/03/2024;Farmácia;-38,90\n";

    #[tokio::test]
    async fn imports_statement() {
        let app = get_test_app();
        let category = app.create_category("Importado", TransactionType::Expense);
        let card = app.create_card("Nubank");

        let response = app
            .post(endpoints::IMPORT)
            .json(&json!({
                "content": STATEMENT,
                "categoryId": category.id,
                "cardId": card.id,
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let imported: Vec<Transaction> = response.json();
        assert_eq!(imported.len(), 2);
        assert_eq!(imported[0].transaction_type, TransactionType::Income);
        assert_eq!(imported[0].amount, 4500.0);
        assert_eq!(imported[1].transaction_type, TransactionType::Expense);
        assert_eq!(imported[1].amount, 38.9);
        assert_eq!(imported[1].date, date!(2024 - 03 - 06));
        assert!(imported.iter().all(|transaction| {
            transaction.is_paid
                && !transaction.is_recurring
                && transaction.mode == TransactionMode::Avulsa
                && transaction.card_id == Some(card.id)
                && transaction.category_id == category.id
        }));
        assert_eq!(
            app.state
                .store
                .get_all_transactions(app.user_id)
                .unwrap()
                .len(),
            2
        );
    }

    #[tokio::test]
    async fn can_import_as_unpaid() {
        let app = get_test_app();
        let category = app.create_category("Importado", TransactionType::Expense);

        let response = app
            .post(endpoints::IMPORT)
            .json(&json!({
                "content": STATEMENT,
                "categoryId": category.id,
                "isPaid": false,
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let imported: Vec<Transaction> = response.json();
        assert!(imported.iter().all(|transaction| !transaction.is_paid));
    }

    #[tokio::test]
    async fn bad_row_imports_nothing() {
        let app = get_test_app();
        let category = app.create_category("Importado", TransactionType::Expense);

        let response = app
            .post(endpoints::IMPORT)
            .json(&json!({
                "content": "date,description,amount\n2024-03-05,Ok,10\n2024-03-06,Ruim,abc\n",
                "categoryId": category.id,
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["issues"][0]["path"], "content[3]");
        assert!(
            app.state
                .store
                .get_all_transactions(app.user_id)
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn requires_content_and_category() {
        let app = get_test_app();

        let response = app
            .post(endpoints::IMPORT)
            .json(&json!({ "content": "  " }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        let issues = body["issues"].as_array().unwrap();
        assert!(
            issues
                .iter()
                .any(|issue| issue["path"] == "content" && issue["message"] == REQUIRED)
        );
        assert!(
            issues
                .iter()
                .any(|issue| issue["path"] == "categoryId" && issue["message"] == REQUIRED)
        );
    }

    #[tokio::test]
    async fn rejects_unknown_category() {
        let app = get_test_app();

        let response = app
            .post(endpoints::IMPORT)
            .json(&json!({ "content": STATEMENT, "categoryId": Uuid::new_v4() }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["issues"][0]["path"], "categoryId");
    }
}
