//! Route handlers for transaction categories.

use axum::{
    Extension, Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};

use crate::{
    AppState, Error,
    auth::UserId,
    category::{Category, CategoryId, CategoryPayload},
    stores::CategoryStore,
};

/// A route handler for listing the user's categories, sorted by name.
pub async fn get_categories_endpoint(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
) -> Result<Json<Vec<Category>>, Error> {
    state
        .store
        .get_all_categories(user_id)
        .inspect_err(|error| tracing::error!("could not get categories: {error}"))
        .map(Json)
}

/// A route handler for getting a single category.
pub async fn get_category_endpoint(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
    category_id: Result<Path<CategoryId>, PathRejection>,
) -> Result<Json<Category>, Error> {
    let Path(category_id) = category_id?;

    state
        .store
        .get_category(user_id, category_id)?
        .map(Json)
        .ok_or(Error::NotFound)
}

/// A route handler for creating a category.
pub async fn create_category_endpoint(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
    payload: Result<Json<CategoryPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Category>), Error> {
    let Json(payload) = payload?;
    let new_category = payload.validate_new()?;

    let category = state
        .store
        .create_category(user_id, new_category)
        .inspect_err(|error| tracing::error!("could not create category: {error}"))?;

    Ok((StatusCode::CREATED, Json(category)))
}

/// A route handler for updating the fields present in the request body.
pub async fn update_category_endpoint(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
    category_id: Result<Path<CategoryId>, PathRejection>,
    payload: Result<Json<CategoryPayload>, JsonRejection>,
) -> Result<Json<Category>, Error> {
    let Path(category_id) = category_id?;
    let Json(payload) = payload?;
    let update = payload.validate_update()?;

    state
        .store
        .update_category(user_id, category_id, &update)
        .inspect_err(|error| tracing::error!("could not update category {category_id}: {error}"))?
        .map(Json)
        .ok_or(Error::NotFound)
}

/// A route handler for deleting a category.
///
/// Transactions in the category are kept. The dashboard shows them as
/// uncategorized.
pub async fn delete_category_endpoint(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
    category_id: Result<Path<CategoryId>, PathRejection>,
) -> Result<StatusCode, Error> {
    let Path(category_id) = category_id?;

    match state.store.delete_category(user_id, category_id)? {
        true => Ok(StatusCode::NO_CONTENT),
        false => Err(Error::NotFound),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};
    use uuid::Uuid;

    use crate::{
        category::Category,
        endpoints::{self, format_endpoint},
        test_utils::get_test_app,
        transaction::TransactionType,
        validation::{INVALID_COLOR, REQUIRED},
    };

    #[tokio::test]
    async fn create_category() {
        let app = get_test_app();

        let response = app
            .post(endpoints::CATEGORIES)
            .json(&json!({
                "name": "  Alimentação ",
                "type": "expense",
                "color": "#F97316",
                "icon": "utensils",
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let category: Category = response.json();
        assert_eq!(category.name, "Alimentação");
        assert_eq!(category.category_type, TransactionType::Expense);
        assert_eq!(category.icon.as_deref(), Some("utensils"));
        assert_eq!(category.user_id, app.user_id);
    }

    #[tokio::test]
    async fn create_category_reports_invalid_fields() {
        let app = get_test_app();

        let response = app
            .post(endpoints::CATEGORIES)
            .json(&json!({ "type": "expense", "color": "laranja" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "Dados inválidos");
        let issues = body["issues"].as_array().unwrap();
        assert!(
            issues
                .iter()
                .any(|issue| issue["path"] == "name" && issue["message"] == REQUIRED)
        );
        assert!(
            issues
                .iter()
                .any(|issue| issue["path"] == "color" && issue["message"] == INVALID_COLOR)
        );
    }

    #[tokio::test]
    async fn list_categories_sorted_by_name() {
        let app = get_test_app();
        app.create_category("Transporte", TransactionType::Expense);
        app.create_category("Salário", TransactionType::Income);
        app.create_category("Lazer", TransactionType::Expense);

        let categories: Vec<Category> = app.get(endpoints::CATEGORIES).await.json();

        let names: Vec<&str> = categories
            .iter()
            .map(|category| category.name.as_str())
            .collect();
        assert_eq!(names, ["Lazer", "Salário", "Transporte"]);
    }

    #[tokio::test]
    async fn get_update_and_delete_category() {
        let app = get_test_app();
        let category = app.create_category("Lazer", TransactionType::Expense);
        let path = format_endpoint(endpoints::CATEGORY, category.id);

        let got: Category = app.get(&path).await.json();
        assert_eq!(got, category);

        let response = app.put(&path).json(&json!({ "color": "#000000" })).await;
        response.assert_status_ok();
        let updated: Category = response.json();
        assert_eq!(updated.color, "#000000");
        assert_eq!(updated.name, "Lazer");

        app.delete(&path)
            .await
            .assert_status(StatusCode::NO_CONTENT);
        app.get(&path).await.assert_status_not_found();
    }

    #[tokio::test]
    async fn missing_category_is_not_found() {
        let app = get_test_app();
        let path = format_endpoint(endpoints::CATEGORY, Uuid::new_v4());

        app.get(&path).await.assert_status_not_found();
        app.put(&path)
            .json(&json!({ "name": "Outros" }))
            .await
            .assert_status_not_found();
        app.delete(&path).await.assert_status_not_found();
    }
}
