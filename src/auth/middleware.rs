//! Middleware that resolves the owning user account from the request headers.
//!
//! Authentication itself (sign in, sessions) is handled by the hosting
//! platform in front of this API. The platform forwards the authenticated
//! account in the [USER_ID_HEADER] header.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::Error;

/// The ID of the user account that owns every entity.
pub type UserId = Uuid;

/// The header that carries the authenticated user's ID.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Middleware function that reads the user ID from the [USER_ID_HEADER] header.
/// The user ID is placed into the request and the request executed normally
/// if the header holds a valid UUID, otherwise a 401 response is returned.
///
/// **Note**: Route handlers can use the function argument `Extension(user_id): Extension<UserId>` to receive the user ID.
pub async fn user_guard(mut request: Request, next: Next) -> Response {
    let user_id = request
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value.trim()).ok());

    let Some(user_id) = user_id else {
        tracing::warn!(
            "Rejected request to {} without a valid {USER_ID_HEADER} header.",
            request.uri()
        );
        return Error::MissingUser.into_response();
    };

    request.extensions_mut().insert::<UserId>(user_id);

    next.run(request).await
}

#[cfg(test)]
mod user_guard_tests {
    use axum::{Extension, Router, http::StatusCode, middleware, routing::get};
    use axum_test::TestServer;
    use uuid::Uuid;

    use crate::auth::{USER_ID_HEADER, UserId, user_guard};

    async fn echo_user(Extension(user_id): Extension<UserId>) -> String {
        user_id.to_string()
    }

    const TEST_PROTECTED_ROUTE: &str = "/api/protected";

    fn get_test_server() -> TestServer {
        let app = Router::new()
            .route(TEST_PROTECTED_ROUTE, get(echo_user))
            .route_layer(middleware::from_fn(user_guard));

        TestServer::try_new(app).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn passes_user_id_to_handler() {
        let server = get_test_server();
        let user_id = Uuid::new_v4();

        let response = server
            .get(TEST_PROTECTED_ROUTE)
            .add_header(USER_ID_HEADER, user_id.to_string())
            .await;

        response.assert_status_ok();
        response.assert_text(user_id.to_string());
    }

    #[tokio::test]
    async fn rejects_missing_header() {
        let server = get_test_server();

        server
            .get(TEST_PROTECTED_ROUTE)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn rejects_malformed_user_id() {
        let server = get_test_server();

        server
            .get(TEST_PROTECTED_ROUTE)
            .add_header(USER_ID_HEADER, "user-1")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
