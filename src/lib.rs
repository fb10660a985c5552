//! A personal and family finance tracker.
//!
//! This library provides a JSON REST API for recording income and expense
//! transactions, organising them by category, credit card and family member,
//! importing bank statements and computing balance summaries.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde::Serialize;
use tokio::signal;

mod app_state;
mod auth;
mod card;
mod category;
mod dashboard;
mod dates;
mod endpoints;
mod family_member;
mod import;
mod logging;
mod not_found;
mod routing;
mod stores;
mod summary;
#[cfg(test)]
mod test_utils;
mod transaction;
mod validation;

pub use app_state::AppState;
pub use auth::{USER_ID_HEADER, UserId};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use stores::{MemStorage, SQLiteStore, Storage, initialize as initialize_db};
pub use summary::{DualRunningBalances, Summary, calculate_dual_running_balances, calculate_summary};
pub use transaction::{Transaction, TransactionMode, TransactionType};
pub use validation::{ValidationErrors, ValidationIssue};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// One or more fields of a request body failed validation.
    ///
    /// The issues are user-facing and are returned to the client as-is.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// The request body could not be parsed as JSON of the expected shape.
    #[error("could not parse the request body: {0}")]
    InvalidJson(String),

    /// The query string could not be parsed into the expected parameters.
    #[error("could not parse the query string: {0}")]
    InvalidQuery(String),

    /// The request did not identify the user account it acts on.
    #[error("missing or invalid user ID")]
    MissingUser,

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// A value read from the database could not be converted to a domain type.
    #[error("corrupt value in the database: {0}")]
    CorruptData(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<ValidationErrors> for Error {
    fn from(value: ValidationErrors) -> Self {
        Error::Validation(value)
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidJson(rejection.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::InvalidQuery(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    // An ID that is not a valid UUID can never match a stored resource.
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("rejected path parameter: {}", rejection.body_text());
        Error::NotFound
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

/// The JSON body sent to clients when a request fails.
#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "<[ValidationIssue]>::is_empty")]
    issues: &'a [ValidationIssue],
}

fn render_error(status: StatusCode, message: &str, issues: &[ValidationIssue]) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message,
            issues,
        }),
    )
        .into_response()
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::Validation(errors) => render_error(
                StatusCode::BAD_REQUEST,
                "Dados inválidos",
                errors.issues(),
            ),
            Error::InvalidJson(reason) => render_error(
                StatusCode::BAD_REQUEST,
                &format!("Corpo da requisição inválido: {reason}"),
                &[],
            ),
            Error::InvalidQuery(reason) => render_error(
                StatusCode::BAD_REQUEST,
                &format!("Parâmetros de consulta inválidos: {reason}"),
                &[],
            ),
            Error::MissingUser => render_error(
                StatusCode::UNAUTHORIZED,
                "Usuário não identificado",
                &[],
            ),
            Error::NotFound => not_found::get_404_not_found_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                render_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Erro interno do servidor",
                    &[],
                )
            }
        }
    }
}
