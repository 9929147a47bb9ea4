//! Pocketbook is a web app for managing the categories and currencies of your
//! personal finances.
//!
//! This library provides a REST API that directly serves HTML pages. Create,
//! edit and delete pages remember the page the user came from and send them
//! back there once they are done, see [flow](crate::flow) for the details.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod category;
mod currency;
mod database_id;
mod db;
mod endpoints;
mod flash;
pub mod flow;
mod html;
mod internal_server_error;
mod navigation;
mod not_found;
mod preferences;
mod routing;
mod session;
mod timezone;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use category::{CategoryName, create_category};
pub use currency::{CurrencyCode, NewCurrency, create_currency};
pub use db::initialize as initialize_db;
pub use routing::build_router;
pub use timezone::get_local_offset;
pub use transaction::{Transaction, TransactionBuilder, create_transaction};

use crate::{alert::Alert, internal_server_error::InternalServerError, not_found::NotFound};

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
    /// An empty string was used to create a category name.
    #[error("Category name cannot be empty")]
    EmptyCategoryName,

    /// An empty string was used to create a currency code.
    #[error("Currency code cannot be empty")]
    EmptyCurrencyCode,

    /// An empty string was used as the name of a currency.
    #[error("Currency name cannot be empty")]
    EmptyCurrencyName,

    /// The specified category name already exists in the database.
    #[error("the category \"{0}\" already exists in the database")]
    DuplicateCategoryName(String),

    /// The specified currency code already exists in the database.
    #[error("the currency \"{0}\" already exists in the database")]
    DuplicateCurrencyCode(String),

    /// The entity is still referenced by other records, e.g. a currency that
    /// transactions are recorded in, and cannot be deleted.
    #[error("the entity still has dependent records")]
    HasDependents,

    /// A transaction referred to a category or currency that does not exist.
    #[error("the transaction refers to a category or currency that does not exist")]
    InvalidReference,

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// An error occurred while serializing a struct as JSON.
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// Tried to update a category that does not exist.
    #[error("tried to update a category that is not in the database")]
    UpdateMissingCategory,

    /// Tried to delete a category that does not exist.
    #[error("tried to delete a category that is not in the database")]
    DeleteMissingCategory,

    /// Tried to update a currency that does not exist.
    #[error("tried to update a currency that is not in the database")]
    UpdateMissingCurrency,

    /// Tried to delete a currency that does not exist.
    #[error("tried to delete a currency that is not in the database")]
    DeleteMissingCurrency,
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

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFound.into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Render the error as an alert fragment for requests made by HTMX.
    fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                Alert::error(
                    "Not found",
                    "The requested item could not be found. \
                    Try refreshing the page to see if it has been deleted.",
                ),
            ),
            Error::UpdateMissingCategory => (
                StatusCode::NOT_FOUND,
                Alert::error(
                    "Could not update category",
                    "The category could not be found.",
                ),
            ),
            Error::DeleteMissingCategory => (
                StatusCode::NOT_FOUND,
                Alert::error(
                    "Could not delete category",
                    "The category could not be found. \
                    Try refreshing the page to see if the category has already been deleted.",
                ),
            ),
            Error::UpdateMissingCurrency => (
                StatusCode::NOT_FOUND,
                Alert::error(
                    "Could not update currency",
                    "The currency could not be found.",
                ),
            ),
            Error::DeleteMissingCurrency => (
                StatusCode::NOT_FOUND,
                Alert::error(
                    "Could not delete currency",
                    "The currency could not be found. \
                    Try refreshing the page to see if the currency has already been deleted.",
                ),
            ),
            Error::DuplicateCategoryName(name) => (
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Duplicate Category Name",
                    &format!(
                        "The category {name} already exists. \
                        Choose a different name, or edit the existing category.",
                    ),
                ),
            ),
            Error::DuplicateCurrencyCode(code) => (
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Duplicate Currency Code",
                    &format!(
                        "The currency {code} already exists. \
                        Choose a different code, or edit the existing currency.",
                    ),
                ),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::error(
                    "Something went wrong",
                    "An unexpected error occurred, check the server logs for more details.",
                ),
            ),
        };

        (status_code, alert.into_html()).into_response()
    }
}
