//! Errors surfaced to GraphQL clients
//!
//! Every variant carries a stable `code` extension so clients can branch on
//! the failure kind without parsing messages.

use async_graphql::ErrorExtensions;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{entity} with id {id} does not exist")]
    NotFound { entity: &'static str, id: String },

    #[error("More than one {entity} matches the lookup")]
    MultipleObjectsReturned { entity: &'static str },

    #[error("Invalid {entity} ID: {value}")]
    InvalidId { entity: &'static str, value: String },

    #[error(transparent)]
    Database(#[from] anyhow::Error),
}

impl ApiError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::MultipleObjectsReturned { .. } => "MULTIPLE_OBJECTS_RETURNED",
            Self::InvalidId { .. } => "BAD_USER_INPUT",
            Self::Database(_) => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        if let Self::Database(e) = self {
            tracing::error!(error = ?e, "Database operation failed");
        }
        let code = self.code();
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", code))
    }
}

/// Convert store results into GraphQL results, tagging failures with a code.
pub trait ApiResultExt<T> {
    fn api_err(self) -> async_graphql::Result<T>;
}

impl<T> ApiResultExt<T> for anyhow::Result<T> {
    fn api_err(self) -> async_graphql::Result<T> {
        self.map_err(|e| ApiError::Database(e).extend())
    }
}

impl<T> ApiResultExt<T> for Result<T, ApiError> {
    fn api_err(self) -> async_graphql::Result<T> {
        self.map_err(|e| e.extend())
    }
}
