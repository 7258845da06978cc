//! Ledger error model.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::StoreError;

/// Result type used across the ledger.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Error returned by every public ledger operation.
///
/// Each variant carries a human-readable detail. Validation and business-rule
/// failures are raised before any write; `SystemError` is reserved for the
/// store failing underneath an otherwise valid request.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerError {
    #[error("user already exists: {0}")]
    UserAlreadyExists(String),

    #[error("user does not exist: {0}")]
    UserDoesNotExist(String),

    #[error("product already exists: {0}")]
    ProductAlreadyExists(String),

    #[error("product does not exist: {0}")]
    ProductDoesNotExist(String),

    #[error("insufficient stock: {0}")]
    InsufficientStock(String),

    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("age restriction: {0}")]
    AgeRestriction(String),

    #[error("system error: {0}")]
    SystemError(String),
}

impl LedgerError {
    pub fn user_exists(msg: impl Into<String>) -> Self {
        Self::UserAlreadyExists(msg.into())
    }

    pub fn user_missing(msg: impl Into<String>) -> Self {
        Self::UserDoesNotExist(msg.into())
    }

    pub fn product_exists(msg: impl Into<String>) -> Self {
        Self::ProductAlreadyExists(msg.into())
    }

    pub fn product_missing(msg: impl Into<String>) -> Self {
        Self::ProductDoesNotExist(msg.into())
    }

    pub fn insufficient_stock(msg: impl Into<String>) -> Self {
        Self::InsufficientStock(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidPayload(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn age_restriction(msg: impl Into<String>) -> Self {
        Self::AgeRestriction(msg.into())
    }

    pub fn system(msg: impl Into<String>) -> Self {
        Self::SystemError(msg.into())
    }

    /// Stable tag name of the variant (e.g. `"InvalidPayload"`).
    pub fn kind(&self) -> &'static str {
        match self {
            LedgerError::UserAlreadyExists(_) => "UserAlreadyExists",
            LedgerError::UserDoesNotExist(_) => "UserDoesNotExist",
            LedgerError::ProductAlreadyExists(_) => "ProductAlreadyExists",
            LedgerError::ProductDoesNotExist(_) => "ProductDoesNotExist",
            LedgerError::InsufficientStock(_) => "InsufficientStock",
            LedgerError::InvalidPayload(_) => "InvalidPayload",
            LedgerError::Unauthorized(_) => "Unauthorized",
            LedgerError::AgeRestriction(_) => "AgeRestriction",
            LedgerError::SystemError(_) => "SystemError",
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            LedgerError::UserAlreadyExists(msg)
            | LedgerError::UserDoesNotExist(msg)
            | LedgerError::ProductAlreadyExists(msg)
            | LedgerError::ProductDoesNotExist(msg)
            | LedgerError::InsufficientStock(msg)
            | LedgerError::InvalidPayload(msg)
            | LedgerError::Unauthorized(msg)
            | LedgerError::AgeRestriction(msg)
            | LedgerError::SystemError(msg) => msg,
        }
    }

    /// True for failures caused by the store rather than the request.
    pub fn is_system(&self) -> bool {
        matches!(self, LedgerError::SystemError(_))
    }
}

impl From<StoreError> for LedgerError {
    fn from(value: StoreError) -> Self {
        LedgerError::SystemError(value.to_string())
    }
}
