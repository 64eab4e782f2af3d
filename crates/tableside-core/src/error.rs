//! # Error Types
//!
//! Domain-specific error types for tableside-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tableside-core errors (this file)                                     │
//! │  ├── CoreError        - Lifecycle/order/catalog rule violations        │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  tableside-db errors (separate crate)                                  │
//! │  └── DbError          - Database operation failures → CoreError       │
//! │                                                                         │
//! │  HTTP errors (apps/api)                                                │
//! │  └── ApiError         - Status code + JSON body                        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Client                 │
//! │        DbError ─────────┘                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The messages of the lifecycle and order variants are part of the API
//! contract; clients match on them.

use thiserror::Error;

// =============================================================================
// Error Kind
// =============================================================================

/// Coarse classification used by adapters to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or out-of-range input (400).
    Validation,
    /// A referenced entity does not exist (404).
    NotFound,
    /// A state invariant would be violated (409).
    Conflict,
    /// Unexpected failure, e.g. storage unavailable (500).
    Internal,
}

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The table referenced by an open request does not exist.
    #[error("table not found")]
    TableNotFound,

    /// The table already has a session with no `closed_at`.
    ///
    /// ## User Workflow
    /// ```text
    /// Waiter taps "Open table 4"
    ///      │
    ///      ▼
    /// Latest session for table 4: closed_at = null
    ///      │
    ///      ▼
    /// TableAlreadyOpen → 409 "this table has already been opened"
    /// ```
    #[error("this table has already been opened")]
    TableAlreadyOpen,

    /// No session with the given id.
    #[error("session table not found")]
    SessionNotFound,

    /// Close was requested for a session that is already closed.
    #[error("this session table has already been closed")]
    SessionAlreadyClosed,

    /// An order was placed against a closed session.
    #[error("this table is closed")]
    SessionClosed,

    /// The product referenced by an order does not exist.
    #[error("product not found")]
    OrderedProductNotFound,

    /// Product maintenance on a product that does not exist.
    #[error("Product not found")]
    ProductNotFound,

    /// Delete requested for a product that historical orders point at.
    #[error("product is referenced by existing orders")]
    ProductInUse,

    /// Validation error (wraps ValidationError).
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Storage failed in a way the domain cannot interpret.
    ///
    /// The detail is for logs only; adapters must not echo it to clients.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl CoreError {
    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::Validation(_) => ErrorKind::Validation,
            CoreError::TableNotFound
            | CoreError::SessionNotFound
            | CoreError::OrderedProductNotFound
            | CoreError::ProductNotFound => ErrorKind::NotFound,
            CoreError::TableAlreadyOpen
            | CoreError::SessionAlreadyClosed
            | CoreError::SessionClosed
            | CoreError::ProductInUse => ErrorKind::Conflict,
            CoreError::Storage(_) => ErrorKind::Internal,
        }
    }

    /// Creates a storage error from anything displayable.
    pub fn storage(detail: impl std::fmt::Display) -> Self {
        CoreError::Storage(detail.to_string())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when request input doesn't meet requirements.
/// They are raised before any storage access.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., non-numeric id, too many decimals).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub(crate) fn must_be_positive(field: &str) -> Self {
        ValidationError::MustBePositive {
            field: field.to_string(),
        }
    }

    pub(crate) fn invalid_format(field: &str, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_messages_are_stable() {
        assert_eq!(
            CoreError::TableAlreadyOpen.to_string(),
            "this table has already been opened"
        );
        assert_eq!(
            CoreError::SessionAlreadyClosed.to_string(),
            "this session table has already been closed"
        );
        assert_eq!(CoreError::SessionNotFound.to_string(), "session table not found");
        assert_eq!(CoreError::SessionClosed.to_string(), "this table is closed");
        assert_eq!(CoreError::OrderedProductNotFound.to_string(), "product not found");
        assert_eq!(CoreError::ProductNotFound.to_string(), "Product not found");
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(CoreError::TableAlreadyOpen.kind(), ErrorKind::Conflict);
        assert_eq!(CoreError::SessionClosed.kind(), ErrorKind::Conflict);
        assert_eq!(CoreError::SessionNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(CoreError::ProductInUse.kind(), ErrorKind::Conflict);
        assert_eq!(CoreError::storage("disk full").kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::TooShort {
            field: "name".to_string(),
            min: 6,
        };
        assert_eq!(err.to_string(), "name must be at least 6 characters");

        let err = ValidationError::must_be_positive("quantity");
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::must_be_positive("price").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.kind(), ErrorKind::Validation);
        assert_eq!(core_err.to_string(), "price must be positive");
    }
}
