//! Errors surfaced by the connector layer.

/// Custom Result
///
/// Equivalent to `Result<T, error_stack::Report<E>>`, keeping the extra
/// context error-stack attaches along the way.
pub type CustomResult<T, E> = error_stack::Result<T, E>;

/// Failures while preparing or dispatching a vendor request.
///
/// Transport failures and vendor rejections are *not* errors here: they are
/// folded into [`crate::types::PaymentOutcome`] so the caller always gets a
/// normalized result to surface to the shopper.
#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    /// A field the payload cannot be built without was empty or absent.
    #[error("Missing required field: {field_name}")]
    MissingRequiredField {
        /// Name of the missing field.
        field_name: &'static str,
    },
    /// The card expiry did not match the `MM/YY` shape exactly.
    #[error("Invalid card expiry, expected MM/YY")]
    InvalidCardExpiry,
    /// The underlying HTTP client could not be constructed.
    #[error("Failed to construct the HTTP client")]
    ClientConstructionFailed,
}
