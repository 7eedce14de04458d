//! Error types for startup and for the REST surface.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;

/// Failures that abort startup. Nothing at request time maps here.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    #[error("Invalid configuration value: {0}")]
    InvalidConfigurationValueError(String),
    #[error("Error while constructing the configuration: {0}")]
    ConfigurationError(#[from] config::ConfigError),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Request-scoped failures, each mapping to one wire error code.
///
/// Responses carry `{ok: false, error: <code>}` plus a human message where
/// one exists, matching what webhook senders and the storefront expect.
#[derive(Clone, Debug, thiserror::Error)]
pub enum ApiErrorResponse {
    #[error("Request body is not a JSON object")]
    InvalidJson,
    #[error("No payment reference found in the webhook body")]
    MissingReference,
    #[error("No order matches")]
    OrderNotFound { reference: Option<String> },
    #[error("An order with this id already exists")]
    DuplicateOrder,
    #[error("Missing required field: {field_name}")]
    MissingRequiredField { field_name: &'static str },
    #[error("Card expiry must be MM/YY")]
    InvalidCardExpiry,
    #[error("{message}")]
    PaymentFailed { message: String },
    #[error("Something went wrong")]
    InternalServerError,
}

impl ApiErrorResponse {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidJson => "invalid_json",
            Self::MissingReference => "missing_reference",
            Self::OrderNotFound { .. } => "order_not_found",
            Self::DuplicateOrder => "duplicate_order",
            Self::MissingRequiredField { .. } => "missing_required_field",
            Self::InvalidCardExpiry => "invalid_card_expiry",
            Self::PaymentFailed { .. } => "payment_failed",
            Self::InternalServerError => "internal_error",
        }
    }
}

impl ResponseError for ApiErrorResponse {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidJson
            | Self::MissingReference
            | Self::MissingRequiredField { .. }
            | Self::InvalidCardExpiry => StatusCode::BAD_REQUEST,
            Self::OrderNotFound { .. } => StatusCode::NOT_FOUND,
            Self::DuplicateOrder => StatusCode::CONFLICT,
            Self::PaymentFailed { .. } => StatusCode::PAYMENT_REQUIRED,
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut body = json!({
            "ok": false,
            "error": self.error_code(),
            "message": self.to_string(),
        });
        if let Self::OrderNotFound {
            reference: Some(reference),
        } = self
        {
            body["reference"] = json!(reference);
        }
        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_and_statuses_line_up() {
        let cases = [
            (ApiErrorResponse::InvalidJson, "invalid_json", 400),
            (ApiErrorResponse::MissingReference, "missing_reference", 400),
            (
                ApiErrorResponse::OrderNotFound { reference: None },
                "order_not_found",
                404,
            ),
            (
                ApiErrorResponse::PaymentFailed {
                    message: "Declined".to_string(),
                },
                "payment_failed",
                402,
            ),
        ];
        for (error, code, status) in cases {
            assert_eq!(error.error_code(), code);
            assert_eq!(error.status_code().as_u16(), status);
        }
    }
}
