//! HTTP client for the Monek checkout API.
//!
//! Every call resolves to a normalized outcome rather than an error:
//! declines, malformed bodies and transport failures all become a failed
//! [`PaymentOutcome`] the caller can show to the shopper, so the only hard
//! errors out of this module are construction-time ones.

use async_trait::async_trait;
use error_stack::ResultExt;
use masking::{PeekInterface, Secret};

use crate::{
    consts,
    errors::{ConnectorError, CustomResult},
    transformers::{MonekPaymentRequest, MonekPaymentResponse, ServerCompletionRequest},
    types::{PaymentOutcome, ServerCompletionOutcome},
};

/// Credentials for one of the two vendor integration modes.
#[derive(Clone, Debug)]
pub enum MonekAuthType {
    /// Embedded checkout: paired `X-Api-Key` / `X-Secret-Key` headers.
    HeaderKeys {
        api_key: Secret<String>,
        secret_key: Secret<String>,
    },
    /// Server completion: `Authorization: Bearer` with the secret key.
    BearerToken { secret_key: Secret<String> },
}

/// Abstraction over the vendor so payment flows can be exercised against a
/// stub gateway in tests.
#[async_trait]
pub trait MonekPayApi: Send + Sync {
    async fn complete_payment(&self, request: &MonekPaymentRequest) -> PaymentOutcome;

    async fn complete_server_payment(
        &self,
        request: &ServerCompletionRequest,
    ) -> ServerCompletionOutcome;
}

/// Concrete client talking to the live vendor endpoints.
pub struct MonekClient {
    http: reqwest::Client,
    base_url: String,
    auth: MonekAuthType,
}

impl MonekClient {
    pub fn new(base_url: impl Into<String>, auth: MonekAuthType) -> CustomResult<Self, ConnectorError> {
        let http = reqwest::Client::builder()
            .build()
            .change_context(ConnectorError::ClientConstructionFailed)?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth,
        })
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            MonekAuthType::HeaderKeys {
                api_key,
                secret_key,
            } => request
                .header("X-Api-Key", api_key.peek())
                .header("X-Secret-Key", secret_key.peek()),
            MonekAuthType::BearerToken { secret_key } => {
                request.bearer_auth(secret_key.peek())
            }
        }
    }
}

#[async_trait]
impl MonekPayApi for MonekClient {
    async fn complete_payment(&self, request: &MonekPaymentRequest) -> PaymentOutcome {
        let url = format!("{}/payment", self.base_url);
        let call = self
            .authorize(self.http.post(url))
            .timeout(consts::EMBEDDED_PAYMENT_TIMEOUT)
            .json(request)
            .send()
            .await;

        match call {
            Ok(response) => {
                let status = response.status().as_u16();
                let body = response.json::<serde_json::Value>().await.ok();
                map_payment_response(status, body)
            }
            Err(error) => transport_failure_outcome(&error),
        }
    }

    async fn complete_server_payment(
        &self,
        request: &ServerCompletionRequest,
    ) -> ServerCompletionOutcome {
        let url = format!("{}/payments", self.base_url);
        let call = self
            .authorize(self.http.post(url))
            .timeout(consts::SERVER_COMPLETION_TIMEOUT)
            .json(request)
            .send()
            .await;

        match call {
            Ok(response) => {
                let status = response.status().as_u16();
                let body = response.json::<serde_json::Value>().await.ok();
                map_server_completion_response(status, body)
            }
            Err(_) => ServerCompletionOutcome {
                success: false,
                transaction_id: None,
                message: Some(consts::TRANSPORT_FAILURE_MESSAGE.to_string()),
                raw: None,
            },
        }
    }
}

/// Normalizes the embedded `/payment` response body.
///
/// A payment succeeded only when the vendor returned 2xx *and* the body
/// says `result == "Success"`; any other result string, an unparseable
/// body, or an error status is a failure carrying whatever the vendor said
/// back to the caller.
pub fn map_payment_response(status: u16, body: Option<serde_json::Value>) -> PaymentOutcome {
    let parsed = body
        .as_ref()
        .and_then(|value| serde_json::from_value::<MonekPaymentResponse>(value.clone()).ok())
        .unwrap_or_default();

    if !(200..300).contains(&status) {
        return PaymentOutcome {
            success: false,
            message: Some(format!("payment failed ({status})")),
            auth_code: None,
            error_code: parsed.error_code,
            raw: body,
        };
    }

    PaymentOutcome {
        success: parsed.result.as_deref() == Some("Success"),
        message: parsed.message,
        auth_code: parsed.auth_code,
        error_code: parsed.error_code,
        raw: body,
    }
}

/// Response body of the server-completion `/payments` call, tolerating the
/// same PascalCase/camelCase drift as the embedded endpoint.
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServerCompletionResponse {
    #[serde(alias = "TransactionId")]
    transaction_id: Option<String>,
    #[serde(alias = "Message")]
    message: Option<String>,
}

/// Normalizes the server-completion response: the HTTP status carries the
/// verdict, the body only the details.
pub fn map_server_completion_response(
    status: u16,
    body: Option<serde_json::Value>,
) -> ServerCompletionOutcome {
    let parsed = body
        .as_ref()
        .and_then(|value| serde_json::from_value::<ServerCompletionResponse>(value.clone()).ok())
        .unwrap_or_default();

    ServerCompletionOutcome {
        success: (200..300).contains(&status),
        transaction_id: parsed.transaction_id,
        message: parsed.message,
        raw: body,
    }
}

fn transport_failure_outcome(error: &reqwest::Error) -> PaymentOutcome {
    let error_code = if error.is_timeout() {
        "timeout"
    } else if error.is_connect() {
        "connect"
    } else {
        "request"
    };

    PaymentOutcome {
        success: false,
        message: Some(consts::TRANSPORT_FAILURE_MESSAGE.to_string()),
        auth_code: None,
        error_code: Some(error_code.to_string()),
        raw: None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn approved_payment_maps_to_success_with_auth_code() {
        let outcome = map_payment_response(
            200,
            Some(json!({"Result": "Success", "AuthCode": "00112", "Message": "Approved"})),
        );
        assert!(outcome.success);
        assert_eq!(outcome.auth_code.as_deref(), Some("00112"));
        assert_eq!(outcome.message.as_deref(), Some("Approved"));
        assert!(outcome.error_code.is_none());
    }

    #[test]
    fn declined_payment_maps_to_failure_with_error_code() {
        let outcome = map_payment_response(
            200,
            Some(json!({"result": "Declined", "errorCode": "51", "message": "Insufficient funds"})),
        );
        assert!(!outcome.success);
        assert_eq!(outcome.error_code.as_deref(), Some("51"));
        assert_eq!(outcome.message.as_deref(), Some("Insufficient funds"));
    }

    #[test]
    fn error_status_reports_the_status_and_keeps_body_error_code() {
        let outcome = map_payment_response(
            502,
            Some(json!({"Result": "Success", "ErrorCode": "upstream"})),
        );
        assert!(!outcome.success);
        assert_eq!(outcome.message.as_deref(), Some("payment failed (502)"));
        assert_eq!(outcome.error_code.as_deref(), Some("upstream"));
    }

    #[test]
    fn unparseable_body_is_a_failure_but_kept_raw() {
        let outcome = map_payment_response(200, Some(json!("gateway offline")));
        assert!(!outcome.success);
        assert_eq!(outcome.raw, Some(json!("gateway offline")));
    }

    #[test]
    fn missing_body_is_a_failure() {
        let outcome = map_payment_response(200, None);
        assert!(!outcome.success);
        assert!(outcome.message.is_none());
    }

    #[test]
    fn unknown_result_strings_are_failures() {
        for result in ["success", "SUCCESS", "Pending", "Unknown"] {
            let outcome = map_payment_response(200, Some(json!({"Result": result})));
            assert!(!outcome.success, "{result:?} must not be treated as approval");
        }
    }

    #[test]
    fn server_completion_verdict_follows_http_status() {
        let approved = map_server_completion_response(
            200,
            Some(json!({"transactionId": "txn_9", "message": "Completed"})),
        );
        assert!(approved.success);
        assert_eq!(approved.transaction_id.as_deref(), Some("txn_9"));

        let rejected =
            map_server_completion_response(422, Some(json!({"Message": "Invalid token"})));
        assert!(!rejected.success);
        assert_eq!(rejected.message.as_deref(), Some("Invalid token"));
    }
}
