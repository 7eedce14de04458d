//! Order metadata keys and fixed copy used across the service.

/// Client-generated correlation id a later webhook is matched against.
pub const META_PAYMENT_REFERENCE: &str = "_monek_payment_reference";

/// SDK session captured at checkout submission.
pub const META_SESSION_ID: &str = "_monek_session_id";

/// Card token captured by the SDK, persisted once the charge succeeds.
pub const META_TOKEN: &str = "_monek_token";

/// Raw vendor response of the completing payment call, kept for audit.
pub const META_PAYMENT_RESULT: &str = "_monek_payment_result";

/// Raw body of the most recent webhook delivery, kept for audit.
pub const META_LAST_WEBHOOK: &str = "_monek_last_webhook";

/// Per-order idempotency key for the server-completion flow, minted once
/// and reused on retries of the same order.
pub const META_IDEMPOTENCY_KEY: &str = "_monek_idempotency_key";

/// Fallback shown to the shopper when the vendor declined without a message.
pub const GENERIC_DECLINE_MESSAGE: &str = "Payment was not successful. Please try again.";
