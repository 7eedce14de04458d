//! Protocol constants shared across the connector.

use std::time::Duration;

/// Request timeout for the embedded `/payment` call.
pub const EMBEDDED_PAYMENT_TIMEOUT: Duration = Duration::from_secs(20);

/// Request timeout for the server-completion `/payments` call.
pub const SERVER_COMPLETION_TIMEOUT: Duration = Duration::from_secs(60);

/// Numeric code returned when an alpha currency or country code is not in
/// the lookup tables (GBP / United Kingdom).
pub const DEFAULT_NUMERIC_CODE: &str = "826";

/// Message used when the vendor request never left the box.
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Payment request failed to send";
