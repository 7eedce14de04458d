//! Translation layer between a host commerce order and the Monek checkout
//! API: minor-unit amount conversion, ISO numeric code tables, the payment
//! payload builders for the two vendor integration modes, and the response
//! normalization into a single [`types::PaymentOutcome`] shape.

pub mod amount;
pub mod codes;
pub mod connector;
pub mod consts;
pub mod errors;
pub mod transformers;
pub mod types;

pub use amount::MinorUnit;
pub use connector::{MonekAuthType, MonekClient, MonekPayApi};
pub use errors::{ConnectorError, CustomResult};
