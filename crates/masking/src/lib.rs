#![forbid(unsafe_code)]
#![warn(missing_docs)]

//!
//! Wrapper types and traits for secret management. Values wrapped in
//! [`Secret`] are masked when formatted with `Debug` and only serialize
//! when their inner type is explicitly marked [`SerializableSecret`],
//! so gateway credentials and cardholder contact data cannot leak into
//! logs or response bodies by accident.
//!

mod strategy;

pub use strategy::{Strategy, WithType, WithoutType};

mod abs;
pub use abs::{ExposeInterface, ExposeOptionInterface, PeekInterface};

mod secret;
pub use secret::Secret;

mod serde;
pub use crate::serde::{Deserialize, SerializableSecret, Serialize};

/// This module should be included with asterisk.
///
/// `use masking::prelude::*;`
///
pub mod prelude {
    pub use super::{ExposeInterface, ExposeOptionInterface, PeekInterface};
}
