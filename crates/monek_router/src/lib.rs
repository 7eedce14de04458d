//! Checkout completion and webhook service for the Monek gateway.
//!
//! The host commerce system pushes order snapshots in, the storefront posts
//! checkout completions, and the vendor posts asynchronous webhooks; this
//! service bridges the three, delegating payload construction and response
//! normalization to `monek_connector`.

pub mod configs;
pub mod consts;
pub mod core;
pub mod db;
pub mod errors;
pub mod logger;
pub mod routes;
pub mod types;

pub use self::{configs::settings::Settings, routes::app::AppState};
