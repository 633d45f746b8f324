//! Application layer containing the gateway call pipeline.
//!
//! `SwiftpassClient` is the primary entry point. A call flows through the
//! `RequestBuilder` (defaults, validation, signing), the transport port and
//! the response validator; inbound notifications go through the
//! `NotificationVerifier`.

pub mod builder;
pub mod client;
pub mod notify;
pub mod signer;
pub mod validator;
