//! Transport implementations: the reqwest-backed gateway connection and an
//! in-memory stand-in for tests.

pub mod http;
pub mod in_memory;
