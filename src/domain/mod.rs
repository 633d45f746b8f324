//! Domain types for the gateway protocol: parameter sets, signing strings,
//! operations and their required fields, envelopes and reports.

pub mod canonical;
pub mod defaults;
pub mod envelope;
pub mod operation;
pub mod params;
pub mod ports;
pub mod report;
pub mod requirement;
pub mod sign_type;
