//! Wire and file formats: the gateway's XML envelope and settlement report CSV.

pub mod csv;
pub mod xml;
