use crate::error::GatewayError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Signature algorithms understood by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SignType {
    /// RSA PKCS#1 v1.5 over SHA-256.
    #[default]
    #[serde(rename = "RSA_1_256")]
    Rsa256,
    /// RSA PKCS#1 v1.5 over SHA-1.
    #[serde(rename = "RSA_1_1")]
    Rsa1,
}

impl SignType {
    /// The identifier written into the `sign_type` field.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rsa256 => "RSA_1_256",
            Self::Rsa1 => "RSA_1_1",
        }
    }
}

impl fmt::Display for SignType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignType {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RSA_1_256" => Ok(Self::Rsa256),
            "RSA_1_1" => Ok(Self::Rsa1),
            other => Err(GatewayError::Config(format!(
                "unsupported sign type `{other}`"
            ))),
        }
    }
}
