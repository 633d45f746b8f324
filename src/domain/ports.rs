use crate::error::Result;
use async_trait::async_trait;

/// Delivers a serialized request to the gateway.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Posts `body` and returns the raw response bytes.
    async fn post(&self, body: String) -> Result<Vec<u8>>;
}

pub type TransportBox = Box<dyn Transport>;
