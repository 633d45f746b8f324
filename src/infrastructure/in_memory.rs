use crate::domain::ports::Transport;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A transport that answers every request with the same body.
///
/// Uses `Arc<RwLock<Vec<String>>>` to record the posted bodies so tests can
/// inspect what would have gone over the wire. Clones share the record.
#[derive(Clone)]
pub struct CannedTransport {
    response: Arc<Vec<u8>>,
    requests: Arc<RwLock<Vec<String>>>,
}

impl CannedTransport {
    /// Creates a transport replying with `response`.
    pub fn new(response: impl Into<Vec<u8>>) -> Self {
        Self {
            response: Arc::new(response.into()),
            requests: Arc::default(),
        }
    }

    /// Bodies posted so far, oldest first.
    pub async fn requests(&self) -> Vec<String> {
        self.requests.read().await.clone()
    }
}

#[async_trait]
impl Transport for CannedTransport {
    async fn post(&self, body: String) -> Result<Vec<u8>> {
        let mut requests = self.requests.write().await;
        requests.push(body);
        Ok(self.response.as_ref().clone())
    }
}
