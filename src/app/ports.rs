use async_trait::async_trait;

use crate::error::Result;

/// Outbound HTTP used to pull raw catalogues
#[async_trait]
pub trait HttpClientPort: Send + Sync {
    async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<HttpGetResult>;
}

#[derive(Clone, Debug)]
pub struct HttpGetResult {
    pub status: u16,
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl HttpGetResult {
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

/// Create-or-update of a named artifact in a persistent store
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Short label for logs
    fn target(&self) -> &str;

    async fn publish(&self, artifact_name: &str, content: &str) -> Result<()>;
}
