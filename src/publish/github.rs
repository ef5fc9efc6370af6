use crate::app::ports::Publisher;
use crate::config::PublishConfig;
use crate::error::{CatalogueError, Result};
use async_trait::async_trait;
use base64::Engine;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Body of a contents API create/update request
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PutContents {
    pub message: String,
    pub content: String,
    pub branch: String,
    /// Blob sha of the file being replaced; omitted on create
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentsEntry {
    sha: String,
}

/// Commits artifacts to a branch through the GitHub contents API
pub struct GithubPublisher {
    client: reqwest::Client,
    api_url: String,
    repository: String,
    branch: String,
    token: String,
}

impl GithubPublisher {
    pub fn new(config: &PublishConfig, token: String, user_agent: &str) -> Result<Self> {
        if !config.repository.contains('/') {
            return Err(CatalogueError::Config(format!(
                "publish.repository must look like 'owner/name', got '{}'",
                config.repository
            )));
        }
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            repository: config.repository.clone(),
            branch: config.branch.clone(),
            token,
        })
    }

    pub fn contents_url(&self, artifact_name: &str) -> String {
        format!("{}/repos/{}/contents/{}", self.api_url, self.repository, artifact_name)
    }

    pub fn put_body(&self, artifact_name: &str, content: &str, sha: Option<String>) -> PutContents {
        PutContents {
            message: format!("Update {}", artifact_name),
            content: base64::engine::general_purpose::STANDARD.encode(content.as_bytes()),
            branch: self.branch.clone(),
            sha,
        }
    }

    fn publish_error(artifact_name: &str, message: impl Into<String>) -> CatalogueError {
        CatalogueError::Publish {
            artifact: artifact_name.to_string(),
            message: message.into(),
        }
    }

    /// Blob sha of the artifact on the target branch, `None` if it does not exist yet
    async fn existing_sha(&self, artifact_name: &str) -> Result<Option<String>> {
        let resp = self
            .client
            .get(self.contents_url(artifact_name))
            .query(&[("ref", self.branch.as_str())])
            .header(AUTHORIZATION, format!("token {}", self.token))
            .header(ACCEPT, "application/vnd.github.v3+json")
            .send()
            .await?;

        match resp.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let entry: ContentsEntry = resp.json().await?;
                Ok(Some(entry.sha))
            }
            status => Err(Self::publish_error(
                artifact_name,
                format!("lookup responded with status {}", status.as_u16()),
            )),
        }
    }
}

#[async_trait]
impl Publisher for GithubPublisher {
    fn target(&self) -> &str {
        "github"
    }

    #[instrument(skip(self, content), fields(repository = %self.repository, branch = %self.branch))]
    async fn publish(&self, artifact_name: &str, content: &str) -> Result<()> {
        let sha = self.existing_sha(artifact_name).await?;
        let creating = sha.is_none();
        debug!("{} {}", if creating { "Creating" } else { "Updating" }, artifact_name);

        let resp = self
            .client
            .put(self.contents_url(artifact_name))
            .header(AUTHORIZATION, format!("token {}", self.token))
            .header(ACCEPT, "application/vnd.github.v3+json")
            .json(&self.put_body(artifact_name, content, sha))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Self::publish_error(
                artifact_name,
                format!("update responded with status {}: {}", status.as_u16(), body),
            ));
        }
        info!(
            "{} {} on {}@{}",
            if creating { "Created" } else { "Updated" },
            artifact_name,
            self.repository,
            self.branch
        );
        Ok(())
    }
}
