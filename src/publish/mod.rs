//! Publishers: create-or-update of named artifacts.

pub mod fs;
pub mod github;

use crate::app::ports::Publisher;
use crate::config::{Config, PublishTarget};
use crate::encode::Artifact;
use crate::error::Result;
use crate::observability::metrics;
use tracing::{info, instrument};

pub use fs::FsPublisher;
pub use github::GithubPublisher;

/// Build the publisher selected by the configuration
pub fn from_config(config: &Config) -> Result<Box<dyn Publisher>> {
    Ok(match config.publish.target {
        PublishTarget::Fs => Box::new(FsPublisher::new(config.publish.output_dir.clone())),
        PublishTarget::Github => Box::new(GithubPublisher::new(
            &config.publish,
            Config::github_token()?,
            &config.sources.user_agent,
        )?),
    })
}

/// Publish artifacts one at a time, stopping at the first failure.
///
/// Returns how many artifacts were published.
#[instrument(skip_all, fields(publisher = publisher.target()))]
pub async fn publish_all(publisher: &dyn Publisher, artifacts: &[Artifact]) -> Result<usize> {
    for artifact in artifacts {
        match publisher.publish(&artifact.name, &artifact.content).await {
            Ok(()) => metrics::publish::artifact_published(&artifact.name, artifact.content.len()),
            Err(e) => {
                metrics::publish::artifact_failed(&artifact.name);
                return Err(e);
            }
        }
    }
    info!("Published {} artifacts", artifacts.len());
    Ok(artifacts.len())
}
