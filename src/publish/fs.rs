use crate::app::ports::Publisher;
use crate::error::{CatalogueError, Result};
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Writes artifacts as files under one directory
pub struct FsPublisher {
    root: PathBuf,
}

impl FsPublisher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, artifact_name: &str) -> Result<PathBuf> {
        let relative = Path::new(artifact_name);
        if relative.is_absolute() || relative.components().any(|c| matches!(c, std::path::Component::ParentDir)) {
            return Err(CatalogueError::Publish {
                artifact: artifact_name.to_string(),
                message: "artifact name must stay inside the output directory".into(),
            });
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl Publisher for FsPublisher {
    fn target(&self) -> &str {
        "fs"
    }

    #[instrument(skip(self, content))]
    async fn publish(&self, artifact_name: &str, content: &str) -> Result<()> {
        let path = self.path_for(artifact_name)?;
        let digest = sha256_hex(content.as_bytes());

        if let Ok(existing) = fs::read(&path) {
            if sha256_hex(&existing) == digest {
                debug!("{} unchanged (sha256 {}), skipping write", artifact_name, &digest[..12]);
                return Ok(());
            }
        }

        let failed = |e: std::io::Error| CatalogueError::Publish {
            artifact: artifact_name.to_string(),
            message: e.to_string(),
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(failed)?;
        }
        fs::write(&path, content).map_err(failed)?;
        info!("Wrote {} ({} bytes, sha256 {})", path.display(), content.len(), &digest[..12]);
        Ok(())
    }
}
