use crate::constants::*;
use crate::error::{CatalogueError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub artifacts: ArtifactNames,
    pub encodings: Encodings,
    pub sources: SourcesConfig,
    pub classifier: ClassifierConfig,
    pub publish: PublishConfig,
}

/// Base names of the three published datasets
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ArtifactNames {
    pub slugs: String,
    pub folders: String,
    pub names: String,
}

impl Default for ArtifactNames {
    fn default() -> Self {
        Self {
            slugs: SLUGS_ARTIFACT.to_string(),
            folders: FOLDERS_ARTIFACT.to_string(),
            names: NAMES_ARTIFACT.to_string(),
        }
    }
}

/// File suffixes of the two encodings written per dataset
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Encodings {
    pub pretty: String,
    pub compact: String,
}

impl Default for Encodings {
    fn default() -> Self {
        Self {
            pretty: PRETTY_SUFFIX.to_string(),
            compact: COMPACT_SUFFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub curseforge_url: String,
    pub curseforge_page_size: usize,
    pub tukui_retail_url: String,
    pub tukui_classic_url: String,
    pub wowinterface_url: String,
    pub user_agent: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            curseforge_url: CURSEFORGE_SEARCH_URL.to_string(),
            curseforge_page_size: CURSEFORGE_PAGE_SIZE,
            tukui_retail_url: TUKUI_RETAIL_URL.to_string(),
            tukui_classic_url: TUKUI_CLASSIC_URL.to_string(),
            wowinterface_url: WOWINTERFACE_FILELIST_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub retail_version_prefix: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            retail_version_prefix: RETAIL_VERSION_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishTarget {
    Fs,
    Github,
}

impl std::str::FromStr for PublishTarget {
    type Err = CatalogueError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fs" => Ok(PublishTarget::Fs),
            "github" => Ok(PublishTarget::Github),
            other => Err(CatalogueError::Config(format!("Unknown publish target '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    pub target: PublishTarget,
    pub output_dir: PathBuf,
    pub repository: String,
    pub branch: String,
    pub api_url: String,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            target: PublishTarget::Fs,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            repository: DEFAULT_REPOSITORY.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            api_url: GITHUB_API_URL.to_string(),
        }
    }
}

/// What the pipeline needs to name and encode its artifacts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineConfig {
    pub artifacts: ArtifactNames,
    pub encodings: Encodings,
}

impl Config {
    /// Load `path` if it exists, otherwise start from defaults; env overrides apply either way.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let config_content = fs::read_to_string(path).map_err(|e| {
                CatalogueError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
            })?;
            Self::from_toml(&config_content)?
        } else {
            Self::default()
        };
        config.apply_env()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(target) = std::env::var(PUBLISH_TARGET_ENV) {
            self.publish.target = target.parse()?;
        }
        if let Ok(dir) = std::env::var(OUTPUT_DIR_ENV) {
            if !dir.trim().is_empty() {
                self.publish.output_dir = PathBuf::from(dir);
            }
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.classifier.retail_version_prefix.is_empty() {
            return Err(CatalogueError::Config(
                "classifier.retail_version_prefix must not be empty".into(),
            ));
        }
        if self.encodings.pretty == self.encodings.compact {
            return Err(CatalogueError::Config(
                "encodings.pretty and encodings.compact must differ".into(),
            ));
        }
        if self.sources.curseforge_page_size == 0 {
            return Err(CatalogueError::Config(
                "sources.curseforge_page_size must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn pipeline(&self) -> PipelineConfig {
        PipelineConfig {
            artifacts: self.artifacts.clone(),
            encodings: self.encodings.clone(),
        }
    }

    /// GitHub token, required only when publishing to GitHub
    pub fn github_token() -> Result<String> {
        required_env(GITHUB_TOKEN_ENV)
    }
}

fn required_env(name: &'static str) -> Result<String> {
    std::env::var(name).map_err(|source| CatalogueError::Env { name, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_yields_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.artifacts.slugs, "curseforge-slugs-v2");
        assert_eq!(config.encodings.compact, ".compact.json");
        assert_eq!(config.classifier.retail_version_prefix, "8.");
        assert_eq!(config.publish.target, PublishTarget::Fs);
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = Config::from_toml(
            r#"
            [artifacts]
            names = "combined-names-v3"

            [classifier]
            retail_version_prefix = "9."

            [publish]
            target = "github"
            branch = "published"
            "#,
        )
        .unwrap();
        assert_eq!(config.artifacts.names, "combined-names-v3");
        assert_eq!(config.artifacts.folders, "combined-folders");
        assert_eq!(config.classifier.retail_version_prefix, "9.");
        assert_eq!(config.publish.target, PublishTarget::Github);
        assert_eq!(config.publish.repository, "layday/instascrape");
        assert_eq!(config.publish.branch, "published");
    }

    #[test]
    fn test_rejects_identical_encodings() {
        let err = Config::from_toml(
            r#"
            [encodings]
            pretty = ".json"
            compact = ".json"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogueError::Config(_)));
    }

    #[test]
    fn test_missing_required_env_names_the_variable() {
        let err = required_env("ADDON_CATALOGUE_TEST_NEVER_SET").unwrap_err();
        match err {
            CatalogueError::Env { name, source } => {
                assert_eq!(name, "ADDON_CATALOGUE_TEST_NEVER_SET");
                assert_eq!(source, std::env::VarError::NotPresent);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_publish_target_parses_case_insensitively() {
        assert_eq!("GitHub".parse::<PublishTarget>().unwrap(), PublishTarget::Github);
        assert!("s3".parse::<PublishTarget>().is_err());
    }
}
