use crate::apis::{fetch_json_array, RawAddonRecord};
use crate::app::ports::HttpClientPort;
use crate::config::SourcesConfig;
use crate::constants::CURSEFORGE_NAME;
use crate::error::{CatalogueError, Result};
use serde::Deserialize;
use tracing::{debug, info, instrument};

/// CurseForge project as returned by the addon search endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurseForgeAddon {
    pub id: u64,
    pub name: String,
    pub slug: String,
    pub latest_files: Vec<CurseForgeFile>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurseForgeFile {
    pub project_id: u64,
    pub game_version: Vec<String>,
    // Required key, nullable value
    #[serde(deserialize_with = "Option::deserialize")]
    pub game_version_flavor: Option<String>,
    #[serde(deserialize_with = "Option::deserialize")]
    pub expose_as_alternative: Option<bool>,
    pub modules: Vec<CurseForgeModule>,
}

impl CurseForgeFile {
    /// Alternative uploads are library-less variants of another file, not standalone installs
    pub fn is_alternative(&self) -> bool {
        self.expose_as_alternative.unwrap_or(false)
    }

    pub fn folder_names(&self) -> Vec<String> {
        self.modules.iter().map(|m| m.foldername.clone()).collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurseForgeModule {
    pub foldername: String,
}

impl CurseForgeAddon {
    pub fn from_raw(raw: &RawAddonRecord) -> Result<Self> {
        Self::deserialize(raw).map_err(|e| CatalogueError::missing_field(CURSEFORGE_NAME, e))
    }
}

/// Paged client for the CurseForge addon search
pub struct CurseForgeApi {
    search_url: String,
    page_size: usize,
}

impl CurseForgeApi {
    pub fn new(search_url: impl Into<String>, page_size: usize) -> Self {
        Self {
            search_url: search_url.into(),
            page_size: page_size.max(1),
        }
    }

    pub fn from_config(sources: &SourcesConfig) -> Self {
        Self::new(sources.curseforge_url.clone(), sources.curseforge_page_size)
    }

    /// Walk the alphabetical listing page by page until an empty page comes back
    #[instrument(skip_all, fields(source = CURSEFORGE_NAME))]
    pub async fn fetch_catalogue(&self, http: &dyn HttpClientPort) -> Result<Vec<RawAddonRecord>> {
        let mut all_addons = Vec::new();
        let mut index = 0usize;
        loop {
            let query = [
                ("gameId", "1".to_string()),
                ("sort", "3".to_string()),
                ("pageSize", self.page_size.to_string()),
                ("index", index.to_string()),
            ];
            let page = fetch_json_array(http, CURSEFORGE_NAME, &self.search_url, &query).await?;
            if page.is_empty() {
                break;
            }
            debug!("Fetched {} addons at index {}", page.len(), index);
            all_addons.extend(page);
            index += self.page_size;
        }
        info!("Successfully fetched {} addons from CurseForge", all_addons.len());
        Ok(all_addons)
    }
}
