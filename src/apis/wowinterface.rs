use crate::apis::{fetch_json_array, string_or_number, RawAddonRecord};
use crate::app::ports::HttpClientPort;
use crate::config::SourcesConfig;
use crate::constants::WOWINTERFACE_NAME;
use crate::error::{CatalogueError, Result};
use serde::Deserialize;
use tracing::{info, instrument};

/// Entry of the WoWInterface (MMOUI) file list
#[derive(Debug, Clone, Deserialize)]
pub struct WowInterfaceAddon {
    #[serde(rename = "UID", deserialize_with = "string_or_number")]
    pub uid: String,
    #[serde(rename = "UIName")]
    pub name: String,
    #[serde(rename = "UIDir")]
    pub folders: Vec<String>,
    /// Absent on older uploads
    #[serde(rename = "UICompatibility", default)]
    pub compatibility: Option<Vec<WowInterfaceCompatibility>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WowInterfaceCompatibility {
    pub version: String,
    pub name: String,
}

impl WowInterfaceAddon {
    pub fn from_raw(raw: &RawAddonRecord) -> Result<Self> {
        Self::deserialize(raw).map_err(|e| CatalogueError::missing_field(WOWINTERFACE_NAME, e))
    }

    pub fn compatibility_entries(&self) -> &[WowInterfaceCompatibility] {
        self.compatibility.as_deref().unwrap_or(&[])
    }
}

pub struct WowInterfaceApi {
    filelist_url: String,
}

impl WowInterfaceApi {
    pub fn new(filelist_url: impl Into<String>) -> Self {
        Self {
            filelist_url: filelist_url.into(),
        }
    }

    pub fn from_config(sources: &SourcesConfig) -> Self {
        Self::new(sources.wowinterface_url.clone())
    }

    #[instrument(skip_all, fields(source = WOWINTERFACE_NAME))]
    pub async fn fetch_catalogue(&self, http: &dyn HttpClientPort) -> Result<Vec<RawAddonRecord>> {
        let addons = fetch_json_array(http, WOWINTERFACE_NAME, &self.filelist_url, &[]).await?;
        info!("Successfully fetched {} addons from WoWInterface", addons.len());
        Ok(addons)
    }
}
