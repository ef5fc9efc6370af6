use crate::apis::{fetch_json_array, string_or_number, RawAddonRecord};
use crate::app::ports::HttpClientPort;
use crate::config::SourcesConfig;
use crate::constants::TUKUI_NAME;
use crate::error::{CatalogueError, Result};
use crate::types::Compatibility;
use serde::Deserialize;
use tracing::{info, instrument};

/// Which of the two Tukui listings a record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TukuiFlavor {
    Retail,
    Classic,
}

impl TukuiFlavor {
    /// Tukui has no per-file metadata; the listing itself is the compatibility signal
    pub fn compatibility(&self) -> Compatibility {
        match self {
            TukuiFlavor::Retail => Compatibility::Retail,
            TukuiFlavor::Classic => Compatibility::Classic,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TukuiAddon {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
}

impl TukuiAddon {
    pub fn from_raw(raw: &RawAddonRecord) -> Result<Self> {
        Self::deserialize(raw).map_err(|e| CatalogueError::missing_field(TUKUI_NAME, e))
    }
}

pub struct TukuiApi {
    retail_url: String,
    classic_url: String,
}

impl TukuiApi {
    pub fn new(retail_url: impl Into<String>, classic_url: impl Into<String>) -> Self {
        Self {
            retail_url: retail_url.into(),
            classic_url: classic_url.into(),
        }
    }

    pub fn from_config(sources: &SourcesConfig) -> Self {
        Self::new(sources.tukui_retail_url.clone(), sources.tukui_classic_url.clone())
    }

    #[instrument(skip(self, http), fields(source = TUKUI_NAME))]
    pub async fn fetch_catalogue(
        &self,
        http: &dyn HttpClientPort,
        flavor: TukuiFlavor,
    ) -> Result<Vec<RawAddonRecord>> {
        let url = match flavor {
            TukuiFlavor::Retail => &self.retail_url,
            TukuiFlavor::Classic => &self.classic_url,
        };
        let addons = fetch_json_array(http, TUKUI_NAME, url, &[]).await?;
        info!("Successfully fetched {} {:?} addons from Tukui", addons.len(), flavor);
        Ok(addons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apis::testing::CannedHttp;
    use serde_json::json;

    #[test]
    fn test_from_raw_accepts_numeric_and_string_ids() {
        let numeric = TukuiAddon::from_raw(&json!({"id": 42, "name": "Baz"})).unwrap();
        let text = TukuiAddon::from_raw(&json!({"id": "-2", "name": "ElvUI"})).unwrap();
        assert_eq!(numeric.id, "42");
        assert_eq!(text.id, "-2");
    }

    #[test]
    fn test_from_raw_rejects_missing_name() {
        let err = TukuiAddon::from_raw(&json!({"id": 42})).unwrap_err();
        assert!(err.to_string().contains("name"));
    }

    #[tokio::test]
    async fn test_fetch_catalogue_uses_flavor_endpoint() {
        let http = CannedHttp::default()
            .with("https://tukui.test/retail", 200, json!([{"id": 1, "name": "A"}]))
            .with("https://tukui.test/classic", 200, json!([{"id": 2, "name": "B"}, {"id": 3, "name": "C"}]));
        let api = TukuiApi::new("https://tukui.test/retail", "https://tukui.test/classic");

        assert_eq!(api.fetch_catalogue(&http, TukuiFlavor::Retail).await.unwrap().len(), 1);
        assert_eq!(api.fetch_catalogue(&http, TukuiFlavor::Classic).await.unwrap().len(), 2);
    }
}
