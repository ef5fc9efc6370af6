//! Raw catalogue shapes and fetchers for the three upstream sources.
//!
//! Fetchers hand back the untouched JSON entries; decoding into the typed
//! per-source records happens in `normalize`, so a saved catalogue can be
//! replayed offline through exactly the same path.

pub mod curseforge;
pub mod tukui;
pub mod wowinterface;

use crate::app::ports::HttpClientPort;
use crate::config::SourcesConfig;
use crate::constants::{
    CURSEFORGE_DUMP, TUKUI_RETAIL_DUMP, TUKUI_CLASSIC_DUMP, WOWINTERFACE_DUMP,
};
use crate::error::{CatalogueError, Result};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};

pub use curseforge::{CurseForgeAddon, CurseForgeApi, CurseForgeFile, CurseForgeModule};
pub use tukui::{TukuiAddon, TukuiApi, TukuiFlavor};
pub use wowinterface::{WowInterfaceAddon, WowInterfaceApi, WowInterfaceCompatibility};

/// One catalogue entry exactly as the upstream returned it
pub type RawAddonRecord = Value;

/// Every raw catalogue a run needs, in the order they are folded
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalogues {
    pub curseforge: Vec<RawAddonRecord>,
    pub tukui_retail: Vec<RawAddonRecord>,
    pub tukui_classic: Vec<RawAddonRecord>,
    pub wowinterface: Vec<RawAddonRecord>,
}

impl Catalogues {
    /// Fetch all four catalogues sequentially
    #[instrument(skip_all)]
    pub async fn fetch(http: &dyn HttpClientPort, sources: &SourcesConfig) -> Result<Self> {
        let curseforge = CurseForgeApi::from_config(sources).fetch_catalogue(http).await?;
        let tukui = TukuiApi::from_config(sources);
        let tukui_retail = tukui.fetch_catalogue(http, TukuiFlavor::Retail).await?;
        let tukui_classic = tukui.fetch_catalogue(http, TukuiFlavor::Classic).await?;
        let wowinterface = WowInterfaceApi::from_config(sources).fetch_catalogue(http).await?;

        let catalogues = Self {
            curseforge,
            tukui_retail,
            tukui_classic,
            wowinterface,
        };
        info!(
            curseforge = catalogues.curseforge.len(),
            tukui_retail = catalogues.tukui_retail.len(),
            tukui_classic = catalogues.tukui_classic.len(),
            wowinterface = catalogues.wowinterface.len(),
            "Fetched catalogues"
        );
        Ok(catalogues)
    }

    /// Read catalogues previously written by [`Catalogues::save_to_dir`]
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        Ok(Self {
            curseforge: read_dump(&dir.join(CURSEFORGE_DUMP))?,
            tukui_retail: read_dump(&dir.join(TUKUI_RETAIL_DUMP))?,
            tukui_classic: read_dump(&dir.join(TUKUI_CLASSIC_DUMP))?,
            wowinterface: read_dump(&dir.join(WOWINTERFACE_DUMP))?,
        })
    }

    pub fn save_to_dir(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)?;
        write_dump(&dir.join(CURSEFORGE_DUMP), &self.curseforge)?;
        write_dump(&dir.join(TUKUI_RETAIL_DUMP), &self.tukui_retail)?;
        write_dump(&dir.join(TUKUI_CLASSIC_DUMP), &self.tukui_classic)?;
        write_dump(&dir.join(WOWINTERFACE_DUMP), &self.wowinterface)?;
        Ok(())
    }
}

fn read_dump(path: &Path) -> Result<Vec<RawAddonRecord>> {
    let content = fs::read_to_string(path).map_err(|e| {
        CatalogueError::Config(format!("Failed to read catalogue '{}': {}", path.display(), e))
    })?;
    let records: Vec<RawAddonRecord> = serde_json::from_str(&content)?;
    debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

fn write_dump(path: &Path, records: &[RawAddonRecord]) -> Result<()> {
    fs::write(path, serde_json::to_string(records)?)?;
    debug!("Saved {} records to {}", records.len(), path.display());
    Ok(())
}

/// GET `url` and decode the body as a JSON array of entries
pub(crate) async fn fetch_json_array(
    http: &dyn HttpClientPort,
    source_name: &str,
    url: &str,
    query: &[(&str, String)],
) -> Result<Vec<RawAddonRecord>> {
    let resp = http.get(url, query).await?;
    if !resp.is_success() {
        return Err(CatalogueError::Api {
            message: format!("{} responded with status {} for {}", source_name, resp.status, url),
        });
    }
    let body: Value = serde_json::from_slice(&resp.bytes).map_err(|e| CatalogueError::Api {
        message: format!(
            "{} returned an undecodable {} body for {}: {}",
            source_name, resp.content_type, url, e
        ),
    })?;
    match body {
        Value::Array(entries) => Ok(entries),
        other => Err(CatalogueError::Api {
            message: format!(
                "{} returned a JSON {} where an array was expected",
                source_name,
                json_kind(&other)
            ),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Identifiers arrive as strings from some sources and as integers from others
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}


#[cfg(test)]
mod tests {
    use super::testing::CannedHttp;
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_fetch_json_array_rejects_error_status() {
        let http = CannedHttp::default().with("https://example.test/list", 503, json!([]));
        let err = fetch_json_array(&http, "wowinterface", "https://example.test/list", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogueError::Api { .. }));
    }

    #[tokio::test]
    async fn test_fetch_json_array_rejects_non_array_body() {
        let http = CannedHttp::default().with("https://example.test/list", 200, json!({"error": "nope"}));
        let err = fetch_json_array(&http, "wowinterface", "https://example.test/list", &[])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("object"));
    }

    #[tokio::test]
    async fn test_fetch_json_array_names_content_type_of_undecodable_body() {
        let http = CannedHttp::default().with_raw(
            "https://example.test/list",
            200,
            "text/html; charset=UTF-8",
            b"<html>maintenance</html>".to_vec(),
        );
        let err = fetch_json_array(&http, "tukui", "https://example.test/list", &[])
            .await
            .unwrap_err();
        match err {
            CatalogueError::Api { message } => {
                assert!(message.contains("text/html; charset=UTF-8"), "{}", message)
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_catalogues_round_trip_through_directory() {
        let dir = tempfile::tempdir().unwrap();
        let catalogues = Catalogues {
            curseforge: vec![json!({"id": 1, "slug": "a"})],
            tukui_retail: vec![json!({"id": "2", "name": "ElvUI"})],
            tukui_classic: vec![],
            wowinterface: vec![json!({"UID": "3"})],
        };
        catalogues.save_to_dir(dir.path()).unwrap();
        assert_eq!(Catalogues::load_from_dir(dir.path()).unwrap(), catalogues);
    }

    #[test]
    fn test_load_from_dir_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalogues::load_from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, CatalogueError::Config(_)));
    }
}
