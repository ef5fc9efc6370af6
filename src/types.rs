use crate::constants::{
    CURSEFORGE_NAME, CURSEFORGE_SOURCE, TUKUI_NAME, TUKUI_SOURCE, WOWINTERFACE_NAME,
    WOWINTERFACE_SOURCE,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Upstream catalogue an add-on identifier belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Source {
    #[serde(rename = "curse")]
    CurseForge,
    #[serde(rename = "tukui")]
    Tukui,
    #[serde(rename = "wowi")]
    WowInterface,
}

impl Source {
    /// Token written into the published datasets
    pub fn token(&self) -> &'static str {
        match self {
            Source::CurseForge => CURSEFORGE_SOURCE,
            Source::Tukui => TUKUI_SOURCE,
            Source::WowInterface => WOWINTERFACE_SOURCE,
        }
    }

    /// Name used in logs and metric labels
    pub fn name(&self) -> &'static str {
        match self {
            Source::CurseForge => CURSEFORGE_NAME,
            Source::Tukui => TUKUI_NAME,
            Source::WowInterface => WOWINTERFACE_NAME,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Client line an add-on file supports.
///
/// Variant order is the rendering order in every dataset: retail before classic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compatibility {
    Retail,
    Classic,
}

/// Set of compatibility tags, always iterated as `retail, classic`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompatibilitySet(BTreeSet<Compatibility>);

impl CompatibilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn only(tag: Compatibility) -> Self {
        let mut set = Self::new();
        set.insert(tag);
        set
    }

    pub fn insert(&mut self, tag: Compatibility) {
        self.0.insert(tag);
    }

    pub fn union_with(&mut self, other: &CompatibilitySet) {
        self.0.extend(other.0.iter().copied());
    }

    pub fn contains(&self, tag: Compatibility) -> bool {
        self.0.contains(&tag)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Compatibility> + '_ {
        self.0.iter().copied()
    }

    /// Returns `self`, or `{fallback}` when `self` is empty
    pub fn or_default_to(self, fallback: Compatibility) -> Self {
        if self.is_empty() {
            Self::only(fallback)
        } else {
            self
        }
    }
}

impl FromIterator<Compatibility> for CompatibilitySet {
    fn from_iter<I: IntoIterator<Item = Compatibility>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Canonical identity of an add-on: `(source, id)`, rendered as a two-element array
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "(Source, String)", from = "(Source, String)")]
pub struct AddonDefinition {
    pub source: Source,
    pub id: String,
}

impl AddonDefinition {
    pub fn new(source: Source, id: impl Into<String>) -> Self {
        Self {
            source,
            id: id.into(),
        }
    }
}

impl From<AddonDefinition> for (Source, String) {
    fn from(definition: AddonDefinition) -> Self {
        (definition.source, definition.id)
    }
}

impl From<(Source, String)> for AddonDefinition {
    fn from((source, id): (Source, String)) -> Self {
        Self { source, id }
    }
}

/// Install folders provided by an add-on, rendered as `[definition, compatibility, folders]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    into = "(AddonDefinition, CompatibilitySet, Vec<String>)",
    from = "(AddonDefinition, CompatibilitySet, Vec<String>)"
)]
pub struct FolderRecord {
    pub definition: AddonDefinition,
    pub compatibility: CompatibilitySet,
    pub folders: Vec<String>,
}

impl From<FolderRecord> for (AddonDefinition, CompatibilitySet, Vec<String>) {
    fn from(record: FolderRecord) -> Self {
        (record.definition, record.compatibility, record.folders)
    }
}

impl From<(AddonDefinition, CompatibilitySet, Vec<String>)> for FolderRecord {
    fn from((definition, compatibility, folders): (AddonDefinition, CompatibilitySet, Vec<String>)) -> Self {
        Self {
            definition,
            compatibility,
            folders,
        }
    }
}

/// Display name of an add-on, rendered as `[name, definition, compatibility]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    into = "(String, AddonDefinition, CompatibilitySet)",
    from = "(String, AddonDefinition, CompatibilitySet)"
)]
pub struct NameRecord {
    pub name: String,
    pub definition: AddonDefinition,
    pub compatibility: CompatibilitySet,
}

impl From<NameRecord> for (String, AddonDefinition, CompatibilitySet) {
    fn from(record: NameRecord) -> Self {
        (record.name, record.definition, record.compatibility)
    }
}

impl From<(String, AddonDefinition, CompatibilitySet)> for NameRecord {
    fn from((name, definition, compatibility): (String, AddonDefinition, CompatibilitySet)) -> Self {
        Self {
            name,
            definition,
            compatibility,
        }
    }
}

/// CurseForge slug to stringified project id, in catalogue order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlugMap(IndexMap<String, String>);

impl SlugMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repeated slug keeps its first position and takes the later id
    pub fn insert(&mut self, slug: impl Into<String>, id: impl Into<String>) {
        self.0.insert(slug.into(), id.into());
    }

    pub fn get(&self, slug: &str) -> Option<&str> {
        self.0.get(slug).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The three canonical datasets built by one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Datasets {
    pub slugs: SlugMap,
    pub folders: Vec<FolderRecord>,
    pub names: Vec<NameRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_compatibility_renders_retail_first() {
        let set: CompatibilitySet = [Compatibility::Classic, Compatibility::Retail]
            .into_iter()
            .collect();
        assert_eq!(serde_json::to_value(&set).unwrap(), json!(["retail", "classic"]));
    }

    #[test]
    fn test_or_default_to_only_fills_empty_sets() {
        let empty = CompatibilitySet::new().or_default_to(Compatibility::Retail);
        assert_eq!(empty, CompatibilitySet::only(Compatibility::Retail));

        let classic = CompatibilitySet::only(Compatibility::Classic).or_default_to(Compatibility::Retail);
        assert_eq!(classic, CompatibilitySet::only(Compatibility::Classic));
    }

    #[test]
    fn test_folder_record_serializes_as_triple() {
        let record = FolderRecord {
            definition: AddonDefinition::new(Source::WowInterface, "5108"),
            compatibility: CompatibilitySet::only(Compatibility::Retail),
            folders: vec!["Bar".to_string(), "Bar_Options".to_string()],
        };
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!([["wowi", "5108"], ["retail"], ["Bar", "Bar_Options"]])
        );
    }

    #[test]
    fn test_name_record_serializes_as_triple() {
        let record = NameRecord {
            name: "Baz".to_string(),
            definition: AddonDefinition::new(Source::Tukui, "42"),
            compatibility: CompatibilitySet::only(Compatibility::Classic),
        };
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!(["Baz", ["tukui", "42"], ["classic"]])
        );
    }

    #[test]
    fn test_slug_map_keeps_last_id_for_duplicate_slug() {
        let mut slugs = SlugMap::new();
        slugs.insert("deadly-boss-mods", "3358");
        slugs.insert("bagnon", "1592");
        slugs.insert("deadly-boss-mods", "9999");
        assert_eq!(slugs.len(), 2);
        assert_eq!(slugs.get("deadly-boss-mods"), Some("9999"));
        assert_eq!(
            serde_json::to_string(&slugs).unwrap(),
            r#"{"deadly-boss-mods":"9999","bagnon":"1592"}"#
        );
    }
}
