//! Compatibility classification per source.
//!
//! Every rule here is pure: the result depends only on the record handed in
//! and the retail version prefix the classifier was built with.

use crate::apis::{CurseForgeFile, WowInterfaceAddon};
use crate::config::ClassifierConfig;
use crate::constants::{CURSEFORGE_CLASSIC_FLAVOR, RETAIL_VERSION_PREFIX, WOWINTERFACE_CLASSIC_NAME};
use crate::types::{Compatibility, CompatibilitySet};

#[derive(Debug, Clone)]
pub struct Classifier {
    retail_prefix: String,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(RETAIL_VERSION_PREFIX)
    }
}

impl Classifier {
    pub fn new(retail_prefix: impl Into<String>) -> Self {
        Self {
            retail_prefix: retail_prefix.into(),
        }
    }

    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self::new(config.retail_version_prefix.clone())
    }

    fn is_retail_version(&self, version: &str) -> bool {
        version.starts_with(&self.retail_prefix)
    }

    /// Union of the tags each file implies on its own.
    ///
    /// Retail and classic are tested independently, so one file may carry both.
    pub fn curseforge<'a, I>(&self, files: I) -> CompatibilitySet
    where
        I: IntoIterator<Item = &'a CurseForgeFile>,
    {
        let mut set = CompatibilitySet::new();
        for file in files {
            if file.game_version.iter().any(|v| self.is_retail_version(v)) {
                set.insert(Compatibility::Retail);
            }
            if file.game_version_flavor.as_deref() == Some(CURSEFORGE_CLASSIC_FLAVOR) {
                set.insert(Compatibility::Classic);
            }
        }
        set
    }

    pub fn curseforge_file(&self, file: &CurseForgeFile) -> CompatibilitySet {
        self.curseforge(std::iter::once(file))
    }

    pub fn wowinterface(&self, addon: &WowInterfaceAddon) -> CompatibilitySet {
        let entries = addon.compatibility_entries();
        let mut set = CompatibilitySet::new();
        if entries.iter().any(|e| self.is_retail_version(&e.version)) {
            set.insert(Compatibility::Retail);
        }
        if entries.iter().any(|e| e.name == WOWINTERFACE_CLASSIC_NAME) {
            set.insert(Compatibility::Classic);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apis::{CurseForgeModule, WowInterfaceCompatibility};

    fn cf_file(versions: &[&str], flavor: Option<&str>) -> CurseForgeFile {
        CurseForgeFile {
            project_id: 1,
            game_version: versions.iter().map(|v| v.to_string()).collect(),
            game_version_flavor: flavor.map(str::to_string),
            expose_as_alternative: Some(false),
            modules: vec![CurseForgeModule { foldername: "Foo".into() }],
        }
    }

    fn wowi(entries: Option<Vec<(&str, &str)>>) -> WowInterfaceAddon {
        WowInterfaceAddon {
            uid: "1".into(),
            name: "Bar".into(),
            folders: vec!["Bar".into()],
            compatibility: entries.map(|es| {
                es.into_iter()
                    .map(|(version, name)| WowInterfaceCompatibility {
                        version: version.into(),
                        name: name.into(),
                    })
                    .collect()
            }),
        }
    }

    #[test]
    fn test_curseforge_file_can_be_both_retail_and_classic() {
        let set = Classifier::default().curseforge_file(&cf_file(&["8.1.0"], Some("wow_classic")));
        assert!(set.contains(Compatibility::Retail));
        assert!(set.contains(Compatibility::Classic));
    }

    #[test]
    fn test_curseforge_file_predating_current_line_is_unclassified() {
        let set = Classifier::default().curseforge_file(&cf_file(&["7.3.5"], Some("wow_retail")));
        assert!(set.is_empty());
    }

    #[test]
    fn test_curseforge_null_flavor_is_not_classic() {
        let set = Classifier::default().curseforge_file(&cf_file(&["8.2.5"], None));
        assert_eq!(set, CompatibilitySet::only(Compatibility::Retail));
    }

    #[test]
    fn test_curseforge_addon_unions_its_files() {
        let files = vec![cf_file(&["8.2.0"], Some("wow_retail")), cf_file(&["1.13.2"], Some("wow_classic"))];
        let set = Classifier::default().curseforge(&files);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_retail_prefix_is_configurable() {
        let classifier = Classifier::new("9.");
        assert!(classifier.curseforge_file(&cf_file(&["8.3.0"], None)).is_empty());
        assert!(classifier
            .curseforge_file(&cf_file(&["9.0.1"], None))
            .contains(Compatibility::Retail));
    }

    #[test]
    fn test_wowinterface_missing_or_empty_compatibility_is_empty_set() {
        let classifier = Classifier::default();
        assert!(classifier.wowinterface(&wowi(None)).is_empty());
        assert!(classifier.wowinterface(&wowi(Some(vec![]))).is_empty());
    }

    #[test]
    fn test_wowinterface_matches_version_prefix_and_classic_name() {
        let classifier = Classifier::default();
        let set = classifier.wowinterface(&wowi(Some(vec![
            ("8.2.5", "Rise of Azshara"),
            ("1.13.2", "WoW Classic"),
        ])));
        assert_eq!(set.len(), 2);

        let near_miss = classifier.wowinterface(&wowi(Some(vec![("1.13.2", "wow classic")])));
        assert!(near_miss.is_empty());
    }
}
