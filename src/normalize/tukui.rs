use super::{Contribution, SourceNormalizer};
use crate::apis::{TukuiAddon, TukuiFlavor};
use crate::classify::Classifier;
use crate::types::{AddonDefinition, CompatibilitySet, NameRecord, Source};

/// A Tukui entry together with the listing it was read from
#[derive(Debug, Clone)]
pub struct TukuiRecord {
    pub addon: TukuiAddon,
    pub flavor: TukuiFlavor,
}

impl SourceNormalizer for TukuiRecord {
    fn source(&self) -> Source {
        Source::Tukui
    }

    // Tukui exposes no folder metadata, only names; the listing decides the tag
    fn normalize(&self, _classifier: &Classifier) -> Contribution {
        Contribution {
            slug: None,
            folders: Vec::new(),
            names: vec![NameRecord {
                name: self.addon.name.clone(),
                definition: AddonDefinition::new(Source::Tukui, self.addon.id.clone()),
                compatibility: CompatibilitySet::only(self.flavor.compatibility()),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classic_listing_entry_is_tagged_classic_only() {
        let record = TukuiRecord {
            addon: TukuiAddon::from_raw(&json!({"id": 42, "name": "Baz"})).unwrap(),
            flavor: TukuiFlavor::Classic,
        };
        let contribution = record.normalize(&Classifier::default());

        assert_eq!(
            serde_json::to_value(&contribution.names).unwrap(),
            json!([["Baz", ["tukui", "42"], ["classic"]]])
        );
        assert!(contribution.folders.is_empty());
        assert!(contribution.slug.is_none());
    }

    #[test]
    fn test_retail_listing_ignores_classifier_prefix() {
        let record = TukuiRecord {
            addon: TukuiAddon::from_raw(&json!({"id": "-1", "name": "ElvUI"})).unwrap(),
            flavor: TukuiFlavor::Retail,
        };
        let classifier = Classifier::new("10.");
        let contribution = record.normalize(&classifier);

        assert_eq!(
            serde_json::to_value(&contribution.names).unwrap(),
            json!([["ElvUI", ["tukui", "-1"], ["retail"]]])
        );
    }
}
