use super::{Contribution, SourceNormalizer};
use crate::apis::WowInterfaceAddon;
use crate::classify::Classifier;
use crate::types::{AddonDefinition, Compatibility, FolderRecord, NameRecord, Source};

impl SourceNormalizer for WowInterfaceAddon {
    fn source(&self) -> Source {
        Source::WowInterface
    }

    fn normalize(&self, classifier: &Classifier) -> Contribution {
        let compatibility = classifier.wowinterface(self);
        let definition = AddonDefinition::new(Source::WowInterface, self.uid.clone());

        // Older uploads carry no compatibility at all; those are assumed to be retail
        let folder = FolderRecord {
            definition: definition.clone(),
            compatibility: compatibility.clone().or_default_to(Compatibility::Retail),
            folders: self.folders.clone(),
        };
        let name = NameRecord {
            name: self.name.clone(),
            definition,
            compatibility,
        };

        Contribution {
            slug: None,
            folders: vec![folder],
            names: vec![name],
        }
    }
}
