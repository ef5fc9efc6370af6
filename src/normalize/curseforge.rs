use super::{Contribution, SourceNormalizer};
use crate::apis::CurseForgeAddon;
use crate::classify::Classifier;
use crate::types::{AddonDefinition, FolderRecord, NameRecord, Source};

impl SourceNormalizer for CurseForgeAddon {
    fn source(&self) -> Source {
        Source::CurseForge
    }

    /// One slug, one name, and a folder record per standalone file that targets a tracked client line
    fn normalize(&self, classifier: &Classifier) -> Contribution {
        let id = self.id.to_string();

        let folders = self
            .latest_files
            .iter()
            .filter(|file| !file.is_alternative())
            .filter_map(|file| {
                let compatibility = classifier.curseforge_file(file);
                if compatibility.is_empty() {
                    return None;
                }
                Some(FolderRecord {
                    definition: AddonDefinition::new(Source::CurseForge, file.project_id.to_string()),
                    compatibility,
                    folders: file.folder_names(),
                })
            })
            .collect();

        let name = NameRecord {
            name: self.name.clone(),
            definition: AddonDefinition::new(Source::CurseForge, id.clone()),
            compatibility: classifier.curseforge(&self.latest_files),
        };

        Contribution {
            slug: Some((self.slug.clone(), id)),
            folders,
            names: vec![name],
        }
    }
}
