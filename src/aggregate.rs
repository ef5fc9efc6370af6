use crate::normalize::NameStreams;
use crate::types::NameRecord;
use tracing::debug;

/// Concatenate the name streams in fixed order and drop unclassified records.
///
/// Names are never deduplicated: one display name may legitimately point at
/// different add-ons on different sources.
pub fn aggregate_names(streams: NameStreams) -> Vec<NameRecord> {
    let NameStreams {
        curseforge,
        tukui_retail,
        tukui_classic,
        wowinterface,
    } = streams;

    let total = curseforge.len() + tukui_retail.len() + tukui_classic.len() + wowinterface.len();
    let names: Vec<NameRecord> = curseforge
        .into_iter()
        .chain(tukui_retail)
        .chain(tukui_classic)
        .chain(wowinterface)
        .filter(|record| !record.compatibility.is_empty())
        .collect();

    debug!("Kept {} of {} name records", names.len(), total);
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AddonDefinition, Compatibility, CompatibilitySet, Source};

    fn name(name: &str, source: Source, id: &str, compatibility: CompatibilitySet) -> NameRecord {
        NameRecord {
            name: name.to_string(),
            definition: AddonDefinition::new(source, id),
            compatibility,
        }
    }

    #[test]
    fn test_streams_are_concatenated_in_source_order() {
        let retail = CompatibilitySet::only(Compatibility::Retail);
        let classic = CompatibilitySet::only(Compatibility::Classic);
        let streams = NameStreams {
            wowinterface: vec![name("Bar", Source::WowInterface, "5108", retail.clone())],
            tukui_classic: vec![name("ElvUI", Source::Tukui, "2", classic)],
            tukui_retail: vec![name("ElvUI", Source::Tukui, "-1", retail.clone())],
            curseforge: vec![name("Foo", Source::CurseForge, "7", retail)],
        };

        let names: Vec<(String, Source)> = aggregate_names(streams)
            .into_iter()
            .map(|r| (r.name, r.definition.source))
            .collect();
        assert_eq!(
            names,
            vec![
                ("Foo".to_string(), Source::CurseForge),
                ("ElvUI".to_string(), Source::Tukui),
                ("ElvUI".to_string(), Source::Tukui),
                ("Bar".to_string(), Source::WowInterface),
            ]
        );
    }

    #[test]
    fn test_unclassified_names_are_dropped() {
        let streams = NameStreams {
            curseforge: vec![
                name("Old", Source::CurseForge, "1", CompatibilitySet::new()),
                name("New", Source::CurseForge, "2", CompatibilitySet::only(Compatibility::Retail)),
            ],
            wowinterface: vec![name("Ancient", Source::WowInterface, "3", CompatibilitySet::new())],
            ..NameStreams::default()
        };

        let names = aggregate_names(streams);
        assert_eq!(names.len(), 1);
        assert_eq!(names[0].name, "New");
        assert!(names.iter().all(|r| !r.compatibility.is_empty()));
    }

    #[test]
    fn test_duplicate_names_across_sources_are_kept() {
        let retail = CompatibilitySet::only(Compatibility::Retail);
        let streams = NameStreams {
            curseforge: vec![name("Details", Source::CurseForge, "61284", retail.clone())],
            wowinterface: vec![name("Details", Source::WowInterface, "23056", retail)],
            ..NameStreams::default()
        };
        assert_eq!(aggregate_names(streams).len(), 2);
    }
}
