//! Turns raw catalogue entries into slug, folder and name records.

pub mod curseforge;
pub mod tukui;
pub mod wowinterface;

use crate::apis::{Catalogues, CurseForgeAddon, RawAddonRecord, TukuiAddon, TukuiFlavor, WowInterfaceAddon};
use crate::classify::Classifier;
use crate::error::Result;
use crate::observability::metrics;
use crate::types::{FolderRecord, NameRecord, SlugMap, Source};
use tracing::{debug, info};

pub use tukui::TukuiRecord;

/// Records derived from one catalogue entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contribution {
    pub slug: Option<(String, String)>,
    pub folders: Vec<FolderRecord>,
    pub names: Vec<NameRecord>,
}

/// One normalizer per source shape
pub trait SourceNormalizer {
    fn source(&self) -> Source;

    fn normalize(&self, classifier: &Classifier) -> Contribution;
}

/// A raw entry decoded into its source's typed shape
#[derive(Debug, Clone)]
pub enum RawRecord {
    CurseForge(CurseForgeAddon),
    Tukui(TukuiRecord),
    WowInterface(WowInterfaceAddon),
}

impl RawRecord {
    pub fn curseforge(raw: &RawAddonRecord) -> Result<Self> {
        Ok(Self::CurseForge(CurseForgeAddon::from_raw(raw)?))
    }

    pub fn tukui(raw: &RawAddonRecord, flavor: TukuiFlavor) -> Result<Self> {
        Ok(Self::Tukui(TukuiRecord {
            addon: TukuiAddon::from_raw(raw)?,
            flavor,
        }))
    }

    pub fn wowinterface(raw: &RawAddonRecord) -> Result<Self> {
        Ok(Self::WowInterface(WowInterfaceAddon::from_raw(raw)?))
    }

    fn normalizer(&self) -> &dyn SourceNormalizer {
        match self {
            RawRecord::CurseForge(addon) => addon as &dyn SourceNormalizer,
            RawRecord::Tukui(record) => record as &dyn SourceNormalizer,
            RawRecord::WowInterface(addon) => addon as &dyn SourceNormalizer,
        }
    }
}

impl SourceNormalizer for RawRecord {
    fn source(&self) -> Source {
        self.normalizer().source()
    }

    fn normalize(&self, classifier: &Classifier) -> Contribution {
        self.normalizer().normalize(classifier)
    }
}

/// Name records per catalogue stream, kept apart so aggregation can fix their order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameStreams {
    pub curseforge: Vec<NameRecord>,
    pub tukui_retail: Vec<NameRecord>,
    pub tukui_classic: Vec<NameRecord>,
    pub wowinterface: Vec<NameRecord>,
}

/// Everything the normalizers produced, before merging and filtering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalized {
    pub slugs: SlugMap,
    /// CurseForge records followed by WoWInterface records, each in catalogue order
    pub folders: Vec<FolderRecord>,
    pub names: NameStreams,
}

/// Decode and normalize one catalogue stream, preserving catalogue order
fn normalize_stream<F>(
    raws: &[RawAddonRecord],
    decode: F,
    classifier: &Classifier,
) -> Result<Vec<Contribution>>
where
    F: Fn(&RawAddonRecord) -> Result<RawRecord>,
{
    raws.iter()
        .map(|raw| {
            let record = decode(raw)?;
            let contribution = record.normalize(classifier);
            metrics::normalize::record_normalized(record.source(), &contribution);
            Ok(contribution)
        })
        .collect()
}

/// Normalize all four catalogues.
///
/// Any entry missing a required field aborts with the first error.
pub fn normalize_catalogues(catalogues: &Catalogues, classifier: &Classifier) -> Result<Normalized> {
    let curseforge = normalize_stream(&catalogues.curseforge, RawRecord::curseforge, classifier)?;
    let tukui_retail = normalize_stream(
        &catalogues.tukui_retail,
        |raw| RawRecord::tukui(raw, TukuiFlavor::Retail),
        classifier,
    )?;
    let tukui_classic = normalize_stream(
        &catalogues.tukui_classic,
        |raw| RawRecord::tukui(raw, TukuiFlavor::Classic),
        classifier,
    )?;
    let wowinterface = normalize_stream(&catalogues.wowinterface, RawRecord::wowinterface, classifier)?;

    let mut normalized = Normalized::default();
    for contribution in curseforge.iter().chain(wowinterface.iter()) {
        normalized.folders.extend(contribution.folders.iter().cloned());
    }
    for contribution in &curseforge {
        if let Some((slug, id)) = &contribution.slug {
            normalized.slugs.insert(slug.clone(), id.clone());
        }
    }
    normalized.names = NameStreams {
        curseforge: collect_names(curseforge),
        tukui_retail: collect_names(tukui_retail),
        tukui_classic: collect_names(tukui_classic),
        wowinterface: collect_names(wowinterface),
    };

    debug!(
        slugs = normalized.slugs.len(),
        folders = normalized.folders.len(),
        "Normalized catalogues"
    );
    info!(
        "Normalized {} curseforge, {} tukui and {} wowinterface entries",
        catalogues.curseforge.len(),
        catalogues.tukui_retail.len() + catalogues.tukui_classic.len(),
        catalogues.wowinterface.len()
    );
    Ok(normalized)
}

fn collect_names(contributions: Vec<Contribution>) -> Vec<NameRecord> {
    contributions.into_iter().flat_map(|c| c.names).collect()
}
