use crate::aggregate::aggregate_names;
use crate::apis::Catalogues;
use crate::app::ports::{HttpClientPort, Publisher};
use crate::classify::Classifier;
use crate::config::{Config, PipelineConfig, SourcesConfig};
use crate::encode::{encode_datasets, Artifact};
use crate::error::Result;
use crate::merge::merge_folders;
use crate::normalize::normalize_catalogues;
use crate::observability::metrics;
use crate::publish::publish_all;
use crate::types::Datasets;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;
use tracing::{error, info, instrument};
use uuid::Uuid;

/// Summary of one publish cycle
#[derive(Debug, Clone, Serialize)]
pub struct PipelineResult {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub slugs: usize,
    pub folders: usize,
    pub names: usize,
    pub artifacts_published: usize,
}

/// fetch → normalize → merge → encode → publish
pub struct Pipeline {
    classifier: Classifier,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(classifier: Classifier, config: PipelineConfig) -> Self {
        Self { classifier, config }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Classifier::from_config(&config.classifier), config.pipeline())
    }

    /// Pure transform from raw catalogues to the three canonical datasets
    pub fn build(&self, catalogues: &Catalogues) -> Result<Datasets> {
        let normalized = normalize_catalogues(catalogues, &self.classifier)?;
        let datasets = Datasets {
            slugs: normalized.slugs,
            folders: merge_folders(normalized.folders),
            names: aggregate_names(normalized.names),
        };
        metrics::build::datasets_built(
            datasets.slugs.len(),
            datasets.folders.len(),
            datasets.names.len(),
        );
        info!(
            slugs = datasets.slugs.len(),
            folders = datasets.folders.len(),
            names = datasets.names.len(),
            "Built datasets"
        );
        Ok(datasets)
    }

    pub fn encode(&self, datasets: &Datasets) -> Result<Vec<Artifact>> {
        encode_datasets(datasets, &self.config)
    }

    /// Build, encode and publish already-fetched catalogues.
    ///
    /// Nothing is published unless every catalogue normalizes cleanly.
    #[instrument(skip_all)]
    pub async fn publish_catalogues(
        &self,
        catalogues: &Catalogues,
        publisher: &dyn Publisher,
    ) -> Result<PipelineResult> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let clock = Instant::now();
        info!(%run_id, publisher = publisher.target(), "Starting publish cycle");

        let outcome = self.build_and_publish(catalogues, publisher).await;
        metrics::pipeline::run_finished(clock.elapsed().as_secs_f64(), outcome.is_ok());

        let (datasets, artifacts_published) = outcome.map_err(|e| {
            error!(%run_id, "Publish cycle failed: {}", e);
            e
        })?;
        Ok(PipelineResult {
            run_id,
            started_at,
            finished_at: Utc::now(),
            slugs: datasets.slugs.len(),
            folders: datasets.folders.len(),
            names: datasets.names.len(),
            artifacts_published,
        })
    }

    async fn build_and_publish(
        &self,
        catalogues: &Catalogues,
        publisher: &dyn Publisher,
    ) -> Result<(Datasets, usize)> {
        let datasets = self.build(catalogues)?;
        let artifacts = self.encode(&datasets)?;
        let published = publish_all(publisher, &artifacts).await?;
        Ok((datasets, published))
    }

    /// Full cycle: fetch every catalogue, then publish
    pub async fn run(
        &self,
        http: &dyn HttpClientPort,
        sources: &SourcesConfig,
        publisher: &dyn Publisher,
    ) -> Result<PipelineResult> {
        let catalogues = Catalogues::fetch(http, sources).await?;
        metrics::fetch::catalogue_fetched("curseforge", catalogues.curseforge.len());
        metrics::fetch::catalogue_fetched("tukui_retail", catalogues.tukui_retail.len());
        metrics::fetch::catalogue_fetched("tukui_classic", catalogues.tukui_classic.len());
        metrics::fetch::catalogue_fetched("wowinterface", catalogues.wowinterface.len());
        self.publish_catalogues(&catalogues, publisher).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_runs_every_stage() {
        let catalogues = Catalogues {
            curseforge: vec![json!({
                "id": 7,
                "name": "Foo",
                "slug": "foo",
                "latestFiles": [
                    {"projectId": 7, "gameVersion": ["8.2.0"], "gameVersionFlavor": "wow_retail",
                     "exposeAsAlternative": false, "modules": [{"foldername": "Foo"}]},
                    {"projectId": 7, "gameVersion": ["1.13.2"], "gameVersionFlavor": "wow_classic",
                     "exposeAsAlternative": false, "modules": [{"foldername": "Foo"}]}
                ]
            })],
            ..Catalogues::default()
        };
        let pipeline = Pipeline::new(Classifier::default(), PipelineConfig::default());

        let datasets = pipeline.build(&catalogues).unwrap();

        assert_eq!(
            serde_json::to_value(&datasets.folders).unwrap(),
            json!([[["curse", "7"], ["retail", "classic"], ["Foo"]]])
        );
        assert_eq!(
            serde_json::to_value(&datasets.names).unwrap(),
            json!([["Foo", ["curse", "7"], ["retail", "classic"]]])
        );
    }

    #[test]
    fn test_build_of_empty_catalogues_is_empty() {
        let pipeline = Pipeline::new(Classifier::default(), PipelineConfig::default());
        let datasets = pipeline.build(&Catalogues::default()).unwrap();
        assert_eq!(datasets, Datasets::default());
        assert_eq!(pipeline.encode(&datasets).unwrap().len(), 6);
    }
}
