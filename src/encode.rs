use crate::config::PipelineConfig;
use crate::error::Result;
use crate::types::Datasets;
use serde::Serialize;

/// The two renderings of one dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    /// Two-space indented, for readable diffs
    pub pretty: String,
    /// No insignificant whitespace
    pub compact: String,
}

pub fn encode<T: Serialize + ?Sized>(dataset: &T) -> Result<Encoded> {
    Ok(Encoded {
        pretty: serde_json::to_string_pretty(dataset)?,
        compact: serde_json::to_string(dataset)?,
    })
}

/// A named, fully rendered file ready for publishing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub name: String,
    pub content: String,
}

/// Render every dataset in both encodings.
///
/// Order is slugs, folders, names; pretty before compact within each.
pub fn encode_datasets(datasets: &Datasets, config: &PipelineConfig) -> Result<Vec<Artifact>> {
    let rendered = [
        (&config.artifacts.slugs, encode(&datasets.slugs)?),
        (&config.artifacts.folders, encode(&datasets.folders)?),
        (&config.artifacts.names, encode(&datasets.names)?),
    ];

    let mut artifacts = Vec::with_capacity(rendered.len() * 2);
    for (base, encoded) in rendered {
        artifacts.push(Artifact {
            name: format!("{}{}", base, config.encodings.pretty),
            content: encoded.pretty,
        });
        artifacts.push(Artifact {
            name: format!("{}{}", base, config.encodings.compact),
            content: encoded.compact,
        });
    }
    Ok(artifacts)
}
