//! `leaddesk.toml` settings.
//!
//! Every section is optional:
//!
//! ```toml
//! [upload]
//! max_bytes = 5242880
//!
//! [sources]
//! csv = "CSV import"
//! excel = "Excel import"
//!
//! [aliases]
//! "Cell" = "person_direct_phone"
//!
//! [[catalog.employees]]
//! value = "1-50"
//! label = "1-50"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use lead_ingest::{DefaultSources, UploadLimits, Uploader};
use lead_map::{AliasTable, ColumnMapper};
use lead_model::RangeCatalog;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub upload: UploadLimits,
    pub sources: DefaultSources,
    pub catalog: RangeCatalog,
    /// Extra `header = field_name` aliases.
    pub aliases: BTreeMap<String, String>,
}

impl AppConfig {
    /// Loads `path`; a missing file means defaults, a malformed one is an error.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                let config: Self = toml::from_str(&contents)
                    .with_context(|| format!("parse config {}", path.display()))?;
                info!(path = %path.display(), aliases = config.aliases.len(), "config loaded");
                Ok(config)
            }
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(error) => Err(error).with_context(|| format!("read config {}", path.display())),
        }
    }

    pub fn mapper(&self) -> Result<ColumnMapper> {
        let aliases = AliasTable::standard()
            .with_overrides(
                self.aliases
                    .iter()
                    .map(|(header, field)| (header.as_str(), field.as_str())),
            )
            .context("config [aliases]")?;
        Ok(ColumnMapper::new(aliases))
    }

    pub fn uploader(&self) -> Result<Uploader> {
        Ok(Uploader::new()
            .with_mapper(self.mapper()?)
            .with_limits(self.upload)
            .with_sources(self.sources.clone()))
    }
}
