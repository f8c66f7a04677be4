//! JSON file persistence for leads.
//!
//! The whole store lives in one pretty-printed JSON document. Writes go to a
//! sibling temp file that is renamed over the original, so a crash mid-save
//! leaves the previous contents intact.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use lead_model::{Lead, LeadId};

use crate::error::StoreError;
use crate::store::{AppliedChanges, LeadChange, LeadStore, MemoryLeadStore};

const FORMAT_VERSION: &str = "1.0";

#[derive(Debug, Serialize, Deserialize)]
struct StoredLeads {
    #[serde(default = "default_version")]
    version: String,
    saved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    last_id: u64,
    #[serde(default)]
    leads: Vec<Lead>,
}

fn default_version() -> String {
    FORMAT_VERSION.to_string()
}

/// A [`LeadStore`] backed by a JSON file.
///
/// Every successful [`LeadStore::apply`] is saved before it returns; if the
/// save fails the in-memory state is rolled back as well.
#[derive(Debug, Clone)]
pub struct JsonLeadRepository {
    path: PathBuf,
    inner: MemoryLeadStore,
}

impl JsonLeadRepository {
    /// Opens the repository at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let inner = match fs::read_to_string(&path) {
            Ok(contents) => {
                let stored: StoredLeads =
                    serde_json::from_str(&contents).map_err(|err| StoreError::json(&path, err))?;
                if stored.version != FORMAT_VERSION {
                    warn!(
                        path = %path.display(),
                        version = %stored.version,
                        "unexpected lead store version"
                    );
                }
                MemoryLeadStore::from_leads(stored.last_id, stored.leads)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "lead store not found, starting empty");
                MemoryLeadStore::new()
            }
            Err(err) => return Err(StoreError::io(&path, err)),
        };
        Ok(Self { path, inner })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|err| StoreError::io(parent, err))?;
        }
        let stored = StoredLeads {
            version: default_version(),
            saved_at: Some(Utc::now()),
            last_id: self.inner.last_id(),
            leads: self.inner.leads().cloned().collect(),
        };
        let json =
            serde_json::to_string_pretty(&stored).map_err(|err| StoreError::json(&self.path, err))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|err| StoreError::io(&tmp, err))?;
        fs::rename(&tmp, &self.path).map_err(|err| StoreError::io(&self.path, err))?;
        debug!(path = %self.path.display(), leads = self.inner.len(), "lead store saved");
        Ok(())
    }
}

impl LeadStore for JsonLeadRepository {
    fn get(&self, id: LeadId) -> Result<Option<Lead>, StoreError> {
        self.inner.get(id)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Lead>, StoreError> {
        self.inner.find_by_email(email)
    }

    fn find_by_lead_id(&self, lead_id: &str) -> Result<Option<Lead>, StoreError> {
        self.inner.find_by_lead_id(lead_id)
    }

    fn list(&self) -> Result<Vec<Lead>, StoreError> {
        self.inner.list()
    }

    fn apply(&mut self, changes: Vec<LeadChange>) -> Result<AppliedChanges, StoreError> {
        let snapshot = self.inner.clone();
        let applied = self.inner.apply(changes)?;
        if let Err(err) = self.save() {
            self.inner = snapshot;
            return Err(err);
        }
        Ok(applied)
    }
}
