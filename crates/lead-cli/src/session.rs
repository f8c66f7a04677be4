//! One invocation's view of the lead store.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};

use lead_filter::{FilterChoices, FilterForm, FilterQuery};
use lead_ingest::{
    ErrorReport, JsonLeadRepository, LeadStore, UploadErrorLog, UploadFile, UploadReport,
    UploadRequest,
};
use lead_model::{Lead, LeadId};

use crate::config::AppConfig;
use crate::logging::redact_value;

pub struct Session {
    pub config: AppConfig,
    pub user: String,
    pub store_path: PathBuf,
    pub log_data: bool,
}

impl Session {
    pub fn new(
        config: AppConfig,
        store_path: impl Into<PathBuf>,
        user: impl Into<String>,
    ) -> Self {
        Self {
            config,
            user: user.into(),
            store_path: store_path.into(),
            log_data: false,
        }
    }

    pub fn with_log_data(mut self, enable: bool) -> Self {
        self.log_data = enable;
        self
    }

    /// Error reports live next to the store: `leads.json` -> `leads.upload_errors.json`.
    pub fn error_log_path(&self) -> PathBuf {
        let stem = self
            .store_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "leads".to_string());
        self.store_path
            .with_file_name(format!("{stem}.upload_errors.json"))
    }

    pub fn open_store(&self) -> Result<JsonLeadRepository> {
        JsonLeadRepository::open(&self.store_path)
            .with_context(|| format!("open lead store {}", self.store_path.display()))
    }

    /// Runs an upload and replaces this user's error report with its outcome.
    ///
    /// A failure to save the error report is only logged: by then the leads
    /// are already committed.
    pub fn upload(&self, path: &Path, overwrite: bool) -> Result<UploadReport> {
        let uploader = self.config.uploader()?;
        let mut store = self.open_store()?;
        let request = UploadRequest::new(&self.user)
            .with_overwrite(overwrite)
            .with_log_data(self.log_data);

        let log_path = self.error_log_path();
        let mut errors = UploadErrorLog::load(&log_path)
            .with_context(|| format!("load upload errors {}", log_path.display()))?;

        let outcome = UploadFile::read(path, &self.config.upload)
            .and_then(|file| uploader.upload(&mut store, &file, &request));
        match &outcome {
            Ok(report) => errors.record(report.error_report()),
            Err(error) => {
                warn!(file = %path.display(), %error, "upload rejected");
                errors.clear(&self.user);
            }
        }
        if let Err(error) = errors.save(&log_path) {
            warn!(path = %log_path.display(), %error, "failed to save upload errors");
        }
        outcome.with_context(|| format!("upload {}", path.display()))
    }

    pub fn latest_errors(&self) -> Result<Option<ErrorReport>> {
        let log_path = self.error_log_path();
        let errors = UploadErrorLog::load(&log_path)
            .with_context(|| format!("load upload errors {}", log_path.display()))?;
        Ok(errors.latest(&self.user).cloned())
    }

    /// All leads, newest first.
    pub fn leads(&self) -> Result<Vec<Lead>> {
        let store = self.open_store()?;
        store.list().context("list leads")
    }

    pub fn lead(&self, id: u64) -> Result<Option<Lead>> {
        let store = self.open_store()?;
        store.get(LeadId::new(id)).context("load lead")
    }

    pub fn choices(&self, leads: &[Lead]) -> FilterChoices {
        FilterChoices::from_leads(leads, self.config.catalog.clone())
    }

    /// Validates `query` against the current choices and applies it.
    pub fn filter(&self, leads: &[Lead], query: &FilterQuery) -> Result<Vec<Lead>> {
        let started = Instant::now();
        let choices = self.choices(leads);
        let filter = FilterForm::build(query, &choices).context("invalid filter")?;
        let matched: Vec<Lead> = filter.apply(leads).into_iter().cloned().collect();
        info!(
            total = leads.len(),
            matched = matched.len(),
            search = query.search.as_deref().map(redact_value),
            duration_ms = started.elapsed().as_millis(),
            "leads filtered"
        );
        Ok(matched)
    }
}
