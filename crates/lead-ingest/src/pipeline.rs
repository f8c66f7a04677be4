//! The upload pipeline.
//!
//! ```text
//! validate file -> read sheet -> map headers -> per row:
//!     extract -> validate -> look up by email -> check lead_id
//!     -> stage insert/update | record failure
//! -> commit all staged changes at once -> report
//! ```
//!
//! Row failures never stop later rows. Everything that succeeded is applied to the
//! store in a single [`LeadStore::apply`] call; if that fails nothing is kept.

use std::collections::HashMap;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info, info_span, warn};

use lead_map::{ColumnMapper, ColumnMapping};
use lead_model::{Lead, LeadDraft, LeadField, LeadId, email_key};

use crate::error::{RowError, UploadError};
use crate::rows::{extract_draft, validate_draft};
use crate::sheet::read_sheet;
use crate::store::{LeadChange, LeadStore};
use crate::upload::{FileKind, UploadFile, UploadLimits, validate_upload};

const REDACTED_VALUE: &str = "[REDACTED]";

/// `source` value for new leads whose row has no source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultSources {
    pub csv: String,
    pub excel: String,
}

impl Default for DefaultSources {
    fn default() -> Self {
        Self {
            csv: "Uploaded CSV".to_string(),
            excel: "Uploaded Excel".to_string(),
        }
    }
}

impl DefaultSources {
    pub fn for_kind(&self, kind: FileKind) -> &str {
        match kind {
            FileKind::Csv => &self.csv,
            FileKind::Excel => &self.excel,
        }
    }
}

/// Who is uploading and how duplicates are treated.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub created_by: String,
    /// Update leads whose email already exists instead of failing the row.
    pub overwrite: bool,
    /// Include row values (emails) in debug logs.
    pub log_data: bool,
    pub at: DateTime<Utc>,
}

impl UploadRequest {
    pub fn new(created_by: impl Into<String>) -> Self {
        Self {
            created_by: created_by.into(),
            overwrite: false,
            log_data: false,
            at: Utc::now(),
        }
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn with_log_data(mut self, log_data: bool) -> Self {
        self.log_data = log_data;
        self
    }

    pub fn at(mut self, at: DateTime<Utc>) -> Self {
        self.at = at;
        self
    }

    fn shown<'a>(&self, value: &'a str) -> &'a str {
        if self.log_data { value } else { REDACTED_VALUE }
    }
}

/// One row that could not be imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowFailure {
    /// Spreadsheet row number: data index + 2 (1-based, after the header).
    pub row_number: usize,
    pub message: String,
    /// The row's cells, aligned with the upload's headers.
    pub values: Vec<String>,
}

/// Downloadable failures of one upload attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub attempt_id: String,
    pub file_name: String,
    pub uploaded_by: String,
    pub uploaded_at: DateTime<Utc>,
    pub headers: Vec<String>,
    pub failures: Vec<RowFailure>,
}

impl ErrorReport {
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Outcome of a completed upload.
#[derive(Debug, Clone, Serialize)]
pub struct UploadReport {
    pub attempt_id: String,
    pub file_name: String,
    pub file_kind: FileKind,
    pub uploaded_by: String,
    pub uploaded_at: DateTime<Utc>,
    /// Data rows read, excluding blank rows.
    pub total_rows: usize,
    /// Leads inserted.
    pub created: usize,
    /// Existing leads updated.
    pub updated: usize,
    pub mapping: ColumnMapping,
    pub headers: Vec<String>,
    pub failures: Vec<RowFailure>,
}

impl UploadReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Rows that were imported, counting repeated emails once per row.
    pub fn succeeded(&self) -> usize {
        self.total_rows - self.failures.len()
    }

    pub fn error_report(&self) -> ErrorReport {
        ErrorReport {
            attempt_id: self.attempt_id.clone(),
            file_name: self.file_name.clone(),
            uploaded_by: self.uploaded_by.clone(),
            uploaded_at: self.uploaded_at,
            headers: self.headers.clone(),
            failures: self.failures.clone(),
        }
    }
}

/// Identifier for one upload attempt: short hash of who, what and when.
pub fn attempt_id(created_by: &str, file_name: &str, at: DateTime<Utc>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(created_by.as_bytes());
    hasher.update([0]);
    hasher.update(file_name.as_bytes());
    hasher.update([0]);
    hasher.update(at.to_rfc3339().as_bytes());
    hex::encode(&hasher.finalize()[..8])
}

/// Leads staged for the single commit, indexed by email key and `lead_id`.
#[derive(Default)]
struct Staged {
    changes: Vec<LeadChange>,
    by_email: HashMap<String, usize>,
    by_lead_id: HashMap<String, usize>,
}

impl Staged {
    fn push(&mut self, key: String, change: LeadChange) {
        let position = self.changes.len();
        self.by_email.insert(key, position);
        self.changes.push(change);
        self.index_lead_id(position);
    }

    fn lead(&self, position: usize) -> &Lead {
        match &self.changes[position] {
            LeadChange::Insert(lead) | LeadChange::Update(lead) => lead,
        }
    }

    fn lead_mut(&mut self, position: usize) -> &mut Lead {
        match &mut self.changes[position] {
            LeadChange::Insert(lead) | LeadChange::Update(lead) => lead,
        }
    }

    fn index_lead_id(&mut self, position: usize) {
        let lead_id = self.lead(position).lead_id.trim().to_string();
        if !lead_id.is_empty() {
            self.by_lead_id.insert(lead_id, position);
        }
    }

    /// Staged lead currently carrying `lead_id`. Entries left behind by a
    /// merge that changed the id are ignored.
    fn lead_id_owner(&self, lead_id: &str) -> Option<usize> {
        self.by_lead_id
            .get(lead_id)
            .copied()
            .filter(|position| self.lead(*position).lead_id.trim() == lead_id)
    }
}

/// True when `lead_id` belongs to a lead other than the row's target.
fn lead_id_taken<S: LeadStore + ?Sized>(
    store: &S,
    staged: &Staged,
    lead_id: &str,
    target: &Existing,
) -> Result<bool, UploadError> {
    if let Some(owner) = staged.lead_id_owner(lead_id) {
        return Ok(!matches!(target, Existing::Staged(position) if *position == owner));
    }
    let Some(owner) = store.find_by_lead_id(lead_id).map_err(UploadError::Lookup)? else {
        return Ok(false);
    };
    let target_id = match target {
        Existing::Staged(position) => Some(staged.lead(*position).id),
        Existing::Stored(lead) => Some(lead.id),
        Existing::None => None,
    };
    Ok(target_id != Some(owner.id))
}

enum Existing {
    Staged(usize),
    Stored(Lead),
    None,
}

/// Runs uploads against a [`LeadStore`].
#[derive(Debug, Clone, Default)]
pub struct Uploader {
    mapper: ColumnMapper,
    limits: UploadLimits,
    sources: DefaultSources,
}

impl Uploader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mapper(mut self, mapper: ColumnMapper) -> Self {
        self.mapper = mapper;
        self
    }

    pub fn with_limits(mut self, limits: UploadLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_sources(mut self, sources: DefaultSources) -> Self {
        self.sources = sources;
        self
    }

    pub fn upload<S: LeadStore + ?Sized>(
        &self,
        store: &mut S,
        file: &UploadFile,
        request: &UploadRequest,
    ) -> Result<UploadReport, UploadError> {
        let span = info_span!("upload", file = %file.name, user = %request.created_by);
        let _guard = span.enter();
        let started = Instant::now();

        let kind = validate_upload(file, &self.limits)?;
        let table = read_sheet(&file.bytes, kind)?;
        if table.headers.is_empty() {
            return Err(UploadError::EmptyFile);
        }
        if table.is_empty() {
            return Err(UploadError::NoDataRows);
        }

        let mapping = self.mapper.map_headers(&table.headers);
        if mapping.is_empty() {
            return Err(UploadError::NoRecognizedColumns {
                headers: table.headers.join(", "),
            });
        }
        let missing = mapping.missing_required();
        if !missing.is_empty() {
            warn!(
                missing = %missing.iter().map(|field| field.name()).collect::<Vec<_>>().join(", "),
                "required columns not found; affected rows will fail"
            );
        }
        info!(
            mapped = mapping.assignments.len(),
            dropped = mapping.dropped.len(),
            unmapped = mapping.unmapped.len(),
            "headers mapped"
        );

        let mut staged = Staged::default();
        let mut failures = Vec::new();
        for (index, row) in table.rows.iter().enumerate() {
            let row_number = index + 2;
            let draft = extract_draft(row, &mapping);
            let result = match validate_draft(&draft) {
                Ok(()) => self.stage_row(store, &mut staged, draft, kind, request)?,
                Err(error) => Err(error),
            };
            if let Err(error) = result {
                debug!(row = row_number, %error, "row failed");
                failures.push(RowFailure {
                    row_number,
                    message: error.to_string(),
                    values: row.clone(),
                });
            }
        }

        let (created, updated) = if staged.changes.is_empty() {
            (0, 0)
        } else {
            let applied = store
                .apply(staged.changes)
                .map_err(UploadError::Commit)?;
            (applied.inserted.len(), applied.updated.len())
        };

        let report = UploadReport {
            attempt_id: attempt_id(&request.created_by, &file.name, request.at),
            file_name: file.name.clone(),
            file_kind: kind,
            uploaded_by: request.created_by.clone(),
            uploaded_at: request.at,
            total_rows: table.rows.len(),
            created,
            updated,
            mapping,
            headers: table.headers,
            failures,
        };
        info!(
            rows = report.total_rows,
            created = report.created,
            updated = report.updated,
            failed = report.failed(),
            duration_ms = started.elapsed().as_millis(),
            "upload complete"
        );
        Ok(report)
    }

    /// Stages one validated row. The outer error is fatal, the inner one is a
    /// row failure.
    fn stage_row<S: LeadStore + ?Sized>(
        &self,
        store: &S,
        staged: &mut Staged,
        mut draft: LeadDraft,
        kind: FileKind,
        request: &UploadRequest,
    ) -> Result<Result<(), RowError>, UploadError> {
        let email = draft
            .get(&LeadField::ProfessionalEmail)
            .cloned()
            .unwrap_or_default();
        let key = email_key(&email);

        let existing = match staged.by_email.get(&key) {
            Some(position) => Existing::Staged(*position),
            None => match store.find_by_email(&key).map_err(UploadError::Lookup)? {
                Some(lead) => Existing::Stored(lead),
                None => Existing::None,
            },
        };

        if !request.overwrite && !matches!(existing, Existing::None) {
            return Ok(Err(RowError::Duplicate { email }));
        }

        if let Some(lead_id) = draft
            .get(&LeadField::LeadId)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            && lead_id_taken(store, staged, lead_id, &existing)?
        {
            return Ok(Err(RowError::DuplicateLeadId {
                lead_id: lead_id.to_string(),
            }));
        }

        let outcome = match existing {
            Existing::Staged(position) => {
                let lead = staged.lead_mut(position);
                let mut merged = lead.clone();
                if let Err(error) = merged.apply_draft(&draft, request.at) {
                    return Ok(Err(error.into()));
                }
                *lead = merged;
                staged.index_lead_id(position);
                debug!(email = request.shown(&email), "merged into row staged earlier");
                Ok(())
            }
            Existing::Stored(mut lead) => match lead.apply_draft(&draft, request.at) {
                Ok(()) => {
                    debug!(id = %lead.id, email = request.shown(&email), "staged update");
                    staged.push(key, LeadChange::Update(lead));
                    Ok(())
                }
                Err(error) => Err(error.into()),
            },
            Existing::None => {
                let source = draft.entry(LeadField::Source).or_default();
                if source.trim().is_empty() {
                    *source = self.sources.for_kind(kind).to_string();
                }
                match Lead::from_draft(LeadId::new(0), &draft, &request.created_by, request.at) {
                    Ok(lead) => {
                        debug!(email = request.shown(&email), "staged insert");
                        staged.push(key, LeadChange::Insert(lead));
                        Ok(())
                    }
                    Err(error) => Err(error.into()),
                }
            }
        };
        Ok(outcome)
    }
}
