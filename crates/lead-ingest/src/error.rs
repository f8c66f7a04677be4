use std::path::PathBuf;

use lead_model::{LeadField, LeadId, ModelError};

/// File-level failures. Any of these aborts the upload before rows are stored.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("unsupported file type '{name}': upload a .csv, .xls or .xlsx file")]
    UnsupportedExtension { name: String },

    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("file is too large ({size} bytes); the limit is {max} bytes")]
    TooLarge { size: u64, max: u64 },

    #[error("the uploaded file is empty")]
    EmptyFile,

    #[error("the uploaded file has a header row but no data rows")]
    NoDataRows,

    #[error("could not read the uploaded file: {message}")]
    Unreadable { message: String },

    #[error("none of the columns could be matched to lead fields (found: {headers})")]
    NoRecognizedColumns { headers: String },

    #[error("lead store lookup failed: {0}")]
    Lookup(#[source] StoreError),

    #[error("upload was rolled back, no rows were saved: {0}")]
    Commit(#[source] StoreError),
}

impl UploadError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn unreadable(err: impl std::fmt::Display) -> Self {
        Self::Unreadable {
            message: err.to_string(),
        }
    }
}

/// Row-level failures. These are collected and never stop later rows.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    #[error("{0} is required")]
    MissingField(LeadField),

    #[error("{field} is not a valid email address: '{value}'")]
    InvalidEmail { field: LeadField, value: String },

    #[error("{field} is longer than {max} characters")]
    TooLong { field: LeadField, max: usize },

    #[error("a lead with email {email} already exists (enable overwrite to update it)")]
    Duplicate { email: String },

    #[error("lead_id {lead_id} is already used by another lead")]
    DuplicateLeadId { lead_id: String },

    #[error(transparent)]
    Model(#[from] ModelError),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access lead store {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse lead store {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("email {0} is already used by another lead")]
    DuplicateEmail(String),

    #[error("lead_id {0} is already used by another lead")]
    DuplicateLeadId(String),

    #[error("lead {0} does not exist")]
    NotFound(LeadId),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}
