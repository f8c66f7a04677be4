//! Lead uploads.
//!
//! - **upload**: extension and size checks on the raw file
//! - **sheet**: CSV and first-sheet Excel reading into a header + rows table
//! - **rows**: per-row extraction through a column mapping, and validation
//! - **store**: the [`LeadStore`] seam and an in-memory implementation
//! - **repository**: JSON-file backed [`LeadStore`]
//! - **pipeline**: [`Uploader`], the upsert-by-email state machine
//! - **error_log**: last-attempt error reports per user

pub mod error;
pub mod error_log;
pub mod pipeline;
pub mod repository;
pub mod rows;
pub mod sheet;
pub mod store;
pub mod upload;

pub use error::{RowError, StoreError, UploadError};
pub use error_log::UploadErrorLog;
pub use pipeline::{
    DefaultSources, ErrorReport, RowFailure, UploadReport, UploadRequest, Uploader, attempt_id,
};
pub use repository::JsonLeadRepository;
pub use rows::{extract_draft, validate_draft};
pub use sheet::{SheetTable, read_sheet};
pub use store::{AppliedChanges, LeadChange, LeadStore, MemoryLeadStore};
pub use upload::{DEFAULT_MAX_UPLOAD_BYTES, FileKind, UploadFile, UploadLimits, validate_upload};
