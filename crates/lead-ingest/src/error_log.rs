//! Last-attempt error reports, one per user.
//!
//! Each upload attempt replaces the user's previous report, even when the new
//! attempt has no failures or fails as a whole, so a download always refers to
//! the most recent attempt.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::StoreError;
use crate::pipeline::ErrorReport;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadErrorLog {
    #[serde(default)]
    reports: BTreeMap<String, ErrorReport>,
}

impl UploadErrorLog {
    /// Loads the log from `path`; a missing file is an empty log.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                serde_json::from_str(&contents).map_err(|err| StoreError::json(path, err))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(StoreError::io(path, err)),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|err| StoreError::io(parent, err))?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|err| StoreError::json(path, err))?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|err| StoreError::io(&tmp, err))?;
        fs::rename(&tmp, path).map_err(|err| StoreError::io(path, err))?;
        debug!(path = %path.display(), users = self.reports.len(), "error log saved");
        Ok(())
    }

    /// Replaces the uploader's report with this attempt's.
    pub fn record(&mut self, report: ErrorReport) {
        self.reports.insert(report.uploaded_by.clone(), report);
    }

    /// Forgets the user's previous report, e.g. after an attempt that failed as a whole.
    pub fn clear(&mut self, user: &str) {
        self.reports.remove(user);
    }

    /// The user's latest report, if that attempt had any failures.
    pub fn latest(&self, user: &str) -> Option<&ErrorReport> {
        self.reports.get(user).filter(|report| !report.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::pipeline::RowFailure;

    fn report(user: &str, attempt: &str, failures: usize) -> ErrorReport {
        ErrorReport {
            attempt_id: attempt.to_string(),
            file_name: "leads.csv".to_string(),
            uploaded_by: user.to_string(),
            uploaded_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            headers: vec!["Email".to_string()],
            failures: (0..failures)
                .map(|index| RowFailure {
                    row_number: index + 2,
                    message: "first_name is required".to_string(),
                    values: vec!["x@y.io".to_string()],
                })
                .collect(),
        }
    }

    #[test]
    fn new_attempt_replaces_previous() {
        let mut log = UploadErrorLog::default();
        log.record(report("ana", "one", 2));
        log.record(report("ben", "two", 1));
        log.record(report("ana", "three", 0));
        assert!(log.latest("ana").is_none());
        assert_eq!(log.latest("ben").map(|r| r.attempt_id.as_str()), Some("two"));
        log.clear("ben");
        assert!(log.latest("ben").is_none());
    }

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("upload_errors.json");
        assert_eq!(UploadErrorLog::load(&path).expect("load"), UploadErrorLog::default());

        let mut log = UploadErrorLog::default();
        log.record(report("ana", "one", 1));
        log.save(&path).expect("save");
        assert_eq!(UploadErrorLog::load(&path).expect("reload"), log);
    }
}
