//! Uploaded file checks that run before any parsing.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::UploadError;

/// Default upload size cap: 10 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// An uploaded file held in memory.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Reads a file from disk, keeping only its file name.
    ///
    /// The extension and the size cap are checked before any bytes are read,
    /// and never more than `limits.max_bytes + 1` bytes are buffered.
    pub fn read(path: &Path, limits: &UploadLimits) -> Result<Self, UploadError> {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        if FileKind::from_name(&name).is_none() {
            return Err(UploadError::UnsupportedExtension { name });
        }

        let file = File::open(path).map_err(|err| UploadError::read(path, err))?;
        let size = file
            .metadata()
            .map_err(|err| UploadError::read(path, err))?
            .len();
        if size > limits.max_bytes {
            return Err(UploadError::TooLarge {
                size,
                max: limits.max_bytes,
            });
        }

        let mut bytes = Vec::new();
        file.take(limits.max_bytes.saturating_add(1))
            .read_to_end(&mut bytes)
            .map_err(|err| UploadError::read(path, err))?;
        Ok(Self { name, bytes })
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Spreadsheet flavor, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Csv,
    Excel,
}

impl FileKind {
    /// Case-insensitive extension check: `csv`, `xls` or `xlsx`.
    pub fn from_name(name: &str) -> Option<Self> {
        let extension = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "csv" => Some(Self::Csv),
            "xls" | "xlsx" => Some(Self::Excel),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Excel => "excel",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadLimits {
    pub max_bytes: u64,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Checks extension, size and emptiness, in that order.
pub fn validate_upload(file: &UploadFile, limits: &UploadLimits) -> Result<FileKind, UploadError> {
    let kind = FileKind::from_name(&file.name).ok_or_else(|| UploadError::UnsupportedExtension {
        name: file.name.clone(),
    })?;
    if file.size() > limits.max_bytes {
        return Err(UploadError::TooLarge {
            size: file.size(),
            max: limits.max_bytes,
        });
    }
    if file.bytes.is_empty() {
        return Err(UploadError::EmptyFile);
    }
    Ok(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_check_ignores_case() {
        assert_eq!(FileKind::from_name("leads.CSV"), Some(FileKind::Csv));
        assert_eq!(FileKind::from_name("leads.xlsx"), Some(FileKind::Excel));
        assert_eq!(FileKind::from_name("leads.Xls"), Some(FileKind::Excel));
        assert_eq!(FileKind::from_name("leads.txt"), None);
        assert_eq!(FileKind::from_name("leads"), None);
    }

    #[test]
    fn rejects_oversized_files() {
        let file = UploadFile::new("big.csv", vec![b'a'; 11]);
        let limits = UploadLimits { max_bytes: 10 };
        assert!(matches!(
            validate_upload(&file, &limits),
            Err(UploadError::TooLarge { size: 11, max: 10 })
        ));
    }

    #[test]
    fn size_at_limit_is_accepted() {
        let file = UploadFile::new("ok.csv", vec![b'a'; 10]);
        let limits = UploadLimits { max_bytes: 10 };
        assert_eq!(validate_upload(&file, &limits).unwrap(), FileKind::Csv);
    }

    #[test]
    fn rejects_empty_and_unsupported() {
        let limits = UploadLimits::default();
        assert!(matches!(
            validate_upload(&UploadFile::new("empty.csv", Vec::new()), &limits),
            Err(UploadError::EmptyFile)
        ));
        assert!(matches!(
            validate_upload(&UploadFile::new("leads.pdf", vec![1]), &limits),
            Err(UploadError::UnsupportedExtension { .. })
        ));
    }

    #[test]
    fn read_checks_size_before_buffering() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("big.csv");
        std::fs::write(&path, "email\na@x.io\n").expect("write");

        let limits = UploadLimits { max_bytes: 4 };
        assert!(matches!(
            UploadFile::read(&path, &limits),
            Err(UploadError::TooLarge { size: 13, max: 4 })
        ));

        let file = UploadFile::read(&path, &UploadLimits::default()).expect("read");
        assert_eq!(file.name, "big.csv");
        assert_eq!(file.size(), 13);
    }

    #[test]
    fn read_rejects_extension_before_opening() {
        let missing = Path::new("/nonexistent/leads.pdf");
        assert!(matches!(
            UploadFile::read(missing, &UploadLimits::default()),
            Err(UploadError::UnsupportedExtension { name }) if name == "leads.pdf"
        ));
        assert!(matches!(
            UploadFile::read(Path::new("/nonexistent/leads.csv"), &UploadLimits::default()),
            Err(UploadError::Read { .. })
        ));
    }
}
