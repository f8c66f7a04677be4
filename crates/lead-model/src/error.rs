use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown lead field: {0}")]
    UnknownField(String),
    #[error("invalid status '{0}' (expected New, Contacted, Qualified or Lost)")]
    InvalidStatus(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
