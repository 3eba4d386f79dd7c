use crate::model::RecordId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Invalid report: {0}")]
    Validation(String),

    #[error("Report id already present: {0}")]
    DuplicateId(RecordId),

    #[error("Report not found: {0}")]
    NotFound(RecordId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, ReportError>;
