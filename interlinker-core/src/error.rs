use interlinker_scanner::ScanError;
use thiserror::Error;

/// Problems the operator has to fix before anything is crawled.
#[derive(Error, Debug)]
pub enum InterlinkError {
    #[error("Please enter a homepage URL")]
    MissingHomepage,

    #[error("Invalid homepage URL '{0}': expected an http(s) address")]
    InvalidHomepage(String),

    #[error("Please enter at least one target URL")]
    NoTargets,

    #[error(transparent)]
    Scan(#[from] ScanError),
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, InterlinkError>;
