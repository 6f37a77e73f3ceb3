use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Unexpected status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Empty response body for {0}")]
    EmptyBody(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Gzip decompression failed: {0}")]
    Decompress(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

pub type Result<T> = std::result::Result<T, ScanError>;
