use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} ({url})")]
    HttpStatus { status: u16, url: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Unsafe target URL: {0}")]
    UnsafeUrl(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid checklist: {0}")]
    InvalidChecklist(String),

    #[error("Rate limited: retry in {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, AuditError>;
