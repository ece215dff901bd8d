pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid variant: {0}")]
    InvalidVariant(String),

    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("key error: {0}")]
    Key(String),

    #[error("signature error: {0}")]
    Signature(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
