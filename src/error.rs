use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Settings error: {0}")]
    Settings(#[from] ::config::ConfigError),
    #[error("Key error: {0}")]
    Key(String),
    #[error("missing params {}", .0.join(","))]
    MissingParams(Vec<String>),
    #[error("Protocol error: {0}")]
    Protocol(String),
    #[error("Business error: {code}")]
    Business { code: String, message: Option<String> },
    #[error("Missing data: response has no `{0}`")]
    MissingData(String),
    #[error("Unsupported signature type: {0}")]
    UnsupportedSignType(String),
    #[error("Signature verification failed")]
    InvalidSignature,
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("XML error: {0}")]
    Xml(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GatewayError>;
