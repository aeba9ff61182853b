use thiserror::Error;

#[derive(Error, Debug)]
pub enum BingxError {
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    #[error("API error {code}: {msg}")]
    Api { code: i64, msg: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API keys not configured (set BINGX_API_KEY and BINGX_API_SECRET)")]
    MissingCredentials,

    #[error("signing error: {0}")]
    Signing(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("response for {0} carried no data")]
    EmptyData(&'static str),

    #[error("reference data error: {0}")]
    Reference(#[from] crate::reference::ReferenceError),
}

pub type Result<T> = std::result::Result<T, BingxError>;
