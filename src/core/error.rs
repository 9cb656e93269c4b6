use std::io;

#[derive(thiserror::Error, Debug)]
pub enum SentinelError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("url is too long ({0} characters, max {1})")]
    InputTooLong(usize, usize),
    #[error("network error: {0}")]
    Network(String),
    #[error("timeout")]
    Timeout,
    #[error("http error: {0}")]
    Http(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("unknown error")]
    Unknown,
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<reqwest::Error> for SentinelError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SentinelError::Timeout
        } else if err.is_connect() {
            SentinelError::Network(err.to_string())
        } else if err.is_status() {
            SentinelError::Http(err.to_string())
        } else if err.is_decode() {
            SentinelError::Decode(err.to_string())
        } else if err.is_request() || err.is_body() {
            SentinelError::Network(err.to_string())
        } else {
            SentinelError::Unknown
        }
    }
}

impl From<url::ParseError> for SentinelError {
    fn from(err: url::ParseError) -> Self {
        SentinelError::InvalidUrl(err.to_string())
    }
}

impl From<toml::de::Error> for SentinelError {
    fn from(err: toml::de::Error) -> Self {
        SentinelError::Config(err.to_string())
    }
}
