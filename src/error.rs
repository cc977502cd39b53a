use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum FeedError {
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),
    #[error("source parse error: {0}")]
    SourceParse(String),
    #[error("record invalid: {0}")]
    RecordInvalid(String),
    #[error("timed out after {0:?}")]
    Timeout(std::time::Duration),
    #[error("config error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        Self::SourceUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        Self::SourceParse(err.to_string())
    }
}

impl From<String> for FeedError {
    fn from(err: String) -> Self {
        Self::SourceParse(err)
    }
}

impl From<&str> for FeedError {
    fn from(err: &str) -> Self {
        Self::SourceParse(err.to_string())
    }
}
