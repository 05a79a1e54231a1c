use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid API base URL: {0}")]
    BadBaseUrl(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status} for {url}")]
    BadStatus {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("couldn't decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

pub type ApiResult<T> = Result<T, ApiError>;
