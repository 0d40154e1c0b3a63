use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Remote(String),

    #[error("Rate limited by the service: {0}")]
    RateLimited(String),

    #[error("Unexpected response from the service: {0}")]
    UnexpectedResponse(#[from] serde_json::Error),

    #[error("Invalid service endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("Service endpoint must be an absolute URL: {0}")]
    RelativeEndpoint(String),
}
