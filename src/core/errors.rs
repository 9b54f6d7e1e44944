use thiserror::Error;

#[derive(Error, Debug)]
pub enum WaniKaniError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    // API-level failures carry the stage prefix plus whatever message
    // the upstream error body provided, e.g.
    // "Unable to retrieve reviews: some random error".
    #[error("{0}")]
    Api(String),

    #[error("Your Access Token is invalid. Please try reconnecting your account.")]
    InvalidAccessToken,

    #[error("WaniKaniError: {0}")]
    Custom(String),
}

impl From<reqwest::Error> for WaniKaniError {
    fn from(error: reqwest::Error) -> Self {
        WaniKaniError::Reqwest(Box::new(error))
    }
}
