use reqwest::StatusCode;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("http_error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected_response: status={status}")]
    Status { status: StatusCode, body: String },
    #[error("invalid_url: {0}")]
    Url(#[from] url::ParseError),
    #[error("authentication_required")]
    NotLoggedIn,
    #[error("action_not_allowed: {action}")]
    NotAllowed { action: &'static str },
}

impl Error {
    pub fn not_allowed(action: &'static str) -> Self {
        Self::NotAllowed { action }
    }

    /// Status of a non-success response, `None` for local or transport errors.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Status { status, .. } => Some(*status),
            Error::Http(error) => error.status(),
            Error::Url(_) | Error::NotLoggedIn | Error::NotAllowed { .. } => None,
        }
    }
}
