use crate::auth::TokenError;
use crate::notify::WebhookError;
use crate::store::StoreError;
use crate::twitch::HelixError;

/// The step of a run that failed, carrying the underlying error.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("auth: {0}")]
    Auth(#[source] TokenError),
    #[error("resolve: {0}")]
    Resolve(#[source] HelixError),
    #[error("fetch: {0}")]
    Fetch(#[source] HelixError),
    #[error("load: {0}")]
    Load(#[source] StoreError),
    #[error("notify: clip {clip_id}: {source}")]
    Notify {
        clip_id: String,
        #[source]
        source: WebhookError,
    },
    #[error("persist: {0}")]
    Persist(#[source] StoreError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad credentials, or an auth endpoint refused the request.
    Auth,
    /// Any other non-success response, or a response that couldn't be read.
    Http,
    /// The configured broadcaster doesn't exist.
    NotFound,
    /// The clips log exists but can't be parsed.
    CorruptState,
    /// The clips log couldn't be read or written.
    Io,
}

impl RelayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RelayError::Auth(_) => ErrorKind::Auth,
            RelayError::Resolve(err) | RelayError::Fetch(err) => match err {
                HelixError::Unauthorized(_) => ErrorKind::Auth,
                HelixError::UserNotFound(_) => ErrorKind::NotFound,
                HelixError::Net(_) | HelixError::BadData(_) | HelixError::OnRequest(_) => {
                    ErrorKind::Http
                }
            },
            RelayError::Notify { .. } => ErrorKind::Http,
            RelayError::Load(err) | RelayError::Persist(err) => match err {
                StoreError::Corrupt { .. } => ErrorKind::CorruptState,
                StoreError::IO { .. } | StoreError::Encode(_) => ErrorKind::Io,
            },
        }
    }
}
