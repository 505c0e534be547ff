use crate::twitch::TwitchError;

/// An Error returned by [acquire_token](super::acquire_token).
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// An error returned while making the POST request.
    #[error("Error sending a request to Twitch: {0}")]
    Net(#[source] reqwest::Error),
    /// An error returned if the data from Twitch could not be deserialized.
    #[error("Error parsing a response from Twitch: {0}")]
    BadData(#[source] serde_json::Error),
    /// An error returned if Twitch refused to grant an Access Token.
    #[error("Error {} requesting an Access Token from Twitch: {}", .0.status, .0.message)]
    OnRequest(TwitchError),
}

impl TokenError {
    pub(crate) fn net(err: reqwest::Error) -> Self {
        TokenError::Net(err.without_url())
    }
}
