use crate::auth::AppAccessToken;
use crate::clip::Clip;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Everything needed to call Helix on behalf of the app.
#[derive(Debug, Clone)]
pub struct HelixAuth {
    pub client: Client,
    pub helix_url: String,
    pub client_id: String,
    pub access: AppAccessToken,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TwitchError {
    pub error: Option<String>,
    pub status: u16,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum HelixError {
    #[error("Error sending a request to Twitch: {0}")]
    Net(#[source] reqwest::Error),
    #[error("Error parsing a response from Twitch: {0}")]
    BadData(#[source] serde_json::Error),
    #[error("Twitch refused the Access Token: {0}")]
    Unauthorized(TwitchError),
    #[error("{0}")]
    OnRequest(TwitchError),
    #[error("No Twitch user is named {0}")]
    UserNotFound(String),
}

#[derive(Debug, Deserialize)]
struct HelixData<T> {
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct User {
    id: String,
    login: String,
}

impl TwitchError {
    /// Decodes a Twitch error body, falling back to the raw status when the
    /// body isn't one.
    pub fn from_body(status: u16, body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_else(|_| TwitchError {
            error: StatusCode::from_u16(status)
                .ok()
                .and_then(|status| status.canonical_reason())
                .map(String::from),
            status,
            message: body.trim().chars().take(200).collect(),
        })
    }
}

async fn helix_get<T: DeserializeOwned>(
    auth: &HelixAuth,
    endpoint: &str,
    query: &str,
) -> Result<T, HelixError> {
    tracing::debug!(endpoint, query, "Helix GET");
    let response = auth
        .client
        .get(format!("{}/{endpoint}?{query}", auth.helix_url))
        .header("Client-Id", &auth.client_id)
        .header("Authorization", format!("Bearer {}", auth.access.secret()))
        .send()
        .await
        .map_err(|err| HelixError::Net(err.without_url()))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|err| HelixError::Net(err.without_url()))?;

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(HelixError::Unauthorized(
            TwitchError::from_body(status.as_u16(), &body),
        )),
        status if !status.is_success() => Err(HelixError::OnRequest(TwitchError::from_body(
            status.as_u16(),
            &body,
        ))),
        _ => serde_json::from_str(&body).map_err(HelixError::BadData),
    }
}

/// Looks up the broadcaster id of `login`.
///
/// # Errors
/// `HelixError::UserNotFound` if Twitch knows no such user.
pub async fn resolve_broadcaster(auth: &HelixAuth, login: &str) -> Result<String, HelixError> {
    let users: HelixData<User> = helix_get(
        auth,
        "users",
        &format!("login={}", urlencoding::encode(login)),
    )
    .await?;

    let user = users
        .data
        .into_iter()
        .next()
        .ok_or_else(|| HelixError::UserNotFound(String::from(login)))?;
    tracing::debug!(login = %user.login, id = %user.id, "Resolved broadcaster");
    Ok(user.id)
}

/// Fetches the first page of clips created for `broadcaster_id` since `since`.
pub async fn fetch_recent_clips(
    auth: &HelixAuth,
    broadcaster_id: &str,
    since: DateTime<Utc>,
    page_size: u8,
) -> Result<Vec<Clip>, HelixError> {
    let started_at = since.to_rfc3339_opts(SecondsFormat::Secs, true);
    let clips: HelixData<Clip> = helix_get(
        auth,
        "clips",
        &format!(
            "broadcaster_id={}&started_at={}&first={page_size}",
            urlencoding::encode(broadcaster_id),
            urlencoding::encode(&started_at),
        ),
    )
    .await?;
    Ok(clips.data)
}

impl std::fmt::Display for TwitchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let error = if let Some(error) = &self.error {
            format!(" {error}")
        } else {
            String::new()
        };
        f.write_fmt(format_args!(
            "Twitch error {}{}: {}",
            self.status, error, self.message,
        ))
    }
}
impl std::error::Error for TwitchError {}
