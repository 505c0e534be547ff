//! Client-credentials exchange against Twitch's OAuth endpoint.
use super::creds::AppAccessToken;
use super::error::TokenError;
use crate::config::Config;
use crate::twitch::TwitchError;
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    // expires_in: u64,
    // token_type: String,
}

/// Requests a fresh app Access Token with the configured client id and
/// secret. Nothing is cached; every call hits Twitch.
///
/// # Errors
/// Returns `Err(TokenError...)`:
/// * `::Net` if a response was not received from Twitch.
/// * `::OnRequest` if Twitch answered with a non-success status.
/// * `::BadData` if a successful response could not be parsed.
pub async fn acquire_token(client: &Client, config: &Config) -> Result<AppAccessToken, TokenError> {
    tracing::debug!(url = %config.token_url, "Requesting an app Access Token");

    // The secret stays out of the URL, which reqwest errors would print.
    let response = client
        .post(&config.token_url)
        .form(&[
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
            ("grant_type", "client_credentials"),
        ])
        .send()
        .await
        .map_err(TokenError::net)?;
    let status = response.status();
    let body = response.text().await.map_err(TokenError::net)?;

    if !status.is_success() {
        return Err(TokenError::OnRequest(TwitchError::from_body(
            status.as_u16(),
            &body,
        )));
    }

    let response: TokenResponse = serde_json::from_str(&body).map_err(TokenError::BadData)?;
    Ok(AppAccessToken(response.access_token))
}
