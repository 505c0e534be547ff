use crate::clip::Clip;
use reqwest::Client;
use serde::Serialize;

/// Posts clip announcements to a Discord webhook.
#[derive(Debug, Clone)]
pub struct Webhook {
    client: Client,
    url: String,
    template: String,
}

#[derive(Debug, Serialize)]
struct WebhookMessage<'a> {
    content: &'a str,
}

#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("Error sending a request to Discord: {0}")]
    Net(#[source] reqwest::Error),
    #[error("Discord rejected the message with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

impl Webhook {
    pub fn new(client: Client, url: String, template: String) -> Self {
        Webhook {
            client,
            url,
            template,
        }
    }

    pub fn message(&self, clip: &Clip) -> String {
        clip.render(&self.template)
    }

    pub async fn notify(&self, clip: &Clip) -> Result<(), WebhookError> {
        let content = self.message(clip);
        let response = self
            .client
            .post(&self.url)
            .json(&WebhookMessage { content: &content })
            .send()
            .await
            .map_err(|err| WebhookError::Net(err.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WebhookError::Rejected {
                status: status.as_u16(),
                body: body.trim().chars().take(200).collect(),
            });
        }
        tracing::debug!(clip = %clip.id, "Clip announced");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::tests::clip;
    use crate::testing::{closed_port, MockServer};

    fn webhook(server: &MockServer, template: &str) -> Webhook {
        Webhook::new(
            Client::new(),
            server.url("/api/webhooks/123/abc"),
            String::from(template),
        )
    }

    #[tokio::test]
    async fn posts_rendered_content() {
        let server = MockServer::start();
        server.respond("POST", "/api/webhooks/123/abc", 204, "");

        webhook(&server, "{broadcaster_name} clipped {title}: {url}")
            .notify(&clip("c1"))
            .await
            .unwrap();

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].headers["content-type"], "application/json");
        let body: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "content": "eye_motif clipped clip c1: https://clips.twitch.tv/c1"
            })
        );
    }

    #[tokio::test]
    async fn transport_errors_do_not_leak_the_webhook_token() {
        let hook = Webhook::new(
            Client::new(),
            format!("http://{}/api/webhooks/123/HOOKTOKEN", closed_port()),
            String::from("{url}"),
        );

        let err = hook.notify(&clip("c1")).await.unwrap_err();
        assert!(matches!(err, WebhookError::Net(_)));
        assert!(!err.to_string().contains("HOOKTOKEN"));
        assert!(!format!("{err:?}").contains("HOOKTOKEN"));
    }

    #[tokio::test]
    async fn non_success_is_rejected() {
        let server = MockServer::start();
        server.respond(
            "POST",
            "/api/webhooks/123/abc",
            404,
            r#"{"message": "Unknown Webhook", "code": 10015}"#,
        );

        match webhook(&server, "{url}").notify(&clip("c1")).await {
            Err(WebhookError::Rejected { status, body }) => {
                assert_eq!(status, 404);
                assert!(body.contains("Unknown Webhook"));
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }
}
