//! One pass of the pipeline: token, broadcaster, clips, diff, announce, save.
use crate::auth;
use crate::clip;
use crate::config::Config;
use crate::error::RelayError;
use crate::notify::Webhook;
use crate::store::{SaveOutcome, SeenStore};
use crate::twitch::{self, HelixAuth};
use chrono::{DateTime, Utc};
use reqwest::Client;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    TokenAcquired,
    BroadcasterResolved,
    ClipsFetched,
    Diffed,
    Notified,
    Persisted,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every fetched clip had already been announced. The log wasn't touched.
    NoNewClips,
    Announced { count: usize, log: SaveOutcome },
}

#[derive(Debug)]
pub struct Relay<'a> {
    config: &'a Config,
    client: Client,
    store: SeenStore,
    webhook: Webhook,
}

impl<'a> Relay<'a> {
    pub fn new(config: &'a Config, client: Client) -> Self {
        Relay {
            config,
            store: SeenStore::new(&config.store_path),
            webhook: Webhook::new(
                client.clone(),
                config.webhook_url.clone(),
                config.template.clone(),
            ),
            client,
        }
    }

    /// Runs the pipeline once, looking back `config.window` from `now`.
    ///
    /// Clips are only recorded after all of them were announced, so a failed
    /// announcement gets the whole batch retried on the next run.
    pub async fn run(&self, now: DateTime<Utc>) -> Result<RunOutcome, RelayError> {
        let mut stage = Stage::Init;

        let access = auth::acquire_token(&self.client, self.config)
            .await
            .map_err(RelayError::Auth)?;
        advance(&mut stage, Stage::TokenAcquired);

        let helix = HelixAuth {
            client: self.client.clone(),
            helix_url: self.config.helix_url.clone(),
            client_id: self.config.client_id.clone(),
            access,
        };
        let broadcaster_id = twitch::resolve_broadcaster(&helix, &self.config.username)
            .await
            .map_err(RelayError::Resolve)?;
        advance(&mut stage, Stage::BroadcasterResolved);

        let clips = twitch::fetch_recent_clips(
            &helix,
            &broadcaster_id,
            now - self.config.window,
            self.config.page_size,
        )
        .await
        .map_err(RelayError::Fetch)?;
        advance(&mut stage, Stage::ClipsFetched);

        let seen = self.store.load().map_err(RelayError::Load)?;
        let fresh = clip::unseen(&clips, &seen);
        advance(&mut stage, Stage::Diffed);
        tracing::info!(
            fetched = clips.len(),
            seen = seen.len(),
            new = fresh.len(),
            "Compared clips against the log"
        );

        if fresh.is_empty() {
            advance(&mut stage, Stage::Done);
            return Ok(RunOutcome::NoNewClips);
        }

        for clip in &fresh {
            self.webhook
                .notify(clip)
                .await
                .map_err(|source| RelayError::Notify {
                    clip_id: clip.id.clone(),
                    source,
                })?;
        }
        advance(&mut stage, Stage::Notified);

        let log = self
            .store
            .save_if_changed(&clips)
            .map_err(RelayError::Persist)?;
        tracing::info!(log = %self.store.path().display(), outcome = ?log, "Saved clips log");
        advance(&mut stage, Stage::Persisted);
        advance(&mut stage, Stage::Done);

        Ok(RunOutcome::Announced {
            count: fresh.len(),
            log,
        })
    }
}

impl RunOutcome {
    pub fn status_line(&self) -> &'static str {
        match self {
            RunOutcome::NoNewClips => "No new clips to send.",
            RunOutcome::Announced {
                log: SaveOutcome::Updated,
                ..
            } => "Clips log updated.",
            RunOutcome::Announced {
                log: SaveOutcome::Unchanged,
                ..
            } => "No new clips to update.",
        }
    }
}

fn advance(stage: &mut Stage, next: Stage) {
    let from = *stage;
    tracing::info!(?from, to = ?next, "Relay stage");
    *stage = next;
}
