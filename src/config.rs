//! Process-wide settings, built once at startup and passed by reference.
use crate::cli::Cli;
use crate::options::{Options, OptionsError};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    /// Full webhook URL, already joined with the base when only an id was given.
    pub webhook_url: String,
    pub store_path: PathBuf,
    pub window: chrono::Duration,
    pub page_size: u8,
    pub template: String,
    pub token_url: String,
    pub helix_url: String,
    pub timeout: Option<Duration>,
    pub debug: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing value for {0}")]
    Missing(&'static str),
    #[error("The clip page size must be between 1 and 100, got {0}")]
    PageSize(u8),
    #[error("The clip window must be a positive number of hours, got {0}")]
    Window(i64),
    #[error(transparent)]
    Options(#[from] OptionsError),
}

impl Config {
    /// Merges the command line with an options file. Command line values win.
    pub fn new(cli: Cli, options: Options) -> Result<Self, ConfigError> {
        let client_id = non_empty(cli.client_id, "TWITCH_CLIENT_ID")?;
        let client_secret = non_empty(cli.client_secret, "TWITCH_CLIENT_SECRET")?;
        let username = non_empty(cli.username, "TWITCH_USERNAME")?;
        let webhook = non_empty(cli.webhook, "DISCORD_WEBHOOK")?;

        if !(1..=100).contains(&options.fetch.page_size) {
            return Err(ConfigError::PageSize(options.fetch.page_size));
        }
        if options.fetch.window_hours <= 0 {
            return Err(ConfigError::Window(options.fetch.window_hours));
        }

        Ok(Config {
            client_id,
            client_secret,
            username: username.to_lowercase(),
            webhook_url: webhook_url(&options.endpoints.webhook_url, &webhook),
            store_path: PathBuf::from(cli.store.unwrap_or(options.store.path)),
            window: chrono::Duration::hours(options.fetch.window_hours),
            page_size: options.fetch.page_size,
            template: options.message.template,
            token_url: options.endpoints.token_url,
            helix_url: options.endpoints.helix_url.trim_end_matches('/').to_owned(),
            timeout: options.exec.timeout_secs.map(Duration::from_secs),
            debug: cli.debug || options.exec.debug,
        })
    }

    /// Loads the options file named on the command line, or the defaults.
    pub fn from_cli(mut cli: Cli) -> Result<Self, ConfigError> {
        let options = match cli.options_file.take() {
            Some(path) => Options::from_file(path)?,
            None => Options::default(),
        };
        Config::new(cli, options)
    }

    pub fn http_client(&self) -> reqwest::Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }
}

fn non_empty(value: String, name: &'static str) -> Result<String, ConfigError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ConfigError::Missing(name))
    } else {
        Ok(value.to_owned())
    }
}

fn webhook_url(base: &str, webhook: &str) -> String {
    if webhook.starts_with("https://") || webhook.starts_with("http://") {
        String::from(webhook)
    } else {
        format!(
            "{}/{}",
            base.trim_end_matches('/'),
            webhook.trim_start_matches('/')
        )
    }
}
