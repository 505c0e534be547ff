use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct Options {
    pub store: Store,
    pub fetch: Fetch,
    pub message: Message,
    pub endpoints: Endpoints,
    pub exec: Exec,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct Store {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct Fetch {
    pub window_hours: i64,
    pub page_size: u8,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct Message {
    pub template: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct Endpoints {
    pub token_url: String,
    pub helix_url: String,
    pub webhook_url: String,
}

#[derive(Debug, Deserialize, Clone, Copy, Default)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct Exec {
    pub debug: bool,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("Error reading the options file: {0}")]
    IO(#[from] std::io::Error),
    #[error("Error parsing the options file: {0}")]
    Parse(#[from] toml::de::Error),
}

impl Options {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, OptionsError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self {
            path: String::from("./data/clips_sent.json"),
        }
    }
}
impl Default for Fetch {
    fn default() -> Self {
        Self {
            window_hours: 24,
            page_size: 20,
        }
    }
}
impl Default for Message {
    fn default() -> Self {
        Self {
            template: String::from("🎥 Nouveau clip créé par {broadcaster_name}!\n{url}"),
        }
    }
}
impl Default for Endpoints {
    fn default() -> Self {
        Self {
            token_url: String::from("https://id.twitch.tv/oauth2/token"),
            helix_url: String::from("https://api.twitch.tv/helix"),
            webhook_url: String::from("https://discord.com/api/webhooks"),
        }
    }
}
