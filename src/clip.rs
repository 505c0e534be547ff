use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// A clip as returned by Helix. Fields the relay doesn't read are kept in
/// `extra` so the stored log holds the whole object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Clip {
    pub id: String,
    pub broadcaster_name: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Clip {
    /// Fills `{id}`, `{broadcaster_name}`, `{creator_name}`, `{title}` and
    /// `{url}` in a message template. Missing fields render empty.
    pub fn render(&self, template: &str) -> String {
        template
            .replace("{id}", &self.id)
            .replace("{broadcaster_name}", &self.broadcaster_name)
            .replace("{creator_name}", self.creator_name.as_deref().unwrap_or(""))
            .replace("{title}", self.title.as_deref().unwrap_or(""))
            .replace("{url}", &self.url)
    }
}

/// Clips of `fetched` whose id isn't in `seen`, in fetch order. A clip
/// listed twice is returned once.
pub fn unseen<'a>(fetched: &'a [Clip], seen: &HashSet<String>) -> Vec<&'a Clip> {
    let mut taken = HashSet::new();
    fetched
        .iter()
        .filter(|clip| !seen.contains(&clip.id) && taken.insert(clip.id.as_str()))
        .collect()
}
