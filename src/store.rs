//! The log of clips already announced, kept as a JSON array on disk.
use crate::clip::Clip;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct SeenStore {
    path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Updated,
    Unchanged,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Error accessing the clips log {}: {source}", path.display())]
    IO {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("The clips log {} is not a valid JSON list of clips: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Error encoding the clips log: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Only the id of a stored clip matters when reading the log back.
#[derive(Debug, Deserialize)]
struct StoredClip {
    id: String,
}

impl SeenStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        SeenStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ids of the clips in the log. A missing log is an empty one.
    pub fn load(&self) -> Result<HashSet<String>, StoreError> {
        Ok(self.stored_ids()?.into_iter().collect())
    }

    /// Replaces the log with `clips`, sorted by id, unless it already holds
    /// exactly those ids.
    pub fn save_if_changed(&self, clips: &[Clip]) -> Result<SaveOutcome, StoreError> {
        let mut clips: Vec<&Clip> = clips.iter().collect();
        clips.sort_by(|a, b| a.id.cmp(&b.id));
        clips.dedup_by(|a, b| a.id == b.id);

        let mut existing = self.stored_ids()?;
        existing.sort();

        if clips.iter().map(|clip| &clip.id).eq(existing.iter()) {
            tracing::debug!(path = %self.path.display(), "Clips log unchanged");
            return Ok(SaveOutcome::Unchanged);
        }

        self.replace(&clips)?;
        tracing::debug!(path = %self.path.display(), clips = clips.len(), "Clips log written");
        Ok(SaveOutcome::Updated)
    }

    fn stored_ids(&self) -> Result<Vec<String>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(self.io(err)),
        };
        let stored: Vec<StoredClip> =
            serde_json::from_str(&text).map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            })?;
        Ok(stored.into_iter().map(|clip| clip.id).collect())
    }

    /// Writes next to the log and renames over it, so a failed write leaves
    /// the previous log intact.
    fn replace(&self, clips: &[&Clip]) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|err| self.io(err))?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let written = write_pretty(&tmp, clips)
            .and_then(|()| fs::rename(&tmp, &self.path).map_err(|err| self.io(err)));
        if written.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        written
    }

    fn io(&self, source: std::io::Error) -> StoreError {
        StoreError::IO {
            path: self.path.clone(),
            source,
        }
    }
}

fn write_pretty(path: &Path, clips: &[&Clip]) -> Result<(), StoreError> {
    let io = |source| StoreError::IO {
        path: path.to_owned(),
        source,
    };

    let mut writer = BufWriter::new(File::create(path).map_err(io)?);
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
    clips
        .serialize(&mut serializer)
        .map_err(StoreError::Encode)?;
    writer.write_all(b"\n").map_err(io)?;

    let file = writer
        .into_inner()
        .map_err(|err| io(err.into_error()))?;
    file.sync_all().map_err(io)
}
