//! Per-group configuration store backed by a flat JSON file.
//!
//! The whole store is held in memory and rewritten to disk on every persist.
//! Load and save failures are logged and swallowed: a failed load starts with
//! an empty store, a failed save accepts the data loss. Nothing here is fatal.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Named personality profile applied to bot output.
///
/// Only `name` is mutated at runtime (via `/setpersona`); the other fields are
/// fixed defaults carried for the output signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub name: String,
    pub language: String,
    pub tone: String,
    pub signature: String,
}

impl Default for Persona {
    fn default() -> Self {
        Self {
            name: "Miss".into(),
            language: "hi".into(),
            tone: "friendly".into(),
            signature: "🌸 Miss".into(),
        }
    }
}

/// Per-chat record: autoreply toggle plus persona.
///
/// Created lazily with defaults on first reference to a chat; mutated only by
/// admin commands; never deleted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupConfig {
    #[serde(default)]
    pub autoreply: bool,
    #[serde(default)]
    pub persona: Persona,
}

/// On-disk layout: `{"groups": {"<chat id>": {...}}}`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    groups: HashMap<String, GroupConfig>,
}

/// Owner of all `GroupConfig` records, keyed by chat id.
#[derive(Debug)]
pub struct GroupStore {
    path: PathBuf,
    groups: HashMap<String, GroupConfig>,
}

impl GroupStore {
    /// Load the store from `path`, falling back to an empty store if the file
    /// is missing or unreadable.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let groups = match read_store_file(&path) {
            Ok(Some(file)) => file.groups,
            Ok(None) => HashMap::new(),
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to load group store");
                HashMap::new()
            }
        };
        Self { path, groups }
    }

    /// In-memory store that persists to `path` (which need not exist yet).
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            groups: HashMap::new(),
        }
    }

    pub fn get(&self, chat_id: &str) -> Option<&GroupConfig> {
        self.groups.get(chat_id)
    }

    /// Get the config for a chat, creating (and persisting) a default record
    /// on first reference.
    pub fn get_or_create_default(&mut self, chat_id: &str) -> &GroupConfig {
        if !self.groups.contains_key(chat_id) {
            self.groups
                .insert(chat_id.to_string(), GroupConfig::default());
            self.persist();
        }
        // Key inserted above if absent.
        &self.groups[chat_id]
    }

    /// Set the autoreply flag for a chat and persist.
    pub fn set_autoreply(&mut self, chat_id: &str, enabled: bool) {
        self.get_or_create_default(chat_id);
        if let Some(conf) = self.groups.get_mut(chat_id) {
            conf.autoreply = enabled;
        }
        self.persist();
    }

    /// Set the persona name for a chat and persist.
    pub fn set_persona_name(&mut self, chat_id: &str, name: &str) {
        self.get_or_create_default(chat_id);
        if let Some(conf) = self.groups.get_mut(chat_id) {
            conf.persona.name = name.to_string();
        }
        self.persist();
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Write the whole store to disk. Failures are logged, never propagated.
    pub fn persist(&self) {
        if let Err(e) = self.write_store_file() {
            tracing::error!(path = %self.path.display(), error = %e, "failed to save group store");
        }
    }

    fn write_store_file(&self) -> Result<(), StoreError> {
        let file = StoreFile {
            groups: self.groups.clone(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

fn read_store_file(path: &Path) -> Result<Option<StoreFile>, StoreError> {
    if !path.is_file() {
        return Ok(None);
    }
    let raw = std::fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&raw)?))
}
