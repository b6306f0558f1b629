//! Static knowledge table of canned answers keyed by trigger phrases.
//!
//! The table is a flat JSON object of trigger phrase → answer, read once at
//! startup. Key order in the document is preserved and decides which entry
//! wins when several match the same message.

use std::fs;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur while loading the knowledge table.
#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("Failed to read knowledge file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid knowledge JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid knowledge format: {0}")]
    Format(String),
}

/// One trigger phrase and the answer it produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeEntry {
    pub trigger_phrase: String,
    pub answer: String,
}

impl KnowledgeEntry {
    /// True when every whitespace token of the trigger phrase is a substring
    /// of `normalized` (already lowercased). Token order does not matter.
    fn matches(&self, normalized: &str) -> bool {
        self.trigger_phrase
            .to_lowercase()
            .split_whitespace()
            .all(|token| normalized.contains(token))
    }
}

/// Immutable, ordered table of knowledge entries.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeStore {
    entries: Vec<KnowledgeEntry>,
}

impl KnowledgeStore {
    /// Build a store from entries, in the given priority order.
    ///
    /// Entries with a blank trigger phrase are dropped: they would match
    /// every message.
    pub fn new(entries: Vec<KnowledgeEntry>) -> Self {
        let entries = entries
            .into_iter()
            .filter(|e| {
                let keep = !e.trigger_phrase.trim().is_empty();
                if !keep {
                    warn!(answer = %e.answer, "skipping knowledge entry with empty trigger phrase");
                }
                keep
            })
            .collect();
        Self { entries }
    }

    /// An empty store; every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a flat JSON object of string keys to string values.
    pub fn from_json_str(json: &str) -> Result<Self, KnowledgeError> {
        let value: Value = serde_json::from_str(json)?;
        let Value::Object(map) = value else {
            return Err(KnowledgeError::Format(
                "top-level value must be an object".into(),
            ));
        };

        let mut entries = Vec::with_capacity(map.len());
        for (trigger_phrase, answer) in map {
            let Value::String(answer) = answer else {
                return Err(KnowledgeError::Format(format!(
                    "value for '{trigger_phrase}' must be a string"
                )));
            };
            entries.push(KnowledgeEntry {
                trigger_phrase,
                answer,
            });
        }

        Ok(Self::new(entries))
    }

    /// Read and parse the knowledge file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, KnowledgeError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Like [`load`](Self::load), but a missing or malformed file yields an
    /// empty store and a warning instead of an error.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(store) => {
                info!(path = %path.display(), entries = store.len(), "knowledge file loaded");
                store
            }
            Err(e) => {
                warn!(path = %path.display(), "error loading knowledge file, continuing without it: {e}");
                Self::empty()
            }
        }
    }

    /// Answer of the first entry whose trigger tokens all occur in `message`.
    pub fn lookup(&self, message: &str) -> Option<&str> {
        let normalized = message.to_lowercase();
        self.entries
            .iter()
            .find(|e| e.matches(&normalized))
            .map(|e| e.answer.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }
}
