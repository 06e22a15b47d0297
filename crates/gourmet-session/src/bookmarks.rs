//! Locally persisted bookmark list.
//!
//! Bookmarks are an ordered list of shop ids stored as a JSON array under a
//! fixed key. [`Bookmarks`] reads the list once when constructed and writes
//! it back through its store on every toggle.

use std::path::{Path, PathBuf};

/// Key the bookmark list is stored under.
pub const STORAGE_KEY: &str = "atarino_gourmet_bookmarks";

#[derive(Debug, thiserror::Error)]
pub enum BookmarkError {
    #[error("bookmark storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode bookmarks: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Raw key/value storage for the serialized bookmark list.
pub trait BookmarkStore {
    /// Returns the stored value, or `None` when nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns [`BookmarkError::Io`] when the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, BookmarkError>;

    /// # Errors
    ///
    /// Returns [`BookmarkError::Io`] when the backing storage cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), BookmarkError>;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl BookmarkStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, BookmarkError> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(BookmarkError::Io { path, source }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), BookmarkError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| BookmarkError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.path_for(key);
        std::fs::write(&path, value).map_err(|source| BookmarkError::Io { path, source })
    }
}

/// Ordered set of bookmarked shop ids backed by a [`BookmarkStore`].
#[derive(Debug)]
pub struct Bookmarks<S> {
    store: S,
    ids: Vec<String>,
}

impl<S: BookmarkStore> Bookmarks<S> {
    /// Loads the stored list.
    ///
    /// Data that is not a JSON array of strings is logged and treated as an
    /// empty list; it is overwritten by the next toggle.
    ///
    /// # Errors
    ///
    /// Returns [`BookmarkError::Io`] if the store itself cannot be read.
    pub fn load(store: S) -> Result<Self, BookmarkError> {
        let ids = match store.get(STORAGE_KEY)? {
            None => Vec::new(),
            Some(raw) => serde_json::from_str::<Vec<String>>(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "ignoring unreadable bookmark data");
                Vec::new()
            }),
        };
        tracing::debug!(count = ids.len(), "bookmarks loaded");
        Ok(Self { store, ids })
    }

    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    #[must_use]
    pub fn is_bookmarked(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    /// Adds `id` at the end, or removes it if already present, then persists.
    ///
    /// Returns whether `id` is bookmarked afterwards. The in-memory list is
    /// only updated once the write succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`BookmarkError`] if the updated list cannot be persisted.
    pub fn toggle(&mut self, id: &str) -> Result<bool, BookmarkError> {
        let mut next = self.ids.clone();
        let added = if let Some(pos) = next.iter().position(|existing| existing == id) {
            next.remove(pos);
            false
        } else {
            next.push(id.to_string());
            true
        };

        let encoded = serde_json::to_string(&next)?;
        self.store.set(STORAGE_KEY, &encoded)?;
        self.ids = next;

        tracing::info!(id, added, "bookmark toggled");
        Ok(added)
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}
