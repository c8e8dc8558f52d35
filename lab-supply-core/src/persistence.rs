// ---------------------------------------------------------------------------
// Persistence adapter: key-value JSON snapshots
// ---------------------------------------------------------------------------
//
// A minimal string key-value store plus helpers that read and write full
// JSON snapshots of item lists. Two backends: an in-memory map and a
// directory holding one `<key>.json` file per key.
//
// Reading a snapshot never fails. An absent key is an empty list and an
// unreadable or unparsable value is logged and treated the same way.
// ---------------------------------------------------------------------------

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::types::CatalogItem;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum PersistenceError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	#[error("Serialization: {0}")]
	Serialization(String),
	#[error("Corruption: {0}")]
	Corruption(String),
	#[error("Invalid key: {0}")]
	InvalidKey(String),
}

// ---------------------------------------------------------------------------
// KeyValueStore
// ---------------------------------------------------------------------------

pub trait KeyValueStore {
	fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
	fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
	fn remove(&mut self, key: &str) -> Result<(), PersistenceError>;
}

/// Volatile store, used for tests and for hosts without durable storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
	entries: HashMap<String, String>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}
}

impl KeyValueStore for MemoryStore {
	fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
		Ok(self.entries.get(key).cloned())
	}

	fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
		self.entries.insert(key.to_string(), value.to_string());
		Ok(())
	}

	fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
		self.entries.remove(key);
		Ok(())
	}
}

/// Durable store keeping each key in `<dir>/<key>.json`. The directory is
/// created on first write.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
	dir: PathBuf,
}

impl DirectoryStore {
	pub fn new(dir: impl Into<PathBuf>) -> Self {
		Self { dir: dir.into() }
	}

	pub fn dir(&self) -> &Path {
		&self.dir
	}

	fn path_for(&self, key: &str) -> Result<PathBuf, PersistenceError> {
		let valid = !key.is_empty()
			&& key
				.chars()
				.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
		if !valid {
			return Err(PersistenceError::InvalidKey(key.to_string()));
		}
		Ok(self.dir.join(format!("{}.json", key)))
	}
}

impl KeyValueStore for DirectoryStore {
	fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
		let path = self.path_for(key)?;
		match std::fs::read_to_string(&path) {
			Ok(contents) => Ok(Some(contents)),
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
			Err(e) => Err(PersistenceError::Io(e)),
		}
	}

	fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
		let path = self.path_for(key)?;
		std::fs::create_dir_all(&self.dir)?;
		std::fs::write(&path, value)?;
		Ok(())
	}

	fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
		let path = self.path_for(key)?;
		match std::fs::remove_file(&path) {
			Ok(()) => Ok(()),
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
			Err(e) => Err(PersistenceError::Io(e)),
		}
	}
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

/// Parse a snapshot value. Duplicate ids collapse to the first occurrence.
pub fn decode_snapshot(raw: &str) -> Result<Vec<CatalogItem>, PersistenceError> {
	let items: Vec<CatalogItem> = serde_json::from_str(raw)
		.map_err(|e| PersistenceError::Corruption(format!("Invalid snapshot JSON: {}", e)))?;
	let mut seen = HashSet::new();
	Ok(items
		.into_iter()
		.filter(|item| seen.insert(item.id().to_string()))
		.collect())
}

pub fn encode_snapshot(items: &[CatalogItem]) -> Result<String, PersistenceError> {
	serde_json::to_string(items)
		.map_err(|e| PersistenceError::Serialization(format!("Failed to serialize snapshot: {}", e)))
}

/// Load the snapshot stored under `key`, falling back to an empty list.
pub fn load_snapshot(store: &dyn KeyValueStore, key: &str) -> Vec<CatalogItem> {
	let raw = match store.get(key) {
		Ok(Some(raw)) => raw,
		Ok(None) => return Vec::new(),
		Err(e) => {
			tracing::warn!(key, error = %e, "snapshot unreadable, starting empty");
			return Vec::new();
		}
	};

	match decode_snapshot(&raw) {
		Ok(items) => {
			tracing::debug!(key, count = items.len(), "snapshot loaded");
			items
		}
		Err(e) => {
			tracing::warn!(key, error = %e, "snapshot corrupt, starting empty");
			Vec::new()
		}
	}
}

pub fn save_snapshot(
	store: &mut dyn KeyValueStore,
	key: &str,
	items: &[CatalogItem],
) -> Result<(), PersistenceError> {
	let json = encode_snapshot(items)?;
	store.set(key, &json)?;
	tracing::debug!(key, count = items.len(), "snapshot written");
	Ok(())
}
