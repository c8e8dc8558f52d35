// ---------------------------------------------------------------------------
// Selection sets: favorites and comparison list
// ---------------------------------------------------------------------------
//
// Each set is a deduplicated, insertion-ordered list of full item copies
// with write-through persistence: every successful toggle writes the whole
// snapshot under the set's key. Copies are not refreshed when the catalog
// later changes.
// ---------------------------------------------------------------------------

use crate::error::FinderError;
use crate::persistence::{self, KeyValueStore};
use crate::types::CatalogItem;

/// Maximum number of items in the comparison list.
pub const COMPARE_CAPACITY: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
	Favorites,
	Compare,
}

impl SelectionKind {
	pub fn capacity(&self) -> Option<usize> {
		match self {
			Self::Favorites => None,
			Self::Compare => Some(COMPARE_CAPACITY),
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Favorites => "favorites",
			Self::Compare => "compare",
		}
	}
}

/// Result of a successful toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
	Added,
	Removed,
}

#[derive(Debug, Clone)]
pub struct SelectionSet {
	kind: SelectionKind,
	key: String,
	items: Vec<CatalogItem>,
}

impl SelectionSet {
	/// Empty, unsaved set.
	pub fn new(kind: SelectionKind, key: impl Into<String>) -> Self {
		Self {
			kind,
			key: key.into(),
			items: Vec::new(),
		}
	}

	/// Restore the set from its persisted snapshot. An over-long comparison
	/// snapshot keeps only its first `COMPARE_CAPACITY` entries.
	pub fn load(kind: SelectionKind, store: &dyn KeyValueStore, key: impl Into<String>) -> Self {
		let key = key.into();
		let mut items = persistence::load_snapshot(store, &key);
		if let Some(capacity) = kind.capacity() {
			if items.len() > capacity {
				tracing::warn!(
					key = %key,
					found = items.len(),
					capacity,
					"snapshot over capacity, truncating"
				);
				items.truncate(capacity);
			}
		}
		Self { kind, key, items }
	}

	pub fn kind(&self) -> SelectionKind {
		self.kind
	}

	pub fn items(&self) -> &[CatalogItem] {
		&self.items
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	pub fn contains(&self, id: &str) -> bool {
		self.items.iter().any(|item| item.id() == id)
	}

	pub fn get(&self, id: &str) -> Option<&CatalogItem> {
		self.items.iter().find(|item| item.id() == id)
	}

	pub fn is_full(&self) -> bool {
		self.kind
			.capacity()
			.is_some_and(|capacity| self.items.len() >= capacity)
	}

	/// Remove `item` if a member with its id exists, otherwise insert a copy.
	///
	/// A full set rejects the insert with `CapacityExceeded` and neither
	/// mutates nor writes. A failed write after a mutation is logged; the
	/// in-memory set remains authoritative.
	pub fn toggle(
		&mut self,
		item: &CatalogItem,
		store: &mut dyn KeyValueStore,
	) -> Result<Toggle, FinderError> {
		let outcome = if let Some(index) = self.items.iter().position(|m| m.id() == item.id()) {
			self.items.remove(index);
			Toggle::Removed
		} else {
			if self.is_full() {
				let capacity = self.kind.capacity().unwrap_or(self.items.len());
				tracing::warn!(
					set = self.kind.as_str(),
					id = item.id(),
					capacity,
					"selection at capacity, insert rejected"
				);
				return Err(FinderError::CapacityExceeded { capacity });
			}
			self.items.push(item.clone());
			Toggle::Added
		};

		tracing::info!(set = self.kind.as_str(), id = item.id(), ?outcome, "selection toggled");
		self.persist(store);
		Ok(outcome)
	}

	/// Empty the set and write the empty snapshot.
	pub fn clear(&mut self, store: &mut dyn KeyValueStore) {
		if self.items.is_empty() {
			return;
		}
		self.items.clear();
		tracing::info!(set = self.kind.as_str(), "selection cleared");
		self.persist(store);
	}

	fn persist(&self, store: &mut dyn KeyValueStore) {
		if let Err(e) = persistence::save_snapshot(store, &self.key, &self.items) {
			tracing::warn!(key = %self.key, error = %e, "failed to persist selection");
		}
	}
}
