// ---------------------------------------------------------------------------
// Filter engine
// ---------------------------------------------------------------------------
//
// Pure functions computing the visible subset of a list of items from a
// text query and a category selector. Matching is a case-insensitive
// substring test; order of the input is preserved.
// ---------------------------------------------------------------------------

use crate::types::{CatalogItem, CategorySelector};

/// Which text fields a query is tested against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchFields {
	/// Name and description.
	Listing,
	/// Name, description and manufacturer.
	Suggestion,
}

/// A query lowered once so it can be tested against many items.
#[derive(Debug, Clone)]
pub struct Needle {
	lowered: String,
}

impl Needle {
	/// Returns `None` for an empty or whitespace-only query.
	pub fn new(query: &str) -> Option<Self> {
		if query.trim().is_empty() {
			return None;
		}
		Some(Self {
			lowered: query.to_lowercase(),
		})
	}

	pub fn found_in(&self, haystack: &str) -> bool {
		haystack.to_lowercase().contains(&self.lowered)
	}

	pub fn matches(&self, item: &CatalogItem, fields: MatchFields) -> bool {
		if self.found_in(item.name()) || self.found_in(item.description()) {
			return true;
		}
		match fields {
			MatchFields::Listing => false,
			MatchFields::Suggestion => item.manufacturer().is_some_and(|m| self.found_in(m)),
		}
	}
}

/// Whether a single item passes the query and category tests.
pub fn item_matches(
	item: &CatalogItem,
	needle: Option<&Needle>,
	category: CategorySelector,
	fields: MatchFields,
) -> bool {
	category.matches(item.category()) && needle.is_none_or(|n| n.matches(item, fields))
}

/// Stable filter over `items`. A blank query matches everything, so only the
/// category narrows the result.
pub fn filter(items: &[CatalogItem], query: &str, category: CategorySelector) -> Vec<CatalogItem> {
	let needle = Needle::new(query);
	let result: Vec<CatalogItem> = items
		.iter()
		.filter(|item| item_matches(item, needle.as_ref(), category, MatchFields::Listing))
		.cloned()
		.collect();
	tracing::debug!(
		query,
		%category,
		total = items.len(),
		matched = result.len(),
		"filter applied"
	);
	result
}
