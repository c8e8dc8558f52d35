// ---------------------------------------------------------------------------
// Suggestion engine
// ---------------------------------------------------------------------------
//
// Autocomplete candidates for the search box. Unlike the listing filter a
// blank query yields nothing, the manufacturer is searched too, and the
// result is capped at `SUGGESTION_LIMIT` in catalog order.
// ---------------------------------------------------------------------------

use crate::filter::{item_matches, MatchFields, Needle};
use crate::types::{CatalogItem, CategorySelector};

pub const SUGGESTION_LIMIT: usize = 8;

pub fn suggest(items: &[CatalogItem], query: &str, category: CategorySelector) -> Vec<CatalogItem> {
	let Some(needle) = Needle::new(query) else {
		return Vec::new();
	};

	let result: Vec<CatalogItem> = items
		.iter()
		.filter(|item| item_matches(item, Some(&needle), category, MatchFields::Suggestion))
		.take(SUGGESTION_LIMIT)
		.cloned()
		.collect();
	tracing::debug!(query, %category, suggested = result.len(), "suggestions computed");
	result
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::types::{Category, ItemDraft};

	fn reagent(id: &str, name: &str) -> CatalogItem {
		CatalogItem::new(id, ItemDraft::new(name, Category::Reagent)).unwrap()
	}

	#[test]
	fn blank_query_suggests_nothing() {
		let items = vec![reagent("A", "Agarose")];
		assert!(suggest(&items, "", CategorySelector::All).is_empty());
		assert!(suggest(&items, "  \t", CategorySelector::All).is_empty());
	}

	#[test]
	fn truncates_to_first_eight_in_catalog_order() {
		let items: Vec<CatalogItem> = (0..12)
			.map(|i| reagent(&format!("R{:02}", i), &format!("Buffer {}", i)))
			.collect();
		let result = suggest(&items, "buffer", CategorySelector::All);
		assert_eq!(result.len(), SUGGESTION_LIMIT);
		let ids: Vec<&str> = result.iter().map(|i| i.id()).collect();
		assert_eq!(ids, vec!["R00", "R01", "R02", "R03", "R04", "R05", "R06", "R07"]);
	}

	#[test]
	fn matches_manufacturer() {
		let items = vec![
			CatalogItem::new(
				"EQ1",
				ItemDraft::new("Thermal Cycler", Category::Equipment).manufacturer("Bio-Rad"),
			)
			.unwrap(),
			reagent("R1", "Agarose"),
		];
		let result = suggest(&items, "bio-rad", CategorySelector::All);
		assert_eq!(result.len(), 1);
		assert_eq!(result[0].id(), "EQ1");
	}

	#[test]
	fn missing_manufacturer_never_matches() {
		let items = vec![reagent("R1", "Agarose")];
		assert!(suggest(&items, "sigma", CategorySelector::All).is_empty());
	}

	#[test]
	fn category_is_conjoined() {
		let items = vec![
			reagent("R1", "Tris buffer"),
			CatalogItem::new("C1", ItemDraft::new("Buffer bottles", Category::Consumable)).unwrap(),
		];
		let result = suggest(&items, "buffer", CategorySelector::Only(Category::Consumable));
		assert_eq!(result.len(), 1);
		assert_eq!(result[0].id(), "C1");
	}
}
