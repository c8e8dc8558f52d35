// ---------------------------------------------------------------------------
// Catalog data model
// ---------------------------------------------------------------------------
//
// Closed enumerations for category and availability, the validated
// `CatalogItem` record and the `ItemDraft` payload used by the admin form.
// Wire names match the display strings so persisted snapshots stay readable.
// ---------------------------------------------------------------------------

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::FinderError;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
	Equipment,
	Reagent,
	Consumable,
}

impl Category {
	pub const ALL: [Category; 3] = [Self::Equipment, Self::Reagent, Self::Consumable];

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Equipment => "Equipment",
			Self::Reagent => "Reagent",
			Self::Consumable => "Consumable",
		}
	}
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.pad(self.as_str())
	}
}

impl FromStr for Category {
	type Err = FinderError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|c| c.as_str() == s)
			.ok_or_else(|| FinderError::Validation(format!("unknown category '{}'", s)))
	}
}

// ---------------------------------------------------------------------------
// Availability
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Availability {
	#[serde(rename = "In Stock")]
	InStock,
	#[serde(rename = "Out of Stock")]
	OutOfStock,
	#[serde(rename = "On Order")]
	OnOrder,
}

impl Availability {
	pub const ALL: [Availability; 3] = [Self::InStock, Self::OutOfStock, Self::OnOrder];

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::InStock => "In Stock",
			Self::OutOfStock => "Out of Stock",
			Self::OnOrder => "On Order",
		}
	}
}

impl fmt::Display for Availability {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.pad(self.as_str())
	}
}

impl FromStr for Availability {
	type Err = FinderError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|a| a.as_str() == s)
			.ok_or_else(|| FinderError::Validation(format!("unknown availability '{}'", s)))
	}
}

// ---------------------------------------------------------------------------
// CategorySelector
// ---------------------------------------------------------------------------

/// Category filter: the wildcard `All` or exactly one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategorySelector {
	#[default]
	All,
	Only(Category),
}

impl CategorySelector {
	pub fn matches(&self, category: Category) -> bool {
		match self {
			Self::All => true,
			Self::Only(wanted) => *wanted == category,
		}
	}
}

impl fmt::Display for CategorySelector {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::All => f.pad("All"),
			Self::Only(c) => f.pad(c.as_str()),
		}
	}
}

impl FromStr for CategorySelector {
	type Err = FinderError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if s == "All" {
			return Ok(Self::All);
		}
		s.parse().map(Self::Only)
	}
}

impl From<Category> for CategorySelector {
	fn from(category: Category) -> Self {
		Self::Only(category)
	}
}

// ---------------------------------------------------------------------------
// CatalogItem
// ---------------------------------------------------------------------------

/// A single supply record. Fields are validated at construction and the
/// record is never mutated; edits replace the whole item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCatalogItem")]
pub struct CatalogItem {
	id: String,
	name: String,
	category: Category,
	description: String,
	price: f64,
	availability: Availability,
	#[serde(skip_serializing_if = "Option::is_none")]
	manufacturer: Option<String>,
}

#[derive(Deserialize)]
struct RawCatalogItem {
	id: String,
	name: String,
	category: Category,
	#[serde(default)]
	description: String,
	price: f64,
	availability: Availability,
	#[serde(default)]
	manufacturer: Option<String>,
}

impl TryFrom<RawCatalogItem> for CatalogItem {
	type Error = FinderError;

	fn try_from(raw: RawCatalogItem) -> Result<Self, Self::Error> {
		CatalogItem::new(
			raw.id,
			ItemDraft {
				name: raw.name,
				category: raw.category,
				description: raw.description,
				price: raw.price,
				availability: raw.availability,
				manufacturer: raw.manufacturer,
			},
		)
	}
}

impl CatalogItem {
	/// Build an item from a draft under the given id.
	pub fn new(id: impl Into<String>, draft: ItemDraft) -> Result<Self, FinderError> {
		let id = id.into();
		if id.trim().is_empty() {
			return Err(FinderError::Validation("id must not be empty".into()));
		}
		if id.trim() != id {
			return Err(FinderError::Validation(format!(
				"id '{}' has surrounding whitespace",
				id
			)));
		}

		let name = draft.name.trim().to_string();
		if name.is_empty() {
			return Err(FinderError::Validation("name must not be empty".into()));
		}

		if !draft.price.is_finite() || draft.price < 0.0 {
			return Err(FinderError::Validation(format!(
				"price must be a non-negative number, got {}",
				draft.price
			)));
		}

		let manufacturer = draft
			.manufacturer
			.map(|m| m.trim().to_string())
			.filter(|m| !m.is_empty());

		Ok(Self {
			id,
			name,
			category: draft.category,
			description: draft.description,
			price: draft.price,
			availability: draft.availability,
			manufacturer,
		})
	}

	pub fn id(&self) -> &str {
		&self.id
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn category(&self) -> Category {
		self.category
	}

	pub fn description(&self) -> &str {
		&self.description
	}

	pub fn price(&self) -> f64 {
		self.price
	}

	pub fn availability(&self) -> Availability {
		self.availability
	}

	pub fn manufacturer(&self) -> Option<&str> {
		self.manufacturer.as_deref()
	}

	/// Price formatted the way the catalog displays it, e.g. `$12.50`.
	pub fn display_price(&self) -> String {
		format!("${:.2}", self.price)
	}
}

/// Generate an id for an item created through the admin form.
pub fn generate_item_id() -> String {
	format!("NEW-{}", Uuid::new_v4().simple())
}

// ---------------------------------------------------------------------------
// ItemDraft
// ---------------------------------------------------------------------------

/// Unvalidated field values for creating or replacing an item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDraft {
	pub name: String,
	pub category: Category,
	pub description: String,
	pub price: f64,
	pub availability: Availability,
	pub manufacturer: Option<String>,
}

impl Default for ItemDraft {
	fn default() -> Self {
		Self {
			name: String::new(),
			category: Category::Equipment,
			description: String::new(),
			price: 0.0,
			availability: Availability::InStock,
			manufacturer: None,
		}
	}
}

impl ItemDraft {
	pub fn new(name: impl Into<String>, category: Category) -> Self {
		Self {
			name: name.into(),
			category,
			..Self::default()
		}
	}

	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = description.into();
		self
	}

	pub fn price(mut self, price: f64) -> Self {
		self.price = price;
		self
	}

	pub fn availability(mut self, availability: Availability) -> Self {
		self.availability = availability;
		self
	}

	pub fn manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
		self.manufacturer = Some(manufacturer.into());
		self
	}
}

impl From<&CatalogItem> for ItemDraft {
	fn from(item: &CatalogItem) -> Self {
		Self {
			name: item.name.clone(),
			category: item.category,
			description: item.description.clone(),
			price: item.price,
			availability: item.availability,
			manufacturer: item.manufacturer.clone(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn centrifuge() -> CatalogItem {
		CatalogItem::new(
			"EQ001",
			ItemDraft::new("Benchtop Centrifuge", Category::Equipment)
				.description("High-speed centrifuge")
				.price(2450.0)
				.manufacturer("Eppendorf"),
		)
		.unwrap()
	}

	#[test]
	fn category_parses_exact_names_only() {
		assert_eq!("Reagent".parse::<Category>().unwrap(), Category::Reagent);
		assert!("reagent".parse::<Category>().is_err());
		assert!("Glassware".parse::<Category>().is_err());
	}

	#[test]
	fn selector_parses_wildcard() {
		assert_eq!("All".parse::<CategorySelector>().unwrap(), CategorySelector::All);
		assert_eq!(
			"Consumable".parse::<CategorySelector>().unwrap(),
			CategorySelector::Only(Category::Consumable)
		);
		assert!("Everything".parse::<CategorySelector>().is_err());
	}

	#[test]
	fn selector_matching() {
		assert!(CategorySelector::All.matches(Category::Reagent));
		assert!(CategorySelector::Only(Category::Reagent).matches(Category::Reagent));
		assert!(!CategorySelector::Only(Category::Reagent).matches(Category::Equipment));
	}

	#[test]
	fn new_rejects_blank_name() {
		let err = CatalogItem::new("X", ItemDraft::new("   ", Category::Reagent)).unwrap_err();
		assert_eq!(err.code(), "FINDER_VALIDATION");
	}

	#[test]
	fn new_rejects_padded_id() {
		let err = CatalogItem::new(" EQ001 ", ItemDraft::new("A", Category::Equipment)).unwrap_err();
		assert_eq!(err.code(), "FINDER_VALIDATION");
		assert!(CatalogItem::new("   ", ItemDraft::new("A", Category::Equipment)).is_err());
	}

	#[test]
	fn new_rejects_negative_or_nan_price() {
		assert!(CatalogItem::new("X", ItemDraft::new("A", Category::Reagent).price(-1.0)).is_err());
		assert!(
			CatalogItem::new("X", ItemDraft::new("A", Category::Reagent).price(f64::NAN)).is_err()
		);
	}

	#[test]
	fn blank_manufacturer_becomes_none() {
		let item =
			CatalogItem::new("X", ItemDraft::new("A", Category::Reagent).manufacturer("  ")).unwrap();
		assert_eq!(item.manufacturer(), None);
	}

	#[test]
	fn json_uses_display_names() {
		let json = serde_json::to_value(centrifuge()).unwrap();
		assert_eq!(json["category"], "Equipment");
		assert_eq!(json["availability"], "In Stock");
		assert_eq!(json["manufacturer"], "Eppendorf");
	}

	#[test]
	fn json_omits_absent_manufacturer() {
		let item = CatalogItem::new("R1", ItemDraft::new("Ethanol", Category::Reagent)).unwrap();
		let json = serde_json::to_value(&item).unwrap();
		assert!(json.get("manufacturer").is_none());
	}

	#[test]
	fn deserialize_rejects_unknown_category() {
		let raw = r#"{"id":"A","name":"Flask","category":"Glassware","description":"","price":1.0,"availability":"In Stock"}"#;
		assert!(serde_json::from_str::<CatalogItem>(raw).is_err());
	}

	#[test]
	fn deserialize_validates_fields() {
		let raw = r#"{"id":"A","name":"","category":"Reagent","price":1.0,"availability":"On Order"}"#;
		assert!(serde_json::from_str::<CatalogItem>(raw).is_err());
	}

	#[test]
	fn draft_from_item_prefills_every_field() {
		let item = centrifuge();
		let draft = ItemDraft::from(&item);
		let rebuilt = CatalogItem::new(item.id(), draft).unwrap();
		assert_eq!(rebuilt, item);
	}

	#[test]
	fn generated_ids_are_unique() {
		let a = generate_item_id();
		let b = generate_item_id();
		assert!(a.starts_with("NEW-"));
		assert_ne!(a, b);
	}

	#[test]
	fn display_price_has_two_decimals() {
		assert_eq!(centrifuge().display_price(), "$2450.00");
	}
}
