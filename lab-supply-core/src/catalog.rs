// ---------------------------------------------------------------------------
// CatalogStore: ordered in-memory catalog
// ---------------------------------------------------------------------------
//
// Holds the session's authoritative list of items. Insertion order is kept
// on add, edits replace in place, ids are unique at all times. The catalog
// is not persisted; every session starts from the seed list (or a list
// supplied by the host).
// ---------------------------------------------------------------------------

use std::collections::HashSet;

use crate::error::FinderError;
use crate::types::{Availability, CatalogItem, Category, ItemDraft};

#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
	items: Vec<CatalogItem>,
}

impl CatalogStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Build a store from an existing list. Fails on the first duplicate id.
	pub fn from_items(items: Vec<CatalogItem>) -> Result<Self, FinderError> {
		let mut seen = HashSet::new();
		for item in &items {
			if !seen.insert(item.id()) {
				return Err(FinderError::DuplicateId(item.id().to_string()));
			}
		}
		Ok(Self { items })
	}

	/// Store preloaded with the built-in supply list.
	pub fn seeded() -> Self {
		Self { items: seed_items() }
	}

	pub fn all(&self) -> &[CatalogItem] {
		&self.items
	}

	pub fn get(&self, id: &str) -> Option<&CatalogItem> {
		self.items.iter().find(|item| item.id() == id)
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	pub fn add(&mut self, item: CatalogItem) -> Result<(), FinderError> {
		if self.get(item.id()).is_some() {
			return Err(FinderError::DuplicateId(item.id().to_string()));
		}
		tracing::info!(id = item.id(), name = item.name(), "catalog item added");
		self.items.push(item);
		Ok(())
	}

	/// Replace the item with the same id, keeping its position.
	pub fn edit(&mut self, item: CatalogItem) -> Result<(), FinderError> {
		let slot = self
			.items
			.iter_mut()
			.find(|existing| existing.id() == item.id())
			.ok_or_else(|| FinderError::NotFound(item.id().to_string()))?;
		tracing::info!(id = item.id(), name = item.name(), "catalog item replaced");
		*slot = item;
		Ok(())
	}

	pub fn delete(&mut self, id: &str) -> Result<CatalogItem, FinderError> {
		let index = self
			.items
			.iter()
			.position(|item| item.id() == id)
			.ok_or_else(|| FinderError::NotFound(id.to_string()))?;
		tracing::info!(id, "catalog item deleted");
		Ok(self.items.remove(index))
	}
}

// ---------------------------------------------------------------------------
// Seed data
// ---------------------------------------------------------------------------

struct SeedRow {
	id: &'static str,
	name: &'static str,
	category: Category,
	description: &'static str,
	price: f64,
	availability: Availability,
	manufacturer: Option<&'static str>,
}

const SEED: &[SeedRow] = &[
	SeedRow {
		id: "EQ001",
		name: "Benchtop Centrifuge",
		category: Category::Equipment,
		description: "High-speed centrifuge for microtubes, up to 15,000 rpm",
		price: 2450.0,
		availability: Availability::InStock,
		manufacturer: Some("Eppendorf"),
	},
	SeedRow {
		id: "EQ002",
		name: "PCR Thermal Cycler",
		category: Category::Equipment,
		description: "96-well thermal cycler with gradient block",
		price: 8900.0,
		availability: Availability::OnOrder,
		manufacturer: Some("Bio-Rad"),
	},
	SeedRow {
		id: "EQ003",
		name: "Analytical Balance",
		category: Category::Equipment,
		description: "Precision balance with 0.1 mg readability",
		price: 1780.0,
		availability: Availability::InStock,
		manufacturer: Some("Sartorius"),
	},
	SeedRow {
		id: "EQ004",
		name: "Magnetic Stirrer",
		category: Category::Equipment,
		description: "Hotplate stirrer with digital temperature control",
		price: 395.5,
		availability: Availability::OutOfStock,
		manufacturer: Some("IKA"),
	},
	SeedRow {
		id: "EQ005",
		name: "Digital pH Meter",
		category: Category::Equipment,
		description: "Benchtop pH meter with automatic temperature compensation",
		price: 620.0,
		availability: Availability::InStock,
		manufacturer: Some("Mettler Toledo"),
	},
	SeedRow {
		id: "EQ006",
		name: "Vortex Mixer",
		category: Category::Equipment,
		description: "Variable speed mixer for tubes and small flasks",
		price: 210.0,
		availability: Availability::InStock,
		manufacturer: None,
	},
	SeedRow {
		id: "RG001",
		name: "Ethanol 96%",
		category: Category::Reagent,
		description: "Molecular biology grade ethanol, 1 L",
		price: 32.0,
		availability: Availability::InStock,
		manufacturer: Some("Sigma-Aldrich"),
	},
	SeedRow {
		id: "RG002",
		name: "Taq DNA Polymerase",
		category: Category::Reagent,
		description: "Thermostable polymerase for routine PCR, 500 units",
		price: 145.0,
		availability: Availability::InStock,
		manufacturer: Some("Thermo Fisher"),
	},
	SeedRow {
		id: "RG003",
		name: "Agarose",
		category: Category::Reagent,
		description: "Low EEO agarose for DNA gel electrophoresis, 100 g",
		price: 89.9,
		availability: Availability::OnOrder,
		manufacturer: Some("Invitrogen"),
	},
	SeedRow {
		id: "RG004",
		name: "Phosphate Buffered Saline",
		category: Category::Reagent,
		description: "PBS tablets, pH 7.4, for cell culture washing",
		price: 54.25,
		availability: Availability::InStock,
		manufacturer: None,
	},
	SeedRow {
		id: "RG005",
		name: "Sodium Chloride",
		category: Category::Reagent,
		description: "ACS reagent grade NaCl, 500 g",
		price: 27.5,
		availability: Availability::OutOfStock,
		manufacturer: Some("Merck"),
	},
	SeedRow {
		id: "CN001",
		name: "Nitrile Gloves",
		category: Category::Consumable,
		description: "Powder-free examination gloves, size M, box of 100",
		price: 12.99,
		availability: Availability::InStock,
		manufacturer: Some("Ansell"),
	},
	SeedRow {
		id: "CN002",
		name: "Pipette Tips 200 uL",
		category: Category::Consumable,
		description: "Sterile filtered tips for PCR work, rack of 96",
		price: 18.4,
		availability: Availability::InStock,
		manufacturer: Some("Eppendorf"),
	},
	SeedRow {
		id: "CN003",
		name: "Microcentrifuge Tubes 1.5 mL",
		category: Category::Consumable,
		description: "Polypropylene tubes for the centrifuge, bag of 500",
		price: 24.0,
		availability: Availability::OnOrder,
		manufacturer: None,
	},
	SeedRow {
		id: "CN004",
		name: "Petri Dishes",
		category: Category::Consumable,
		description: "Sterile 90 mm polystyrene dishes, pack of 20",
		price: 9.75,
		availability: Availability::InStock,
		manufacturer: Some("Corning"),
	},
	SeedRow {
		id: "CN005",
		name: "Serological Pipettes 10 mL",
		category: Category::Consumable,
		description: "Individually wrapped disposable pipettes, case of 200",
		price: 64.0,
		availability: Availability::OutOfStock,
		manufacturer: Some("Falcon"),
	},
];

/// The built-in catalog every session starts from.
pub fn seed_items() -> Vec<CatalogItem> {
	SEED.iter()
		.filter_map(|row| {
			let mut draft = ItemDraft::new(row.name, row.category)
				.description(row.description)
				.price(row.price)
				.availability(row.availability);
			draft.manufacturer = row.manufacturer.map(str::to_string);
			match CatalogItem::new(row.id, draft) {
				Ok(item) => Some(item),
				Err(e) => {
					tracing::warn!(id = row.id, error = %e, "skipping invalid seed row");
					None
				}
			}
		})
		.collect()
}
