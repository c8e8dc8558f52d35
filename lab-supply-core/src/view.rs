// ---------------------------------------------------------------------------
// View state machine and comparison table
// ---------------------------------------------------------------------------
//
// Browsing and Detail are the base screens, distinguished by whether an
// item is selected. Comparing and Administering are overlays on top of the
// base screen; closing an overlay reveals the base screen unchanged.
// ---------------------------------------------------------------------------

use crate::error::FinderError;
use crate::types::CatalogItem;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
	Browsing,
	Detail(String),
	Comparing,
	Administering,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Overlay {
	#[default]
	None,
	Comparing,
	Administering,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
	selected: Option<String>,
	overlay: Overlay,
}

impl ViewState {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn screen(&self) -> Screen {
		match self.overlay {
			Overlay::Comparing => Screen::Comparing,
			Overlay::Administering => Screen::Administering,
			Overlay::None => match &self.selected {
				Some(id) => Screen::Detail(id.clone()),
				None => Screen::Browsing,
			},
		}
	}

	pub fn selected(&self) -> Option<&str> {
		self.selected.as_deref()
	}

	pub fn select(&mut self, id: impl Into<String>) {
		self.selected = Some(id.into());
	}

	pub fn clear_selection(&mut self) {
		self.selected = None;
	}

	/// Enter or leave the comparison overlay. Entering needs at least one
	/// compared item.
	pub fn toggle_compare(&mut self, compare_len: usize) -> Result<(), FinderError> {
		if self.overlay == Overlay::Comparing {
			self.overlay = Overlay::None;
			return Ok(());
		}
		if compare_len == 0 {
			return Err(FinderError::InvalidTransition(
				"comparison list is empty".into(),
			));
		}
		self.overlay = Overlay::Comparing;
		Ok(())
	}

	pub fn open_admin(&mut self, is_admin: bool) -> Result<(), FinderError> {
		if !is_admin {
			return Err(FinderError::Forbidden(
				"administration requires an admin session".into(),
			));
		}
		self.overlay = Overlay::Administering;
		Ok(())
	}

	pub fn close_overlay(&mut self) {
		self.overlay = Overlay::None;
	}
}

// ---------------------------------------------------------------------------
// Comparison table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRow {
	pub label: &'static str,
	pub values: Vec<String>,
}

/// Attribute matrix for the comparison screen: one row per attribute, one
/// column per item in set order.
pub fn comparison_table(items: &[CatalogItem]) -> Vec<ComparisonRow> {
	let row = |label: &'static str, cell: fn(&CatalogItem) -> String| ComparisonRow {
		label,
		values: items.iter().map(cell).collect(),
	};

	vec![
		row("Category", |i| i.category().to_string()),
		row("Price", |i| i.display_price()),
		row("Availability", |i| i.availability().to_string()),
		row("Manufacturer", |i| i.manufacturer().unwrap_or("-").to_string()),
		row("Description", |i| i.description().to_string()),
	]
}
