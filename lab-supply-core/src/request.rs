use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::FinderError;
use crate::types::CatalogItem;

/// A submitted supply request. Requests are recorded locally only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyRequest {
	pub id: String,
	pub item_id: String,
	pub item_name: String,
	pub quantity: u32,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub notes: Option<String>,
	pub submitted_at: DateTime<Utc>,
}

impl SupplyRequest {
	/// Validate the form values and build a request for `item`.
	pub fn new(item: &CatalogItem, quantity: u32, notes: &str) -> Result<Self, FinderError> {
		if quantity == 0 {
			return Err(FinderError::Validation("quantity must be at least 1".into()));
		}
		let notes = notes.trim();
		Ok(Self {
			id: Uuid::new_v4().to_string(),
			item_id: item.id().to_string(),
			item_name: item.name().to_string(),
			quantity,
			notes: (!notes.is_empty()).then(|| notes.to_string()),
			submitted_at: Utc::now(),
		})
	}

	/// One-line confirmation shown after submission.
	pub fn summary(&self) -> String {
		format!(
			"Request sent: {} x{} (notes: {})",
			self.item_name,
			self.quantity,
			self.notes.as_deref().unwrap_or("none")
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::types::{Category, ItemDraft};

	fn item() -> CatalogItem {
		CatalogItem::new("RG001", ItemDraft::new("Ethanol 96%", Category::Reagent)).unwrap()
	}

	#[test]
	fn zero_quantity_is_rejected() {
		let err = SupplyRequest::new(&item(), 0, "").unwrap_err();
		assert_eq!(err.code(), "FINDER_VALIDATION");
	}

	#[test]
	fn blank_notes_are_dropped() {
		let request = SupplyRequest::new(&item(), 2, "   ").unwrap();
		assert_eq!(request.notes, None);
		assert_eq!(request.summary(), "Request sent: Ethanol 96% x2 (notes: none)");
	}

	#[test]
	fn request_captures_item() {
		let request = SupplyRequest::new(&item(), 5, " urgent ").unwrap();
		assert_eq!(request.item_id, "RG001");
		assert_eq!(request.notes.as_deref(), Some("urgent"));
		let json = serde_json::to_value(&request).unwrap();
		assert_eq!(json["itemName"], "Ethanol 96%");
		assert!(json.get("submittedAt").is_some());
	}
}
