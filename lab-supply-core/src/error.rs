use thiserror::Error;

use crate::persistence::PersistenceError;

#[derive(Debug, Error)]
pub enum FinderError {
	#[error("Invalid input: {0}")]
	Validation(String),
	#[error("Duplicate item id: {0}")]
	DuplicateId(String),
	#[error("Item not found: {0}")]
	NotFound(String),
	#[error("Selection is full: at most {capacity} items can be compared")]
	CapacityExceeded { capacity: usize },
	#[error("Not permitted: {0}")]
	Forbidden(String),
	#[error("Invalid transition: {0}")]
	InvalidTransition(String),
	#[error("Persistence error: {0}")]
	Persistence(#[from] PersistenceError),
}

impl FinderError {
	pub fn code(&self) -> &str {
		match self {
			Self::Validation(_) => "FINDER_VALIDATION",
			Self::DuplicateId(_) => "FINDER_DUPLICATE_ID",
			Self::NotFound(_) => "FINDER_NOT_FOUND",
			Self::CapacityExceeded { .. } => "FINDER_CAPACITY_EXCEEDED",
			Self::Forbidden(_) => "FINDER_FORBIDDEN",
			Self::InvalidTransition(_) => "FINDER_INVALID_TRANSITION",
			Self::Persistence(_) => "FINDER_PERSISTENCE",
		}
	}

	/// Whether the failure is a recoverable user-facing condition rather than
	/// a fault in the environment.
	pub fn is_user_error(&self) -> bool {
		!matches!(self, Self::Persistence(_))
	}

	pub fn to_json(&self) -> serde_json::Value {
		serde_json::json!({
			"code": self.code(),
			"message": self.to_string(),
		})
	}
}
