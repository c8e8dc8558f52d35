use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::error::FinderError;

/// Session configuration supplied by the host.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinderConfig {
	/// Directory for persisted selection snapshots. `None` keeps them in memory.
	pub storage_dir: Option<PathBuf>,
	pub favorites_key: String,
	pub compare_key: String,
	/// Delay before the suggestion list closes after the search box loses focus.
	pub suggestion_dismiss_delay_ms: u64,
}

impl Default for FinderConfig {
	fn default() -> Self {
		Self {
			storage_dir: None,
			favorites_key: "favorites".to_string(),
			compare_key: "compareList".to_string(),
			suggestion_dismiss_delay_ms: 200,
		}
	}
}

impl FinderConfig {
	pub fn dismiss_delay(&self) -> Duration {
		Duration::from_millis(self.suggestion_dismiss_delay_ms)
	}

	/// Both selection sets persist independently, so their keys must differ.
	pub fn validate(&self) -> Result<(), FinderError> {
		if self.favorites_key.trim().is_empty() || self.compare_key.trim().is_empty() {
			return Err(FinderError::Validation("storage keys must not be empty".into()));
		}
		if self.favorites_key == self.compare_key {
			return Err(FinderError::Validation(format!(
				"favorites and compare lists cannot share the storage key '{}'",
				self.favorites_key
			)));
		}
		Ok(())
	}
}
