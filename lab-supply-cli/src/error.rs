use std::path::PathBuf;

use lab_supply_core::FinderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
	#[error("{0}")]
	Finder(#[from] FinderError),
	#[error("Cannot read catalog {path}: {source}")]
	CatalogRead {
		path: PathBuf,
		source: std::io::Error,
	},
	#[error("Invalid catalog {path}: {source}")]
	CatalogParse {
		path: PathBuf,
		source: serde_json::Error,
	},
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
	#[error("{message}")]
	Rejected { code: String, message: String },
}

impl CliError {
	pub fn code(&self) -> &str {
		match self {
			Self::Finder(e) => e.code(),
			Self::CatalogRead { .. } => "CLI_CATALOG_READ",
			Self::CatalogParse { .. } => "CLI_CATALOG_PARSE",
			Self::Json(_) => "CLI_JSON",
			Self::Rejected { code, .. } => code.as_str(),
		}
	}

	/// Error document printed in `--json` mode.
	pub fn to_json(&self) -> serde_json::Value {
		match self {
			Self::Finder(e) => e.to_json(),
			_ => serde_json::json!({
				"code": self.code(),
				"message": self.to_string(),
			}),
		}
	}
}
