use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lab_supply_core::CategorySelector;

#[derive(Parser, Debug)]
#[command(name = "lab-supply", version, about = "Search and shortlist lab supplies")]
pub struct CliArgs {
	/// Directory holding the favorites and comparison snapshots
	/// (defaults to the platform data directory)
	#[arg(long, global = true, env = "LAB_SUPPLY_STORAGE_DIR")]
	pub storage_dir: Option<PathBuf>,

	/// JSON file with a catalog to browse instead of the built-in list
	#[arg(long, global = true, env = "LAB_SUPPLY_CATALOG")]
	pub catalog: Option<PathBuf>,

	/// Print items as JSON
	#[arg(long, global = true)]
	pub json: bool,

	/// Log level (trace, debug, info, warn, error)
	#[arg(long, global = true, default_value = "warn", env = "LAB_SUPPLY_LOG_LEVEL")]
	pub log_level: String,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// List catalog items matching a query
	Search {
		/// Substring matched against name and description
		query: Option<String>,
		/// All, Equipment, Reagent or Consumable
		#[arg(long, short, default_value = "All")]
		category: CategorySelector,
		/// Search favorites instead of the whole catalog
		#[arg(long)]
		favorites: bool,
	},
	/// Autocomplete candidates for a partial query
	Suggest {
		query: String,
		#[arg(long, short, default_value = "All")]
		category: CategorySelector,
	},
	/// Show one item in detail
	Show { id: String },
	/// Add or remove an item from favorites
	Favorite { id: String },
	/// Add or remove an item from the comparison list
	Compare { id: String },
	/// List favorites
	Favorites,
	/// Print the comparison table
	Comparison,
	/// Empty the comparison list
	ClearComparison,
	/// Submit a supply request for an item
	Request {
		id: String,
		#[arg(long, short, default_value = "1")]
		quantity: u32,
		#[arg(long, short)]
		notes: Option<String>,
	},
	/// List the item categories
	Categories,
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::CommandFactory;
	use lab_supply_core::Category;

	#[test]
	fn args_are_well_formed() {
		CliArgs::command().debug_assert();
	}

	#[test]
	fn parses_category_flag() {
		let args = CliArgs::parse_from(["lab-supply", "search", "pcr", "--category", "Reagent"]);
		match args.command {
			Command::Search { query, category, favorites } => {
				assert_eq!(query.as_deref(), Some("pcr"));
				assert_eq!(category, CategorySelector::Only(Category::Reagent));
				assert!(!favorites);
			}
			other => panic!("unexpected command {:?}", other),
		}
	}

	#[test]
	fn rejects_unknown_category() {
		let result = CliArgs::try_parse_from(["lab-supply", "suggest", "a", "--category", "Glass"]);
		assert!(result.is_err());
	}

	#[test]
	fn global_flags_after_subcommand() {
		let args = CliArgs::parse_from(["lab-supply", "favorites", "--json", "--storage-dir", "/tmp/x"]);
		assert!(args.json);
		assert_eq!(args.storage_dir, Some(PathBuf::from("/tmp/x")));
	}
}
