// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------
//
// Each invocation opens a fresh session: the catalog comes from the seed or
// `--catalog`, selections from the storage directory. Commands drive the
// session through its event handlers and print what a screen would show.
// ---------------------------------------------------------------------------

use std::path::Path;

use lab_supply_core::{
	CatalogItem, CatalogStore, Category, FinderConfig, FinderSession, NoticeLevel, Principal,
	Toggle,
};

use crate::cli::{CliArgs, Command};
use crate::error::CliError;

pub fn run(args: &CliArgs) -> Result<(), CliError> {
	let config = FinderConfig {
		storage_dir: args
			.storage_dir
			.clone()
			.or_else(|| dirs::data_dir().map(|d| d.join("lab-supply"))),
		..FinderConfig::default()
	};
	if config.storage_dir.is_none() {
		tracing::warn!("no storage directory available, selections will not be saved");
	}

	let catalog = match &args.catalog {
		Some(path) => load_catalog(path)?,
		None => CatalogStore::seeded(),
	};

	let mut session = FinderSession::open(catalog, Principal::user("local", "Local user"), &config)?;
	let result = dispatch(&mut session, &args.command, args.json);
	report_notices(&mut session, args.json)?;
	result
}

fn load_catalog(path: &Path) -> Result<CatalogStore, CliError> {
	let raw = std::fs::read_to_string(path).map_err(|source| CliError::CatalogRead {
		path: path.to_path_buf(),
		source,
	})?;
	let items: Vec<CatalogItem> =
		serde_json::from_str(&raw).map_err(|source| CliError::CatalogParse {
			path: path.to_path_buf(),
			source,
		})?;
	tracing::info!(path = %path.display(), count = items.len(), "catalog loaded");
	Ok(CatalogStore::from_items(items)?)
}

fn dispatch(session: &mut FinderSession, command: &Command, json: bool) -> Result<(), CliError> {
	match command {
		Command::Search {
			query,
			category,
			favorites,
		} => {
			session.set_query(query.clone().unwrap_or_default());
			session.set_category(*category);
			if *favorites {
				session.toggle_favorites_only();
			}
			let items = session.visible_items();
			print_items(session, &items, json)
		}
		Command::Suggest { query, category } => {
			session.set_category(*category);
			session.set_query(query.clone());
			let items = session.visible_suggestions().to_vec();
			if json {
				return print_json(&items);
			}
			for item in &items {
				println!("{}\t{}\t{}", item.id(), item.name(), item.category());
			}
			Ok(())
		}
		Command::Show { id } => {
			if !session.select_item(id) {
				return Ok(());
			}
			let Some(item) = session.selected_item().cloned() else {
				return Ok(());
			};
			if json {
				return print_json(&item);
			}
			print_detail(session, &item);
			Ok(())
		}
		Command::Favorite { id } => {
			if let Some(outcome) = session.toggle_favorite(id) {
				println!("{} {} favorites", id, toggle_verb(outcome));
			}
			Ok(())
		}
		Command::Compare { id } => {
			if let Some(outcome) = session.toggle_compare(id) {
				println!(
					"{} {} comparison ({}/{})",
					id,
					toggle_verb(outcome),
					session.compare().len(),
					lab_supply_core::COMPARE_CAPACITY
				);
			}
			Ok(())
		}
		Command::Favorites => {
			let items = session.favorites().items().to_vec();
			print_items(session, &items, json)
		}
		Command::Comparison => {
			if !session.toggle_compare_view() {
				return Ok(());
			}
			if json {
				return print_json(session.compare().items());
			}
			let names: Vec<&str> = session.compare().items().iter().map(|i| i.name()).collect();
			println!("{:<14}{}", "", names.join(" | "));
			for row in session.comparison() {
				println!("{:<14}{}", row.label, row.values.join(" | "));
			}
			Ok(())
		}
		Command::ClearComparison => {
			session.clear_comparison();
			println!("comparison cleared");
			Ok(())
		}
		Command::Request {
			id,
			quantity,
			notes,
		} => {
			if !session.select_item(id) {
				return Ok(());
			}
			let notes = notes.as_deref().unwrap_or("");
			match session.submit_request(*quantity, notes) {
				Some(request) if json => print_json(&request),
				_ => Ok(()),
			}
		}
		Command::Categories => {
			println!("All");
			for category in Category::ALL {
				println!("{}", category);
			}
			Ok(())
		}
	}
}

/// Print informational notices and turn the first rejection into an error.
/// In JSON mode stdout carries only the document, so notices go to stderr.
fn report_notices(session: &mut FinderSession, json: bool) -> Result<(), CliError> {
	let mut rejection = None;
	for notice in session.take_notices() {
		match notice.level {
			NoticeLevel::Info if json => eprintln!("{}", notice.message),
			NoticeLevel::Info => println!("{}", notice.message),
			NoticeLevel::Warning | NoticeLevel::Error => {
				if rejection.is_none() {
					rejection = Some(CliError::Rejected {
						code: notice.code.unwrap_or_else(|| "CLI_REJECTED".to_string()),
						message: notice.message,
					});
				} else {
					eprintln!("{}", notice.message);
				}
			}
		}
	}
	rejection.map_or(Ok(()), Err)
}

fn toggle_verb(outcome: Toggle) -> &'static str {
	match outcome {
		Toggle::Added => "added to",
		Toggle::Removed => "removed from",
	}
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
	println!("{}", serde_json::to_string_pretty(value)?);
	Ok(())
}

fn print_items(session: &FinderSession, items: &[CatalogItem], json: bool) -> Result<(), CliError> {
	if json {
		return print_json(items);
	}
	for item in items {
		let marks = format!(
			"{}{}",
			if session.is_favorite(item.id()) { '*' } else { ' ' },
			if session.is_comparing(item.id()) { '=' } else { ' ' },
		);
		println!(
			"{} {:<8} {:<32} {:<11} {:<13} {:>10}",
			marks,
			item.id(),
			item.name(),
			item.category(),
			item.availability(),
			item.display_price()
		);
	}
	println!("{} item(s)", items.len());
	Ok(())
}

fn print_detail(session: &FinderSession, item: &CatalogItem) {
	println!("{}", item.name());
	println!("  ID:           {}", item.id());
	println!("  Category:     {}", item.category());
	println!("  Description:  {}", item.description());
	println!("  Price:        {}", item.display_price());
	println!("  Availability: {}", item.availability());
	if let Some(manufacturer) = item.manufacturer() {
		println!("  Manufacturer: {}", manufacturer);
	}
	println!(
		"  Favorite: {}  Comparing: {}",
		if session.is_favorite(item.id()) { "yes" } else { "no" },
		if session.is_comparing(item.id()) { "yes" } else { "no" },
	);
}
