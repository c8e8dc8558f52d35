// ---------------------------------------------------------------------------
// Integration tests for the lab-supply binary
//
// Each test runs the built binary against a fresh temporary storage
// directory and inspects stdout, stderr and the exit status.
// ---------------------------------------------------------------------------

use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;

// ---------------------------------------------------------------------------
// Helper
// ---------------------------------------------------------------------------

fn run(storage: &Path, args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_lab-supply"))
		.args(args)
		.arg("--storage-dir")
		.arg(storage)
		.env_remove("LAB_SUPPLY_CATALOG")
		.env_remove("LAB_SUPPLY_LOG_LEVEL")
		.env_remove("RUST_LOG")
		.output()
		.expect("failed to run lab-supply")
}

fn stdout(output: &Output) -> String {
	String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
	String::from_utf8_lossy(&output.stderr).into_owned()
}

fn json(output: &Output) -> Value {
	serde_json::from_slice(&output.stdout)
		.unwrap_or_else(|e| panic!("invalid JSON: {e}\n{}", stdout(output)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn search_filters_by_query_and_category() {
	let dir = tempfile::tempdir().unwrap();

	let out = run(dir.path(), &["search", "centrifuge", "--json"]);
	assert!(out.status.success(), "{}", stderr(&out));
	let ids: Vec<String> = json(&out)
		.as_array()
		.unwrap()
		.iter()
		.map(|v| v["id"].as_str().unwrap().to_string())
		.collect();
	assert_eq!(ids, vec!["EQ001", "CN003"]);

	let out = run(dir.path(), &["search", "--category", "Reagent", "--json"]);
	let items = json(&out);
	assert!(items
		.as_array()
		.unwrap()
		.iter()
		.all(|v| v["category"] == "Reagent"));
}

#[test]
fn suggest_is_bounded_and_empty_for_blank_query() {
	let dir = tempfile::tempdir().unwrap();

	let out = run(dir.path(), &["suggest", "e", "--json"]);
	assert!(out.status.success());
	assert_eq!(json(&out).as_array().unwrap().len(), 8);

	let out = run(dir.path(), &["suggest", " ", "--json"]);
	assert!(out.status.success());
	assert!(json(&out).as_array().unwrap().is_empty());
}

#[test]
fn favorites_persist_between_runs() {
	let dir = tempfile::tempdir().unwrap();

	let out = run(dir.path(), &["favorite", "RG001"]);
	assert!(out.status.success(), "{}", stderr(&out));
	assert!(stdout(&out).contains("RG001 added to favorites"));
	assert!(dir.path().join("favorites.json").exists());

	let out = run(dir.path(), &["favorites", "--json"]);
	let items = json(&out);
	assert_eq!(items.as_array().unwrap().len(), 1);
	assert_eq!(items[0]["name"], "Ethanol 96%");

	let out = run(dir.path(), &["favorite", "RG001"]);
	assert!(stdout(&out).contains("removed from favorites"));
	let out = run(dir.path(), &["favorites", "--json"]);
	assert!(json(&out).as_array().unwrap().is_empty());
}

#[test]
fn fourth_comparison_is_rejected() {
	let dir = tempfile::tempdir().unwrap();
	for id in ["EQ001", "EQ002", "EQ003"] {
		assert!(run(dir.path(), &["compare", id]).status.success());
	}

	let out = run(dir.path(), &["compare", "EQ004"]);
	assert!(!out.status.success());
	assert!(stderr(&out).contains("FINDER_CAPACITY_EXCEEDED"));

	let out = run(dir.path(), &["comparison"]);
	assert!(out.status.success());
	let table = stdout(&out);
	assert!(table.contains("Benchtop Centrifuge | PCR Thermal Cycler | Analytical Balance"));
	assert!(table.contains("Price"));

	assert!(run(dir.path(), &["clear-comparison"]).status.success());
	let out = run(dir.path(), &["comparison"]);
	assert!(!out.status.success());
}

#[test]
fn comparison_json_matches_text_behaviour() {
	let dir = tempfile::tempdir().unwrap();

	let out = run(dir.path(), &["comparison", "--json"]);
	assert!(!out.status.success());
	assert!(out.stdout.is_empty());
	let text = stderr(&out);
	let err: Value = serde_json::from_str(text.lines().last().unwrap()).unwrap();
	assert_eq!(err["code"], "FINDER_INVALID_TRANSITION");

	assert!(run(dir.path(), &["compare", "RG003"]).status.success());
	let out = run(dir.path(), &["comparison", "--json"]);
	assert!(out.status.success(), "{}", stderr(&out));
	assert_eq!(json(&out)[0]["id"], "RG003");
}

#[test]
fn unknown_item_is_not_found() {
	let dir = tempfile::tempdir().unwrap();
	let out = run(dir.path(), &["show", "NOPE"]);
	assert!(!out.status.success());
	assert!(stderr(&out).contains("FINDER_NOT_FOUND"));
}

#[test]
fn request_validates_quantity() {
	let dir = tempfile::tempdir().unwrap();

	let out = run(dir.path(), &["request", "RG002", "--quantity", "0"]);
	assert!(!out.status.success());
	assert!(stderr(&out).contains("FINDER_VALIDATION"));

	let out = run(dir.path(), &["request", "RG002", "--quantity", "2", "--notes", "bench 3"]);
	assert!(out.status.success(), "{}", stderr(&out));
	assert!(stdout(&out).contains("Taq DNA Polymerase x2 (notes: bench 3)"));
}

#[test]
fn custom_catalog_replaces_seed() {
	let dir = tempfile::tempdir().unwrap();
	let catalog = dir.path().join("catalog.json");
	std::fs::write(
		&catalog,
		r#"[
			{"id":"X1","name":"Cryo Box","category":"Consumable","description":"81-place","price":6.5,"availability":"In Stock"},
			{"id":"X2","name":"Dry Block Heater","category":"Equipment","description":"","price":540,"availability":"On Order","manufacturer":"Grant"}
		]"#,
	)
	.unwrap();

	let out = run(dir.path(), &["search", "--json", "--catalog", catalog.to_str().unwrap()]);
	assert!(out.status.success(), "{}", stderr(&out));
	assert_eq!(json(&out).as_array().unwrap().len(), 2);

	let out = run(dir.path(), &["suggest", "grant", "--json", "--catalog", catalog.to_str().unwrap()]);
	assert_eq!(json(&out)[0]["id"], "X2");
}

#[test]
fn invalid_catalog_is_reported() {
	let dir = tempfile::tempdir().unwrap();
	let catalog = dir.path().join("catalog.json");
	std::fs::write(&catalog, r#"[{"id":"X1","name":"Box","category":"Glassware","price":1,"availability":"In Stock"}]"#)
		.unwrap();

	let out = run(dir.path(), &["search", "--catalog", catalog.to_str().unwrap()]);
	assert!(!out.status.success());
	assert!(stderr(&out).contains("CLI_CATALOG_PARSE"));
}

#[test]
fn corrupt_snapshot_starts_empty() {
	let dir = tempfile::tempdir().unwrap();
	std::fs::write(dir.path().join("favorites.json"), "{{{").unwrap();

	let out = run(dir.path(), &["favorites", "--json"]);
	assert!(out.status.success());
	assert!(json(&out).as_array().unwrap().is_empty());
}
