//! Catalog browsing logic for Lab Supply Finder: filtering, autocomplete,
//! favorites and comparison sets with key-value persistence, and the
//! session context tying them to the view state.

pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod persistence;
pub mod request;
pub mod selection;
pub mod session;
pub mod suggest;
pub mod types;
pub mod view;

pub use catalog::CatalogStore;
pub use config::FinderConfig;
pub use error::FinderError;
pub use filter::filter;
pub use persistence::{DirectoryStore, KeyValueStore, MemoryStore, PersistenceError};
pub use request::SupplyRequest;
pub use selection::{SelectionKind, SelectionSet, Toggle, COMPARE_CAPACITY};
pub use session::{FinderSession, Notice, NoticeLevel, Principal, Role};
pub use suggest::{suggest, SUGGESTION_LIMIT};
pub use types::{Availability, CatalogItem, Category, CategorySelector, ItemDraft};
pub use view::{ComparisonRow, Screen, ViewState};
