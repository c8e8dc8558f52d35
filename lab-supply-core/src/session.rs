// ---------------------------------------------------------------------------
// FinderSession: explicit context for one browsing session
// ---------------------------------------------------------------------------
//
// Owns the catalog, both selection sets, the persistence backend, the
// signed-in principal and all search/view state. Every event handler is
// infallible from the caller's side: failures are logged and queued as
// `Notice`s for the host to show inline.
// ---------------------------------------------------------------------------

use std::time::{Duration, Instant};

use crate::catalog::CatalogStore;
use crate::config::FinderConfig;
use crate::error::FinderError;
use crate::filter;
use crate::persistence::{DirectoryStore, KeyValueStore, MemoryStore};
use crate::request::SupplyRequest;
use crate::selection::{SelectionKind, SelectionSet, Toggle};
use crate::suggest;
use crate::types::{generate_item_id, CatalogItem, CategorySelector, ItemDraft};
use crate::view::{comparison_table, ComparisonRow, Screen, ViewState};

// ---------------------------------------------------------------------------
// Principal
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
	User,
	Admin,
}

/// Identity handed over by the authentication layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
	pub id: String,
	pub name: String,
	pub role: Role,
}

impl Principal {
	pub fn user(id: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			role: Role::User,
		}
	}

	pub fn admin(id: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			role: Role::Admin,
		}
	}

	pub fn is_admin(&self) -> bool {
		self.role == Role::Admin
	}
}

// ---------------------------------------------------------------------------
// Notices
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
	Info,
	Warning,
	Error,
}

/// Inline message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
	pub level: NoticeLevel,
	pub code: Option<String>,
	pub message: String,
}

impl Notice {
	pub fn info(message: impl Into<String>) -> Self {
		Self {
			level: NoticeLevel::Info,
			code: None,
			message: message.into(),
		}
	}

	pub fn from_error(err: &FinderError) -> Self {
		Self {
			level: if err.is_user_error() {
				NoticeLevel::Warning
			} else {
				NoticeLevel::Error
			},
			code: Some(err.code().to_string()),
			message: err.to_string(),
		}
	}
}

// ---------------------------------------------------------------------------
// FinderSession
// ---------------------------------------------------------------------------

pub struct FinderSession {
	catalog: CatalogStore,
	favorites: SelectionSet,
	compare: SelectionSet,
	store: Box<dyn KeyValueStore>,
	principal: Principal,
	query: String,
	category: CategorySelector,
	favorites_only: bool,
	suggestions: Vec<CatalogItem>,
	suggestions_open: bool,
	dismiss_at: Option<Instant>,
	dismiss_delay: Duration,
	view: ViewState,
	requests: Vec<SupplyRequest>,
	notices: Vec<Notice>,
}

impl FinderSession {
	// -- Lifecycle -----------------------------------------------------------

	/// Start a session, restoring both selection sets from `store`.
	pub fn new(
		catalog: CatalogStore,
		store: Box<dyn KeyValueStore>,
		principal: Principal,
		config: &FinderConfig,
	) -> Result<Self, FinderError> {
		config.validate()?;
		let favorites = SelectionSet::load(SelectionKind::Favorites, store.as_ref(), &config.favorites_key);
		let compare = SelectionSet::load(SelectionKind::Compare, store.as_ref(), &config.compare_key);

		tracing::info!(
			user = %principal.id,
			admin = principal.is_admin(),
			catalog = catalog.len(),
			favorites = favorites.len(),
			compare = compare.len(),
			"finder session started"
		);

		Ok(Self {
			catalog,
			favorites,
			compare,
			store,
			principal,
			query: String::new(),
			category: CategorySelector::All,
			favorites_only: false,
			suggestions: Vec::new(),
			suggestions_open: false,
			dismiss_at: None,
			dismiss_delay: config.dismiss_delay(),
			view: ViewState::new(),
			requests: Vec::new(),
			notices: Vec::new(),
		})
	}

	/// Start a session with the backend chosen by `config.storage_dir`.
	pub fn open(
		catalog: CatalogStore,
		principal: Principal,
		config: &FinderConfig,
	) -> Result<Self, FinderError> {
		let store: Box<dyn KeyValueStore> = match &config.storage_dir {
			Some(dir) => {
				let store = DirectoryStore::new(dir.clone());
				tracing::debug!(dir = %store.dir().display(), "selections persisted to directory");
				Box::new(store)
			}
			None => {
				tracing::debug!("selections kept in memory");
				Box::new(MemoryStore::new())
			}
		};
		Self::new(catalog, store, principal, config)
	}

	// -- Accessors -----------------------------------------------------------

	pub fn catalog(&self) -> &CatalogStore {
		&self.catalog
	}

	pub fn favorites(&self) -> &SelectionSet {
		&self.favorites
	}

	pub fn compare(&self) -> &SelectionSet {
		&self.compare
	}

	pub fn query(&self) -> &str {
		&self.query
	}

	pub fn category(&self) -> CategorySelector {
		self.category
	}

	pub fn favorites_only(&self) -> bool {
		self.favorites_only
	}

	pub fn view(&self) -> &ViewState {
		&self.view
	}

	pub fn screen(&self) -> Screen {
		self.view.screen()
	}

	pub fn requests(&self) -> &[SupplyRequest] {
		&self.requests
	}

	pub fn is_favorite(&self, id: &str) -> bool {
		self.favorites.contains(id)
	}

	pub fn is_comparing(&self, id: &str) -> bool {
		self.compare.contains(id)
	}

	/// Look an item up in the catalog, then in the stored selections.
	pub fn find_item(&self, id: &str) -> Option<&CatalogItem> {
		self.catalog
			.get(id)
			.or_else(|| self.favorites.get(id))
			.or_else(|| self.compare.get(id))
	}

	pub fn selected_item(&self) -> Option<&CatalogItem> {
		self.view.selected().and_then(|id| self.find_item(id))
	}

	/// Items listed under the current query, category and favorites toggle.
	pub fn visible_items(&self) -> Vec<CatalogItem> {
		let source = if self.favorites_only {
			self.favorites.items()
		} else {
			self.catalog.all()
		};
		filter::filter(source, &self.query, self.category)
	}

	/// Suggestions currently shown below the search box.
	pub fn visible_suggestions(&self) -> &[CatalogItem] {
		if self.suggestions_open {
			&self.suggestions
		} else {
			&[]
		}
	}

	pub fn comparison(&self) -> Vec<ComparisonRow> {
		comparison_table(self.compare.items())
	}

	pub fn take_notices(&mut self) -> Vec<Notice> {
		std::mem::take(&mut self.notices)
	}

	// -- Search events -------------------------------------------------------

	pub fn set_query(&mut self, query: impl Into<String>) {
		self.query = query.into();
		self.view.clear_selection();
		self.dismiss_at = None;
		self.refresh_suggestions();
		self.suggestions_open = !self.query.trim().is_empty();
	}

	pub fn set_category(&mut self, category: CategorySelector) {
		self.category = category;
		self.refresh_suggestions();
		self.drop_hidden_selection();
	}

	pub fn toggle_favorites_only(&mut self) {
		self.favorites_only = !self.favorites_only;
		self.drop_hidden_selection();
	}

	pub fn focus_search(&mut self) {
		self.dismiss_at = None;
		if !self.query.is_empty() {
			self.suggestions_open = true;
		}
	}

	/// Schedule the suggestion list to close after the dismiss delay, leaving
	/// time for a click on a suggestion to land first.
	pub fn blur_search(&mut self, now: Instant) {
		self.dismiss_at = Some(now + self.dismiss_delay);
	}

	/// Apply a pending dismissal whose deadline has passed. Returns whether
	/// the list was closed.
	pub fn tick(&mut self, now: Instant) -> bool {
		match self.dismiss_at {
			Some(deadline) if now >= deadline => {
				self.dismiss_at = None;
				self.suggestions_open = false;
				true
			}
			_ => false,
		}
	}

	pub fn dismissal_pending(&self) -> bool {
		self.dismiss_at.is_some()
	}

	/// Take a suggestion: the query becomes its exact name, the list closes
	/// and the item is selected.
	pub fn choose_suggestion(&mut self, id: &str) -> bool {
		let Some(item) = self.visible_suggestions().iter().find(|s| s.id() == id).cloned() else {
			self.report(FinderError::NotFound(id.to_string()));
			return false;
		};

		self.query = item.name().to_string();
		self.refresh_suggestions();
		self.suggestions_open = false;
		self.dismiss_at = None;
		self.view.select(item.id());
		true
	}

	pub fn select_item(&mut self, id: &str) -> bool {
		if self.find_item(id).is_none() {
			self.report(FinderError::NotFound(id.to_string()));
			return false;
		}
		self.view.select(id);
		true
	}

	// -- Selection sets ------------------------------------------------------

	pub fn toggle_favorite(&mut self, id: &str) -> Option<Toggle> {
		let item = self.resolve(id)?;
		let result = self.favorites.toggle(&item, self.store.as_mut());
		let outcome = self.recover(result)?;
		if self.favorites_only {
			self.drop_hidden_selection();
		}
		Some(outcome)
	}

	pub fn toggle_compare(&mut self, id: &str) -> Option<Toggle> {
		let item = self.resolve(id)?;
		let result = self.compare.toggle(&item, self.store.as_mut());
		let outcome = self.recover(result)?;
		if self.compare.is_empty() {
			self.leave_comparison();
		}
		Some(outcome)
	}

	pub fn clear_comparison(&mut self) {
		self.compare.clear(self.store.as_mut());
		self.leave_comparison();
	}

	// -- Overlays ------------------------------------------------------------

	pub fn toggle_compare_view(&mut self) -> bool {
		let result = self.view.toggle_compare(self.compare.len());
		self.recover(result).is_some()
	}

	pub fn open_admin(&mut self) -> bool {
		let result = self.view.open_admin(self.principal.is_admin());
		self.recover(result).is_some()
	}

	pub fn close_overlay(&mut self) {
		self.view.close_overlay();
	}

	// -- Catalog administration ----------------------------------------------

	/// Add an item from the admin form. Returns the generated id.
	pub fn add_item(&mut self, draft: ItemDraft) -> Option<String> {
		let result = self.require_admin().and_then(|()| {
			let item = CatalogItem::new(generate_item_id(), draft)?;
			let id = item.id().to_string();
			self.catalog.add(item)?;
			Ok(id)
		});
		let id = self.recover(result)?;
		self.refresh_suggestions();
		Some(id)
	}

	/// Replace the item `id` with the draft's values.
	pub fn edit_item(&mut self, id: &str, draft: ItemDraft) -> bool {
		let result = self.require_admin().and_then(|()| {
			let item = CatalogItem::new(id, draft)?;
			self.catalog.edit(item)
		});
		if self.recover(result).is_none() {
			return false;
		}
		self.refresh_suggestions();
		self.drop_hidden_selection();
		true
	}

	pub fn delete_item(&mut self, id: &str) -> bool {
		let result = self.require_admin().and_then(|()| self.catalog.delete(id));
		if self.recover(result).is_none() {
			return false;
		}
		if self.view.selected() == Some(id) {
			self.view.clear_selection();
		}
		self.refresh_suggestions();
		true
	}

	// -- Requests ------------------------------------------------------------

	/// Submit a request for the selected item.
	pub fn submit_request(&mut self, quantity: u32, notes: &str) -> Option<SupplyRequest> {
		let result = match self.selected_item() {
			Some(item) => SupplyRequest::new(item, quantity, notes),
			None => Err(FinderError::InvalidTransition(
				"select an item before requesting it".into(),
			)),
		};
		let request = self.recover(result)?;

		tracing::info!(
			request = %request.id,
			item = %request.item_id,
			quantity = request.quantity,
			user = %self.principal.id,
			"supply request submitted"
		);
		self.notices.push(Notice::info(request.summary()));
		self.requests.push(request.clone());
		Some(request)
	}

	// -- Internals -----------------------------------------------------------

	fn refresh_suggestions(&mut self) {
		self.suggestions = suggest::suggest(self.catalog.all(), &self.query, self.category);
	}

	fn drop_hidden_selection(&mut self) {
		let Some(selected) = self.view.selected() else {
			return;
		};
		if !self.visible_items().iter().any(|item| item.id() == selected) {
			self.view.clear_selection();
		}
	}

	fn leave_comparison(&mut self) {
		if self.view.screen() == Screen::Comparing {
			self.view.close_overlay();
		}
	}

	fn require_admin(&self) -> Result<(), FinderError> {
		if self.principal.is_admin() {
			Ok(())
		} else {
			Err(FinderError::Forbidden(
				"catalog changes require an admin session".into(),
			))
		}
	}

	fn resolve(&mut self, id: &str) -> Option<CatalogItem> {
		let found = self.find_item(id).cloned();
		if found.is_none() {
			self.report(FinderError::NotFound(id.to_string()));
		}
		found
	}

	fn recover<T>(&mut self, result: Result<T, FinderError>) -> Option<T> {
		match result {
			Ok(value) => Some(value),
			Err(e) => {
				self.report(e);
				None
			}
		}
	}

	fn report(&mut self, err: FinderError) {
		if err.is_user_error() {
			tracing::warn!(code = err.code(), error = %err, "event rejected");
		} else {
			tracing::error!(code = err.code(), error = %err, "event failed");
		}
		self.notices.push(Notice::from_error(&err));
	}
}
