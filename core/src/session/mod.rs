//! Per-session context tying identity, museum data and annotations together.
//!
//! A [`MuseumsContext`] is owned by whoever drives the UI and is passed explicitly to
//! anything that needs it. Calls run one at a time; the only suspension points are
//! requests to Wikidata and to the annotation store.

use std::{path::PathBuf, sync::Arc};

use mp_utils::report_error;
use mp_wikidata::{museums, RequestConfig, FETCH_MUSEUMS_FAILED, PAGE_SIZE};
use tracing::{debug, info, warn};

use crate::{
	annotations::AnnotationStore,
	common::errors::{CoreError, Result},
	domain::{
		is_entity_uri, Museum, MuseumPage, SaveUserMuseum, UserMuseumData, UserMuseumRecord,
	},
	state::{reduce, user_data_from_records, Action, MuseumsState},
};

pub mod local_cache;

pub struct MuseumsContext {
	wikidata: RequestConfig,
	store: Arc<dyn AnnotationStore>,
	user_id: Option<String>,
	state: MuseumsState,
	fetched_first_page: bool,
	cache_path: Option<PathBuf>,
}

impl MuseumsContext {
	pub fn new(wikidata: RequestConfig, store: Arc<dyn AnnotationStore>) -> Self {
		Self {
			wikidata,
			store,
			user_id: None,
			state: MuseumsState::default(),
			fetched_first_page: false,
			cache_path: None,
		}
	}

	/// Mirror user data to `path` so it is available before the store answers.
	pub fn with_local_cache(mut self, path: impl Into<PathBuf>) -> Self {
		self.cache_path = Some(path.into());
		self
	}

	pub fn state(&self) -> &MuseumsState {
		&self.state
	}

	pub fn user_id(&self) -> Option<&str> {
		self.user_id.as_deref()
	}

	pub fn dispatch(&mut self, action: Action) {
		self.state = reduce(std::mem::take(&mut self.state), action);
	}

	/// Loads the local cache, if any. Meant for startup, before [`Self::sign_in`].
	pub async fn load_local_cache(&mut self) -> Result<()> {
		let Some(path) = &self.cache_path else {
			return Ok(());
		};

		if let Some(user_data) = local_cache::load(path).await? {
			debug!(entries = user_data.len(), "Loaded cached user data");
			self.dispatch(Action::LoadUserData(user_data));
		}

		Ok(())
	}

	async fn write_local_cache(&self) -> Result<()> {
		match &self.cache_path {
			Some(path) => local_cache::store(path, &self.state.user_data).await,
			None => Ok(()),
		}
	}

	/// Switches identity and replaces user data with what the store holds for `user_id`.
	pub async fn sign_in(&mut self, user_id: impl Into<String>) -> Result<()> {
		let user_id = user_id.into();
		if user_id.trim().is_empty() {
			return Err(CoreError::InvalidOperation("user id must not be empty".into()));
		}

		let records = self.store.get_all_user_museums(&user_id).await?;
		info!(%user_id, annotations = records.len(), "Signed in");

		self.user_id = Some(user_id);
		self.dispatch(Action::LoadUserData(user_data_from_records(&records)));
		report_error(&self.write_local_cache().await);

		Ok(())
	}

	pub async fn sign_out(&mut self) -> Result<()> {
		if let Some(user_id) = self.user_id.take() {
			info!(%user_id, "Signed out");
		}
		self.dispatch(Action::LoadUserData(Default::default()));

		match &self.cache_path {
			Some(path) => local_cache::remove(path).await,
			None => Ok(()),
		}
	}

	/// Fetches the first browse page, once per context.
	pub async fn fetch_first_page(&mut self) {
		if self.fetched_first_page {
			return;
		}
		self.fetched_first_page = true;
		self.fetch_page(0).await;
	}

	/// Fetches the page after the last one, unless a fetch is running or the
	/// previous page came back short.
	pub async fn fetch_next_page(&mut self) {
		if self.state.loading || !self.state.has_more {
			return;
		}
		self.fetched_first_page = true;
		self.fetch_page(self.state.next_offset).await;
	}

	async fn fetch_page(&mut self, offset: u32) {
		self.dispatch(Action::FetchStart);

		match museums::page(&self.wikidata, offset).await {
			Ok(MuseumPage { museums, has_more }) => self.dispatch(Action::FetchSuccess {
				museums,
				has_more,
				next_offset: offset + PAGE_SIZE,
			}),
			Err(e) => {
				warn!(offset, "Failed to fetch museums: {e}");
				self.dispatch(Action::FetchError(FETCH_MUSEUMS_FAILED.to_string()));
			}
		}
	}

	pub fn set_wish(&mut self, id: impl Into<String>, wish: bool) {
		self.dispatch(Action::SetWish { id: id.into(), wish });
	}

	pub fn set_visited(&mut self, id: impl Into<String>, visited: bool) {
		self.dispatch(Action::SetVisited {
			id: id.into(),
			visited,
		});
	}

	pub fn set_notes(&mut self, id: impl Into<String>, notes: impl Into<String>) {
		self.dispatch(Action::SetNotes {
			id: id.into(),
			notes: notes.into(),
		});
	}

	/// Persists the local view of one museum for the signed-in user.
	pub async fn save(&self, museum_id: &str) -> Result<UserMuseumRecord> {
		let user_id = self.user_id.as_deref().ok_or(CoreError::NotSignedIn)?;

		let record = self
			.store
			.save_user_museum(SaveUserMuseum::from_data(
				user_id,
				museum_id,
				&self.state.user(museum_id),
			))
			.await?;

		report_error(&self.write_local_cache().await);

		Ok(record)
	}

	/// A museum already in the list, otherwise looked up on Wikidata.
	pub async fn museum_detail(&self, id: &str) -> Result<Option<Museum>> {
		if let Some(museum) = self.state.museum(id) {
			return Ok(Some(museum.clone()));
		}

		Ok(museums::by_ids(&self.wikidata, &[id])
			.await?
			.into_iter()
			.next())
	}

	/// Search results, or an empty page when Wikidata could not be reached.
	pub async fn search(&self, query: &str, offset: u32) -> MuseumPage {
		museums::search(&self.wikidata, query, offset)
			.await
			.unwrap_or_else(|e| {
				warn!(%query, offset, "Museum search failed: {e}");
				MuseumPage::default()
			})
	}

	/// Ranked suggestions, or none when Wikidata could not be reached.
	pub async fn typeahead(&self, query: &str) -> Vec<Museum> {
		typeahead_lookup(&self.wikidata, query).await
	}

	pub fn wikidata(&self) -> &RequestConfig {
		&self.wikidata
	}

	/// Museums the user has been to, resolving ones not fetched yet.
	pub async fn visited(&self) -> Result<Vec<Museum>> {
		self.resolve_flagged(|data| data.visited).await
	}

	/// Museums the user wants to go to, resolving ones not fetched yet.
	pub async fn wished(&self) -> Result<Vec<Museum>> {
		self.resolve_flagged(|data| data.wish).await
	}

	async fn resolve_flagged(
		&self,
		flagged: impl Fn(&UserMuseumData) -> bool,
	) -> Result<Vec<Museum>> {
		let mut ids = self
			.state
			.user_data
			.iter()
			.filter(|(_, data)| flagged(data))
			.map(|(id, _)| id.as_str())
			.collect::<Vec<_>>();
		ids.sort_unstable();

		let mut resolved = Vec::with_capacity(ids.len());
		let mut missing = vec![];
		for id in ids {
			match self.state.museum(id) {
				Some(museum) => resolved.push(museum.clone()),
				None if is_entity_uri(id) => missing.push(id),
				// Unsaved local edit the store would refuse
				None => debug!(%id, "Skipping museum without an entity URI"),
			}
		}

		if !missing.is_empty() {
			resolved.extend(museums::by_ids(&self.wikidata, missing.as_slice()).await?);
		}

		resolved.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

		Ok(resolved)
	}
}

/// Typeahead lookup with failures logged and turned into an empty list, usable as the
/// lookup of a [`crate::typeahead::Typeahead`].
pub async fn typeahead_lookup(wikidata: &RequestConfig, query: &str) -> Vec<Museum> {
	museums::typeahead(wikidata, query)
		.await
		.unwrap_or_else(|e| {
			warn!(%query, "Museum typeahead failed: {e}");
			vec![]
		})
}
