//! Client-side browse state and the reducer that evolves it.
//!
//! The state merges museums fetched page by page with the user's local view of each
//! one. Edits made here are never persisted on their own, saving is a separate call on
//! the [`crate::session::MuseumsContext`].

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::domain::{Museum, UserMuseumData, UserMuseumRecord};

/// Museum id -> the user's view of it
pub type UserData = HashMap<String, UserMuseumData>;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MuseumsState {
	/// Every museum fetched so far, in arrival order, unique by id
	pub museums: Vec<Museum>,
	pub user_data: UserData,
	pub loading: bool,
	pub error: Option<String>,
	pub has_more: bool,
	pub next_offset: u32,
}

impl Default for MuseumsState {
	fn default() -> Self {
		Self {
			museums: vec![],
			user_data: UserData::new(),
			loading: false,
			error: None,
			has_more: true,
			next_offset: 0,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
	SetWish { id: String, wish: bool },
	SetVisited { id: String, visited: bool },
	SetNotes { id: String, notes: String },
	LoadUserData(UserData),
	FetchStart,
	FetchSuccess {
		museums: Vec<Museum>,
		has_more: bool,
		next_offset: u32,
	},
	FetchError(String),
}

pub fn reduce(mut state: MuseumsState, action: Action) -> MuseumsState {
	match action {
		Action::SetWish { id, wish } => {
			state.user_data.entry(id).or_default().wish = wish;
		}
		Action::SetVisited { id, visited } => {
			state.user_data.entry(id).or_default().visited = visited;
		}
		Action::SetNotes { id, notes } => {
			state.user_data.entry(id).or_default().notes = notes;
		}
		Action::LoadUserData(user_data) => {
			state.user_data = user_data;
		}
		Action::FetchStart => {
			state.loading = true;
			state.error = None;
		}
		Action::FetchSuccess {
			museums,
			has_more,
			next_offset,
		} => {
			let mut known = state
				.museums
				.iter()
				.map(|museum| museum.id.clone())
				.collect::<HashSet<_>>();

			state
				.museums
				.extend(museums.into_iter().filter(|museum| known.insert(museum.id.clone())));
			state.loading = false;
			state.error = None;
			state.has_more = has_more;
			state.next_offset = next_offset;
		}
		Action::FetchError(error) => {
			state.loading = false;
			state.error = Some(error);
		}
	}

	state
}

impl MuseumsState {
	pub fn museum(&self, id: &str) -> Option<&Museum> {
		self.museums.iter().find(|museum| museum.id == id)
	}

	/// The user's view of a museum, defaults when never touched
	pub fn user(&self, id: &str) -> UserMuseumData {
		self.user_data.get(id).cloned().unwrap_or_default()
	}

	pub fn visited_museums(&self) -> Vec<&Museum> {
		self.museums
			.iter()
			.filter(|museum| self.user_data.get(&museum.id).is_some_and(|data| data.visited))
			.collect()
	}

	pub fn wished_museums(&self) -> Vec<&Museum> {
		self.museums
			.iter()
			.filter(|museum| self.user_data.get(&museum.id).is_some_and(|data| data.wish))
			.collect()
	}
}

/// Builds the client view from persisted annotations.
pub fn user_data_from_records<'a>(
	records: impl IntoIterator<Item = &'a UserMuseumRecord>,
) -> UserData {
	records
		.into_iter()
		.map(|record| (record.museum_id.clone(), UserMuseumData::from(record)))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	fn museum(id: &str, name: &str) -> Museum {
		Museum {
			id: id.to_string(),
			name: name.to_string(),
			..Default::default()
		}
	}

	fn success(museums: Vec<Museum>, has_more: bool, next_offset: u32) -> Action {
		Action::FetchSuccess {
			museums,
			has_more,
			next_offset,
		}
	}

	#[test]
	fn fetch_success_appends_only_unseen_museums() {
		let state = reduce(MuseumsState::default(), Action::FetchStart);
		assert!(state.loading);

		let state = reduce(
			state,
			success(vec![museum("q1", "Louvre"), museum("q2", "Met")], true, 20),
		);
		let state = reduce(
			state,
			success(
				vec![museum("q2", "Met"), museum("q3", "MoMA"), museum("q3", "MoMA")],
				false,
				40,
			),
		);

		assert_eq!(
			state.museums.iter().map(|m| m.id.as_str()).collect::<Vec<_>>(),
			vec!["q1", "q2", "q3"]
		);
		assert!(!state.loading);
		assert!(!state.has_more);
		assert_eq!(state.next_offset, 40);
	}

	#[test]
	fn same_name_different_ids_are_kept() {
		let state = reduce(
			MuseumsState::default(),
			success(
				vec![museum("q1", "Historical Society"), museum("q2", "Historical Society")],
				true,
				20,
			),
		);

		assert_eq!(state.museums.len(), 2);
	}

	#[test]
	fn local_edits_touch_one_field() {
		let state = reduce(
			MuseumsState::default(),
			Action::SetVisited {
				id: "q1".into(),
				visited: true,
			},
		);
		let state = reduce(
			state,
			Action::SetNotes {
				id: "q1".into(),
				notes: "Go back for the sculptures".into(),
			},
		);
		let state = reduce(
			state,
			Action::SetWish {
				id: "q2".into(),
				wish: true,
			},
		);

		assert_eq!(
			state.user("q1"),
			UserMuseumData {
				wish: false,
				visited: true,
				notes: "Go back for the sculptures".into(),
			}
		);
		assert!(state.user("q2").wish);
		assert_eq!(state.user("q3"), UserMuseumData::default());
	}

	#[test]
	fn fetch_error_keeps_museums_and_clears_on_next_start() {
		let state = reduce(
			MuseumsState::default(),
			success(vec![museum("q1", "Louvre")], true, 20),
		);
		let state = reduce(state, Action::FetchStart);
		let state = reduce(state, Action::FetchError("Failed to fetch museums".into()));

		assert_eq!(state.error.as_deref(), Some("Failed to fetch museums"));
		assert!(!state.loading);
		assert_eq!(state.museums.len(), 1);

		let state = reduce(state, Action::FetchStart);
		assert_eq!(state.error, None);
	}

	#[test]
	fn load_user_data_replaces_map_and_drives_filters() {
		let records = vec![
			UserMuseumRecord {
				user_id: "ada@example.com".into(),
				museum_id: "q1".into(),
				visited: true,
				wish: false,
				notes: String::new(),
			},
			UserMuseumRecord {
				user_id: "ada@example.com".into(),
				museum_id: "q2".into(),
				visited: false,
				wish: true,
				notes: "someday".into(),
			},
		];
		let state = reduce(
			MuseumsState::default(),
			Action::SetVisited {
				id: "stale".into(),
				visited: true,
			},
		);
		let state = reduce(
			state,
			success(
				vec![museum("q1", "Louvre"), museum("q2", "Met"), museum("q3", "MoMA")],
				true,
				20,
			),
		);

		let state = reduce(state, Action::LoadUserData(user_data_from_records(&records)));

		assert!(!state.user_data.contains_key("stale"));
		assert_eq!(
			state.visited_museums().iter().map(|m| m.name.as_str()).collect::<Vec<_>>(),
			vec!["Louvre"]
		);
		assert_eq!(
			state.wished_museums().iter().map(|m| m.name.as_str()).collect::<Vec<_>>(),
			vec!["Met"]
		);
		assert_eq!(state.user("q2").notes, "someday");
	}
}
