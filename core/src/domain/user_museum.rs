use mp_utils::composite_key;
use serde::{Deserialize, Serialize};

/// A user's annotation of one museum, as stored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserMuseumRecord {
	/// The user's email
	pub user_id: String,
	/// Wikidata entity URI
	pub museum_id: String,
	pub visited: bool,
	pub wish: bool,
	#[serde(default)]
	pub notes: String,
}

impl UserMuseumRecord {
	/// Document id, unique per (user, museum)
	pub fn key(&self) -> String {
		composite_key(&self.user_id, &self.museum_id)
	}
}

/// Partial write of an annotation. `None` fields keep whatever is stored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SaveUserMuseum {
	pub user_id: String,
	pub museum_id: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub visited: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub wish: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub notes: Option<String>,
}

impl SaveUserMuseum {
	pub fn new(user_id: impl Into<String>, museum_id: impl Into<String>) -> Self {
		Self {
			user_id: user_id.into(),
			museum_id: museum_id.into(),
			..Default::default()
		}
	}

	pub fn visited(mut self, visited: bool) -> Self {
		self.visited = Some(visited);
		self
	}

	pub fn wish(mut self, wish: bool) -> Self {
		self.wish = Some(wish);
		self
	}

	pub fn notes(mut self, notes: impl Into<String>) -> Self {
		self.notes = Some(notes.into());
		self
	}

	/// Writes every field of a client-side view.
	pub fn from_data(
		user_id: impl Into<String>,
		museum_id: impl Into<String>,
		data: &UserMuseumData,
	) -> Self {
		Self::new(user_id, museum_id)
			.visited(data.visited)
			.wish(data.wish)
			.notes(data.notes.clone())
	}

	pub fn key(&self) -> String {
		composite_key(&self.user_id, &self.museum_id)
	}

	/// Applies this write on top of `current`, or on top of an empty annotation.
	pub fn merge_into(self, current: Option<UserMuseumRecord>) -> UserMuseumRecord {
		let mut record = current.unwrap_or_else(|| UserMuseumRecord {
			user_id: self.user_id.clone(),
			museum_id: self.museum_id.clone(),
			visited: false,
			wish: false,
			notes: String::new(),
		});

		if let Some(visited) = self.visited {
			record.visited = visited;
		}
		if let Some(wish) = self.wish {
			record.wish = wish;
		}
		if let Some(notes) = self.notes {
			record.notes = notes;
		}

		record
	}
}

/// What the client shows for a museum. Absent entries read as all defaults.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct UserMuseumData {
	#[serde(default)]
	pub wish: bool,
	#[serde(default)]
	pub visited: bool,
	#[serde(default)]
	pub notes: String,
}

impl From<&UserMuseumRecord> for UserMuseumData {
	fn from(record: &UserMuseumRecord) -> Self {
		Self {
			wish: record.wish,
			visited: record.visited,
			notes: record.notes.clone(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn merge_keeps_fields_not_written() {
		let first = SaveUserMuseum::new("ada@example.com", "http://www.wikidata.org/entity/Q1")
			.visited(true)
			.merge_into(None);
		let second = SaveUserMuseum::new("ada@example.com", "http://www.wikidata.org/entity/Q1")
			.notes("nice")
			.merge_into(Some(first));

		assert_eq!(
			second,
			UserMuseumRecord {
				user_id: "ada@example.com".into(),
				museum_id: "http://www.wikidata.org/entity/Q1".into(),
				visited: true,
				wish: false,
				notes: "nice".into(),
			}
		);
	}

	#[test]
	fn save_payload_uses_camel_case() {
		let payload: SaveUserMuseum = serde_json::from_str(
			r#"{"userId":"ada@example.com","museumId":"http://www.wikidata.org/entity/Q1","wish":true}"#,
		)
		.unwrap();

		assert_eq!(
			payload,
			SaveUserMuseum::new("ada@example.com", "http://www.wikidata.org/entity/Q1").wish(true)
		);
	}
}
