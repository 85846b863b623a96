use std::collections::HashSet;

use crate::Museum;

/// Orders museums for a suggestion list: names starting with `query` first, then the
/// ones merely containing it, each group alphabetical. Comparison is case-insensitive.
pub fn rank_by_query(museums: &mut [Museum], query: &str) {
	let needle = query.to_lowercase();

	museums.sort_by_cached_key(|museum| {
		let name = museum.name.to_lowercase();
		(!name.starts_with(&needle), name)
	});
}

/// Keeps the first occurrence of every id and drops entries without one.
pub fn dedupe_by_id(museums: &mut Vec<Museum>) {
	let mut seen = HashSet::with_capacity(museums.len());
	museums.retain(|museum| !museum.id.is_empty() && seen.insert(museum.id.clone()));
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

	fn names(museums: &[Museum]) -> Vec<&str> {
		museums.iter().map(|m| m.name.as_str()).collect()
	}

	#[test]
	fn prefix_matches_come_before_substring_matches() {
		let mut museums = vec![
			museum("q1", "Museum of Modern Art"),
			museum("q2", "Art Institute of Chicago"),
			museum("q3", "Dallas Museum of Art"),
			museum("q4", "artisan Gallery"),
		];

		rank_by_query(&mut museums, "Art");

		assert_eq!(
			names(&museums),
			vec![
				"Art Institute of Chicago",
				"artisan Gallery",
				"Dallas Museum of Art",
				"Museum of Modern Art",
			]
		);
	}

	#[test]
	fn dedupe_keeps_first_and_drops_blank_ids() {
		let mut museums = vec![
			museum("q1", "First"),
			museum("", "No id"),
			museum("q2", "Second"),
			museum("q1", "First again"),
		];

		dedupe_by_id(&mut museums);

		assert_eq!(names(&museums), vec!["First", "Second"]);
	}
}
