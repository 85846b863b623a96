//! Small helpers shared by every Museum Passport crate.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

pub mod error;

pub use error::{report_error, FileIOError};

/// Characters left untouched by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
	.remove(b'-')
	.remove(b'_')
	.remove(b'.')
	.remove(b'!')
	.remove(b'~')
	.remove(b'*')
	.remove(b'\'')
	.remove(b'(')
	.remove(b')');

/// Percent-encodes `value` exactly like `encodeURIComponent` does, so document ids
/// written by older clients keep resolving to the same record.
pub fn encode_uri_component(value: &str) -> String {
	utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Document id of the annotation a user keeps for one museum.
pub fn composite_key(user_id: &str, museum_id: &str) -> String {
	format!(
		"{}_{}",
		encode_uri_component(user_id),
		encode_uri_component(museum_id)
	)
}

/// Strips everything but word characters, whitespace and hyphens, then trims.
///
/// The result is safe to splice inside a double quoted SPARQL string literal.
pub fn sanitize_query(query: &str) -> String {
	query
		.chars()
		.filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
		.collect::<String>()
		.trim()
		.to_string()
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn encodes_like_encode_uri_component() {
		assert_eq!(
			encode_uri_component("http://www.wikidata.org/entity/Q19675"),
			"http%3A%2F%2Fwww.wikidata.org%2Fentity%2FQ19675"
		);
		assert_eq!(encode_uri_component("jane.doe+art@example.com"), "jane.doe%2Bart%40example.com");
		assert_eq!(encode_uri_component("it's (fine) ~*!"), "it's%20(fine)%20~*!");
		assert_eq!(encode_uri_component("café"), "caf%C3%A9");
	}

	#[test]
	fn composite_key_joins_encoded_parts() {
		assert_eq!(
			composite_key("ada@example.com", "http://www.wikidata.org/entity/Q19675"),
			"ada%40example.com_http%3A%2F%2Fwww.wikidata.org%2Fentity%2FQ19675"
		);
	}

	#[test]
	fn composite_key_differs_per_museum() {
		assert_ne!(
			composite_key("ada@example.com", "http://www.wikidata.org/entity/Q1"),
			composite_key("ada@example.com", "http://www.wikidata.org/entity/Q2")
		);
	}

	#[test]
	fn sanitize_strips_sparql_specials() {
		assert_eq!(sanitize_query("  Louvre\" } DROP  "), "Louvre  DROP");
		assert_eq!(sanitize_query("Guggenheim-Bilbao!"), "Guggenheim-Bilbao");
		assert_eq!(sanitize_query("!!!"), "");
		assert_eq!(sanitize_query("snake_case 42"), "snake_case 42");
	}
}
