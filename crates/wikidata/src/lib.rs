//! Client for the public Wikidata SPARQL endpoint, the only source of museum data.
//!
//! Every operation lives in its own module exposing an `exec` function that takes a
//! [`RequestConfig`], builds a query from [`query`], issues one GET and maps the
//! result rows into [`Museum`] values. Nothing is retried.

use std::time::Duration;

use reqwest::header::{ACCEPT, USER_AGENT};
use tracing::debug;

pub mod model;
pub mod query;
pub mod rank;

pub use model::{Museum, MuseumPage};
pub use rank::{dedupe_by_id, rank_by_query};

use model::SparqlResponse;

/// Prefix every Wikidata entity URI starts with
pub const WIKIDATA_ENTITY_PREFIX: &str = "http://www.wikidata.org/entity/";

pub const WIKIDATA_ENDPOINT: &str = "https://query.wikidata.org/sparql";
pub const DEFAULT_USER_AGENT: &str = concat!(
	"MuseumPassport/",
	env!("CARGO_PKG_VERSION"),
	" (https://github.com/museum-passport/museum-passport)"
);

/// Rows per browse page.
pub const PAGE_SIZE: u32 = 20;
/// Rows per search page.
pub const SEARCH_FETCH_LIMIT: u32 = 30;
/// Rows requested for a suggestion list, before ranking.
pub const TYPEAHEAD_FETCH_LIMIT: u32 = 20;
/// Suggestions shown after ranking.
pub const TYPEAHEAD_DISPLAY_LIMIT: usize = 7;

/// Message shown to users when a listing could not be loaded.
pub const FETCH_MUSEUMS_FAILED: &str = "Failed to fetch museums";

#[derive(thiserror::Error, Debug)]
pub enum Error {
	#[error("request to the Wikidata query service failed: {0}")]
	Request(#[from] reqwest::Error),
	#[error("Wikidata query service answered with HTTP {0}")]
	Status(u16),
	#[error("unexpected response from the Wikidata query service: {0}")]
	Decode(#[from] serde_json::Error),
	#[error("not a Wikidata entity URI: '{0}'")]
	InvalidId(String),
}

/// Everything needed to talk to a SPARQL endpoint. Cheap to clone, the inner
/// `reqwest::Client` is reference counted.
#[derive(Clone, Debug)]
pub struct RequestConfig {
	pub client: reqwest::Client,
	pub endpoint: String,
	pub user_agent: String,
}

impl RequestConfig {
	pub fn new(
		endpoint: impl Into<String>,
		user_agent: impl Into<String>,
		timeout: Duration,
	) -> Result<Self, Error> {
		Ok(Self {
			client: reqwest::Client::builder().timeout(timeout).build()?,
			endpoint: endpoint.into(),
			user_agent: user_agent.into(),
		})
	}
}

impl Default for RequestConfig {
	fn default() -> Self {
		Self {
			client: reqwest::Client::new(),
			endpoint: WIKIDATA_ENDPOINT.to_string(),
			user_agent: DEFAULT_USER_AGENT.to_string(),
		}
	}
}

/// Rows of one response, along with how many rows the endpoint sent before any
/// row was discarded.
struct Rows {
	museums: Vec<Museum>,
	returned: usize,
}

async fn select(config: &RequestConfig, sparql: &str) -> Result<Rows, Error> {
	debug!(endpoint = %config.endpoint, "Running SPARQL query");

	let response = config
		.client
		.get(&config.endpoint)
		.query(&[("query", sparql), ("format", "json")])
		.header(USER_AGENT, &config.user_agent)
		.header(ACCEPT, "application/sparql-results+json")
		.send()
		.await?;

	let status = response.status();
	if !status.is_success() {
		return Err(Error::Status(status.as_u16()));
	}

	let body = response.bytes().await?;
	let SparqlResponse { results } = serde_json::from_slice(&body)?;
	let returned = results.bindings.len();

	let museums = results
		.bindings
		.into_iter()
		.filter_map(Museum::from_binding)
		.collect::<Vec<_>>();

	debug!(returned, mapped = museums.len(), "SPARQL query finished");

	Ok(Rows { museums, returned })
}

/// Whether `id` is an entity URI in the form the query service returns, e.g.
/// `http://www.wikidata.org/entity/Q19675`.
///
/// This is the only accepted museum id: annotations, lookups and the local cache all
/// check against it, and it is safe to splice into SPARQL as an IRI.
pub fn is_entity_uri(id: &str) -> bool {
	id.strip_prefix(WIKIDATA_ENTITY_PREFIX)
		.and_then(|local| local.strip_prefix(|c: char| c.is_ascii_uppercase()))
		.is_some_and(|number| !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit()))
}

pub mod museums {
	use super::*;

	pub use page::exec as page;
	pub mod page {
		use super::*;

		/// Browse page starting at `offset`.
		///
		/// `has_more` only says the page came back full, the endpoint gives no total.
		pub async fn exec(config: &RequestConfig, offset: u32) -> Result<MuseumPage, Error> {
			let Rows { museums, returned } =
				select(config, &query::browse(PAGE_SIZE, offset)).await?;

			Ok(MuseumPage {
				museums,
				has_more: returned == PAGE_SIZE as usize,
			})
		}
	}

	pub use by_ids::exec as by_ids;
	pub mod by_ids {
		use super::*;

		/// Resolves known entity URIs. An empty slice never reaches the network.
		pub async fn exec<S: AsRef<str>>(
			config: &RequestConfig,
			ids: &[S],
		) -> Result<Vec<Museum>, Error> {
			if ids.is_empty() {
				return Ok(vec![]);
			}

			if let Some(bad) = ids.iter().find(|id| !is_entity_uri(id.as_ref())) {
				return Err(Error::InvalidId(bad.as_ref().to_string()));
			}

			select(config, &query::by_ids(ids))
				.await
				.map(|rows| rows.museums)
		}
	}

	pub use typeahead::exec as typeahead;
	pub mod typeahead {
		use super::*;

		/// Ranked suggestions for a partially typed name, at most
		/// [`TYPEAHEAD_DISPLAY_LIMIT`] of them.
		pub async fn exec(config: &RequestConfig, q: &str) -> Result<Vec<Museum>, Error> {
			let needle = mp_utils::sanitize_query(q);
			if needle.is_empty() {
				return Ok(vec![]);
			}

			let Rows { mut museums, .. } = select(
				config,
				&query::label_contains(&needle, TYPEAHEAD_FETCH_LIMIT, None),
			)
			.await?;

			rank_by_query(&mut museums, &needle);
			dedupe_by_id(&mut museums);
			museums.truncate(TYPEAHEAD_DISPLAY_LIMIT);

			Ok(museums)
		}
	}

	pub use search::exec as search;
	pub mod search {
		use super::*;

		/// Page of label matches starting at `offset`, unique by id.
		pub async fn exec(config: &RequestConfig, q: &str, offset: u32) -> Result<MuseumPage, Error> {
			let needle = mp_utils::sanitize_query(q);
			if needle.is_empty() {
				return Ok(MuseumPage::default());
			}

			let Rows {
				mut museums,
				returned,
			} = select(
				config,
				&query::label_contains(&needle, SEARCH_FETCH_LIMIT, Some(offset)),
			)
			.await?;

			dedupe_by_id(&mut museums);

			Ok(MuseumPage {
				museums,
				has_more: returned == SEARCH_FETCH_LIMIT as usize,
			})
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn entity_uris_are_validated() {
		assert!(is_entity_uri("http://www.wikidata.org/entity/Q19675"));
		assert!(is_entity_uri("http://www.wikidata.org/entity/L7"));
		assert!(!is_entity_uri("https://www.wikidata.org/entity/Q19675"));
		assert!(!is_entity_uri("Q19675"));
		assert!(!is_entity_uri("http://www.wikidata.org/entity/"));
		assert!(!is_entity_uri("http://www.wikidata.org/entity/Q"));
		assert!(!is_entity_uri("http://www.wikidata.org/entity/q19675"));
		assert!(!is_entity_uri("http://www.wikidata.org/entity/Q1> } #"));
		assert!(!is_entity_uri(" http://www.wikidata.org/entity/Q1"));
		assert!(!is_entity_uri("http://example.com/entity/Q1"));
		assert!(!is_entity_uri(""));
	}

	#[tokio::test]
	async fn blank_input_never_hits_the_network() {
		// Port 9 (discard) is never listening here, any request would fail.
		let config = RequestConfig {
			endpoint: "http://127.0.0.1:9/sparql".to_string(),
			..Default::default()
		};

		assert!(museums::typeahead(&config, "   ").await.unwrap().is_empty());
		assert!(museums::typeahead(&config, "\"}!").await.unwrap().is_empty());
		assert_eq!(museums::search(&config, "", 0).await.unwrap(), MuseumPage::default());
		assert!(museums::by_ids::<&str>(&config, &[]).await.unwrap().is_empty());
	}
}
