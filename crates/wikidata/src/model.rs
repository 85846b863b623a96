use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A museum as described by Wikidata. Never stored locally, every instance comes
/// straight out of a query result.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Museum {
	/// Entity URI, e.g. `http://www.wikidata.org/entity/Q19675`
	pub id: String,
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub city: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub country: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub website: Option<String>,
	/// Thumbnail URL
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub image: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub logo: Option<String>,
}

/// One page of results plus the "page came back full" hint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MuseumPage {
	pub museums: Vec<Museum>,
	pub has_more: bool,
}

/// `application/sparql-results+json` envelope, only the parts we read.
#[derive(Deserialize, Debug)]
pub(crate) struct SparqlResponse {
	pub results: SparqlResults,
}

#[derive(Deserialize, Debug)]
pub(crate) struct SparqlResults {
	pub bindings: Vec<HashMap<String, SparqlTerm>>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct SparqlTerm {
	pub value: String,
}

impl Museum {
	/// Maps one result row. Rows without a `?museum` binding are unusable and yield `None`.
	pub(crate) fn from_binding(mut row: HashMap<String, SparqlTerm>) -> Option<Self> {
		let mut take = |var: &str| row.remove(var).map(|term| term.value);

		let id = take("museum")?;

		Some(Self {
			id,
			name: take("museumLabel").unwrap_or_default(),
			city: take("cityLabel"),
			country: take("countryLabel"),
			description: take("desc"),
			website: take("website"),
			image: take("thumb"),
			logo: take("logo"),
		})
	}
}
