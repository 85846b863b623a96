//! SPARQL templates sent to the Wikidata query service.
//!
//! All queries share the same subject pattern (instances of museum located in the
//! United States) and the same optional bindings. Browsing and lookups by id group
//! rows per museum so a museum with several images or cities still comes back once;
//! label searches skip the grouping to let the label filter run first.

/// Instance of museum (`Q33506`) in country United States (`Q30`).
const MUSEUM_PATTERN: &str = "?museum wdt:P31 wd:Q33506;
          wdt:P17 wd:Q30.";

const OPTIONAL_BINDINGS: &str = r#"OPTIONAL { ?museum wdt:P131 ?city. }
  OPTIONAL { ?museum wdt:P17 ?country. }
  OPTIONAL { ?museum schema:description ?desc. FILTER(LANG(?desc) = "en") }
  OPTIONAL { ?museum wdt:P856 ?website. }
  OPTIONAL { ?museum wdt:P18 ?thumb. }
  OPTIONAL { ?museum wdt:P154 ?logo. }"#;

const LABEL_SERVICE: &str = r#"SERVICE wikibase:label { bd:serviceParam wikibase:language "en". }"#;

const GROUPED_SELECT: &str = "SELECT ?museum ?museumLabel
  (MIN(STR(?cityLabel)) AS ?cityLabel)
  (MIN(STR(?countryLabel)) AS ?countryLabel)
  (MIN(STR(?desc)) AS ?desc)
  (MIN(STR(?website)) AS ?website)
  (MIN(STR(?thumb)) AS ?thumb)
  (MIN(STR(?logo)) AS ?logo)";

/// Browse page ordered the way the endpoint returns it.
pub fn browse(limit: u32, offset: u32) -> String {
	format!(
		"{GROUPED_SELECT}
WHERE {{
  {MUSEUM_PATTERN}
  {OPTIONAL_BINDINGS}
  {LABEL_SERVICE}
}}
GROUP BY ?museum ?museumLabel
LIMIT {limit}
OFFSET {offset}"
	)
}

/// Lookup of known entities. Callers must have validated `ids` already, they are
/// spliced verbatim as IRIs.
pub fn by_ids<S: AsRef<str>>(ids: &[S]) -> String {
	let values = ids
		.iter()
		.map(|id| format!("(<{}>)", id.as_ref()))
		.collect::<Vec<_>>()
		.join(" ");

	format!(
		"{GROUPED_SELECT}
WHERE {{
  VALUES (?museum) {{ {values} }}
  {MUSEUM_PATTERN}
  {OPTIONAL_BINDINGS}
  {LABEL_SERVICE}
}}
GROUP BY ?museum ?museumLabel"
	)
}

/// Case-insensitive substring match on the museum label.
///
/// `needle` must already be sanitized with [`mp_utils::sanitize_query`].
pub fn label_contains(needle: &str, limit: u32, offset: Option<u32>) -> String {
	let offset = offset
		.map(|offset| format!("\nOFFSET {offset}"))
		.unwrap_or_default();

	format!(
		r#"SELECT ?museum ?museumLabel ?cityLabel ?countryLabel ?desc ?website ?thumb ?logo WHERE {{
  {MUSEUM_PATTERN}
  ?museum rdfs:label ?museumLabel.
  FILTER(CONTAINS(LCASE(?museumLabel), LCASE("{needle}")))
  {OPTIONAL_BINDINGS}
  {LABEL_SERVICE}
}}
LIMIT {limit}{offset}"#
	)
}
