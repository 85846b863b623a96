//! Runs every museum operation against a local stand-in for the SPARQL endpoint.

use std::{
	collections::HashMap,
	net::{Ipv4Addr, SocketAddr},
	sync::{Arc, Mutex},
};

use axum::{
	extract::{Query, State},
	http::{HeaderMap, StatusCode},
	response::{IntoResponse, Response},
	routing::get,
	Json, Router,
};
use mp_wikidata::{museums, Error, RequestConfig, PAGE_SIZE};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[derive(Clone, Default)]
struct Upstream {
	status: Option<StatusCode>,
	body: Value,
	seen: Arc<Mutex<Vec<(String, Option<String>)>>>,
}

async fn sparql(
	State(upstream): State<Upstream>,
	headers: HeaderMap,
	Query(params): Query<HashMap<String, String>>,
) -> Response {
	upstream.seen.lock().unwrap().push((
		params.get("query").cloned().unwrap_or_default(),
		headers
			.get("user-agent")
			.and_then(|v| v.to_str().ok())
			.map(str::to_string),
	));

	match upstream.status {
		Some(status) => (status, "upstream unavailable").into_response(),
		None => Json(upstream.body).into_response(),
	}
}

async fn spawn(upstream: Upstream) -> RequestConfig {
	let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
	let addr: SocketAddr = listener.local_addr().unwrap();
	let app = Router::new()
		.route("/sparql", get(sparql))
		.with_state(upstream);

	tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

	RequestConfig {
		endpoint: format!("http://{addr}/sparql"),
		user_agent: "MuseumPassportTests/1.0".to_string(),
		..Default::default()
	}
}

fn row(id: &str, name: &str) -> Value {
	json!({
		"museum": { "type": "uri", "value": format!("http://www.wikidata.org/entity/{id}") },
		"museumLabel": { "type": "literal", "value": name },
		"countryLabel": { "type": "literal", "value": "United States" }
	})
}

fn results(rows: Vec<Value>) -> Value {
	json!({ "head": { "vars": [] }, "results": { "bindings": rows } })
}

#[tokio::test]
async fn typeahead_ranks_prefix_matches_and_dedupes() {
	let upstream = Upstream {
		body: results(vec![
			row("Q3", "The Louvre"),
			row("Q1", "Louvre Annex"),
			row("Q2", "Fake Louvre Replica"),
			row("Q1", "Louvre Annex"),
			row("Q4", "louvered Pavilion"),
		]),
		..Default::default()
	};
	let seen = upstream.seen.clone();
	let config = spawn(upstream).await;

	let museums = museums::typeahead(&config, "louv").await.unwrap();
	let names = museums.iter().map(|m| m.name.as_str()).collect::<Vec<_>>();

	assert_eq!(
		names,
		vec!["louvered Pavilion", "Louvre Annex", "Fake Louvre Replica", "The Louvre"]
	);

	let (query, user_agent) = seen.lock().unwrap()[0].clone();
	assert!(query.contains(r#"LCASE("louv")"#));
	assert!(query.ends_with("LIMIT 20"));
	assert_eq!(user_agent.as_deref(), Some("MuseumPassportTests/1.0"));
}

#[tokio::test]
async fn typeahead_truncates_to_display_limit() {
	let config = spawn(Upstream {
		body: results(
			(0..20)
				.map(|i| row(&format!("Q{i}"), &format!("Art Space {i:02}")))
				.collect(),
		),
		..Default::default()
	})
	.await;

	let museums = museums::typeahead(&config, "art").await.unwrap();

	assert_eq!(museums.len(), 7);
	assert_eq!(museums[0].name, "Art Space 00");
}

#[tokio::test]
async fn search_sanitizes_offsets_and_reports_full_pages() {
	let mut rows = (0..30)
		.map(|i| row(&format!("Q{i}"), &format!("History Museum {i}")))
		.collect::<Vec<_>>();
	rows[29] = row("Q0", "History Museum 0");

	let upstream = Upstream {
		body: results(rows),
		..Default::default()
	};
	let seen = upstream.seen.clone();
	let config = spawn(upstream).await;

	let page = museums::search(&config, "history\"} #", 30).await.unwrap();

	assert_eq!(page.museums.len(), 29);
	assert!(page.has_more);
	let ids = page
		.museums
		.iter()
		.map(|m| m.id.as_str())
		.collect::<std::collections::HashSet<_>>();
	assert_eq!(ids.len(), page.museums.len());

	let (query, _) = seen.lock().unwrap()[0].clone();
	assert!(query.contains(r#"LCASE("history")"#));
	assert!(query.ends_with("LIMIT 30\nOFFSET 30"));
}

#[tokio::test]
async fn browse_page_has_more_only_when_full() {
	let full = spawn(Upstream {
		body: results(
			(0..PAGE_SIZE)
				.map(|i| row(&format!("Q{i}"), "Museum"))
				.collect(),
		),
		..Default::default()
	})
	.await;
	let short = spawn(Upstream {
		body: results(vec![row("Q1", "Museum")]),
		..Default::default()
	})
	.await;

	assert!(museums::page(&full, 0).await.unwrap().has_more);
	assert!(!museums::page(&short, 20).await.unwrap().has_more);
}

#[tokio::test]
async fn by_ids_rejects_non_uris_before_querying() {
	let upstream = Upstream {
		body: results(vec![row("Q19675", "Louvre")]),
		..Default::default()
	};
	let seen = upstream.seen.clone();
	let config = spawn(upstream).await;

	assert!(matches!(
		museums::by_ids(&config, &["Q19675"]).await,
		Err(Error::InvalidId(id)) if id == "Q19675"
	));
	assert!(seen.lock().unwrap().is_empty());

	let found = museums::by_ids(&config, &["http://www.wikidata.org/entity/Q19675"])
		.await
		.unwrap();
	assert_eq!(found.len(), 1);
	assert_eq!(found[0].country.as_deref(), Some("United States"));
}

#[tokio::test]
async fn upstream_failures_surface_as_errors() {
	let down = spawn(Upstream {
		status: Some(StatusCode::SERVICE_UNAVAILABLE),
		..Default::default()
	})
	.await;
	let garbled = spawn(Upstream {
		body: json!({ "unexpected": true }),
		..Default::default()
	})
	.await;

	assert!(matches!(
		museums::page(&down, 0).await,
		Err(Error::Status(503))
	));
	assert!(matches!(
		museums::search(&garbled, "art", 0).await,
		Err(Error::Decode(_))
	));
}
