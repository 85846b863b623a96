mod args;

use std::sync::Arc;

use anyhow::{bail, Result};
use mp_core::{
	session::typeahead_lookup,
	typeahead::{Typeahead, DEFAULT_DEBOUNCE},
};
use mp_wikidata::{Museum, SEARCH_FETCH_LIMIT};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::{
	context::{Context, OutputFormat},
	print_output,
	ui::{museum_detail_table, museums_table},
	util::output::print_json,
};

pub use self::args::*;

pub async fn browse(ctx: &mut Context, args: BrowseArgs) -> Result<()> {
	ctx.sign_in_if_known().await?;

	ctx.session.fetch_first_page().await;
	for _ in 1..args.pages {
		if !ctx.session.state().has_more {
			break;
		}
		ctx.session.fetch_next_page().await;
	}

	let state = ctx.session.state();
	if let Some(error) = &state.error {
		bail!("{error}");
	}

	let user_data = ctx.is_signed_in().then_some(&state.user_data);
	print_output!(ctx, &state.museums, |museums: &Vec<Museum>| {
		println!("{}", museums_table(museums, user_data));
		if state.has_more {
			println!("More museums available, rerun with --pages {}", args.pages + 1);
		}
	});

	Ok(())
}

pub async fn search(ctx: &mut Context, args: SearchArgs) -> Result<()> {
	ctx.sign_in_if_known().await?;

	let page = ctx.session.search(&args.query, args.offset).await;
	let user_data = ctx.is_signed_in().then_some(&ctx.session.state().user_data);

	print_output!(ctx, &page, |page: &mp_wikidata::MuseumPage| {
		if page.museums.is_empty() {
			println!("No museums match '{}'", args.query);
			return;
		}
		println!("{}", museums_table(&page.museums, user_data));
		if page.has_more {
			println!(
				"More matches available, rerun with --offset {}",
				args.offset + SEARCH_FETCH_LIMIT
			);
		}
	});

	Ok(())
}

pub async fn typeahead(ctx: &mut Context, args: TypeaheadArgs) -> Result<()> {
	let wikidata = ctx.session.wikidata().clone();
	let typeahead = Arc::new(Typeahead::new(DEFAULT_DEBOUNCE, move |query: String| {
		let wikidata = wikidata.clone();
		async move { typeahead_lookup(&wikidata, &query).await }
	}));

	if let Some(query) = args.query {
		let suggestions = typeahead.query(query).await.unwrap_or_default();
		return print_suggestions(ctx.format, &suggestions);
	}

	// Every line read supersedes the previous one, only answers still current are printed
	let format = ctx.format;
	let mut lines = BufReader::new(tokio::io::stdin()).lines();
	let mut pending = None;

	while let Some(line) = lines.next_line().await? {
		let input = line.trim().to_string();
		if input.is_empty() {
			typeahead.cancel();
			continue;
		}

		let typeahead = typeahead.clone();
		pending = Some(tokio::spawn(async move {
			match typeahead.query(input.clone()).await {
				Some(suggestions) => print_suggestions(format, &suggestions),
				None => {
					debug!(%input, "Suggestions superseded");
					Ok(())
				}
			}
		}));
	}

	if let Some(last) = pending {
		last.await??;
	}

	Ok(())
}

fn print_suggestions(format: OutputFormat, suggestions: &[Museum]) -> Result<()> {
	match format {
		OutputFormat::Human if suggestions.is_empty() => println!("No suggestions"),
		OutputFormat::Human => {
			for museum in suggestions {
				println!("{}", museum.name);
			}
		}
		OutputFormat::Json => print_json(suggestions)?,
	}

	Ok(())
}

pub async fn show(ctx: &mut Context, args: ShowArgs) -> Result<()> {
	ctx.sign_in_if_known().await?;

	let Some(museum) = ctx.session.museum_detail(&args.id).await? else {
		bail!("No museum found for '{}'", args.id);
	};
	let data = ctx
		.is_signed_in()
		.then(|| ctx.session.state().user(&museum.id));

	print_output!(ctx, &museum, |museum: &Museum| {
		println!("{}", museum_detail_table(museum, data.as_ref()));
	});

	Ok(())
}
