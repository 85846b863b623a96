//! The user's own passport: marking museums and listing them back.

mod args;

use anyhow::{bail, Result};
use mp_core::domain::UserMuseumRecord;
use mp_wikidata::Museum;
use serde::Serialize;

use crate::{
	context::Context,
	print_output,
	ui::{museums_table, record_table},
};

pub use self::args::*;

pub async fn mark(ctx: &mut Context, args: MarkArgs) -> Result<()> {
	if args.is_empty() {
		bail!("Nothing to mark, pass --visited, --wish or --notes");
	}
	ctx.require_user().await?;

	let MarkArgs {
		id,
		visited,
		wish,
		notes,
	} = args;

	if let Some(visited) = visited {
		ctx.session.set_visited(id.as_str(), visited);
	}
	if let Some(wish) = wish {
		ctx.session.set_wish(id.as_str(), wish);
	}
	if let Some(notes) = notes {
		ctx.session.set_notes(id.as_str(), notes);
	}

	let record = ctx.session.save(&id).await?;

	print_output!(ctx, &record, |record: &UserMuseumRecord| {
		println!("{}", record_table(record));
	});

	Ok(())
}

#[derive(Serialize, Debug, Default)]
struct Passport {
	#[serde(skip_serializing_if = "Option::is_none")]
	visited: Option<Vec<Museum>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	wish: Option<Vec<Museum>>,
}

pub async fn list(ctx: &mut Context, args: ListArgs) -> Result<()> {
	ctx.require_user().await?;

	let mut passport = Passport::default();
	if args.kind != Some(ListKind::Wish) {
		passport.visited = Some(ctx.session.visited().await?);
	}
	if args.kind != Some(ListKind::Visited) {
		passport.wish = Some(ctx.session.wished().await?);
	}

	let user_data = &ctx.session.state().user_data;
	print_output!(ctx, &passport, |passport: &Passport| {
		for (title, museums) in [("Visited", &passport.visited), ("Wish to visit", &passport.wish)] {
			let Some(museums) = museums else {
				continue;
			};
			println!("{title} ({})", museums.len());
			if !museums.is_empty() {
				println!("{}", museums_table(museums, Some(user_data)));
			}
		}
	});

	Ok(())
}
