use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mp_core::{config::default_data_dir, AppConfig};

mod context;
mod domains;
mod ui;
mod util;

use crate::context::{Context, OutputFormat};
use crate::domains::{museums, passport};

#[derive(Parser, Debug)]
#[command(name = "museum-passport", version, about = "Browse museums and keep track of your visits")]
struct Cli {
	/// Path to the Museum Passport data directory
	#[arg(long, global = true)]
	data_dir: Option<PathBuf>,

	/// Email identifying whose annotations to read and write
	#[arg(long, global = true, env = "MUSEUM_PASSPORT_USER")]
	user: Option<String>,

	/// SPARQL endpoint to query instead of the configured one
	#[arg(long, global = true)]
	endpoint: Option<String>,

	/// Output format
	#[arg(long, global = true, value_enum, default_value = "human")]
	format: OutputFormat,

	/// Log at the configured level instead of warnings only
	#[arg(short, long, global = true)]
	verbose: bool,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
	/// List museums page by page
	Browse(museums::BrowseArgs),
	/// Search museums by name
	Search(museums::SearchArgs),
	/// Suggest museums for a partial name
	Typeahead(museums::TypeaheadArgs),
	/// Show one museum
	Show(museums::ShowArgs),
	/// Mark a museum as visited or wished for, or write notes about it
	Mark(passport::MarkArgs),
	/// List the museums you visited or want to visit
	List(passport::ListArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();

	let data_dir = match cli.data_dir {
		Some(dir) => {
			std::fs::create_dir_all(&dir)?;
			dir
		}
		None => default_data_dir()?,
	};

	let mut config = AppConfig::load_from(&data_dir)?;
	config.data_dir = data_dir;
	if let Some(endpoint) = cli.endpoint {
		config.wikidata.endpoint = endpoint;
	}

	let level = if cli.verbose {
		config.log_level.as_str()
	} else {
		"warn"
	};
	mp_core::logging::init(&config.logs_dir(), Some(level))?;

	let mut session = mp_core::context_from_config(&config).await?;
	session.load_local_cache().await?;
	let mut ctx = Context::new(session, cli.format, cli.user);

	match cli.command {
		Commands::Browse(args) => museums::browse(&mut ctx, args).await,
		Commands::Search(args) => museums::search(&mut ctx, args).await,
		Commands::Typeahead(args) => museums::typeahead(&mut ctx, args).await,
		Commands::Show(args) => museums::show(&mut ctx, args).await,
		Commands::Mark(args) => passport::mark(&mut ctx, args).await,
		Commands::List(args) => passport::list(&mut ctx, args).await,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::CommandFactory;
	use pretty_assertions::assert_eq;

	#[test]
	fn cli_definition_is_consistent() {
		Cli::command().debug_assert();
	}

	#[test]
	fn mark_takes_explicit_booleans() {
		let cli = Cli::try_parse_from([
			"museum-passport",
			"--user",
			"ada@example.com",
			"mark",
			"http://www.wikidata.org/entity/Q19675",
			"--visited",
			"true",
			"--notes",
			"Go early",
		])
		.unwrap();

		let Commands::Mark(args) = cli.command else {
			panic!("expected the mark command");
		};
		assert_eq!(args.visited, Some(true));
		assert_eq!(args.wish, None);
		assert_eq!(args.notes.as_deref(), Some("Go early"));
	}

	#[test]
	fn list_kind_is_optional() {
		let cli = Cli::try_parse_from(["museum-passport", "list", "wish"]).unwrap();
		let Commands::List(args) = cli.command else {
			panic!("expected the list command");
		};
		assert_eq!(args.kind, Some(passport::ListKind::Wish));

		assert!(Cli::try_parse_from(["museum-passport", "browse", "--pages", "0"]).is_err());
	}
}
