use clap::Args;

#[derive(Args, Debug)]
pub struct BrowseArgs {
	/// How many pages of museums to load
	#[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
	pub pages: u32,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
	/// Text to look for in museum names
	pub query: String,

	/// Skip this many matches
	#[arg(long, default_value_t = 0)]
	pub offset: u32,
}

#[derive(Args, Debug)]
pub struct TypeaheadArgs {
	/// Partial museum name, leave out to read one input per line from stdin
	pub query: Option<String>,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
	/// Wikidata entity URI of the museum
	pub id: String,
}
