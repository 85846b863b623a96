use clap::{Args, ValueEnum};

#[derive(Args, Debug)]
pub struct MarkArgs {
	/// Wikidata entity URI of the museum
	pub id: String,

	/// Whether you have been there
	#[arg(long)]
	pub visited: Option<bool>,

	/// Whether you want to go there
	#[arg(long)]
	pub wish: Option<bool>,

	/// Free-form notes, replaces existing ones
	#[arg(long)]
	pub notes: Option<String>,
}

impl MarkArgs {
	pub fn is_empty(&self) -> bool {
		self.visited.is_none() && self.wish.is_none() && self.notes.is_none()
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListKind {
	Visited,
	Wish,
}

#[derive(Args, Debug)]
pub struct ListArgs {
	/// Only list one kind of museum, both are listed otherwise
	#[arg(value_enum)]
	pub kind: Option<ListKind>,
}
