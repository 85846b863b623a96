use std::{fmt::Display, path::Path};

use thiserror::Error;
use tracing::error;

/// Report an error with tracing
pub fn report_error<T>(res: &Result<T, impl Display>) {
	if let Err(e) = res {
		error!("{e:#}");
	}
}

/// Local file I/O error carrying the path it happened on
#[derive(Error, Debug)]
pub struct FileIOError {
	pub path: Box<Path>,
	#[source]
	pub source: std::io::Error,
	pub context: Option<&'static str>,
}

impl Display for FileIOError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "file I/O error")?;
		if let Some(ctx) = self.context {
			write!(f, " ({ctx})")?;
		}
		write!(f, ": {}; path: '{}'", self.source, self.path.display())
	}
}

impl FileIOError {
	pub fn with_context(
		path: impl AsRef<Path>,
		source: std::io::Error,
		context: &'static str,
	) -> Self {
		Self {
			path: path.as_ref().into(),
			source,
			context: Some(context),
		}
	}
}
