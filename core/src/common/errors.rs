//! Unified error handling for the core

use mp_utils::FileIOError;
use thiserror::Error;

/// Main error type for core operations
#[derive(Error, Debug)]
pub enum CoreError {
	#[error("Database error: {0}")]
	Database(#[from] sea_orm::DbErr),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	FileIO(#[from] FileIOError),

	#[error("Wikidata error: {0}")]
	Wikidata(#[from] mp_wikidata::Error),

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),

	#[error("Not found: {0}")]
	NotFound(String),

	#[error("Invalid operation: {0}")]
	InvalidOperation(String),

	#[error("No user is signed in")]
	NotSignedIn,

	#[error("Other error: {0}")]
	Other(#[from] anyhow::Error),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
