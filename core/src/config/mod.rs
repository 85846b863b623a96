//! Application configuration management

use anyhow::{anyhow, Result};
use std::fs;
use std::path::PathBuf;

pub mod app_config;

pub use app_config::{AppConfig, ServerConfig, WikidataConfig};

/// Platform-specific data directory resolution
pub fn default_data_dir() -> Result<PathBuf> {
	#[cfg(any(target_os = "macos", target_os = "windows"))]
	let dir = dirs::data_dir()
		.ok_or_else(|| anyhow!("Could not determine data directory"))?
		.join("Museum Passport");

	#[cfg(not(any(target_os = "macos", target_os = "windows")))]
	let dir = dirs::data_local_dir()
		.ok_or_else(|| anyhow!("Could not determine data directory"))?
		.join("museum-passport");

	// Create directory if it doesn't exist
	fs::create_dir_all(&dir)?;

	Ok(dir)
}

/// Versioned on-disk configuration
pub trait Migrate {
	fn current_version(&self) -> u32;

	fn target_version() -> u32;

	fn migrate(&mut self) -> Result<()>;
}
