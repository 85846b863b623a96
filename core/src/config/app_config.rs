//! Application configuration

use super::{default_data_dir, Migrate};
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

const CONFIG_FILE_NAME: &str = "museum_passport.json";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
	/// Config schema version
	pub version: u32,

	/// Data directory path
	pub data_dir: PathBuf,

	/// Logging level
	pub log_level: String,

	/// Museum data source
	#[serde(default)]
	pub wikidata: WikidataConfig,

	/// HTTP API settings
	#[serde(default)]
	pub server: ServerConfig,
}

/// Where and how museum data is queried
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WikidataConfig {
	/// SPARQL endpoint URL
	pub endpoint: String,

	/// Sent with every query, Wikidata rejects anonymous clients
	pub user_agent: String,

	/// Per-request timeout in seconds
	pub timeout_secs: u64,
}

impl Default for WikidataConfig {
	fn default() -> Self {
		Self {
			endpoint: mp_wikidata::WIKIDATA_ENDPOINT.to_string(),
			user_agent: mp_wikidata::DEFAULT_USER_AGENT.to_string(),
			timeout_secs: 30,
		}
	}
}

impl WikidataConfig {
	pub fn request_config(&self) -> Result<mp_wikidata::RequestConfig> {
		mp_wikidata::RequestConfig::new(
			self.endpoint.clone(),
			self.user_agent.clone(),
			Duration::from_secs(self.timeout_secs),
		)
		.map_err(|e| anyhow!("Failed to build Wikidata client: {e}"))
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
	pub port: u16,
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self { port: 8080 }
	}
}

impl AppConfig {
	/// Load configuration from the default location
	pub fn load() -> Result<Self> {
		let data_dir = default_data_dir()?;
		Self::load_from(&data_dir)
	}

	/// Load configuration from a specific data directory, writing defaults when missing
	pub fn load_from(data_dir: &Path) -> Result<Self> {
		let config_path = data_dir.join(CONFIG_FILE_NAME);

		if config_path.exists() {
			info!("Loading config from {:?}", config_path);
			let json = fs::read_to_string(&config_path)?;
			let mut config: AppConfig = serde_json::from_str(&json)?;

			if config.current_version() < Self::target_version() {
				info!(
					"Migrating config from v{} to v{}",
					config.current_version(),
					Self::target_version()
				);
				config.migrate()?;
				config.save()?;
			}

			Ok(config)
		} else {
			warn!("No config found, creating default at {:?}", config_path);
			let config = Self::default_with_dir(data_dir.to_path_buf());
			config.save()?;
			Ok(config)
		}
	}

	/// Create default configuration with specific data directory
	pub fn default_with_dir(data_dir: PathBuf) -> Self {
		Self {
			version: Self::target_version(),
			data_dir,
			log_level: "info".to_string(),
			wikidata: WikidataConfig::default(),
			server: ServerConfig::default(),
		}
	}

	/// Save configuration to disk
	pub fn save(&self) -> Result<()> {
		fs::create_dir_all(&self.data_dir)?;

		let config_path = self.data_dir.join(CONFIG_FILE_NAME);
		let json = serde_json::to_string_pretty(self)?;
		fs::write(&config_path, json)?;
		info!("Saved config to {:?}", config_path);
		Ok(())
	}

	/// Get the path for logs directory
	pub fn logs_dir(&self) -> PathBuf {
		self.data_dir.join("logs")
	}

	/// SQLite file holding user annotations
	pub fn database_path(&self) -> PathBuf {
		self.data_dir.join("annotations.db")
	}

	/// Local copy of the signed-in user's annotations
	pub fn user_data_cache_path(&self) -> PathBuf {
		self.data_dir.join("user_data.json")
	}
}

impl Migrate for AppConfig {
	fn current_version(&self) -> u32 {
		self.version
	}

	fn target_version() -> u32 {
		2
	}

	fn migrate(&mut self) -> Result<()> {
		match self.version {
			0 => {
				self.version = 1;
				self.migrate()
			}
			1 => {
				// v2 made the Wikidata endpoint configurable
				self.wikidata = WikidataConfig::default();
				self.version = 2;
				Ok(())
			}
			2 => Ok(()),
			v => Err(anyhow!("Unknown config version: {}", v)),
		}
	}
}
