use std::path::Path;
use std::sync::Once;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::common::errors::{CoreError, Result};

const DEFAULT_FILTER: &str = "warn,mp_core=info,mp_wikidata=info,mp_server=info,mp_cli=info";

/// Initialize tracing with stderr output plus a daily log file in `logs_dir`, normally
/// [`crate::AppConfig::logs_dir`].
///
/// `RUST_LOG` overrides `level`. Only the first call installs anything.
pub fn init(logs_dir: &Path, level: Option<&str>) -> Result<()> {
	static INIT: Once = Once::new();
	let mut result = Ok(());

	INIT.call_once(|| {
		if let Err(e) = std::fs::create_dir_all(logs_dir) {
			result = Err(mp_utils::FileIOError::with_context(
				logs_dir,
				e,
				"creating logs directory",
			)
			.into());
			return;
		}

		let default_filter = level
			.map(|level| format!("{DEFAULT_FILTER},mp_core={level},mp_wikidata={level},mp_server={level},mp_cli={level}"))
			.unwrap_or_else(|| DEFAULT_FILTER.to_string());

		let file_appender = RollingFileAppender::new(Rotation::DAILY, logs_dir, "museum-passport.log");

		if let Err(e) = tracing_subscriber::registry()
			.with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
			.with(fmt::layer().with_target(true).with_writer(std::io::stderr))
			.with(
				fmt::layer()
					.with_target(true)
					.with_thread_ids(true)
					.with_ansi(false)
					.with_writer(file_appender),
			)
			.try_init()
		{
			result = Err(CoreError::InvalidOperation(format!(
				"Failed to initialize tracing: {e}"
			)));
		}
	});

	result
}
