use std::{
	net::{Ipv6Addr, SocketAddr},
	path::PathBuf,
};

use clap::Parser;
use mp_core::{config::default_data_dir, AppConfig};
use mp_server::{router, AppState};
use tokio::net::TcpListener;
use tracing::info;

mod utils;

#[derive(Parser, Debug)]
#[command(name = "mp-server", version, about = "Museum Passport HTTP API")]
struct Args {
	/// Port to listen on, overrides the configured one
	#[arg(long, env = "PORT")]
	port: Option<u16>,

	/// Directory holding the config, the annotation database and logs
	#[arg(long, env = "DATA_DIR")]
	data_dir: Option<PathBuf>,

	/// SPARQL endpoint to query instead of the configured one
	#[arg(long, env = "WIKIDATA_ENDPOINT")]
	endpoint: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let args = Args::parse();

	let data_dir = match args.data_dir {
		Some(dir) => {
			std::fs::create_dir_all(&dir)?;
			dir
		}
		None => default_data_dir()?,
	};

	let mut config = AppConfig::load_from(&data_dir)?;
	config.data_dir = data_dir;
	if let Some(port) = args.port {
		config.server.port = port;
	}
	if let Some(endpoint) = args.endpoint {
		config.wikidata.endpoint = endpoint;
	}

	mp_core::logging::init(&config.logs_dir(), Some(&config.log_level))?;

	let state = AppState {
		wikidata: config.wikidata.request_config()?,
		store: mp_core::open_annotation_store(&config).await?,
	};

	// This listens on IPv6 and IPv4
	let addr = SocketAddr::from((Ipv6Addr::UNSPECIFIED, config.server.port));
	let listener = TcpListener::bind(addr).await?;
	info!("Listening on http://localhost:{}", config.server.port);

	axum::serve(listener, router(state))
		.with_graceful_shutdown(utils::axum_shutdown_signal())
		.await?;

	Ok(())
}
