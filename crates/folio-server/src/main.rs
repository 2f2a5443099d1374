//! folio server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the SQLite
//! document store, loads the persisted baseline, and serves the JSON API.
//! Remote gallery enrichment runs as a background task alongside the listener.

mod settings;

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use folio_api::AppState;
use folio_core::{
  editor::{AccessGate, EditorSession},
  loader::ContentLoader,
  store::ContentStore,
};
use folio_remote::{GithubImporter, InquiryRelay};
use folio_store_sqlite::SqliteStorage;
use tokio::net::TcpListener;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

use crate::settings::ServerConfig;

#[derive(Parser)]
#[command(author, version, about = "Folio studio site server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Serve the stored content only; skip the remote gallery import.
  #[arg(long)]
  offline: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let server_cfg = ServerConfig::load(&cli.config)?;
  let (primary, defaults) = server_cfg.content_defaults()?;

  let store_path = expand_tilde(&server_cfg.store_path);
  let storage = SqliteStorage::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let store = Arc::new(
    ContentStore::new(storage, server_cfg.storage_key.clone(), primary, defaults)
      .context("failed to build content store")?,
  );

  let importer = GithubImporter::new(server_cfg.github.clone())
    .context("failed to build GitHub client")?;
  info!(
    owner = %importer.repo().owner,
    repository = %importer.repo().repository,
    folders = server_cfg.folders.len(),
    "remote gallery source"
  );
  let loader = ContentLoader::new(store.clone(), Arc::new(importer), server_cfg.folders.clone());

  let baseline = loader.load_baseline().await;
  info!(
    language = %store.active_language(),
    projects = baseline.projects.len(),
    packages = baseline.packages.len(),
    "baseline content loaded"
  );

  if cli.offline {
    info!("offline mode; remote gallery import skipped");
  } else {
    tokio::spawn(async move {
      let added = loader.enrich().await;
      info!(added, "remote gallery enrichment finished");
    });
  }

  let relay = InquiryRelay::new(server_cfg.relay.endpoint.clone())
    .context("failed to build relay client")?;
  info!(endpoint = relay.endpoint(), "inquiry relay configured");
  let state = AppState::new(
    store,
    EditorSession::new(AccessGate::new(server_cfg.admin_passphrase.clone())),
    relay,
    server_cfg.relay.inquiry_settings(),
  );

  let app = folio_api::router(state);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
