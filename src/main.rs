//! SiteAudit server: JSON API over a crawl audit store

use anyhow::{Context, Result};
use siteaudit_lib::{api, AuditStore};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("siteaudit=info")).init();

    let data_dir = std::env::var("SITEAUDIT_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./data"));
    let port: u16 = std::env::var("SITEAUDIT_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    let store = AuditStore::open(&data_dir)
        .with_context(|| format!("failed to open audit store in {}", data_dir.display()))?;

    let app = api::create_router(store);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .with_context(|| format!("failed to bind port {port}"))?;
    log::info!("SiteAudit listening on http://localhost:{port}");

    axum::serve(listener, app).await?;

    Ok(())
}
