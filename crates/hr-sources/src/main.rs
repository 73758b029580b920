mod config;
mod error;
mod loader;
mod server;

use std::sync::Arc;

use rmcp::{ServiceExt, transport::stdio};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use hr_retrieval::classify::Classifier;
use server::HrSourcesServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries MCP JSON-RPC, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting hr-sources MCP server");

    let config = Config::from_env()?;
    info!(
        catalog_path = ?config.catalog_path,
        default_limit = config.default_limit,
        max_limit = config.max_limit,
        "configuration loaded"
    );

    let catalog = Arc::new(loader::load_catalog(&config)?);
    info!(
        documents = catalog.len(),
        categories = catalog.categories().len(),
        fingerprint = %catalog.fingerprint(),
        "catalog ready"
    );

    let classifier = Arc::new(Classifier::builtin());
    let server = HrSourcesServer::new(catalog, classifier, &config);

    if let Some(addr) = &config.tcp_listen_addr {
        let listener = TcpListener::bind(addr).await?;
        info!(listen_addr = %addr, "MCP server ready, serving on TCP");
        loop {
            let (stream, peer) = listener.accept().await?;
            let server = server.clone();
            tokio::spawn(async move {
                tracing::info!(peer = %peer, "MCP client connected");
                let service = server.serve(stream).await.inspect_err(|e| {
                    tracing::error!(error = %e, "MCP server error");
                })?;
                service.waiting().await?;
                tracing::info!(peer = %peer, "MCP client disconnected");
                Ok::<(), anyhow::Error>(())
            });
        }
    } else {
        info!("MCP server ready, serving on stdio");
        let service = server.serve(stdio()).await.inspect_err(|e| {
            tracing::error!(error = %e, "MCP server error");
        })?;
        service.waiting().await?;
        info!("MCP server shut down");
    }
    Ok(())
}
