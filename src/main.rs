mod macros;

mod cli;
mod client;
mod config;
mod error;
mod metadata;
mod reduce;
mod server;
#[cfg(test)]
mod testing;
mod tools;

use std::net::SocketAddr;

use clap::Parser;
use hyper_util::{
    rt::{TokioExecutor, TokioIo},
    server::conn::auto::Builder,
    service::TowerToHyperService,
};
use rmcp::transport::streamable_http_server::{
    StreamableHttpService, session::local::LocalSessionManager,
};
use rmcp::{ServiceExt, transport::stdio};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command};
use crate::metadata::{PKG_NAME, PKG_VERSION};
use crate::server::ClickUpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = match Cli::parse().into_command() {
        Command::Start(args) => args,
        Command::Tools => {
            for (name, description) in ClickUpServer::catalog() {
                println!("{name:<32} {description}");
            }
            return Ok(());
        }
        Command::Version => {
            println!("{PKG_NAME} {PKG_VERSION}");
            return Ok(());
        }
    };
    args.validate()?;

    // stdout carries the stdio protocol stream
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!(name = PKG_NAME, version = PKG_VERSION, "Starting ClickUp MCP server");

    let config = args.config();
    if !config.has_token() {
        tracing::warn!("CLICKUP_API_TOKEN is not set; tool calls will fail until it is configured");
    }
    let server = ClickUpServer::new(config);

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown requested");
            shutdown.cancel();
        }
    });

    let http_handle = args
        .http_socket()?
        .map(|addr| tokio::spawn(serve_http(server.clone(), addr, cancel.clone())));

    if !args.no_stdio {
        let running = server.serve(stdio()).await?;
        tokio::select! {
            _ = running.waiting() => tracing::info!("stdio transport closed"),
            _ = cancel.cancelled() => {}
        }
    }

    if let Some(handle) = http_handle {
        handle.await??;
    }

    Ok(())
}

/// Streamable HTTP transport; one session per client, accept loop ends on cancel.
async fn serve_http(
    server: ClickUpServer,
    addr: SocketAddr,
    cancel: CancellationToken,
) -> std::io::Result<()> {
    let service = TowerToHyperService::new(StreamableHttpService::new(
        move || Ok(server.clone()),
        LocalSessionManager::default().into(),
        Default::default(),
    ));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Streamable HTTP transport listening");

    loop {
        let (stream, peer) = tokio::select! {
            _ = cancel.cancelled() => break,
            accepted = listener.accept() => match accepted {
                Ok(conn) => conn,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to accept HTTP connection");
                    continue;
                }
            },
        };
        let io = TokioIo::new(stream);
        let service = service.clone();
        tokio::spawn(async move {
            if let Err(e) = Builder::new(TokioExecutor::default())
                .serve_connection(io, service)
                .await
            {
                tracing::debug!(%peer, error = %e, "HTTP connection ended with error");
            }
        });
    }

    tracing::info!("Streamable HTTP transport stopped");
    Ok(())
}
