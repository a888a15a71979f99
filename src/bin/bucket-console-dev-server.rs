//! In-memory development backend for the bucket console.
//!
//! Serves the same HTTP contract as the production API (`/login`,
//! `/user/groups`, `/buckets`) with dev tokens and a fixed group directory,
//! so the console and its tests can run without cloud credentials.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use clap::Parser;
use serde_json::Value;
use tokio::sync::RwLock;

#[path = "dev_server/state.rs"]
mod state;
use self::state::*;
#[path = "dev_server/handlers.rs"]
mod handlers;
use self::handlers::*;

#[derive(Parser)]
#[command(name = "bucket-console-dev-server")]
#[command(about = "Bucket console backend (development, in-memory)", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8000")]
    addr: SocketAddr,

    /// Write bound address to this file (dev/test convenience)
    #[arg(long)]
    addr_file: Option<PathBuf>,

    /// Group returned by /user/groups, as `id=displayName` (repeatable;
    /// replaces the built-in directory)
    #[arg(long = "group")]
    groups: Vec<String>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();
    bucket_console::logging::init_stderr()?;

    let groups = if args.groups.is_empty() {
        default_groups()
    } else {
        args.groups
            .iter()
            .map(|g| parse_group_arg(g))
            .collect::<Result<Vec<_>>>()?
    };

    let state = Arc::new(AppState {
        groups,
        buckets: RwLock::new(BTreeMap::new()),
    });

    let app = Router::new()
        .route("/health", get(health))
        .route("/login", post(login))
        .route("/user/groups", get(user_groups))
        .route("/buckets", post(create_bucket).get(list_buckets))
        .route("/buckets/:name", delete(delete_bucket))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("bind {}", args.addr))?;
    let local_addr = listener.local_addr().context("read listener local addr")?;
    tracing::info!(%local_addr, "dev server listening");

    if let Some(addr_file) = &args.addr_file {
        std::fs::write(addr_file, local_addr.to_string())
            .with_context(|| format!("write addr file {}", addr_file.display()))?;
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
