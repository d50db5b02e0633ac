// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Gida Search contributors

use anyhow::Result;
use clap::{Parser, Subcommand};
use gida_search::app::{create_router, AppState, VERSION};
use gida_search::services::content::ContentStore;
use gida_search::services::index::{self, DocumentSource};
use gida_search::services::search::SearchService;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gida-search", version, about = "Food-safety content search agent")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP search API.
    Serve {
        #[arg(long, default_value = "0.0.0.0:3000")]
        addr: SocketAddr,
        /// Directory holding `blog/` and `guides/` markdown trees.
        #[arg(long, default_value = "content")]
        content_dir: PathBuf,
        /// Directory holding the per-locale FAQ JSON files.
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
        /// Serve from a persisted search-index artifact instead of the
        /// content tree.
        #[arg(long)]
        index_file: Option<PathBuf>,
    },
    /// Generate the JSON search-index artifact for client-side search.
    BuildIndex {
        #[arg(long, default_value = "content")]
        content_dir: PathBuf,
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
        #[arg(long, default_value = "public/search-index.json")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match Cli::parse().command {
        Command::Serve {
            addr,
            content_dir,
            data_dir,
            index_file,
        } => serve(addr, content_dir, data_dir, index_file).await,
        Command::BuildIndex {
            content_dir,
            data_dir,
            output,
        } => build_index(content_dir, data_dir, &output),
    }
}

async fn serve(
    addr: SocketAddr,
    content_dir: PathBuf,
    data_dir: PathBuf,
    index_file: Option<PathBuf>,
) -> Result<()> {
    let source = match index_file {
        Some(path) => DocumentSource::Artifact(path),
        None => DocumentSource::Content(ContentStore::new(content_dir, data_dir)),
    };

    let state = AppState {
        search_service: Arc::new(SearchService::new(source)),
    };
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("gida-search v{} listening on {}", VERSION, addr);
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_index(content_dir: PathBuf, data_dir: PathBuf, output: &Path) -> Result<()> {
    let store = ContentStore::new(content_dir, data_dir);
    let docs = index::build_documents(&store);
    index::write_artifact(&docs, output)?;
    tracing::info!(
        documents = docs.len(),
        output = %output.display(),
        "search index generated"
    );
    Ok(())
}
