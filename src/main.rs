use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::sync::Mutex as TokioMutex;
use tracing_subscriber::EnvFilter;

use coderag::api::{ApiServer, AppState};
use coderag::config::Config;
use coderag::db::Db;
use coderag::embedder::ollama::OllamaEmbedder;
use coderag::llm::ollama::OllamaClient;
use coderag::pipeline::IndexBuilder;
use coderag::rag::RagService;
use coderag::repos;

#[derive(Parser)]
#[command(name = "coderag", version, about)]
struct Cli {
    /// Path to the JSON configuration file
    #[arg(long, global = true, default_value = "config.json")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sync repositories and rebuild the vector index
    Build,
    /// Serve the OpenAI-compatible HTTP API
    Serve,
    /// Ask a one-shot question against the existing index
    Query {
        /// The question to answer
        question: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    let config = Config::load(&cli.config)?;
    config.validate()?;

    match cli.command {
        Commands::Build => build(&config).await,
        Commands::Serve => serve(&config).await,
        Commands::Query { question } => query(&config, &question).await,
    }
}

async fn build(config: &Config) -> Result<()> {
    let report = repos::sync_repos(&config.repo_file, &config.clone_dir)
        .context("repository sync failed")?;
    tracing::info!(
        "Sync complete: {} cloned, {} updated, {} failed",
        report.cloned(),
        report.updated(),
        report.failed()
    );

    let mut db =
        Db::open(&config.db_path, config.embedding.dimensions).context("failed to open database")?;
    let embedder = OllamaEmbedder::new(
        &config.llm.base_url,
        config.embedding.model.clone(),
        config.embedding.dimensions,
    );

    let mut builder = IndexBuilder::new(&mut db, &embedder, config.chunk_size, config.chunk_overlap);
    let report = builder.build(&config.clone_dir).await?;

    println!(
        "Indexed {} definitions ({} chunks) from {} files; {} files unreadable",
        report.definitions, report.chunks, report.files, report.failed_files
    );
    Ok(())
}

fn rag_service(config: &Config) -> Result<Arc<RagService>> {
    let db =
        Db::open(&config.db_path, config.embedding.dimensions).context("failed to open database")?;
    let embedder = OllamaEmbedder::new(
        &config.llm.base_url,
        config.embedding.model.clone(),
        config.embedding.dimensions,
    );
    let llm = OllamaClient::new(&config.llm.base_url, config.llm.model.clone());

    Ok(Arc::new(RagService::new(
        Arc::new(TokioMutex::new(db)),
        Arc::new(embedder),
        Arc::new(llm),
        config.search_top_k,
    )))
}

async fn serve(config: &Config) -> Result<()> {
    let state = AppState {
        rag: rag_service(config)?,
        served_model: config.server.served_model.clone(),
    };

    ApiServer::new(&config.server.host, config.server.port, state)
        .serve()
        .await
}

async fn query(config: &Config, question: &str) -> Result<()> {
    let rag = rag_service(config)?;
    let answer = rag.ask(question).await?;
    println!("{answer}");
    Ok(())
}
