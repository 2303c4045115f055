//! Retrieval service: embed the question, fetch the most similar chunks,
//! and condition the language model on them.
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex as TokioMutex;
use tracing::debug;

use crate::db::Db;
use crate::db::search::SearchResult;
use crate::embedder::{Embedder, EmbedderError};
use crate::llm::{LlmClient, LlmError};

#[derive(Error, Debug)]
pub enum RagError {
    #[error(transparent)]
    Embed(#[from] EmbedderError),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("vector store query failed: {0}")]
    Store(#[from] rusqlite::Error),
}

/// Read-only retrieval pipeline shared across requests.
///
/// Initialized once at startup; the store handle and model clients are
/// treated as thread-safe by the serving layer. No retry or timeout
/// handling — a hung model call blocks that request.
pub struct RagService {
    db: Arc<TokioMutex<Db>>,
    embedder: Arc<dyn Embedder>,
    llm: Arc<dyn LlmClient>,
    top_k: usize,
}

impl RagService {
    pub fn new(
        db: Arc<TokioMutex<Db>>,
        embedder: Arc<dyn Embedder>,
        llm: Arc<dyn LlmClient>,
        top_k: usize,
    ) -> Self {
        Self {
            db,
            embedder,
            llm,
            top_k,
        }
    }

    /// Answer a question using the indexed definitions as context.
    pub async fn ask(&self, question: &str) -> Result<String, RagError> {
        let query_vector = self.embedder.embed(question).await?;

        let results = {
            let db = self.db.lock().await;
            db.search(&query_vector, self.top_k)?
        };
        debug!("Retrieved {} chunks for question", results.len());

        let prompt = build_prompt(&results, question);
        let answer = self.llm.complete(&prompt).await?;
        Ok(answer)
    }
}

fn build_prompt(results: &[SearchResult], question: &str) -> String {
    let context: Vec<&str> = results.iter().map(|r| r.content.as_str()).collect();
    format!(
        "Use the following pieces of context to answer the question at the end. \
         If you don't know the answer, just say that you don't know, don't try \
         to make up an answer.\n\n{}\n\nQuestion: {}\nHelpful Answer:",
        context.join("\n\n"),
        question
    )
}

// ── Tests ────────────────────────────────────────────────────────────
