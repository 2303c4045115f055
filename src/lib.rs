//! # coderag — Repository-aware RAG server
//!
//! Clones source repositories, extracts function/class definitions with
//! their docstrings, embeds them into a SQLite + sqlite-vec index, and
//! answers questions over an OpenAI-compatible chat endpoint backed by a
//! local Ollama model.
//!
//! ## Architecture
//!
//! - **[`config`]** — Configuration loading, validation, and defaults
//! - **[`repos`]** — Repository list parsing and git clone/update sync
//! - **[`extractor`]** — Tree-sitter Python and regex-heuristic C++ definition extraction
//! - **[`document`]** — Definition-to-document rendering and overlapping chunking
//! - **[`db`]** — SQLite + sqlite-vec vector store (rebuild, insert, search)
//! - **[`embedder`]** — Text embedding via the Ollama embeddings API
//! - **[`llm`]** — Prompt-to-text completion via the Ollama chat API
//! - **[`pipeline`]** — Offline index build orchestration
//! - **[`rag`]** — Query-time retrieval and prompt composition
//! - **[`api`]** — OpenAI-compatible HTTP endpoints (axum)

pub mod api;
pub mod config;
pub mod db;
pub mod document;
pub mod embedder;
pub mod extractor;
pub mod llm;
pub mod pipeline;
pub mod rag;
pub mod repos;
