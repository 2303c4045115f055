//! Offline index build: extract definitions, render documents, chunk,
//! embed, and persist — a full wipe-and-replace of the vector store.
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::db::Db;
use crate::document::Document;
use crate::embedder::Embedder;
use crate::extractor::Extractor;

/// Counters for one index build.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct IndexReport {
    pub files: usize,
    pub definitions: usize,
    pub chunks: usize,
    pub failed_files: usize,
}

pub struct IndexBuilder<'a, E: Embedder + ?Sized> {
    db: &'a mut Db,
    embedder: &'a E,
    chunk_size: usize,
    chunk_overlap: usize,
}

impl<'a, E: Embedder + ?Sized> IndexBuilder<'a, E> {
    pub fn new(db: &'a mut Db, embedder: &'a E, chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            db,
            embedder,
            chunk_size,
            chunk_overlap,
        }
    }

    /// Build the index from every supported source file under `root`.
    ///
    /// The store is cleared first: the index has no incremental-update
    /// semantics, only full rebuilds. Extraction failures skip their file;
    /// embedding or storage failures abort the build.
    pub async fn build<P: AsRef<Path>>(&mut self, root: P) -> Result<IndexReport> {
        let root = root.as_ref();

        let mut extractor = Extractor::new().context("failed to initialize extractor")?;
        let (definitions, stats) = extractor.extract_dir(root);
        info!(
            "Extracted {} definitions from {} files ({} unreadable)",
            stats.definitions, stats.files, stats.failed_files
        );

        self.db.clear().context("failed to clear index")?;

        let mut report = IndexReport {
            files: stats.files,
            definitions: stats.definitions,
            failed_files: stats.failed_files,
            chunks: 0,
        };

        for def in &definitions {
            let doc = Document::from_definition(def);
            let chunks = doc.split(self.chunk_size, self.chunk_overlap);
            let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();

            let embeddings = self
                .embedder
                .embed_batch(&texts)
                .await
                .with_context(|| format!("failed to embed chunks for {}", doc.metadata.name))?;

            self.db
                .insert_document(&doc.metadata, &doc.kind, &doc.language, &chunks, &embeddings)
                .with_context(|| format!("failed to store {}", doc.metadata.name))?;

            report.chunks += chunks.len();
        }

        info!(
            "Indexed {} definitions into {} chunks",
            report.definitions, report.chunks
        );
        Ok(report)
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedder::mock::MockEmbedder;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_build_indexes_definitions() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("math.py"),
            "def add(a, b):\n    \"\"\"Add two numbers.\"\"\"\n    return a + b\n\ndef sub(a, b):\n    return a - b\n",
        )
        .unwrap();

        let mut db = Db::open_in_memory(32).unwrap();
        let embedder = MockEmbedder::new(32);
        let mut builder = IndexBuilder::new(&mut db, &embedder, 500, 100);

        let report = builder.build(dir.path()).await.unwrap();
        assert_eq!(report.files, 1);
        assert_eq!(report.definitions, 2);
        assert!(report.chunks >= 2);
        assert_eq!(report.failed_files, 0);

        assert_eq!(db.count_documents().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_rebuild_replaces_previous_index() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.py"), "def one():\n    pass\n").unwrap();

        let mut db = Db::open_in_memory(16).unwrap();
        let embedder = MockEmbedder::new(16);

        IndexBuilder::new(&mut db, &embedder, 500, 100)
            .build(dir.path())
            .await
            .unwrap();
        assert_eq!(db.count_documents().unwrap(), 1);

        // Second build over the same tree replaces, not accumulates.
        IndexBuilder::new(&mut db, &embedder, 500, 100)
            .build(dir.path())
            .await
            .unwrap();
        assert_eq!(db.count_documents().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_build_empty_tree() {
        let dir = tempdir().unwrap();
        let mut db = Db::open_in_memory(16).unwrap();
        let embedder = MockEmbedder::new(16);

        let report = IndexBuilder::new(&mut db, &embedder, 500, 100)
            .build(dir.path())
            .await
            .unwrap();
        assert_eq!(report, IndexReport::default());
        assert_eq!(db.count_documents().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_long_definition_chunks_with_overlap() {
        let dir = tempdir().unwrap();
        let body: String = (0..120).map(|i| format!("    x{i} = {i}\n")).collect();
        fs::write(
            dir.path().join("big.py"),
            format!("def big():\n{body}"),
        )
        .unwrap();

        let mut db = Db::open_in_memory(16).unwrap();
        let embedder = MockEmbedder::new(16);
        let report = IndexBuilder::new(&mut db, &embedder, 200, 50)
            .build(dir.path())
            .await
            .unwrap();

        assert_eq!(report.definitions, 1);
        assert!(report.chunks > 1, "long definition should split");
        assert_eq!(db.count_chunks().unwrap(), report.chunks);
    }
}
