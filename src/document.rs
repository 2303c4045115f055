//! Document building: render an extracted definition into embeddable text
//! and split it into overlapping chunks.
use crate::extractor::Definition;

/// Metadata carried by a document and inherited by every chunk cut from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocMetadata {
    pub file_path: String,
    pub name: String,
}

/// A rendered definition ready for chunking.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub content: String,
    pub metadata: DocMetadata,
    pub kind: String,
    pub language: String,
}

/// An ordered fragment of a document's content.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub content: String,
    pub position: usize,
}

impl Document {
    /// Render a definition through the fixed document template. A missing
    /// docstring is substituted with the literal placeholder `None`.
    #[must_use]
    pub fn from_definition(def: &Definition) -> Self {
        let docstring = def.docstring.as_deref().unwrap_or("None");
        let content = format!(
            "Name: {}\nType: {}\nDocstring:\n{}\n\nSource Code:\n{}\n",
            def.name, def.kind, docstring, def.source
        );
        Self {
            content,
            metadata: DocMetadata {
                file_path: def.file_path.clone(),
                name: def.name.clone(),
            },
            kind: def.kind.as_str().to_string(),
            language: def.language.as_str().to_string(),
        }
    }

    /// Split the document content into overlapping chunks.
    #[must_use]
    pub fn split(&self, chunk_size: usize, overlap: usize) -> Vec<Chunk> {
        split_with_overlap(&self.content, chunk_size, overlap)
            .into_iter()
            .enumerate()
            .map(|(position, content)| Chunk { content, position })
            .collect()
    }
}

/// Split text into windows of `chunk_size` characters advancing by
/// `chunk_size - overlap`. Text at or below one window is returned as a
/// single chunk equal to the input. `overlap` must be smaller than
/// `chunk_size` (enforced by config validation).
#[must_use]
pub fn split_with_overlap(content: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    let chars: Vec<char> = content.chars().collect();
    if chars.len() <= chunk_size {
        return vec![content.to_string()];
    }

    let step = chunk_size.saturating_sub(overlap).max(1);
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let end = (start + chunk_size).min(chars.len());
        chunks.push(chars[start..end].iter().collect());
        if end == chars.len() {
            break;
        }
        start += step;
    }

    chunks
}

// ── Tests ────────────────────────────────────────────────────────────
