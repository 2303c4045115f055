//! Definition extraction from source trees.
//!
//! Python files are parsed with Tree-sitter; C/C++ files go through a
//! deliberately approximate regex scan. Unsupported extensions and
//! unparsable files yield no records — a bad file never aborts a walk.
use std::path::Path;

use ignore::WalkBuilder;
use tracing::{debug, warn};

pub mod cpp;
pub mod python;

/// Kind of an extracted definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefKind {
    Function,
    Class,
    Method,
}

impl DefKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            DefKind::Function => "function",
            DefKind::Class => "class",
            DefKind::Method => "method",
        }
    }
}

impl std::fmt::Display for DefKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source language of an extracted definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Python,
    Cpp,
}

impl Language {
    /// Map a file extension to a supported language, if any.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "py" => Some(Language::Python),
            "cpp" | "cc" | "cxx" | "hpp" | "h" => Some(Language::Cpp),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Cpp => "cpp",
        }
    }
}

/// One function, class, or method found in a source file.
///
/// `name` is the dotted qualified name: enclosing class names joined
/// outer-to-inner with the definition's own name. Enclosing functions
/// never contribute to the prefix. Names are unique only within their
/// file/class nesting, never globally.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub name: String,
    pub kind: DefKind,
    pub docstring: Option<String>,
    pub source: String,
    pub file_path: String,
    pub language: Language,
}

/// Counters for one extraction pass over a directory tree.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    pub files: usize,
    pub definitions: usize,
    pub failed_files: usize,
}

/// Extractor holding the compiled Python grammar and C++ patterns.
pub struct Extractor {
    python: python::PythonExtractor,
    cpp: cpp::CppExtractor,
}

impl Extractor {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            python: python::PythonExtractor::new()?,
            cpp: cpp::CppExtractor::new(),
        })
    }

    /// Extract all definitions from a single file.
    ///
    /// Returns an empty vector for unsupported extensions. Read or parse
    /// failures are logged and also yield an empty vector.
    pub fn extract_file(&mut self, path: &Path) -> Vec<Definition> {
        self.try_extract_file(path).unwrap_or_default()
    }

    /// As [`extract_file`](Self::extract_file), but distinguishes an
    /// unreadable file (`None`) from a file with no definitions.
    fn try_extract_file(&mut self, path: &Path) -> Option<Vec<Definition>> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let Some(language) = Language::from_extension(ext) else {
            debug!("Unsupported file type: {}", path.display());
            return Some(Vec::new());
        };

        let source = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                warn!("Failed to read {}: {e}", path.display());
                return None;
            }
        };

        let file_path = path.to_string_lossy().replace('\\', "/");
        Some(match language {
            Language::Python => self.python.extract(&source, &file_path),
            Language::Cpp => self.cpp.extract(&source, &file_path),
        })
    }

    /// Walk a directory tree and extract definitions from every supported
    /// file. Files are processed independently; a file that fails to parse
    /// contributes no records.
    pub fn extract_dir(&mut self, root: &Path) -> (Vec<Definition>, ExtractionStats) {
        let mut definitions = Vec::new();
        let mut stats = ExtractionStats::default();

        let walker = WalkBuilder::new(root).hidden(false).build();
        for entry in walker.into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if path.is_dir() {
                continue;
            }
            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if Language::from_extension(ext).is_none() {
                continue;
            }

            stats.files += 1;
            match self.try_extract_file(path) {
                Some(found) => {
                    stats.definitions += found.len();
                    definitions.extend(found);
                }
                None => stats.failed_files += 1,
            }
        }

        (definitions, stats)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
