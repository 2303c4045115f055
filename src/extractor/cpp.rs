//! C/C++ definition extraction via regex heuristics.
//!
//! This path does not parse a grammar. A class is the `class` keyword, an
//! identifier, optional bases, and an opening brace; a function is a
//! return-type token, an identifier, an argument list, and an optional
//! brace body (one nesting level). Templates, deeper nesting, and
//! macro-based declarations can misfire; that imprecision is accepted.
use regex::Regex;

use super::{DefKind, Definition, Language};

pub struct CppExtractor {
    class_re: Regex,
    func_re: Regex,
}

impl CppExtractor {
    #[must_use]
    pub fn new() -> Self {
        let class_re = Regex::new(r"class\s+([A-Za-z_]\w*)\s*(?:[:\w\s,<>]*)?\{")
            .expect("class pattern is valid");
        let func_re = Regex::new(
            r"(?s)([A-Za-z_][\w:<>]*)\s+([A-Za-z_]\w*)\s*\(([^)]*)\)\s*(\{(?:[^{}]*|\{[^}]*\})*\})?",
        )
        .expect("function pattern is valid");
        Self { class_re, func_re }
    }

    /// Extract class and function definitions from C/C++ source.
    /// Records appear in source order: classes first, then functions,
    /// each in match order.
    pub fn extract(&self, source: &str, file_path: &str) -> Vec<Definition> {
        let mut out = Vec::new();

        for m in self.class_re.captures_iter(source) {
            let whole = m.get(0).expect("match group 0");
            let name = m.get(1).map(|g| g.as_str()).unwrap_or_default();
            out.push(Definition {
                name: name.to_string(),
                kind: DefKind::Class,
                docstring: preceding_comment(source, whole.start()),
                source: whole.as_str().to_string(),
                file_path: file_path.to_string(),
                language: Language::Cpp,
            });
        }

        for m in self.func_re.captures_iter(source) {
            let whole = m.get(0).expect("match group 0");
            let name = m.get(2).map(|g| g.as_str()).unwrap_or_default();
            out.push(Definition {
                name: name.to_string(),
                kind: DefKind::Function,
                docstring: preceding_comment(source, whole.start()),
                source: whole.as_str().to_string(),
                file_path: file_path.to_string(),
                language: Language::Cpp,
            });
        }

        out
    }
}

impl Default for CppExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Scan backward from `index` through contiguous comment or blank lines,
/// stopping at the first line that is neither. Returns the trimmed comment
/// block, or `None` when no comment precedes the definition.
fn preceding_comment(source: &str, index: usize) -> Option<String> {
    let mut comment_lines: Vec<&str> = Vec::new();

    for line in source[..index].lines().rev() {
        let trimmed = line.trim();
        if trimmed.starts_with("//") || trimmed.starts_with("/*") || trimmed.starts_with('*') {
            comment_lines.push(trimmed);
        } else if trimmed.is_empty() {
            continue;
        } else {
            break;
        }
    }

    if comment_lines.is_empty() {
        return None;
    }
    comment_lines.reverse();
    Some(comment_lines.join("\n").trim().to_string())
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(source: &str) -> Vec<Definition> {
        CppExtractor::new().extract(source, "test.cpp")
    }

    #[test]
    fn test_class_with_line_comment() {
        let source = "\
int unrelated = 0;
// Represents a 2D point.
class Foo {
public:
  int x;
};
";
        let defs = extract(source);
        let class = defs.iter().find(|d| d.kind == DefKind::Class).unwrap();
        assert_eq!(class.name, "Foo");
        assert_eq!(class.docstring.as_deref(), Some("// Represents a 2D point."));
        assert!(class.source.starts_with("class Foo"));
    }

    #[test]
    fn test_comment_scan_stops_at_code() {
        let source = "\
void other() {}
class Bare {
};
";
        let defs = extract(source);
        let class = defs.iter().find(|d| d.kind == DefKind::Class).unwrap();
        assert!(class.docstring.is_none());
    }

    #[test]
    fn test_comment_survives_blank_line() {
        let source = "\
// Documented despite the gap.

class Gapped {
};
";
        let defs = extract(source);
        let class = defs.iter().find(|d| d.kind == DefKind::Class).unwrap();
        assert_eq!(
            class.docstring.as_deref(),
            Some("// Documented despite the gap.")
        );
    }

    #[test]
    fn test_block_comment_collected() {
        let source = "\
/* Adds two numbers.
 * Returns the sum.
 */
int add(int a, int b) {
  return a + b;
}
";
        let defs = extract(source);
        let func = defs
            .iter()
            .find(|d| d.kind == DefKind::Function && d.name == "add")
            .unwrap();
        let doc = func.docstring.as_deref().unwrap();
        assert!(doc.contains("Adds two numbers."));
        assert!(doc.contains("Returns the sum."));
    }

    #[test]
    fn test_function_with_body() {
        let defs = extract("double area(double r) {\n  return 3.14 * r * r;\n}\n");
        let func = defs.iter().find(|d| d.name == "area").unwrap();
        assert_eq!(func.kind, DefKind::Function);
        assert!(func.source.contains("return 3.14"));
    }

    #[test]
    fn test_class_with_inheritance() {
        let defs = extract("class Derived : public Base {\n};\n");
        assert!(defs.iter().any(|d| d.name == "Derived" && d.kind == DefKind::Class));
    }

    #[test]
    fn test_namespaced_return_type() {
        let defs = extract("std::string name() {\n  return \"x\";\n}\n");
        assert!(defs.iter().any(|d| d.name == "name"));
    }

    #[test]
    fn test_empty_source() {
        assert!(extract("").is_empty());
    }
}
