//! Python definition extraction via Tree-sitter.
//!
//! Walks the syntax tree recursively, recording every function and class
//! definition with its class-qualified dotted name, docstring, and exact
//! source span.
use tracing::warn;
use tree_sitter::{Node, Parser};

use super::{DefKind, Definition, Language};

pub struct PythonExtractor {
    parser: Parser,
}

impl PythonExtractor {
    pub fn new() -> anyhow::Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|e| anyhow::anyhow!("failed to load python grammar: {e}"))?;
        Ok(Self { parser })
    }

    /// Extract all definitions from Python source.
    ///
    /// Parse failure is non-fatal: a warning is logged and no records are
    /// returned.
    pub fn extract(&mut self, source: &str, file_path: &str) -> Vec<Definition> {
        let Some(tree) = self.parser.parse(source, None) else {
            warn!("Failed to parse Python file {file_path}");
            return Vec::new();
        };

        let mut out = Vec::new();
        let mut class_stack = Vec::new();
        visit(
            tree.root_node(),
            source,
            file_path,
            &mut class_stack,
            None,
            &mut out,
        );
        out
    }
}

/// Nearest enclosing definition scope, used to tell methods apart from
/// helpers nested inside function bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Class,
    Function,
}

/// Recursive tree walk. `class_stack` holds the names of enclosing classes
/// only — enclosing functions never contribute to the dotted name.
fn visit(
    node: Node,
    source: &str,
    file_path: &str,
    class_stack: &mut Vec<String>,
    enclosing: Option<Scope>,
    out: &mut Vec<Definition>,
) {
    let kind = node.kind();
    let is_function = kind == "function_definition";
    let is_class = kind == "class_definition";

    if is_function || is_class {
        if let Some(def) = build_definition(node, source, file_path, class_stack, enclosing) {
            out.push(def);
        }
    }

    if is_class {
        let pushed = match node_name(node, source) {
            Some(name) => {
                class_stack.push(name);
                true
            }
            None => false,
        };
        visit_children(node, source, file_path, class_stack, Some(Scope::Class), out);
        if pushed {
            class_stack.pop();
        }
    } else if is_function {
        visit_children(node, source, file_path, class_stack, Some(Scope::Function), out);
    } else {
        visit_children(node, source, file_path, class_stack, enclosing, out);
    }
}

fn visit_children(
    node: Node,
    source: &str,
    file_path: &str,
    class_stack: &mut Vec<String>,
    enclosing: Option<Scope>,
    out: &mut Vec<Definition>,
) {
    for i in 0..node.named_child_count() {
        if let Some(child) = node.named_child(i as u32) {
            visit(child, source, file_path, class_stack, enclosing, out);
        }
    }
}

fn build_definition(
    node: Node,
    source: &str,
    file_path: &str,
    class_stack: &[String],
    enclosing: Option<Scope>,
) -> Option<Definition> {
    let own_name = node_name(node, source)?;

    let name = if class_stack.is_empty() {
        own_name
    } else {
        format!("{}.{own_name}", class_stack.join("."))
    };

    let kind = if node.kind() == "class_definition" {
        DefKind::Class
    } else if enclosing == Some(Scope::Class) {
        DefKind::Method
    } else {
        DefKind::Function
    };

    let source_text = node.utf8_text(source.as_bytes()).ok()?.to_string();

    Some(Definition {
        name,
        kind,
        docstring: docstring(node, source),
        source: source_text,
        file_path: file_path.to_string(),
        language: Language::Python,
    })
}

fn node_name(node: Node, source: &str) -> Option<String> {
    let name_node = node.child_by_field_name("name")?;
    name_node
        .utf8_text(source.as_bytes())
        .ok()
        .map(str::to_string)
}

/// A docstring is the body's first statement when that statement is a bare
/// string expression. Trailing or non-adjacent comments never qualify.
fn docstring(node: Node, source: &str) -> Option<String> {
    let body = node.child_by_field_name("body")?;
    let first = body.named_child(0)?;
    if first.kind() != "expression_statement" {
        return None;
    }
    let expr = first.named_child(0)?;
    if expr.kind() != "string" && expr.kind() != "concatenated_string" {
        return None;
    }

    let mut content = String::new();
    collect_string_content(expr, source, &mut content);
    Some(content)
}

/// Pull the literal text out of a string node, skipping quote tokens and
/// prefix characters.
fn collect_string_content(node: Node, source: &str, acc: &mut String) {
    if node.kind() == "string_content" {
        if let Ok(text) = node.utf8_text(source.as_bytes()) {
            acc.push_str(text);
        }
        return;
    }
    for i in 0..node.named_child_count() {
        if let Some(child) = node.named_child(i as u32) {
            collect_string_content(child, source, acc);
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(source: &str) -> Vec<Definition> {
        let mut extractor = PythonExtractor::new().unwrap();
        extractor.extract(source, "test.py")
    }

    #[test]
    fn test_toplevel_function_with_docstring() {
        let defs = extract("def greet(name):\n    \"\"\"Say hello.\"\"\"\n    return name\n");
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].name, "greet");
        assert_eq!(defs[0].kind, DefKind::Function);
        assert_eq!(defs[0].docstring.as_deref(), Some("Say hello."));
        assert!(defs[0].source.starts_with("def greet"));
    }

    #[test]
    fn test_missing_docstring_is_none() {
        let defs = extract("def silent():\n    return 0\n");
        assert_eq!(defs.len(), 1);
        assert!(defs[0].docstring.is_none());
    }

    #[test]
    fn test_trailing_string_is_not_docstring() {
        let defs = extract("def f():\n    x = 1\n    \"not a docstring\"\n");
        assert_eq!(defs.len(), 1);
        assert!(defs[0].docstring.is_none());
    }

    #[test]
    fn test_nested_class_qualified_names() {
        let source = "\
class B:
    class A:
        def method(self):
            pass
";
        let defs = extract(source);
        let names: Vec<&str> = defs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["B", "B.A", "B.A.method"]);
        assert_eq!(defs[0].kind, DefKind::Class);
        assert_eq!(defs[1].kind, DefKind::Class);
        assert_eq!(defs[2].kind, DefKind::Method);
    }

    #[test]
    fn test_nested_function_gets_no_prefix_from_functions() {
        let source = "\
class C:
    def m(self):
        def helper():
            pass
";
        let defs = extract(source);
        let helper = defs.iter().find(|d| d.name.ends_with("helper")).unwrap();
        // Only class ancestors contribute to the dotted name.
        assert_eq!(helper.name, "C.helper");
        assert_eq!(helper.kind, DefKind::Function);

        let m = defs.iter().find(|d| d.name == "C.m").unwrap();
        assert_eq!(m.kind, DefKind::Method);
    }

    #[test]
    fn test_class_nested_in_function_still_has_methods() {
        let source = "\
def factory():
    class Product:
        def ship(self):
            pass
";
        let defs = extract(source);
        let ship = defs.iter().find(|d| d.name == "Product.ship").unwrap();
        assert_eq!(ship.kind, DefKind::Method);
        let product = defs.iter().find(|d| d.name == "Product").unwrap();
        assert_eq!(product.kind, DefKind::Class);
    }

    #[test]
    fn test_async_function() {
        let defs = extract("async def fetch(url):\n    \"\"\"Fetch a URL.\"\"\"\n    return url\n");
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].name, "fetch");
        assert_eq!(defs[0].kind, DefKind::Function);
        assert_eq!(defs[0].docstring.as_deref(), Some("Fetch a URL."));
    }

    #[test]
    fn test_decorated_function_found() {
        let defs = extract("@wraps\ndef deco():\n    pass\n");
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].name, "deco");
        // Source span covers the definition node, not the decorator.
        assert!(defs[0].source.starts_with("def deco"));
    }

    #[test]
    fn test_class_docstring() {
        let defs = extract("class Widget:\n    \"\"\"A widget.\"\"\"\n    pass\n");
        assert_eq!(defs[0].name, "Widget");
        assert_eq!(defs[0].docstring.as_deref(), Some("A widget."));
    }

    #[test]
    fn test_single_quoted_docstring() {
        let defs = extract("def f():\n    'one-liner'\n");
        assert_eq!(defs[0].docstring.as_deref(), Some("one-liner"));
    }
}
