use super::grammar::GrammarSpec;
use std::path::{Path, PathBuf};
use tree_sitter::{Node, Tree};

#[derive(Debug, Clone)]
pub struct FunctionInfo {
    pub name: String,
    pub start_line: usize,
    pub end_line: usize,
    pub length: usize,
    pub cyclomatic_complexity: u32,
    pub max_nesting_depth: u32,
    pub param_count: usize,
}

#[derive(Debug, Clone)]
pub struct ImportEdge {
    pub raw: String,
}

#[derive(Debug, Clone)]
pub struct ParsedFile {
    pub rel_path: PathBuf,
    pub functions: Vec<FunctionInfo>,
    pub imports: Vec<ImportEdge>,
    pub identifiers: Vec<String>,
    pub numeric_literals: Vec<(usize, String)>,
    pub max_directory_depth_hint: usize,
}

pub(super) fn extract(tree: &Tree, source: &str, spec: &GrammarSpec, rel_path: &Path) -> ParsedFile {
    let root = tree.root_node();
    let mut functions = Vec::new();
    let mut imports = Vec::new();
    let mut identifiers = Vec::new();
    let mut numeric_literals = Vec::new();

    walk(root, source, spec, &mut functions, &mut imports, &mut identifiers, &mut numeric_literals);

    let max_directory_depth_hint = rel_path.components().count().saturating_sub(1);

    ParsedFile {
        rel_path: rel_path.to_path_buf(),
        functions,
        imports,
        identifiers,
        numeric_literals,
        max_directory_depth_hint,
    }
}

fn walk(
    node: Node,
    source: &str,
    spec: &GrammarSpec,
    functions: &mut Vec<FunctionInfo>,
    imports: &mut Vec<ImportEdge>,
    identifiers: &mut Vec<String>,
    numeric_literals: &mut Vec<(usize, String)>,
) {
    let kind = node.kind();

    if spec.function_kinds.contains(&kind) {
        functions.push(extract_function(node, source, spec));
        // Functions are not expected to nest for these languages at the
        // top level we care about; still recurse for nested closures.
    }

    if spec.import_kinds.contains(&kind) {
        if let Ok(text) = node.utf8_text(source.as_bytes()) {
            imports.push(ImportEdge { raw: text.trim().to_string() });
        }
    }

    if kind == spec.identifier_kind {
        if let Ok(text) = node.utf8_text(source.as_bytes()) {
            identifiers.push(text.to_string());
        }
    }

    if kind == spec.number_kind {
        if let Ok(text) = node.utf8_text(source.as_bytes()) {
            numeric_literals.push((node.start_position().row + 1, text.to_string()));
        }
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk(child, source, spec, functions, imports, identifiers, numeric_literals);
    }
}

fn extract_function(node: Node, source: &str, spec: &GrammarSpec) -> FunctionInfo {
    let name = function_name(node, source).unwrap_or_else(|| "<anonymous>".to_string());
    let start_line = node.start_position().row + 1;
    let end_line = node.end_position().row + 1;
    let length = end_line.saturating_sub(start_line) + 1;

    let mut complexity = 1u32;
    let mut max_depth = 0u32;
    count_branches_and_depth(node, spec, 0, &mut complexity, &mut max_depth);

    let param_count = node
        .children(&mut node.walk())
        .find(|c| c.kind().contains("parameter"))
        .map(|p| {
            let mut cursor = p.walk();
            p.children(&mut cursor)
                .filter(|c| c.is_named())
                .count()
        })
        .unwrap_or(0);

    FunctionInfo {
        name,
        start_line,
        end_line,
        length,
        cyclomatic_complexity: complexity,
        max_nesting_depth: max_depth,
        param_count,
    }
}

fn function_name(node: Node, source: &str) -> Option<String> {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "identifier" || child.kind() == "property_identifier" {
            return child.utf8_text(source.as_bytes()).ok().map(|s| s.to_string());
        }
    }
    None
}

fn count_branches_and_depth(
    node: Node,
    spec: &GrammarSpec,
    depth: u32,
    complexity: &mut u32,
    max_depth: &mut u32,
) {
    let kind = node.kind();
    if spec.branch_kinds.contains(&kind) {
        *complexity += 1;
    }
    let next_depth = if spec.block_kinds.contains(&kind) {
        let d = depth + 1;
        if d > *max_depth {
            *max_depth = d;
        }
        d
    } else {
        depth
    };

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        count_branches_and_depth(child, spec, next_depth, complexity, max_depth);
    }
}
