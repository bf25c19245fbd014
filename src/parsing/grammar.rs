use crate::discovery::Language;
use tree_sitter::Language as TsLanguage;

/// Per-language node-kind tables. Grammars disagree on exact node names
/// (`function_declaration` in Go vs. `function_definition` in Python), so
/// the generic extractor in `summary.rs` is parameterized over this table
/// rather than special-casing each language inline.
pub struct GrammarSpec {
    language: Language,
    pub function_kinds: &'static [&'static str],
    pub branch_kinds: &'static [&'static str],
    pub block_kinds: &'static [&'static str],
    pub import_kinds: &'static [&'static str],
    pub identifier_kind: &'static str,
    pub call_kind: &'static str,
    pub number_kind: &'static str,
}

impl GrammarSpec {
    pub fn for_language(language: Language) -> Self {
        match language {
            Language::Go => GrammarSpec {
                language,
                function_kinds: &["function_declaration", "method_declaration", "func_literal"],
                branch_kinds: &[
                    "if_statement",
                    "for_statement",
                    "expression_switch_statement",
                    "type_switch_statement",
                    "communication_case",
                    "expression_case",
                    "default_case",
                    "binary_expression",
                ],
                block_kinds: &["block", "if_statement", "for_statement"],
                import_kinds: &["import_spec"],
                identifier_kind: "identifier",
                call_kind: "call_expression",
                number_kind: "int_literal",
            },
            Language::Python => GrammarSpec {
                language,
                function_kinds: &["function_definition", "lambda"],
                branch_kinds: &[
                    "if_statement",
                    "elif_clause",
                    "for_statement",
                    "while_statement",
                    "except_clause",
                    "boolean_operator",
                    "conditional_expression",
                ],
                block_kinds: &["block", "if_statement", "for_statement", "while_statement"],
                import_kinds: &["import_statement", "import_from_statement"],
                identifier_kind: "identifier",
                call_kind: "call",
                number_kind: "integer",
            },
            Language::TypeScript => GrammarSpec {
                language,
                function_kinds: &[
                    "function_declaration",
                    "method_definition",
                    "arrow_function",
                    "function_expression",
                ],
                branch_kinds: &[
                    "if_statement",
                    "for_statement",
                    "for_in_statement",
                    "while_statement",
                    "switch_case",
                    "catch_clause",
                    "ternary_expression",
                    "binary_expression",
                ],
                block_kinds: &["statement_block", "if_statement", "for_statement"],
                import_kinds: &["import_statement"],
                identifier_kind: "identifier",
                call_kind: "call_expression",
                number_kind: "number",
            },
        }
    }

    pub fn ts_language(&self) -> TsLanguage {
        match self.language {
            Language::Go => tree_sitter_go::LANGUAGE.into(),
            Language::Python => tree_sitter_python::LANGUAGE.into(),
            Language::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        }
    }
}
