//! Repository discovery: walk the source tree, classify files by language
//! and by role (source/test/generated/excluded).
//!
//! Spec treats discovery as an external collaborator specified only by its
//! contract (`ScanResult{files: DiscoveredFile[]}`); this module is the
//! concrete implementation behind that contract, built the same way
//! debtmap walks repositories: `ignore` for `.gitignore`-aware traversal,
//! `walkdir` underneath for deterministic ordering.

use crate::errors::{AnalysisError, Result};
use ignore::WalkBuilder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub enum Language {
    Go,
    Python,
    TypeScript,
}

impl Language {
    fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "go" => Some(Language::Go),
            "py" | "pyi" => Some(Language::Python),
            "ts" | "tsx" => Some(Language::TypeScript),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileClass {
    Source,
    Test,
    Generated,
    Excluded,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveredFile {
    pub abs_path: PathBuf,
    pub rel_path: PathBuf,
    pub language: Language,
    pub class: FileClass,
    pub raw_content: Option<String>,
    pub line_count: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanResult {
    pub files: Vec<DiscoveredFile>,
}

const GENERATED_DIR_NAMES: &[&str] = &["vendor", "node_modules", "dist", "build", ".venv"];

fn looks_generated(rel_path: &Path, first_lines: &str) -> bool {
    if rel_path
        .components()
        .any(|c| GENERATED_DIR_NAMES.contains(&c.as_os_str().to_string_lossy().as_ref()))
    {
        return true;
    }
    let name = rel_path.to_string_lossy();
    if name.ends_with(".pb.go") || name.ends_with("_pb2.py") || name.ends_with(".generated.ts") {
        return true;
    }
    first_lines
        .lines()
        .take(3)
        .any(|l| l.contains("Code generated") && l.contains("DO NOT EDIT"))
}

fn looks_test(rel_path: &Path) -> bool {
    let name = rel_path.to_string_lossy();
    if rel_path
        .components()
        .any(|c| matches!(c.as_os_str().to_string_lossy().as_ref(), "tests" | "__tests__"))
    {
        return true;
    }
    name.ends_with("_test.go")
        || name.ends_with("_test.py")
        || name.starts_with("test_")
        || (name.contains("/test_"))
        || name.ends_with(".test.ts")
        || name.ends_with(".test.tsx")
        || name.ends_with(".spec.ts")
        || name.ends_with(".spec.tsx")
}

/// Walk `root`, classify every recognized source file, and read its
/// contents. Unreadable root directories are a fatal Discovery error.
pub fn discover(root: &Path) -> Result<ScanResult> {
    if !root.exists() {
        return Err(AnalysisError::Discovery {
            path: root.to_path_buf(),
            message: "root directory does not exist".into(),
        });
    }

    let mut files = Vec::new();
    let walker = WalkBuilder::new(root).hidden(false).git_ignore(true).build();

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let abs_path = entry.path().to_path_buf();
        let Some(ext) = abs_path.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        let Some(language) = Language::from_extension(ext) else {
            continue;
        };
        let rel_path = abs_path
            .strip_prefix(root)
            .unwrap_or(&abs_path)
            .to_path_buf();

        let raw_content = std::fs::read_to_string(&abs_path).ok();
        let line_count = raw_content.as_ref().map(|c| c.lines().count());

        let class = match raw_content.as_deref() {
            _ if looks_generated(&rel_path, raw_content.as_deref().unwrap_or("")) => {
                FileClass::Generated
            }
            _ if looks_test(&rel_path) => FileClass::Test,
            None => FileClass::Excluded,
            Some(_) => FileClass::Source,
        };

        files.push(DiscoveredFile {
            abs_path,
            rel_path,
            language,
            class,
            raw_content,
            line_count,
        });
    }

    files.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));

    if files.iter().all(|f| f.class == FileClass::Excluded) || files.is_empty() {
        return Err(AnalysisError::NoSourceFiles(root.to_path_buf()));
    }

    Ok(ScanResult { files })
}

/// Group a scan result's non-excluded files into one bundle per language.
pub fn group_by_language(scan: &ScanResult) -> BTreeMap<Language, Vec<DiscoveredFile>> {
    let mut groups: BTreeMap<Language, Vec<DiscoveredFile>> = BTreeMap::new();
    for file in &scan.files {
        if file.class == FileClass::Excluded {
            continue;
        }
        groups.entry(file.language).or_default().push(file.clone());
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_generated_go_file() {
        let rel = Path::new("pkg/api.pb.go");
        assert!(looks_generated(rel, ""));
    }

    #[test]
    fn classifies_python_test_file() {
        let rel = Path::new("pkg/test_foo.py");
        assert!(looks_test(rel));
    }

    #[test]
    fn classifies_typescript_spec_file() {
        let rel = Path::new("src/widget.spec.ts");
        assert!(looks_test(rel));
    }

    #[test]
    fn extension_maps_to_expected_language() {
        assert_eq!(Language::from_extension("go"), Some(Language::Go));
        assert_eq!(Language::from_extension("py"), Some(Language::Python));
        assert_eq!(Language::from_extension("tsx"), Some(Language::TypeScript));
        assert_eq!(Language::from_extension("rs"), None);
    }
}
