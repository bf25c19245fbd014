use crate::discovery::{DiscoveredFile, FileClass, Language, ScanResult};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// One file handed to an analyzer. `raw_content`/`line_count` are only
/// populated for `class != Excluded`; excluded files never reach an
/// analyzer in the first place.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub abs_path: PathBuf,
    pub rel_path: PathBuf,
    pub language: Language,
    pub class: FileClass,
    pub raw_content: Option<String>,
    pub line_count: Option<usize>,
}

impl From<&DiscoveredFile> for SourceFile {
    fn from(f: &DiscoveredFile) -> Self {
        SourceFile {
            abs_path: f.abs_path.clone(),
            rel_path: f.rel_path.clone(),
            language: f.language,
            class: f.class,
            raw_content: f.raw_content.clone(),
            line_count: f.line_count,
        }
    }
}

/// A per-language bundle of files sharing one root directory and one
/// language. Invariant: every file in `files` has `language == language`,
/// and `class == Excluded` files are filtered out before analyzers ever
/// see the target.
#[derive(Debug, Clone)]
pub struct AnalysisTarget {
    pub language: Language,
    pub root_dir: PathBuf,
    pub files: Vec<SourceFile>,
}

impl AnalysisTarget {
    pub fn source_files(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.iter().filter(|f| f.class == FileClass::Source)
    }

    pub fn test_files(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.iter().filter(|f| f.class == FileClass::Test)
    }
}

/// Build one `AnalysisTarget` per language present in the scan, excluding
/// `FileClass::Excluded` files up front so analyzers never see them.
pub fn build_targets(root: &std::path::Path, scan: &ScanResult) -> Vec<AnalysisTarget> {
    let mut by_lang: BTreeMap<Language, Vec<SourceFile>> = BTreeMap::new();
    for file in &scan.files {
        if file.class == FileClass::Excluded {
            continue;
        }
        by_lang
            .entry(file.language)
            .or_default()
            .push(SourceFile::from(file));
    }
    by_lang
        .into_iter()
        .map(|(language, files)| AnalysisTarget {
            language,
            root_dir: root.to_path_buf(),
            files,
        })
        .collect()
}
