//! C5 Temporal Dynamics: churn, temporal coupling, author fragmentation,
//! commit stability, hotspot concentration -- all derived from VCS
//! history via `git2`. Unavailable outright when no `.git` is reachable.

use super::{AnalysisResult, Analyzer, C5Metrics, Category, RawMetric};
use crate::core::{AnalysisTarget, EvidenceItem};
use crate::parsing::SyntaxProvider;
use git2::Repository;
use std::collections::{HashMap, HashSet};

const MAX_COMMITS: usize = 2000;

pub struct C5Temporal;

impl Analyzer for C5Temporal {
    fn name(&self) -> &'static str {
        "temporal_dynamics"
    }

    fn category(&self) -> Category {
        Category::C5
    }

    fn analyze(&self, targets: &[AnalysisTarget], _provider: &dyn SyntaxProvider) -> AnalysisResult {
        let root = targets
            .first()
            .map(|t| t.root_dir.clone())
            .unwrap_or_default();

        let metrics = match compute_from_git(&root) {
            Some(m) => m,
            None => C5Metrics::default(),
        };

        AnalysisResult {
            name: self.name().to_string(),
            category: self.category(),
            metrics: super::CategoryMetrics::C5(metrics),
        }
    }
}

fn compute_from_git(root: &std::path::Path) -> Option<C5Metrics> {
    let repo = Repository::discover(root).ok()?;
    let mut revwalk = repo.revwalk().ok()?;
    revwalk.push_head().ok()?;

    let mut file_commit_counts: HashMap<String, usize> = HashMap::new();
    let mut file_authors: HashMap<String, HashSet<String>> = HashMap::new();
    let mut co_change_commits = 0usize;
    let mut total_commits = 0usize;
    let mut all_authors: HashSet<String> = HashSet::new();

    for oid in revwalk.take(MAX_COMMITS) {
        let Ok(oid) = oid else { continue };
        let Ok(commit) = repo.find_commit(oid) else { continue };
        total_commits += 1;
        let author = commit.author().name().unwrap_or("unknown").to_string();
        all_authors.insert(author.clone());

        let tree = commit.tree().ok()?;
        let parent_tree = commit.parent(0).ok().and_then(|p| p.tree().ok());
        let diff = repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)
            .ok()?;

        let mut touched = 0;
        diff.foreach(
            &mut |delta, _| {
                if let Some(path) = delta.new_file().path() {
                    let key = path.display().to_string();
                    *file_commit_counts.entry(key.clone()).or_insert(0) += 1;
                    file_authors.entry(key).or_default().insert(author.clone());
                    touched += 1;
                }
                true
            },
            None,
            None,
            None,
        )
        .ok();

        if touched > 1 {
            co_change_commits += 1;
        }
    }

    if total_commits == 0 || file_commit_counts.is_empty() {
        return None;
    }

    let total_changes: usize = file_commit_counts.values().sum();
    let churn_rate = total_changes as f64 / file_commit_counts.len() as f64;

    let temporal_coupling_pct = (co_change_commits as f64 / total_commits as f64) * 100.0;

    let avg_authors_per_file = file_authors
        .values()
        .map(|a| a.len() as f64)
        .sum::<f64>()
        / file_authors.len() as f64;
    let author_fragmentation = if all_authors.is_empty() {
        0.0
    } else {
        (avg_authors_per_file / all_authors.len() as f64) * 100.0
    };

    let commit_stability = (100.0 - churn_rate.min(100.0)).max(0.0);

    let mut sorted: Vec<usize> = file_commit_counts.values().copied().collect();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    let top_count = (sorted.len() as f64 * 0.2).ceil() as usize;
    let top_sum: usize = sorted.iter().take(top_count.max(1)).sum();
    let hotspot_concentration = (top_sum as f64 / total_changes as f64) * 100.0;

    let mut hotspot_evidence = Vec::new();
    let mut ranked: Vec<(&String, &usize)> = file_commit_counts.iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(a.1));
    for (path, count) in ranked.into_iter().take(5) {
        hotspot_evidence.push(EvidenceItem {
            file_path: path.clone(),
            line: None,
            value: *count as f64,
            description: format!("changed in {count} of {total_commits} recent commits"),
        });
    }

    Some(C5Metrics {
        churn_rate: RawMetric::available(churn_rate),
        temporal_coupling_pct: RawMetric::available(temporal_coupling_pct),
        author_fragmentation: RawMetric::available(author_fragmentation),
        commit_stability: RawMetric::available(commit_stability),
        hotspot_concentration: RawMetric::available_with_evidence(
            hotspot_concentration,
            hotspot_evidence,
        ),
    })
}
