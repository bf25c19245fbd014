//! Parser for Go's `go tool cover` profile format (`cover.out`).
//!
//! Format: a `mode: <set|count|atomic>` header line followed by
//! `file:startLine.startCol,endLine.endCol numStmt count` records. This is
//! a different wire format from LCOV's `.info` files (which debtmap parses
//! with the `lcov` crate), so it gets its own small parser rather than
//! reusing that dependency -- see DESIGN.md.

use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
pub struct CoverageTotals {
    pub covered_statements: u64,
    pub total_statements: u64,
}

impl CoverageTotals {
    pub fn percent(&self) -> Option<f64> {
        if self.total_statements == 0 {
            None
        } else {
            Some((self.covered_statements as f64 / self.total_statements as f64) * 100.0)
        }
    }
}

pub fn load_cover_out(root: &Path) -> Option<CoverageTotals> {
    let path = root.join("cover.out");
    let content = std::fs::read_to_string(path).ok()?;
    Some(parse(&content))
}

fn parse(content: &str) -> CoverageTotals {
    let mut totals = CoverageTotals::default();
    for (i, line) in content.lines().enumerate() {
        if i == 0 && line.starts_with("mode:") {
            continue;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((_, rest)) = line.split_once(':') else { continue };
        let mut fields = rest.split_whitespace();
        let Some(_range) = fields.next() else { continue };
        let Some(num_stmt) = fields.next().and_then(|s| s.parse::<u64>().ok()) else { continue };
        let Some(count) = fields.next().and_then(|s| s.parse::<u64>().ok()) else { continue };

        totals.total_statements += num_stmt;
        if count > 0 {
            totals.covered_statements += num_stmt;
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_profile() {
        let content = "mode: set\nfoo/bar.go:10.5,12.7 2 1\nfoo/bar.go:14.2,16.3 1 0\n";
        let totals = parse(content);
        assert_eq!(totals.total_statements, 3);
        assert_eq!(totals.covered_statements, 2);
        assert!((totals.percent().unwrap() - 66.666).abs() < 0.01);
    }

    #[test]
    fn empty_profile_has_no_percent() {
        let totals = parse("mode: set\n");
        assert!(totals.percent().is_none());
    }
}
