//! Colored terminal rendering of a scored result and its recommendations.

use crate::recommend::{Effort, Recommendation};
use crate::report::Report;
use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};

pub fn render(report: &Report) -> String {
    let mut out = String::new();
    print_header(&mut out);
    print_summary(&mut out, report);
    print_categories(&mut out, report);
    print_recommendations(&mut out, &report.recommendations);
    out
}

fn print_header(out: &mut String) {
    let divider = "═══════════════════════════════════════════".blue();
    out.push('\n');
    out.push_str(&format!("{divider}\n"));
    out.push_str(&format!("{}\n", "       AGENT READINESS SCAN REPORT".bold().blue()));
    out.push_str(&format!("{divider}\n\n"));
}

fn tier_color(tier: &str, text: &str) -> ColoredString {
    match tier {
        "Agent-Ready" => text.green().bold(),
        "Agent-Assisted" => text.cyan().bold(),
        "Agent-Limited" => text.yellow().bold(),
        _ => text.red().bold(),
    }
}

fn print_summary(out: &mut String, report: &Report) {
    out.push_str(&format!("{}\n", "Summary".bold()));
    out.push_str("───────────────────────────────────────────\n");
    out.push_str(&format!(
        "Composite Score: {:.1}/10  ({})\n\n",
        report.composite_score,
        tier_color(&report.tier, &report.tier)
    ));
}

fn print_categories(out: &mut String, report: &Report) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Category", "Score", "Weight"]);

    for category in &report.categories {
        let score_text = if category.score < 0.0 {
            "unavailable".to_string()
        } else {
            format!("{:.1}", category.score)
        };
        table.add_row(vec![
            Cell::new(&category.name),
            Cell::new(score_text),
            Cell::new(format!("{:.2}", category.weight)),
        ]);
    }

    out.push_str(&format!("{table}\n\n"));
}

fn effort_label(effort: Effort) -> ColoredString {
    match effort {
        Effort::Low => "Low".green(),
        Effort::Medium => "Medium".yellow(),
        Effort::High => "High".red(),
    }
}

fn print_recommendations(out: &mut String, recommendations: &[Recommendation]) {
    if recommendations.is_empty() {
        return;
    }
    out.push_str(&format!("{}\n", "Top Recommendations".bold()));
    out.push_str("───────────────────────────────────────────\n");
    for rec in recommendations {
        out.push_str(&format!(
            "{}. [{}] {} ({}, effort: {})\n",
            rec.rank,
            rec.category,
            rec.metric_name.bold(),
            format!("+{:.2}", rec.score_improvement).green(),
            effort_label(rec.effort)
        ));
        out.push_str(&format!("   {}\n", rec.summary));
        out.push_str(&format!("   → {}\n\n", rec.action));
    }
}
