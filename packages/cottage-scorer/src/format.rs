//! Plain-text rendering of a scoring result.

use std::fmt::Write;

use crate::defaults::MAX_SUBSCORE;
use crate::types::{
    criterion::CriterionRegistry, example::ExampleCategory, result::ScoringResult,
};

const RULE_WIDTH: usize = 60;
const DESCRIPTION_WIDTH: usize = 45;

/// Human label for a similarity tag; unknown tags are echoed verbatim.
pub fn similarity_label(tag: &str) -> String {
    match ExampleCategory::from_tag(tag) {
        Some(ExampleCategory::Positive) => "✓ Lijkt op JA voorbeelden".to_string(),
        Some(ExampleCategory::AmbiguousNegative) => "◐ Lijkt op TWIJFEL voorbeelden".to_string(),
        Some(ExampleCategory::Negative) => "✗ Lijkt op NEE voorbeelden".to_string(),
        None => tag.to_string(),
    }
}

/// Ten-cell bar for a 0-10 subscore.
pub fn score_bar(subscore: u8) -> String {
    let filled = usize::from(subscore.min(MAX_SUBSCORE));
    let empty = usize::from(MAX_SUBSCORE) - filled;
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Render the full report.
///
/// Criteria are labelled with their registry description; breakdown
/// entries the registry does not know fall back to the raw name.
pub fn render_report(result: &ScoringResult, registry: &CriterionRegistry) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "\n{rule}\nNATUURHUISJE ANALYSE\n{rule}\n");
    let _ = writeln!(out, "OORDEEL: {}", result.category_label);
    let _ = writeln!(out, "SCORE: {:.1}/100", result.confidence_score);

    if let Some(tag) = &result.similar_to {
        let _ = writeln!(out, "VERGELIJKBAAR MET: {}", similarity_label(tag));
    }

    if result.used_fallback {
        let _ = writeln!(out, "LET OP: antwoord onleesbaar, neutrale scores gebruikt");
    }

    out.push_str("\nCRITERIUM BREAKDOWN:\n");
    for (name, &subscore) in &result.breakdown {
        let label = registry
            .get(name)
            .map(|spec| spec.description.as_str())
            .unwrap_or(name.as_str());
        let _ = writeln!(
            out,
            "\n{:<width$} {} {:.1}/10",
            label,
            score_bar(subscore),
            f64::from(subscore),
            width = DESCRIPTION_WIDTH
        );
    }

    let _ = write!(out, "\nREDENERING:\n{}\n", result.reasoning);

    if !result.observations.is_empty() {
        out.push_str("\nOBSERVATIES:\n");
        for observation in &result.observations {
            let _ = writeln!(out, "  • {observation}");
        }
    }

    let _ = writeln!(out, "\n{rule}");
    out
}
