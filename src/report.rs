// src/report.rs
//! Terminal rendering of analysis results and failures

use crate::error::MatchError;
use crate::types::AnalysisResult;

/// Result panel: score, strengths, gaps and summary, or the free-form text.
pub fn render_console(result: &AnalysisResult) -> String {
    let mut out = String::new();
    out.push_str("🎯 AI Analysis Results\n");
    out.push_str(&"-".repeat(40));
    out.push('\n');

    match result {
        AnalysisResult::Structured(analysis) => {
            if let Some(score) = analysis.match_score {
                let tier = crate::score::tier(score);
                out.push_str(&format!(
                    "{} Match score: {}% ({})\n",
                    tier.emoji(),
                    score,
                    tier.label()
                ));
            }

            push_list(&mut out, "Why this matches", &analysis.strengths, "•");
            push_list(&mut out, "Missing from your profile", &analysis.missing_skills, "-");

            if let Some(summary) = &analysis.summary {
                out.push_str("\nSummary\n");
                out.push_str(summary.trim());
                out.push('\n');
            }
        }
        AnalysisResult::Raw { text } => {
            out.push_str(text.trim_end());
            out.push('\n');
        }
    }

    out
}

/// Error panel shown instead of a result.
pub fn render_error(err: &MatchError) -> String {
    let mut out = format!("❌ {}\n", err.user_message());

    if let Some(body) = err.diagnostic_body().filter(|b| !b.trim().is_empty()) {
        out.push_str(&format!("   Details: {}\n", body.trim()));
    }

    for suggestion in err.suggestions() {
        out.push_str(&format!("   → {}\n", suggestion));
    }

    out
}

pub fn render_json(result: &AnalysisResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}

fn push_list(out: &mut String, title: &str, items: &[String], bullet: &str) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("\n{}\n", title));
    for item in items {
        out.push_str(&format!("  {} {}\n", bullet, item));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StructuredAnalysis;

    #[test]
    fn test_structured_panel() {
        let result = AnalysisResult::Structured(StructuredAnalysis {
            match_score: Some(90),
            strengths: vec!["Rust".to_string()],
            missing_skills: vec![],
            summary: Some("Strong candidate".to_string()),
        });
        let text = render_console(&result);

        assert!(text.contains("Match score: 90% (excellent)"));
        assert!(text.contains("• Rust"));
        assert!(!text.contains("Missing from your profile"));
        assert!(text.contains("Strong candidate"));
    }

    #[test]
    fn test_raw_panel() {
        let text = render_console(&AnalysisResult::raw("Plain verdict\n\n"));
        assert!(text.ends_with("Plain verdict\n"));
        assert!(!text.contains("Match score"));
    }

    #[test]
    fn test_error_panel_includes_body() {
        let err = MatchError::Backend {
            status_code: 500,
            body_text: "internal error".to_string(),
        };
        let text = render_error(&err);
        assert!(text.contains("HTTP 500"));
        assert!(text.contains("Details: internal error"));
    }
}
