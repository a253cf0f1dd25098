//! Research report format and parsing.
//!
//! The research stage produces one plain-text report made of three
//! labelled sections. The marketing stage only needs a short company
//! summary and the analysis, which [`parse_research_results`] pulls back
//! out of the report text.

use serde::{Deserialize, Serialize};

use crate::text::first_chars;

pub const QUESTIONS_LABEL: &str = "Research Questions:";
pub const FINDINGS_LABEL: &str = "Raw Findings:";
pub const ANALYSIS_LABEL: &str = "Analysis:";

/// Maximum length of the company summary handed to the marketing stage.
pub const COMPANY_SUMMARY_MAX_CHARS: usize = 500;

/// The three outputs of the research stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchReport {
    pub questions: String,
    pub raw_findings: String,
    pub analysis: String,
}

impl ResearchReport {
    /// Render the report as the labelled text consumed downstream.
    pub fn to_text(&self) -> String {
        format!(
            "{QUESTIONS_LABEL}\n{}\n\n{FINDINGS_LABEL}\n{}\n\n{ANALYSIS_LABEL}\n{}",
            self.questions, self.raw_findings, self.analysis
        )
    }
}

/// Company summary and analysis extracted from a research report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchSummary {
    pub company_summary: String,
    pub analysis: String,
}

/// Extract the company summary and analysis from a research report.
///
/// The summary is the first 500 characters of the raw findings. A report
/// missing either the findings or analysis label yields an empty summary
/// rather than an error, so a malformed report never stops the pipeline.
pub fn parse_research_results(report: &str) -> ResearchSummary {
    let Some((before_analysis, analysis)) = report.split_once(ANALYSIS_LABEL) else {
        tracing::warn!("Research report has no analysis section");
        return ResearchSummary::default();
    };
    let Some((_, raw_findings)) = before_analysis.split_once(FINDINGS_LABEL) else {
        tracing::warn!("Research report has no raw findings section");
        return ResearchSummary::default();
    };

    ResearchSummary {
        company_summary: first_chars(raw_findings.trim(), COMPANY_SUMMARY_MAX_CHARS),
        analysis: analysis.trim().to_string(),
    }
}
