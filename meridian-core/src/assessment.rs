//! Risk assessment records
//!
//! Wraps the scoring pipeline output in an immutable, per-item assessment
//! record. Created once per assessment event; only the safe-mode gate and
//! its note append touch the record after creation.

use crate::factors::{analyze_content, RiskFactors};
use crate::policy::{required_approval_level, SafeModeCheck};
use crate::risk::{assess_risk, classify_risk, RiskScores};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Overall scores above this threshold require senior review
const SENIOR_REVIEW_THRESHOLD: u32 = 40;

/// The content-item lookup collaborator's shape: just enough to extract
/// risk factors and key the assessment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: String,
    pub headline: String,
    pub summary: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// One risk assessment for one content item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub id: String,
    pub content_id: String,
    pub scores: RiskScores,
    pub factors: RiskFactors,
    pub assessed_at: DateTime<Utc>,
    pub assessed_by: String,
    pub requires_senior_review: bool,
    pub safe_mode_blocked: bool,
    pub notes: String,
}

impl RiskAssessment {
    /// Apply the safe-mode gate to a freshly generated assessment.
    ///
    /// Scoring never sets `safe_mode_blocked`; the caller runs the policy
    /// check separately and applies the outcome here, appending the reasons
    /// to the notes.
    pub fn apply_safe_mode(&mut self, check: &SafeModeCheck) {
        if check.violated {
            self.safe_mode_blocked = true;
            self.notes
                .push_str(&format!(" Safe Mode blocked: {}.", check.reasons.join("; ")));
        }
    }
}

/// Run the full risk pipeline for a content item: factor extraction,
/// scoring, classification, and approval-level derivation.
///
/// `safe_mode_blocked` is always false here; the safe-mode policy is the
/// caller's to apply via [`RiskAssessment::apply_safe_mode`].
pub fn generate_assessment(
    content: &ContentItem,
    assessed_by: &str,
    assessed_at: DateTime<Utc>,
) -> RiskAssessment {
    let factors = analyze_content(&content.headline, &content.summary, &content.tags);
    let scores = assess_risk(&factors);
    let classification = classify_risk(scores.overall_score);
    let approval = required_approval_level(scores.overall_score);

    RiskAssessment {
        id: format!("risk-{}", assessed_at.timestamp_millis()),
        content_id: content.id.clone(),
        scores,
        factors,
        assessed_at,
        assessed_by: assessed_by.to_string(),
        requires_senior_review: scores.overall_score > SENIOR_REVIEW_THRESHOLD,
        safe_mode_blocked: false,
        notes: format!(
            "Risk Classification: {}. {} approval required.",
            classification.as_str(),
            approval.as_str()
        ),
    }
}
