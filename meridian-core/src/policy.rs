//! Approval hierarchy and safe-mode policy
//!
//! Policy decisions derived from risk scores and factors: who must sign off
//! on a piece of content, whether a given role may approve it, and whether
//! safe mode blocks it outright regardless of score.

use crate::factors::RiskFactors;
use serde::{Deserialize, Serialize};

/// Approval authority required for a risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApprovalLevel {
    JuniorEditor,
    SeniorEditor,
    EditorInChief,
    EditorInChiefWithLegal,
}

impl ApprovalLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalLevel::JuniorEditor => "Junior Editor",
            ApprovalLevel::SeniorEditor => "Senior Editor",
            ApprovalLevel::EditorInChief => "Editor-in-Chief",
            ApprovalLevel::EditorInChiefWithLegal => "Editor-in-Chief + Legal Consultation",
        }
    }
}

/// Approval authority required for an overall risk score (inclusive bounds,
/// matching the risk classification tiers)
pub fn required_approval_level(score: u32) -> ApprovalLevel {
    if score <= 20 {
        ApprovalLevel::JuniorEditor
    } else if score <= 40 {
        ApprovalLevel::SeniorEditor
    } else if score <= 60 {
        ApprovalLevel::EditorInChief
    } else {
        ApprovalLevel::EditorInChiefWithLegal
    }
}

/// Numeric approval ceiling for a role. Unknown roles get 0 and can only
/// approve zero-risk content.
fn role_ceiling(role: &str) -> u32 {
    match role {
        "junior_editor" => 20,
        "senior_editor" => 40,
        "editor_in_chief" | "admin" => 100,
        _ => 0,
    }
}

/// Whether a role may approve content at the given risk score
pub fn can_approve(role: &str, score: u32) -> bool {
    role_ceiling(role) >= score
}

/// Result of the safe-mode policy check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafeModeCheck {
    pub violated: bool,
    pub reasons: Vec<String>,
}

/// Safe mode blocks specific high-risk factors outright, independent of the
/// numeric score. Disabled safe mode never reports a violation.
///
/// Reasons are reported in a fixed factor order: criminal allegation, active
/// conflict, anonymous source, religious framing.
pub fn check_safe_mode(factors: &RiskFactors, safe_mode_enabled: bool) -> SafeModeCheck {
    if !safe_mode_enabled {
        return SafeModeCheck {
            violated: false,
            reasons: Vec::new(),
        };
    }

    let mut reasons = Vec::new();
    if factors.criminal_allegation {
        reasons.push("Criminal allegations not allowed in Safe Mode".to_string());
    }
    if factors.active_conflict {
        reasons.push("Active conflict analysis restricted in Safe Mode".to_string());
    }
    if factors.single_anonymous_source {
        reasons.push("Anonymous sources not allowed in Safe Mode".to_string());
    }
    if factors.religious_framing {
        reasons.push("Religious framing prohibited in Safe Mode".to_string());
    }

    SafeModeCheck {
        violated: !reasons.is_empty(),
        reasons,
    }
}

/// Editorial mitigation suggestions for the factors that are set.
///
/// Suggestions are appended per factor group in a fixed order; overlapping
/// advice between groups is intentionally not deduplicated.
pub fn mitigation_suggestions(factors: &RiskFactors) -> Vec<&'static str> {
    let mut suggestions = Vec::new();

    if factors.named_individual {
        suggestions.push("Use \"alleged\" or \"reportedly\" when mentioning individuals");
        suggestions.push("Include response from accused when available");
    }

    if factors.criminal_allegation {
        suggestions.push("Attribute allegations to specific sources");
        suggestions.push("Avoid stating guilt without court verdict");
        suggestions.push("Use neutral language: \"accused of\" instead of \"guilty of\"");
    }

    if factors.single_anonymous_source {
        suggestions.push("Seek additional corroborating sources");
        suggestions.push("Clearly state reason for anonymity");
        suggestions.push("Document internal verification process");
    }

    if factors.war_topic {
        suggestions.push("Focus on structural analysis, not tactical details");
        suggestions.push("Avoid casualty speculation");
        suggestions.push("Use maps and timelines instead of conflict footage");
    }

    if factors.religious_framing || factors.ethnic_tension {
        suggestions.push("Remove religious/ethnic identifiers unless essential");
        suggestions.push("Focus on political/strategic factors");
        suggestions.push("Use neutral terminology");
    }

    if factors.israel_mentioned || factors.iran_mentioned || factors.palestine_mentioned {
        suggestions.push("Present multiple perspectives");
        suggestions.push("Attribute claims to specific sources");
        suggestions.push("Avoid taking sides in territorial disputes");
    }

    suggestions
}
