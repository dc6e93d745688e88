//! Risk governance engine - four-dimensional content risk scoring
//!
//! Maps boolean content-risk factors onto four weighted dimensions (legal,
//! defamation, platform policy, political sensitivity), combines them into
//! an overall score, and classifies the result.
//!
//! Global invariants enforced:
//! - Deterministic scoring: factors alone decide every score
//! - Every dimension and the overall score stay within [0, 100]
//! - Classification upper bounds are INCLUSIVE (contrast with the ERI
//!   engine's exclusive bounds)

use crate::factors::RiskFactors;
use serde::{Deserialize, Serialize};

/// Flat boost applied to political sensitivity when Israel, Iran, or
/// Palestine is mentioned. Added before the final clamp, so the ceiling can
/// absorb part of it.
const ME_SENSITIVITY_BOOST: u32 = 15;

/// Extra defamation penalty when a criminal allegation rests on a single
/// anonymous source.
const UNSOURCED_ALLEGATION_PENALTY: u32 = 20;

/// Weights for the overall score (sum to 1.0)
const OVERALL_WEIGHT_LEGAL: f64 = 0.30;
const OVERALL_WEIGHT_DEFAMATION: f64 = 0.30;
const OVERALL_WEIGHT_PLATFORM: f64 = 0.20;
const OVERALL_WEIGHT_POLITICAL: f64 = 0.20;

/// Per-dimension scores plus the weighted overall, all in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskScores {
    pub legal_risk: u32,
    pub defamation_risk: u32,
    pub platform_risk: u32,
    pub political_sensitivity: u32,
    pub overall_score: u32,
}

/// Risk severity tier (inclusive upper bounds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,      // <= 20
    Moderate, // <= 40
    Elevated, // <= 60
    High,     // <= 80
    Critical, // > 80
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::Elevated => "Elevated",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        }
    }
}

/// Sum the weights of the factors that are set, clamped to 100
fn weighted_sum(contributions: &[(bool, u32)]) -> u32 {
    let total: u32 = contributions
        .iter()
        .filter(|(set, _)| *set)
        .map(|(_, weight)| weight)
        .sum();
    total.min(100)
}

/// Legal risk: exposure to legal action from the content itself
pub fn calculate_legal_risk(factors: &RiskFactors) -> u32 {
    weighted_sum(&[
        (factors.named_individual, 15),
        (factors.criminal_allegation, 25),
        (factors.single_anonymous_source, 20),
        (factors.election_period, 10),
        (factors.war_topic, 5),
    ])
}

/// Defamation risk: a criminal allegation carried by a single anonymous
/// source takes an additional fixed penalty before the clamp
pub fn calculate_defamation_risk(factors: &RiskFactors) -> u32 {
    let mut score: u32 = [
        (factors.named_individual, 20),
        (factors.criminal_allegation, 30),
        (factors.single_anonymous_source, 25),
        (factors.election_period, 5),
    ]
    .iter()
    .filter(|(set, _)| *set)
    .map(|(_, weight)| weight)
    .sum();

    if factors.criminal_allegation && factors.single_anonymous_source {
        score += UNSOURCED_ALLEGATION_PENALTY;
    }

    score.min(100)
}

/// Platform policy risk: nine factors, raw sum can far exceed the ceiling
pub fn calculate_platform_risk(factors: &RiskFactors) -> u32 {
    weighted_sum(&[
        (factors.named_individual, 10),
        (factors.criminal_allegation, 20),
        (factors.single_anonymous_source, 15),
        (factors.election_period, 15),
        (factors.war_topic, 25),
        (factors.religious_framing, 30),
        (factors.ethnic_tension, 30),
        (factors.active_conflict, 20),
        (factors.terrorism_designation, 25),
    ])
}

/// Political sensitivity: eleven factors plus a flat Middle-East boost when
/// Israel, Iran, or Palestine is mentioned
pub fn calculate_political_sensitivity(factors: &RiskFactors) -> u32 {
    let mut score: u32 = [
        (factors.named_individual, 10),
        (factors.criminal_allegation, 15),
        (factors.election_period, 25),
        (factors.war_topic, 20),
        (factors.religious_framing, 20),
        (factors.ethnic_tension, 25),
        (factors.active_conflict, 15),
        (factors.israel_mentioned, 15),
        (factors.iran_mentioned, 15),
        (factors.palestine_mentioned, 20),
        (factors.us_military_involved, 10),
    ]
    .iter()
    .filter(|(set, _)| *set)
    .map(|(_, weight)| weight)
    .sum();

    if factors.israel_mentioned || factors.iran_mentioned || factors.palestine_mentioned {
        score += ME_SENSITIVITY_BOOST;
    }

    score.min(100)
}

/// Overall risk: rounded weighted average of the four dimensions
/// (0.30 legal + 0.30 defamation + 0.20 platform + 0.20 political)
pub fn calculate_overall_risk(legal: u32, defamation: u32, platform: u32, political: u32) -> u32 {
    let overall = f64::from(legal) * OVERALL_WEIGHT_LEGAL
        + f64::from(defamation) * OVERALL_WEIGHT_DEFAMATION
        + f64::from(platform) * OVERALL_WEIGHT_PLATFORM
        + f64::from(political) * OVERALL_WEIGHT_POLITICAL;
    overall.round() as u32
}

/// Complete risk scoring: the four dimension calculators plus the overall
/// aggregator. Pure and total - booleans in, bounded integers out.
pub fn assess_risk(factors: &RiskFactors) -> RiskScores {
    let legal_risk = calculate_legal_risk(factors);
    let defamation_risk = calculate_defamation_risk(factors);
    let platform_risk = calculate_platform_risk(factors);
    let political_sensitivity = calculate_political_sensitivity(factors);

    RiskScores {
        legal_risk,
        defamation_risk,
        platform_risk,
        political_sensitivity,
        overall_score: calculate_overall_risk(
            legal_risk,
            defamation_risk,
            platform_risk,
            political_sensitivity,
        ),
    }
}

/// Classify a risk score. Upper bounds are inclusive: a score of exactly 20
/// is Low, exactly 40 is Moderate, and so on.
pub fn classify_risk(score: u32) -> RiskLevel {
    if score <= 20 {
        RiskLevel::Low
    } else if score <= 40 {
        RiskLevel::Moderate
    } else if score <= 60 {
        RiskLevel::Elevated
    } else if score <= 80 {
        RiskLevel::High
    } else {
        RiskLevel::Critical
    }
}

/// Badge color for a risk score (inclusive bounds, same palette as the ERI
/// color scale)
pub fn risk_color(score: u32) -> &'static str {
    if score <= 20 {
        "#22c55e"
    } else if score <= 40 {
        "#84cc16"
    } else if score <= 60 {
        "#eab308"
    } else if score <= 80 {
        "#f97316"
    } else {
        "#ef4444"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_true() -> RiskFactors {
        RiskFactors {
            named_individual: true,
            criminal_allegation: true,
            single_anonymous_source: true,
            election_period: true,
            war_topic: true,
            religious_framing: true,
            ethnic_tension: true,
            active_conflict: true,
            terrorism_designation: true,
            israel_mentioned: true,
            iran_mentioned: true,
            palestine_mentioned: true,
            us_military_involved: true,
        }
    }

    #[test]
    fn test_all_false_scores_zero() {
        let scores = assess_risk(&RiskFactors::default());
        assert_eq!(scores.legal_risk, 0);
        assert_eq!(scores.defamation_risk, 0);
        assert_eq!(scores.platform_risk, 0);
        assert_eq!(scores.political_sensitivity, 0);
        assert_eq!(scores.overall_score, 0);
        assert_eq!(classify_risk(scores.overall_score), RiskLevel::Low);
    }

    #[test]
    fn test_all_true_clamps_at_ceiling() {
        let scores = assess_risk(&all_true());
        // legal raw sum is 75 (below the ceiling); the rest exceed it
        assert_eq!(scores.legal_risk, 75);
        assert_eq!(scores.defamation_risk, 100);
        assert_eq!(scores.platform_risk, 100);
        assert_eq!(scores.political_sensitivity, 100);
        // round(75*0.3 + 100*0.3 + 100*0.2 + 100*0.2) = round(92.5) = 93
        assert_eq!(scores.overall_score, 93);
    }

    #[test]
    fn test_defamation_combo_penalty() {
        let factors = RiskFactors {
            criminal_allegation: true,
            single_anonymous_source: true,
            ..Default::default()
        };
        // 30 + 25 + 20 penalty
        assert_eq!(calculate_defamation_risk(&factors), 75);

        // all four base factors: 20 + 30 + 25 + 5 + 20 penalty, clamped
        let factors = RiskFactors {
            named_individual: true,
            criminal_allegation: true,
            single_anonymous_source: true,
            election_period: true,
            ..Default::default()
        };
        assert_eq!(calculate_defamation_risk(&factors), 100);
    }

    #[test]
    fn test_defamation_no_penalty_without_both() {
        let factors = RiskFactors {
            criminal_allegation: true,
            ..Default::default()
        };
        assert_eq!(calculate_defamation_risk(&factors), 30);
    }

    #[test]
    fn test_political_boost_applied_before_clamp() {
        let factors = RiskFactors {
            iran_mentioned: true,
            ..Default::default()
        };
        // 15 (iran) + 15 boost
        assert_eq!(calculate_political_sensitivity(&factors), 30);

        // boost partially absorbed by the ceiling
        assert_eq!(calculate_political_sensitivity(&all_true()), 100);
    }

    #[test]
    fn test_overall_rounding() {
        // 0.3*10 + 0.3*10 + 0.2*10 + 0.2*11 = 10.2 -> 10
        assert_eq!(calculate_overall_risk(10, 10, 10, 11), 10);
        // 0.3*11 + 0.3*11 + 0.2*11 + 0.2*12 = 11.2 -> 11
        assert_eq!(calculate_overall_risk(11, 11, 11, 12), 11);
        // 0.3*50 + 0.3*50 + 0.2*50 + 0.2*55 = 51.0 -> 51
        assert_eq!(calculate_overall_risk(50, 50, 50, 55), 51);
    }

    #[test]
    fn test_classification_boundaries_are_inclusive() {
        assert_eq!(classify_risk(20), RiskLevel::Low);
        assert_eq!(classify_risk(21), RiskLevel::Moderate);
        assert_eq!(classify_risk(40), RiskLevel::Moderate);
        assert_eq!(classify_risk(41), RiskLevel::Elevated);
        assert_eq!(classify_risk(60), RiskLevel::Elevated);
        assert_eq!(classify_risk(61), RiskLevel::High);
        assert_eq!(classify_risk(80), RiskLevel::High);
        assert_eq!(classify_risk(81), RiskLevel::Critical);
    }

    #[test]
    fn test_legal_risk_table() {
        let factors = RiskFactors {
            named_individual: true,
            war_topic: true,
            ..Default::default()
        };
        assert_eq!(calculate_legal_risk(&factors), 20);
    }
}
