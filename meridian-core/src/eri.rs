//! Escalation Risk Index (ERI) engine
//!
//! Aggregates five analyst-supplied dimension scores into a single weekly
//! escalation index, classifies it, projects scenario likelihoods, and
//! assembles the full assessment record.
//!
//! Global invariants enforced:
//! - Dimension weights always sum to 1.0
//! - Classification upper bounds are EXCLUSIVE (contrast with the risk
//!   engine's inclusive bounds; a score of exactly 20 is Moderate here)
//! - Indicator values are display metadata: jittered from an injected
//!   random source and never re-aggregated into any score

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Minimum week-over-week change that registers as a trend
const TREND_THRESHOLD: i64 = 3;

/// Maximum escalation impact for a key development
const MAX_DEVELOPMENT_IMPACT: i32 = 10;

/// Base impact when a development supplies no escalation impact of its own
const BASE_DEVELOPMENT_IMPACT: i32 = 5;

/// Headline keywords worth +2 impact (first hit only)
const HIGH_IMPACT_KEYWORDS: [&str; 7] = [
    "attack",
    "strike",
    "invasion",
    "war",
    "casualties",
    "sanctions",
    "embargo",
];

/// Headline keywords worth +1 impact (first hit only, independent of the
/// high-impact check)
const MEDIUM_IMPACT_KEYWORDS: [&str; 5] =
    ["tension", "dispute", "protest", "deployment", "drill"];

/// Static configuration for one ERI dimension
pub struct DimensionSpec {
    pub name: &'static str,
    pub id_prefix: &'static str,
    pub weight: f64,
    pub indicators: [&'static str; 5],
}

/// The five dimensions in canonical order. Weights sum to 1.0.
pub const DIMENSIONS: [DimensionSpec; 5] = [
    DimensionSpec {
        name: "Military",
        id_prefix: "m",
        weight: 0.25,
        indicators: [
            "Troop Movements",
            "Airstrikes",
            "Naval Deployments",
            "Border Fortifications",
            "Weapons Transfers",
        ],
    },
    DimensionSpec {
        name: "Political",
        id_prefix: "p",
        weight: 0.25,
        indicators: [
            "Diplomatic Statements",
            "Sanctions Activity",
            "Leadership Rhetoric",
            "Policy Changes",
            "Alliance Signals",
        ],
    },
    DimensionSpec {
        name: "Proxy",
        id_prefix: "px",
        weight: 0.20,
        indicators: [
            "Militia Activity",
            "Armed Group Mobilization",
            "Cross-Border Incidents",
            "Support Operations",
            "Training Exercises",
        ],
    },
    DimensionSpec {
        name: "Economic",
        id_prefix: "e",
        weight: 0.15,
        indicators: [
            "Oil Price Volatility",
            "Shipping Disruptions",
            "Trade Restrictions",
            "Currency Fluctuations",
            "Resource Competition",
        ],
    },
    DimensionSpec {
        name: "Diplomatic",
        id_prefix: "d",
        weight: 0.15,
        indicators: [
            "Negotiation Progress",
            "Mediator Engagement",
            "Backchannel Activity",
            "Multilateral Forums",
            "Confidence Building",
        ],
    },
];

/// Analyst-supplied dimension scores, each expected in [0, 100].
///
/// `calculate_eri` does not clamp: out-of-range inputs propagate into the
/// weighted sum unchanged. Callers own range validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionScores {
    pub military: u32,
    pub political: u32,
    pub proxy: u32,
    pub economic: u32,
    pub diplomatic: u32,
}

impl DimensionScores {
    /// Scores in canonical dimension order (matching [`DIMENSIONS`])
    pub fn as_array(&self) -> [u32; 5] {
        [
            self.military,
            self.political,
            self.proxy,
            self.economic,
            self.diplomatic,
        ]
    }
}

/// ERI severity tier (exclusive upper bounds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EriLevel {
    Low,      // < 20
    Moderate, // < 40
    Elevated, // < 60
    High,     // < 80
    Critical, // >= 80
}

impl EriLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EriLevel::Low => "Low",
            EriLevel::Moderate => "Moderate",
            EriLevel::Elevated => "Elevated",
            EriLevel::High => "High",
            EriLevel::Critical => "Critical",
        }
    }
}

/// Week-over-week direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Stable => "stable",
        }
    }
}

/// Scenario likelihood tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Probability {
    Low,
    Moderate,
    High,
}

impl Probability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Probability::Low => "low",
            Probability::Moderate => "moderate",
            Probability::High => "high",
        }
    }
}

/// Likelihoods for the three standing scenario types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioProbabilities {
    pub stabilization: Probability,
    pub controlled_escalation: Probability,
    pub expanded_conflict: Probability,
}

/// Display indicator attached to a dimension. Presentation metadata only:
/// the value is jittered off the dimension score and never read back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EriIndicator {
    pub id: String,
    pub name: String,
    pub value: i32,
    pub trend: Trend,
    pub description: String,
}

/// One scored dimension within an assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EriDimension {
    pub name: String,
    pub score: u32,
    pub weight: f64,
    pub indicators: Vec<EriIndicator>,
}

/// A narrative development attached to an assessment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyDevelopment {
    pub id: String,
    pub headline: String,
    pub what_happened: String,
    pub why_it_matters: String,
    pub who_benefits: String,
    pub who_loses: String,
    pub escalation_impact: i32,
}

/// Raw development input; missing fields default during normalization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DevelopmentInput {
    pub headline: Option<String>,
    pub what_happened: Option<String>,
    pub why_it_matters: Option<String>,
    pub who_benefits: Option<String>,
    pub who_loses: Option<String>,
    pub escalation_impact: Option<i32>,
}

/// A projected scenario with its likelihood and triggers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: String,
    pub name: String,
    pub probability: Probability,
    pub description: String,
    pub triggers: Vec<String>,
}

/// Complete weekly ERI assessment, keyed by (year, week)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EriAssessment {
    pub id: String,
    pub week_number: u32,
    pub year: i32,
    pub overall_score: u32,
    pub classification: EriLevel,
    pub dimensions: Vec<EriDimension>,
    pub key_developments: Vec<KeyDevelopment>,
    pub scenario_outlook: Vec<Scenario>,
    pub indicators_to_watch: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EriAssessment {
    /// Dimension lookup by exact name
    pub fn dimension(&self, name: &str) -> Option<&EriDimension> {
        self.dimensions.iter().find(|d| d.name == name)
    }
}

/// Input to assessment generation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationInput {
    pub week_number: u32,
    pub year: i32,
    pub dimension_scores: DimensionScores,
    #[serde(default)]
    pub key_developments: Vec<DevelopmentInput>,
}

/// Weighted sum of the five dimension scores, rounded.
/// Weights: military/political 0.25 each, proxy 0.20, economic/diplomatic
/// 0.15 each. Inputs are not clamped.
pub fn calculate_eri(scores: &DimensionScores) -> u32 {
    let overall: f64 = DIMENSIONS
        .iter()
        .zip(scores.as_array())
        .map(|(spec, score)| f64::from(score) * spec.weight)
        .sum();
    overall.round() as u32
}

/// Classify an ERI score. Upper bounds are exclusive: a score of exactly 20
/// is Moderate, exactly 40 is Elevated, and so on.
pub fn classify_eri(score: u32) -> EriLevel {
    if score < 20 {
        EriLevel::Low
    } else if score < 40 {
        EriLevel::Moderate
    } else if score < 60 {
        EriLevel::Elevated
    } else if score < 80 {
        EriLevel::High
    } else {
        EriLevel::Critical
    }
}

/// Badge color for an ERI score (exclusive bounds)
pub fn eri_color(score: u32) -> &'static str {
    if score < 20 {
        "#22c55e"
    } else if score < 40 {
        "#84cc16"
    } else if score < 60 {
        "#eab308"
    } else if score < 80 {
        "#f97316"
    } else {
        "#ef4444"
    }
}

/// Direction of change between two weekly scores. Changes of 3 or less in
/// either direction register as stable.
pub fn calculate_trend(current: u32, previous: u32) -> Trend {
    let diff = i64::from(current) - i64::from(previous);
    if diff > TREND_THRESHOLD {
        Trend::Up
    } else if diff < -TREND_THRESHOLD {
        Trend::Down
    } else {
        Trend::Stable
    }
}

/// Project scenario likelihoods from the overall score and trend.
///
/// Four score bands with trend conditionals in the middle bands; the table
/// is a fixed editorial contract.
pub fn assess_scenario_probability(score: u32, trend: Trend) -> ScenarioProbabilities {
    if score < 30 {
        return ScenarioProbabilities {
            stabilization: Probability::High,
            controlled_escalation: Probability::Low,
            expanded_conflict: Probability::Low,
        };
    }

    if score < 50 {
        return ScenarioProbabilities {
            stabilization: if trend == Trend::Down {
                Probability::High
            } else {
                Probability::Moderate
            },
            controlled_escalation: if trend == Trend::Up {
                Probability::Moderate
            } else {
                Probability::Low
            },
            expanded_conflict: Probability::Low,
        };
    }

    if score < 70 {
        return ScenarioProbabilities {
            stabilization: if trend == Trend::Down {
                Probability::Moderate
            } else {
                Probability::Low
            },
            controlled_escalation: Probability::High,
            expanded_conflict: if trend == Trend::Up {
                Probability::Moderate
            } else {
                Probability::Low
            },
        };
    }

    ScenarioProbabilities {
        stabilization: Probability::Low,
        controlled_escalation: if trend == Trend::Down {
            Probability::Moderate
        } else {
            Probability::High
        },
        expanded_conflict: if trend == Trend::Up {
            Probability::High
        } else {
            Probability::Moderate
        },
    }
}

/// Impact score for a key development.
///
/// Starts from the supplied escalation impact (base 5 when absent), then
/// +2 on the first high-impact headline keyword and +1 on the first
/// medium-impact keyword. Clamped to 10 from above only: a caller-supplied
/// negative impact passes through unvalidated.
pub fn calculate_development_impact(development: &DevelopmentInput) -> i32 {
    let mut impact = development
        .escalation_impact
        .unwrap_or(BASE_DEVELOPMENT_IMPACT);

    let headline = development
        .headline
        .as_deref()
        .unwrap_or("")
        .to_lowercase();

    for keyword in HIGH_IMPACT_KEYWORDS {
        if headline.contains(keyword) {
            impact += 2;
            break;
        }
    }

    for keyword in MEDIUM_IMPACT_KEYWORDS {
        if headline.contains(keyword) {
            impact += 1;
            break;
        }
    }

    impact.min(MAX_DEVELOPMENT_IMPACT)
}

/// Canned watch indicators: two per dimension scoring above 60, plus
/// overall-score pairs at >60 and >80. Deduplicated in insertion order and
/// truncated to the first six.
pub fn indicators_to_watch(score: u32, dimensions: &[EriDimension]) -> Vec<String> {
    let mut indicators: Vec<&'static str> = Vec::new();
    let push = |indicator: &'static str, list: &mut Vec<&'static str>| {
        if !list.contains(&indicator) {
            list.push(indicator);
        }
    };

    for dim in dimensions.iter().filter(|d| d.score > 60) {
        let pair: Option<[&'static str; 2]> = match dim.name.as_str() {
            "Military" => Some(["Troop movement reports", "Military drill announcements"]),
            "Political" => Some(["Leadership statements", "Policy announcements"]),
            "Proxy" => Some(["Militia activity reports", "Cross-border incidents"]),
            "Economic" => Some(["Oil price movements", "Shipping route updates"]),
            "Diplomatic" => Some(["Negotiation schedules", "Mediator engagement"]),
            _ => None,
        };
        if let Some([first, second]) = pair {
            push(first, &mut indicators);
            push(second, &mut indicators);
        }
    }

    if score > 60 {
        push("Third-party mediation efforts", &mut indicators);
        push("Regional power statements", &mut indicators);
    }

    if score > 80 {
        push("Evacuation advisories", &mut indicators);
        push("International organization responses", &mut indicators);
    }

    indicators
        .into_iter()
        .take(6)
        .map(str::to_string)
        .collect()
}

/// Biased random trend draw for display indicators (roughly 40% up, 30%
/// down, 30% stable)
fn random_trend<R: Rng>(rng: &mut R) -> Trend {
    if rng.gen::<f64>() > 0.6 {
        Trend::Up
    } else if rng.gen::<f64>() > 0.5 {
        Trend::Down
    } else {
        Trend::Stable
    }
}

/// Build the five dimension records with jittered display indicators
fn build_dimensions<R: Rng>(scores: &DimensionScores, rng: &mut R) -> Vec<EriDimension> {
    DIMENSIONS
        .iter()
        .zip(scores.as_array())
        .map(|(spec, score)| EriDimension {
            name: spec.name.to_string(),
            score,
            weight: spec.weight,
            indicators: spec
                .indicators
                .iter()
                .enumerate()
                .map(|(i, name)| EriIndicator {
                    id: format!("{}{}", spec.id_prefix, i),
                    name: (*name).to_string(),
                    value: (f64::from(score) + rng.gen_range(-10.0..10.0)).round() as i32,
                    trend: random_trend(rng),
                    description: format!("{} {} indicator", spec.name, name.to_lowercase()),
                })
                .collect(),
        })
        .collect()
}

/// The three standing scenarios with their projected likelihoods
fn build_scenarios(probabilities: ScenarioProbabilities) -> Vec<Scenario> {
    vec![
        Scenario {
            id: "s1".to_string(),
            name: "Stabilization Path".to_string(),
            probability: probabilities.stabilization,
            description: "Diplomatic breakthrough reduces tensions through negotiated settlement"
                .to_string(),
            triggers: vec![
                "Negotiation resumption".to_string(),
                "Third-party mediation success".to_string(),
                "Confidence-building measures".to_string(),
            ],
        },
        Scenario {
            id: "s2".to_string(),
            name: "Controlled Escalation".to_string(),
            probability: probabilities.controlled_escalation,
            description: "Limited conflict with contained scope and regional involvement"
                .to_string(),
            triggers: vec![
                "Proxy escalation".to_string(),
                "Retaliatory strikes".to_string(),
                "Sanctions expansion".to_string(),
            ],
        },
        Scenario {
            id: "s3".to_string(),
            name: "Expanded Regional Conflict".to_string(),
            probability: probabilities.expanded_conflict,
            description: "Multi-actor involvement broadens conflict beyond initial parameters"
                .to_string(),
            triggers: vec![
                "Alliance activation".to_string(),
                "Critical infrastructure attack".to_string(),
                "Humanitarian crisis".to_string(),
            ],
        },
    ]
}

/// Normalize raw development inputs: sequential ids, empty-string defaults,
/// impact defaulted through [`calculate_development_impact`] when absent
fn normalize_developments(inputs: &[DevelopmentInput]) -> Vec<KeyDevelopment> {
    inputs
        .iter()
        .enumerate()
        .map(|(i, kd)| KeyDevelopment {
            id: format!("kd{}", i),
            headline: kd
                .headline
                .clone()
                .unwrap_or_else(|| "Untitled Development".to_string()),
            what_happened: kd.what_happened.clone().unwrap_or_default(),
            why_it_matters: kd.why_it_matters.clone().unwrap_or_default(),
            who_benefits: kd.who_benefits.clone().unwrap_or_default(),
            who_loses: kd.who_loses.clone().unwrap_or_default(),
            escalation_impact: kd
                .escalation_impact
                .unwrap_or_else(|| calculate_development_impact(kd)),
        })
        .collect()
}

/// Generate a complete weekly assessment from analyst inputs.
///
/// Scenario likelihoods are evaluated with a stable trend: generation never
/// sees the prior week, so the trend conditionals only bite when the caller
/// re-evaluates against history.
///
/// The random source feeds display indicator jitter only; overall score,
/// classification, scenarios, and watch indicators are fully deterministic
/// in the input.
pub fn generate_assessment<R: Rng>(
    input: &GenerationInput,
    created_at: DateTime<Utc>,
    rng: &mut R,
) -> EriAssessment {
    let overall_score = calculate_eri(&input.dimension_scores);
    let classification = classify_eri(overall_score);
    let dimensions = build_dimensions(&input.dimension_scores, rng);
    let scenarios = build_scenarios(assess_scenario_probability(overall_score, Trend::Stable));
    let key_developments = normalize_developments(&input.key_developments);
    let watch = indicators_to_watch(overall_score, &dimensions);

    EriAssessment {
        id: format!("eri-{}-{}", input.year, input.week_number),
        week_number: input.week_number,
        year: input.year,
        overall_score,
        classification,
        dimensions,
        key_developments,
        scenario_outlook: scenarios,
        indicators_to_watch: watch,
        created_at,
        updated_at: created_at,
    }
}

/// Per-dimension delta between two assessments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionChange {
    pub name: String,
    pub change: i32,
}

/// Week-over-week comparison of two assessments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EriComparison {
    pub overall_change: i32,
    pub dimension_changes: Vec<DimensionChange>,
    pub significant_shifts: Vec<String>,
}

/// Compare two assessments dimension by dimension. A dimension moving by
/// strictly more than 10 points in either direction is a significant shift.
pub fn compare(current: &EriAssessment, previous: &EriAssessment) -> EriComparison {
    let overall_change = current.overall_score as i32 - previous.overall_score as i32;

    let mut dimension_changes = Vec::new();
    let mut significant_shifts = Vec::new();

    for dim in &current.dimensions {
        if let Some(prev) = previous.dimension(&dim.name) {
            let change = dim.score as i32 - prev.score as i32;
            dimension_changes.push(DimensionChange {
                name: dim.name.clone(),
                change,
            });
            if change.abs() > 10 {
                significant_shifts.push(format!(
                    "{}: {}{} points",
                    dim.name,
                    if change > 0 { "+" } else { "" },
                    change
                ));
            }
        }
    }

    EriComparison {
        overall_change,
        dimension_changes,
        significant_shifts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, 0, 0, 0).unwrap()
    }

    fn scores(military: u32, political: u32, proxy: u32, economic: u32, diplomatic: u32) -> DimensionScores {
        DimensionScores {
            military,
            political,
            proxy,
            economic,
            diplomatic,
        }
    }

    fn generated(dimension_scores: DimensionScores) -> EriAssessment {
        let input = GenerationInput {
            week_number: 23,
            year: 2025,
            dimension_scores,
            key_developments: Vec::new(),
        };
        generate_assessment(&input, test_time(), &mut StdRng::seed_from_u64(7))
    }

    #[test]
    fn test_dimension_weights_sum_to_one() {
        let total: f64 = DIMENSIONS.iter().map(|d| d.weight).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_calculate_eri_extremes() {
        assert_eq!(calculate_eri(&scores(0, 0, 0, 0, 0)), 0);
        assert_eq!(calculate_eri(&scores(100, 100, 100, 100, 100)), 100);
    }

    #[test]
    fn test_calculate_eri_worked_example() {
        // round(80*.25 + 70*.25 + 75*.20 + 40*.15 + 30*.15) = round(63) = 63
        let overall = calculate_eri(&scores(80, 70, 75, 40, 30));
        assert_eq!(overall, 63);
        assert_eq!(classify_eri(overall), EriLevel::High);
    }

    #[test]
    fn test_classification_boundaries_are_exclusive() {
        assert_eq!(classify_eri(19), EriLevel::Low);
        assert_eq!(classify_eri(20), EriLevel::Moderate);
        assert_eq!(classify_eri(39), EriLevel::Moderate);
        assert_eq!(classify_eri(40), EriLevel::Elevated);
        assert_eq!(classify_eri(59), EriLevel::Elevated);
        assert_eq!(classify_eri(60), EriLevel::High);
        assert_eq!(classify_eri(79), EriLevel::High);
        assert_eq!(classify_eri(80), EriLevel::Critical);
    }

    #[test]
    fn test_trend_threshold() {
        assert_eq!(calculate_trend(53, 50), Trend::Stable);
        assert_eq!(calculate_trend(54, 50), Trend::Up);
        assert_eq!(calculate_trend(47, 50), Trend::Stable);
        assert_eq!(calculate_trend(46, 50), Trend::Down);
    }

    #[test]
    fn test_scenario_probability_low_band_ignores_trend() {
        for trend in [Trend::Up, Trend::Down, Trend::Stable] {
            let p = assess_scenario_probability(29, trend);
            assert_eq!(p.stabilization, Probability::High);
            assert_eq!(p.controlled_escalation, Probability::Low);
            assert_eq!(p.expanded_conflict, Probability::Low);
        }
    }

    #[test]
    fn test_scenario_probability_middle_bands_follow_trend() {
        let p = assess_scenario_probability(40, Trend::Down);
        assert_eq!(p.stabilization, Probability::High);
        assert_eq!(p.controlled_escalation, Probability::Low);

        let p = assess_scenario_probability(40, Trend::Up);
        assert_eq!(p.stabilization, Probability::Moderate);
        assert_eq!(p.controlled_escalation, Probability::Moderate);

        let p = assess_scenario_probability(65, Trend::Up);
        assert_eq!(p.stabilization, Probability::Low);
        assert_eq!(p.controlled_escalation, Probability::High);
        assert_eq!(p.expanded_conflict, Probability::Moderate);
    }

    #[test]
    fn test_scenario_probability_top_band() {
        let p = assess_scenario_probability(85, Trend::Up);
        assert_eq!(p.stabilization, Probability::Low);
        assert_eq!(p.controlled_escalation, Probability::High);
        assert_eq!(p.expanded_conflict, Probability::High);

        let p = assess_scenario_probability(85, Trend::Down);
        assert_eq!(p.controlled_escalation, Probability::Moderate);
        assert_eq!(p.expanded_conflict, Probability::Moderate);
    }

    #[test]
    fn test_development_impact_defaults_and_keywords() {
        // no impact, no keywords: base 5
        assert_eq!(calculate_development_impact(&DevelopmentInput::default()), 5);

        // one +2 regardless of multiple high-impact hits
        let dev = DevelopmentInput {
            headline: Some("Attack follows strike on embargo targets".to_string()),
            ..Default::default()
        };
        assert_eq!(calculate_development_impact(&dev), 7);

        // high and medium checks are independent
        let dev = DevelopmentInput {
            headline: Some("Strike raises tension at border".to_string()),
            ..Default::default()
        };
        assert_eq!(calculate_development_impact(&dev), 8);
    }

    #[test]
    fn test_development_impact_upper_clamp_only() {
        let dev = DevelopmentInput {
            headline: Some("War deployment".to_string()),
            escalation_impact: Some(9),
            ..Default::default()
        };
        assert_eq!(calculate_development_impact(&dev), 10);

        // negative supplied impact passes through unvalidated
        let dev = DevelopmentInput {
            escalation_impact: Some(-4),
            ..Default::default()
        };
        assert_eq!(calculate_development_impact(&dev), -4);
    }

    #[test]
    fn test_indicators_to_watch_truncates_to_six() {
        let assessment = generated(scores(90, 90, 90, 90, 90));
        let watch = indicators_to_watch(assessment.overall_score, &assessment.dimensions);
        assert_eq!(watch.len(), 6);
        assert_eq!(watch[0], "Troop movement reports");
        // truncation happens before the overall-score pairs get a slot
        assert!(!watch.contains(&"Evacuation advisories".to_string()));
    }

    #[test]
    fn test_indicators_to_watch_quiet_week_is_empty() {
        let assessment = generated(scores(30, 30, 30, 30, 30));
        let watch = indicators_to_watch(assessment.overall_score, &assessment.dimensions);
        assert!(watch.is_empty());
    }

    #[test]
    fn test_indicators_to_watch_overall_pairs() {
        let mut dims = generated(scores(50, 50, 50, 50, 50)).dimensions;
        for d in &mut dims {
            d.score = 50;
        }
        let watch = indicators_to_watch(85, &dims);
        assert_eq!(
            watch,
            vec![
                "Third-party mediation efforts",
                "Regional power statements",
                "Evacuation advisories",
                "International organization responses",
            ]
        );
    }

    #[test]
    fn test_generation_aggregation_round_trip() {
        let assessment = generated(scores(80, 70, 75, 40, 30));
        let stored = DimensionScores {
            military: assessment.dimension("Military").unwrap().score,
            political: assessment.dimension("Political").unwrap().score,
            proxy: assessment.dimension("Proxy").unwrap().score,
            economic: assessment.dimension("Economic").unwrap().score,
            diplomatic: assessment.dimension("Diplomatic").unwrap().score,
        };
        assert_eq!(calculate_eri(&stored), assessment.overall_score);
    }

    #[test]
    fn test_generation_is_deterministic_under_seeded_rng() {
        let input = GenerationInput {
            week_number: 23,
            year: 2025,
            dimension_scores: scores(60, 55, 40, 35, 30),
            key_developments: vec![DevelopmentInput {
                headline: Some("Naval deployment expands".to_string()),
                ..Default::default()
            }],
        };
        let a = generate_assessment(&input, test_time(), &mut StdRng::seed_from_u64(42));
        let b = generate_assessment(&input, test_time(), &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_generation_jitter_stays_within_band() {
        let assessment = generated(scores(50, 50, 50, 50, 50));
        for dim in &assessment.dimensions {
            assert_eq!(dim.indicators.len(), 5);
            for indicator in &dim.indicators {
                let delta = indicator.value - dim.score as i32;
                assert!((-10..=10).contains(&delta), "jitter out of band: {}", delta);
            }
        }
    }

    #[test]
    fn test_generation_ids_and_development_defaults() {
        let input = GenerationInput {
            week_number: 5,
            year: 2026,
            dimension_scores: scores(10, 10, 10, 10, 10),
            key_developments: vec![DevelopmentInput::default()],
        };
        let assessment =
            generate_assessment(&input, test_time(), &mut StdRng::seed_from_u64(1));
        assert_eq!(assessment.id, "eri-2026-5");
        assert_eq!(assessment.key_developments.len(), 1);
        let kd = &assessment.key_developments[0];
        assert_eq!(kd.id, "kd0");
        assert_eq!(kd.headline, "Untitled Development");
        assert_eq!(kd.what_happened, "");
        assert_eq!(kd.escalation_impact, 5);
    }

    #[test]
    fn test_generation_scenarios_use_stable_trend() {
        let assessment = generated(scores(65, 65, 65, 65, 65));
        // score 65, stable: stabilization low, controlled high, expanded low
        assert_eq!(assessment.scenario_outlook.len(), 3);
        assert_eq!(assessment.scenario_outlook[0].probability, Probability::Low);
        assert_eq!(assessment.scenario_outlook[1].probability, Probability::High);
        assert_eq!(assessment.scenario_outlook[2].probability, Probability::Low);
    }

    #[test]
    fn test_compare_significant_shift_is_strictly_greater_than_ten() {
        let previous = generated(scores(50, 50, 50, 50, 50));

        let mut current = generated(scores(61, 50, 50, 50, 50));
        current.dimensions[0].score = 61; // +11: reported
        let comparison = compare(&current, &previous);
        assert_eq!(comparison.significant_shifts, vec!["Military: +11 points"]);

        let mut current = generated(scores(60, 50, 50, 50, 50));
        current.dimensions[0].score = 60; // +10: not reported
        let comparison = compare(&current, &previous);
        assert!(comparison.significant_shifts.is_empty());
        assert_eq!(comparison.dimension_changes[0].change, 10);
    }

    #[test]
    fn test_compare_overall_and_negative_shift_format() {
        let previous = generated(scores(70, 50, 50, 50, 50));
        let current = generated(scores(50, 50, 50, 50, 50));
        let comparison = compare(&current, &previous);
        assert_eq!(comparison.overall_change, -5);
        assert_eq!(comparison.significant_shifts, vec!["Military: -20 points"]);
    }
}
