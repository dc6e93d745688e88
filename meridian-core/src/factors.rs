//! Content risk factor extraction
//!
//! Derives boolean risk factors from free-text content (headline + summary)
//! and a tag list via fixed regular expressions and tag membership tests.
//! Pure text analysis: no external state, same inputs always produce the
//! same factors.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Boolean content-risk flags for a single content item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RiskFactors {
    pub named_individual: bool,
    pub criminal_allegation: bool,
    pub single_anonymous_source: bool,
    pub election_period: bool,
    pub war_topic: bool,
    pub religious_framing: bool,
    pub ethnic_tension: bool,
    pub active_conflict: bool,
    pub terrorism_designation: bool,
    pub israel_mentioned: bool,
    pub iran_mentioned: bool,
    pub palestine_mentioned: bool,
    pub us_military_involved: bool,
}

impl RiskFactors {
    /// Names of the factors that are set, in declaration order.
    /// Used for report rendering; the names match the serialized keys.
    pub fn active(&self) -> Vec<&'static str> {
        let flags: [(bool, &'static str); 13] = [
            (self.named_individual, "namedIndividual"),
            (self.criminal_allegation, "criminalAllegation"),
            (self.single_anonymous_source, "singleAnonymousSource"),
            (self.election_period, "electionPeriod"),
            (self.war_topic, "warTopic"),
            (self.religious_framing, "religiousFraming"),
            (self.ethnic_tension, "ethnicTension"),
            (self.active_conflict, "activeConflict"),
            (self.terrorism_designation, "terrorismDesignation"),
            (self.israel_mentioned, "israelMentioned"),
            (self.iran_mentioned, "iranMentioned"),
            (self.palestine_mentioned, "palestineMentioned"),
            (self.us_military_involved, "usMilitaryInvolved"),
        ];
        flags
            .iter()
            .filter(|(set, _)| *set)
            .map(|(_, name)| *name)
            .collect()
    }
}

/// Compiled extraction patterns, built once on first use
struct Patterns {
    named_individual: Regex,
    criminal_allegation: Regex,
    single_anonymous_source: Regex,
    election_period: Regex,
    war_topic: Regex,
    religious_framing: Regex,
    ethnic_tension: Regex,
    active_conflict: Regex,
    terrorism_designation: Regex,
    israel: Regex,
    iran: Regex,
    palestine: Regex,
    us_military: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let compile = |pattern: &str| {
            // Patterns are fixed literals; a failure here is a programming error.
            Regex::new(pattern).unwrap_or_else(|e| panic!("invalid factor pattern {pattern}: {e}"))
        };
        Patterns {
            named_individual: compile(
                r"\b(mr\.|mrs\.|ms\.|dr\.|president|prime minister|minister|leader)\s+\w+",
            ),
            criminal_allegation: compile(
                r"\b(guilty|crime|criminal|corruption|bribe|fraud|illegal|violation)\b",
            ),
            single_anonymous_source: compile(r"\b(anonymous|unnamed|source said|sources said)\b"),
            election_period: compile(r"\b(election|vote|campaign|polling|ballot)\b"),
            war_topic: compile(r"\b(war|conflict|attack|strike|military|combat|battle)\b"),
            religious_framing: compile(
                r"\b(muslim|christian|jewish|hindu|sunni|shia|islamic|religious)\b",
            ),
            ethnic_tension: compile(r"\b(ethnic|sectarian|tribal|racial)\b"),
            active_conflict: compile(r"\b(ongoing|active|current|live|breaking)\b"),
            terrorism_designation: compile(r"\b(terrorist|terrorism|militant|extremist)\b"),
            israel: compile(r"\bisrael\b"),
            iran: compile(r"\biran\b"),
            palestine: compile(r"\bpalestine\b"),
            us_military: compile(r"\b(us military|us forces|american troops|pentagon)\b"),
        }
    })
}

/// Derive risk factors from headline, summary, and tags.
///
/// Matching is case-insensitive (the concatenated text is lowercased before
/// the regex tests). The three country mentions additionally test lowercase
/// tag membership, so a tagged item registers even when the text never names
/// the country.
pub fn analyze_content(headline: &str, summary: &str, tags: &[String]) -> RiskFactors {
    let content = format!("{} {}", headline, summary).to_lowercase();
    let tags: Vec<String> = tags.iter().map(|t| t.to_lowercase()).collect();
    let has_tag = |tag: &str| tags.iter().any(|t| t == tag);
    let p = patterns();

    RiskFactors {
        named_individual: p.named_individual.is_match(&content),
        criminal_allegation: p.criminal_allegation.is_match(&content),
        single_anonymous_source: p.single_anonymous_source.is_match(&content),
        election_period: p.election_period.is_match(&content),
        war_topic: p.war_topic.is_match(&content),
        religious_framing: p.religious_framing.is_match(&content),
        ethnic_tension: p.ethnic_tension.is_match(&content),
        active_conflict: p.active_conflict.is_match(&content),
        terrorism_designation: p.terrorism_designation.is_match(&content),
        israel_mentioned: has_tag("israel") || p.israel.is_match(&content),
        iran_mentioned: has_tag("iran") || p.iran.is_match(&content),
        palestine_mentioned: has_tag("palestine") || p.palestine.is_match(&content),
        us_military_involved: p.us_military.is_match(&content),
    }
}
