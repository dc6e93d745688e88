//! Meridian core library - editorial risk governance and escalation briefing

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Scoring is strictly pure: identical inputs yield identical outputs
// - No global mutable state
// - Randomness (indicator jitter) and clocks are injected, never ambient
// - Risk classification uses inclusive upper bounds; ERI classification
//   uses exclusive upper bounds - two distinct contracts, never unified
// - Display indicators are presentation metadata and never feed scores

pub mod assessment;
pub mod brief;
pub mod config;
pub mod eri;
pub mod factors;
pub mod history;
pub mod html;
pub mod policy;
pub mod risk;
pub mod trends;

pub use assessment::{generate_assessment, ContentItem, RiskAssessment};
pub use brief::{generate_weekly_brief, BriefInput, WeeklyBrief};
pub use config::{load_and_resolve, ResolvedConfig};
pub use eri::{calculate_eri, classify_eri, DimensionScores, EriAssessment, GenerationInput};
pub use factors::{analyze_content, RiskFactors};
pub use history::HistoryStore;
pub use html::render_brief;
pub use risk::{assess_risk, classify_risk, RiskLevel, RiskScores};
