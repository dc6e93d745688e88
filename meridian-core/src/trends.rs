//! Trend semantics - summarize ERI movement across stored assessments
//!
//! Derives direction, volatility, and range statistics from a run of
//! weekly assessments. Trends are derived, never stored back.

use crate::eri::EriAssessment;
use serde::{Deserialize, Serialize};

/// Minimum difference between half-period averages that registers as a
/// directional trend
const DIRECTION_THRESHOLD: f64 = 5.0;

/// Direction of the index across the analyzed period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryTrend {
    Rising,
    Falling,
    Stable,
}

impl HistoryTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryTrend::Rising => "rising",
            HistoryTrend::Falling => "falling",
            HistoryTrend::Stable => "stable",
        }
    }
}

/// Summary statistics over a run of weekly overall scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendStats {
    pub trend: HistoryTrend,
    pub volatility: f64,
    pub average: u32,
    pub peak: u32,
    pub low: u32,
}

fn mean(scores: &[u32]) -> f64 {
    scores.iter().map(|s| f64::from(*s)).sum::<f64>() / scores.len() as f64
}

/// Summarize a run of assessments, oldest first.
///
/// Fewer than two assessments always reads as stable with zero volatility;
/// a single assessment reports its own score as average, peak, and low.
///
/// Volatility is the population standard deviation of the overall scores,
/// rounded to one decimal. Direction compares the average of the first half
/// (length floor(n/2)) against the rest; a gap above 5 points either way is
/// rising or falling.
pub fn analyze_history(assessments: &[EriAssessment]) -> TrendStats {
    let scores: Vec<u32> = assessments.iter().map(|a| a.overall_score).collect();

    if scores.len() < 2 {
        let only = scores.first().copied().unwrap_or(0);
        return TrendStats {
            trend: HistoryTrend::Stable,
            volatility: 0.0,
            average: only,
            peak: only,
            low: only,
        };
    }

    let average = mean(&scores);
    let variance = scores
        .iter()
        .map(|s| (f64::from(*s) - average).powi(2))
        .sum::<f64>()
        / scores.len() as f64;
    let volatility = (variance.sqrt() * 10.0).round() / 10.0;

    let split = scores.len() / 2;
    let first_avg = mean(&scores[..split]);
    let second_avg = mean(&scores[split..]);

    let trend = if second_avg - first_avg > DIRECTION_THRESHOLD {
        HistoryTrend::Rising
    } else if first_avg - second_avg > DIRECTION_THRESHOLD {
        HistoryTrend::Falling
    } else {
        HistoryTrend::Stable
    };

    TrendStats {
        trend,
        volatility,
        average: average.round() as u32,
        peak: scores.iter().copied().max().unwrap_or(0),
        low: scores.iter().copied().min().unwrap_or(0),
    }
}
