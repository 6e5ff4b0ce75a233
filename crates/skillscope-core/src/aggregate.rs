//! Pure aggregation over score vectors.
//!
//! Everything here is deterministic and side-effect free: per-member
//! averages, strengths/weaknesses rankings, per-competency team statistics,
//! and the two composite axes used for scatter placement. Ties always break
//! in the canonical key enumeration order.

use serde::{Deserialize, Serialize};

use crate::competency::CompetencyKey;
use crate::error::{CoreError, CoreResult};
use crate::model::{Member, Scores};

/// Round to one decimal place, half-up. Applied at the display boundary of
/// every derived average.
pub fn round1(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}

/// Arithmetic mean of a score vector, rounded to one decimal.
///
/// The fixed ten-key schema never yields an empty mapping in practice, but
/// the divide-by-zero guard stays.
pub fn average(scores: &Scores) -> CoreResult<f64> {
    if scores.is_empty() {
        return Err(CoreError::Domain("average of empty score map".into()));
    }
    let sum: u32 = scores.iter().map(|(_, level)| level as u32).sum();
    Ok(round1(sum as f64 / scores.len() as f64))
}

/// One competency with its level, as placed in a ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCompetency {
    pub key: CompetencyKey,
    pub name: String,
    pub level: u8,
}

/// All competencies sorted by level descending, stable on ties.
pub fn rank_by_score(scores: &Scores) -> Vec<RankedCompetency> {
    let mut ranked: Vec<RankedCompetency> = scores
        .iter()
        .map(|(key, level)| RankedCompetency {
            key,
            name: key.display_name().to_string(),
            level,
        })
        .collect();
    // Input iterates in canonical key order; a stable sort keeps that order
    // as the tiebreak.
    ranked.sort_by(|a, b| b.level.cmp(&a.level));
    ranked
}

/// Top three of a ranking. Shorter inputs yield shorter slices.
pub fn strengths(ranked: &[RankedCompetency]) -> Vec<RankedCompetency> {
    ranked.iter().take(3).cloned().collect()
}

/// Bottom three of a ranking, weakest first.
pub fn weaknesses(ranked: &[RankedCompetency]) -> Vec<RankedCompetency> {
    let start = ranked.len().saturating_sub(3);
    let mut bottom: Vec<RankedCompetency> = ranked[start..].to_vec();
    bottom.reverse();
    bottom
}

/// Per-competency statistics across the whole team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetencyStat {
    pub key: CompetencyKey,
    pub name: String,
    pub average: f64,
    pub max: u8,
    pub min: u8,
}

/// Average/max/min per competency across all members. Selection is not
/// consulted; team statistics always cover everyone.
pub fn team_stats(members: &[Member]) -> CoreResult<Vec<CompetencyStat>> {
    if members.is_empty() {
        return Err(CoreError::Domain("team stats over empty member list".into()));
    }
    let stats = CompetencyKey::ALL
        .iter()
        .map(|&key| {
            let levels: Vec<u8> = members.iter().map(|m| m.scores.get(key)).collect();
            let sum: u32 = levels.iter().map(|&l| l as u32).sum();
            CompetencyStat {
                key,
                name: key.display_name().to_string(),
                average: round1(sum as f64 / levels.len() as f64),
                max: *levels.iter().max().expect("non-empty members"),
                min: *levels.iter().min().expect("non-empty members"),
            }
        })
        .collect();
    Ok(stats)
}

/// Ranking direction for [`top_n`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankDirection {
    /// Highest team averages first.
    Strengths,
    /// Lowest team averages first.
    Weaknesses,
}

/// First `n` competency stats by average, ties in canonical key order.
pub fn top_n(stats: &[CompetencyStat], n: usize, direction: RankDirection) -> Vec<CompetencyStat> {
    let mut sorted = stats.to_vec();
    match direction {
        RankDirection::Strengths => sorted.sort_by(|a, b| b.average.total_cmp(&a.average)),
        RankDirection::Weaknesses => sorted.sort_by(|a, b| a.average.total_cmp(&b.average)),
    }
    sorted.truncate(n);
    sorted
}

/// The two derived scatter axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositeAxes {
    pub technical: f64,
    pub human: f64,
}

/// Unweighted means of the fixed technical and human competency partitions.
pub fn composite_axes(scores: &Scores) -> CompositeAxes {
    let mean = |keys: &[CompetencyKey]| {
        let sum: u32 = keys.iter().map(|&k| scores.get(k) as u32).sum();
        round1(sum as f64 / keys.len() as f64)
    };
    CompositeAxes {
        technical: mean(&CompetencyKey::TECHNICAL),
        human: mean(&CompetencyKey::HUMAN),
    }
}
