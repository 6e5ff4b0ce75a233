//! Per-member timeline reconstruction.
//!
//! Rebuilds a chronological series of averages for one member from the
//! history snapshots plus the live state, for trend display.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aggregate::average;
use crate::error::{CoreError, CoreResult};
use crate::model::{HistorySnapshot, Member, MemberId};

/// One point on a member's timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    /// Snapshot date; `None` marks the synthetic current point.
    pub date: Option<NaiveDate>,
    /// The member's average at that point.
    pub average: f64,
}

impl TimelinePoint {
    pub fn is_current(&self) -> bool {
        self.date.is_none()
    }

    /// Display label: the ISO date, or `current`.
    pub fn label(&self) -> String {
        match self.date {
            Some(date) => date.to_string(),
            None => "current".to_string(),
        }
    }
}

/// Build the chronological series for a member.
///
/// Every snapshot containing the member contributes a point; points are
/// sorted ascending by calendar date, and a final synthetic current point
/// from the live scores is appended — always last, by construction,
/// regardless of the snapshot dates. A member with no historical
/// appearances yields the current point alone. Fails with `NotFound` when
/// the id is not in the live state.
pub fn build_timeline(
    member_id: MemberId,
    history: &[HistorySnapshot],
    live_members: &[Member],
) -> CoreResult<Vec<TimelinePoint>> {
    let live = live_members
        .iter()
        .find(|m| m.id == member_id)
        .ok_or_else(|| CoreError::NotFound(format!("member {member_id}")))?;

    let mut points: Vec<TimelinePoint> = history
        .iter()
        .filter_map(|snapshot| {
            snapshot.entry_for(member_id).map(|entry| {
                average(&entry.scores).map(|avg| TimelinePoint {
                    date: Some(snapshot.date),
                    average: avg,
                })
            })
        })
        .collect::<CoreResult<_>>()?;
    points.sort_by_key(|p| p.date);

    points.push(TimelinePoint {
        date: None,
        average: average(&live.scores)?,
    });
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::competency::CompetencyKey;
    use crate::store::EvaluationStore;

    #[test]
    fn missing_member_is_not_found() {
        let store = EvaluationStore::new();
        let err = build_timeline(MemberId(1), store.history(), store.members()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn empty_history_yields_current_point_only() {
        let mut store = EvaluationStore::new();
        let id = store.add_member();

        let timeline = build_timeline(id, store.history(), store.members()).unwrap();
        assert_eq!(timeline.len(), 1);
        assert!(timeline[0].is_current());
        assert_eq!(timeline[0].average, 3.0);
    }

    #[test]
    fn points_run_ascending_and_end_with_current() {
        let mut store = EvaluationStore::new();
        let id = store.add_member();
        // History stores descending; recording June after January exercises
        // the re-sort to ascending.
        store.record_snapshot("2024-01-01", "").unwrap();
        store.update_score(id, CompetencyKey::Planning, 5).unwrap();
        store.record_snapshot("2024-06-01", "").unwrap();
        store.update_score(id, CompetencyKey::Strategy, 5).unwrap();

        let timeline = build_timeline(id, store.history(), store.members()).unwrap();
        assert_eq!(timeline.len(), 3);
        assert_eq!(timeline[0].label(), "2024-01-01");
        assert_eq!(timeline[1].label(), "2024-06-01");
        assert_eq!(timeline[2].label(), "current");

        assert_eq!(timeline[0].average, 3.0);
        assert_eq!(timeline[1].average, 3.2);
        assert_eq!(timeline[2].average, 3.4);
    }

    #[test]
    fn current_point_tracks_live_scores() {
        let mut store = EvaluationStore::new();
        let id = store.add_member();
        store.record_snapshot("2030-12-31", "dated in the future").unwrap();

        for key in CompetencyKey::ALL {
            store.update_score(id, key, 5).unwrap();
        }
        let timeline = build_timeline(id, store.history(), store.members()).unwrap();

        // The current point stays last even behind a future-dated snapshot.
        let last = timeline.last().unwrap();
        assert!(last.is_current());
        assert_eq!(last.average, 5.0);
    }

    #[test]
    fn snapshots_without_the_member_are_skipped() {
        let mut store = EvaluationStore::new();
        let early = store.add_member();
        store.record_snapshot("2024-01-01", "before the hire").unwrap();
        let late = store.add_member();
        store.record_snapshot("2024-06-01", "").unwrap();

        let timeline = build_timeline(late, store.history(), store.members()).unwrap();
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline[0].label(), "2024-06-01");

        let full = build_timeline(early, store.history(), store.members()).unwrap();
        assert_eq!(full.len(), 3);
    }
}
