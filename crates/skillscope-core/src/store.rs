//! The evaluation store.
//!
//! Owns the member list, the ideal profile, the selection set, and the
//! history. Nothing outside this type mutates them directly; every mutation
//! goes through an operation here, and every state-changing operation sets
//! the dirty flag the persistence boundary polls.
//!
//! Mutations addressing a missing member are silent no-ops, not errors.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};

use crate::competency::CompetencyKey;
use crate::error::{CoreError, CoreResult};
use crate::model::{
    HistorySnapshot, Member, MemberId, Scores, SnapshotEntry, DEFAULT_IDEAL_LEVEL, MAX_LEVEL,
    MEMBER_PALETTE, MIN_LEVEL,
};

/// The single shared store instance for a session.
///
/// Constructed once at session start (empty or from a persisted document)
/// and torn down at session end; there is no hidden global.
#[derive(Debug, Clone)]
pub struct EvaluationStore {
    members: Vec<Member>,
    ideal: Scores,
    selection: BTreeSet<MemberId>,
    history: Vec<HistorySnapshot>,
    team_memo: String,
    next_member_id: u32,
    dirty: bool,
    last_saved_at: Option<DateTime<Utc>>,
}

impl Default for EvaluationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EvaluationStore {
    /// An empty store: no members, default ideal profile, empty history.
    pub fn new() -> Self {
        EvaluationStore {
            members: Vec::new(),
            ideal: Scores::uniform(DEFAULT_IDEAL_LEVEL),
            selection: BTreeSet::new(),
            history: Vec::new(),
            team_memo: String::new(),
            next_member_id: 1,
            dirty: false,
            last_saved_at: None,
        }
    }

    /// Rebuild a store from persisted parts (document load or pull).
    ///
    /// Incomplete score maps are filled to full coverage, the selection
    /// resets to every member, and the id counter resumes past the highest
    /// id seen. The rebuilt store starts clean.
    pub fn from_parts(
        mut members: Vec<Member>,
        mut ideal: Scores,
        team_memo: String,
        mut history: Vec<HistorySnapshot>,
    ) -> Self {
        for member in &mut members {
            member.scores.fill_missing();
        }
        ideal.fill_missing();
        for snapshot in &mut history {
            snapshot.ideal.fill_missing();
            for entry in &mut snapshot.entries {
                entry.scores.fill_missing();
            }
        }
        history.sort_by(|a, b| b.date.cmp(&a.date));

        let next_member_id = members.iter().map(|m| m.id.0).max().unwrap_or(0) + 1;
        let selection = members.iter().map(|m| m.id).collect();

        EvaluationStore {
            members,
            ideal,
            selection,
            history,
            team_memo,
            next_member_id,
            dirty: false,
            last_saved_at: None,
        }
    }

    // -- read surface -------------------------------------------------------

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn ideal(&self) -> &Scores {
        &self.ideal
    }

    pub fn history(&self) -> &[HistorySnapshot] {
        &self.history
    }

    pub fn team_memo(&self) -> &str {
        &self.team_memo
    }

    pub fn is_selected(&self, id: MemberId) -> bool {
        self.selection.contains(&id)
    }

    /// Ids currently included in visualizations, in id order.
    pub fn selection(&self) -> impl Iterator<Item = MemberId> + '_ {
        self.selection.iter().copied()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        self.last_saved_at
    }

    // -- member operations --------------------------------------------------

    /// Add a member with a generated name, the next palette color, and
    /// mid-scale scores. The new member lands at the end of the order and
    /// joins the selection.
    pub fn add_member(&mut self) -> MemberId {
        let id = MemberId(self.next_member_id);
        self.next_member_id += 1;

        let name = format!("Member {}", id.0);
        let color = MEMBER_PALETTE[(id.0 as usize - 1) % MEMBER_PALETTE.len()].to_string();
        self.members.push(Member::new(id, name, color));
        self.selection.insert(id);
        self.dirty = true;
        tracing::debug!(member = %id, "member added");
        id
    }

    /// Remove a member and its selection entry. Idempotent; absent ids are
    /// a no-op.
    pub fn remove_member(&mut self, id: MemberId) {
        let before = self.members.len();
        self.members.retain(|m| m.id != id);
        self.selection.remove(&id);
        if self.members.len() != before {
            self.dirty = true;
        }
    }

    /// Rename a member. No-op on a missing id.
    pub fn rename_member(&mut self, id: MemberId, name: &str) {
        if let Some(member) = self.member_mut(id) {
            if member.name != name {
                member.name = name.to_string();
                self.dirty = true;
            }
        }
    }

    /// Replace a member's memo. No-op on a missing id.
    pub fn update_memo(&mut self, id: MemberId, memo: &str) {
        if let Some(member) = self.member_mut(id) {
            if member.memo != memo {
                member.memo = memo.to_string();
                self.dirty = true;
            }
        }
    }

    /// Replace a single score. The level is validated before the id lookup,
    /// so an out-of-range level is an error even for a missing member; the
    /// missing member itself is a no-op.
    pub fn update_score(&mut self, id: MemberId, key: CompetencyKey, level: u8) -> CoreResult<()> {
        validate_level(level)?;
        if let Some(member) = self.member_mut(id) {
            if member.scores.set(key, level) != Some(level) {
                self.dirty = true;
            }
        }
        Ok(())
    }

    /// Replace a single ideal-profile score.
    pub fn update_ideal(&mut self, key: CompetencyKey, level: u8) -> CoreResult<()> {
        validate_level(level)?;
        if self.ideal.set(key, level) != Some(level) {
            self.dirty = true;
        }
        Ok(())
    }

    pub fn set_team_memo(&mut self, memo: &str) {
        if self.team_memo != memo {
            self.team_memo = memo.to_string();
            self.dirty = true;
        }
    }

    /// Move a member to `new_index`, shifting the others.
    ///
    /// Silent no-op when the id is missing, the index is out of bounds, or
    /// the move targets the member's current position. Out-of-range indexes
    /// are rejected rather than clamped.
    pub fn reorder(&mut self, id: MemberId, new_index: usize) {
        let Some(current) = self.members.iter().position(|m| m.id == id) else {
            return;
        };
        if new_index >= self.members.len() || new_index == current {
            return;
        }
        let member = self.members.remove(current);
        self.members.insert(new_index, member);
        self.dirty = true;
    }

    /// Toggle a member's visualization inclusion. No-op if the member does
    /// not exist. The selection is view state and never persisted, so this
    /// does not touch the dirty flag.
    pub fn toggle_selection(&mut self, id: MemberId) {
        if self.member(id).is_none() {
            return;
        }
        if !self.selection.remove(&id) {
            self.selection.insert(id);
        }
    }

    /// Flip the UI-only expansion flag. Transient; never persisted.
    pub fn toggle_expanded(&mut self, id: MemberId) {
        if let Some(member) = self.member_mut(id) {
            member.expanded = !member.expanded;
        }
    }

    // -- history operations -------------------------------------------------

    /// Deep-copy the current members and ideal profile into a new snapshot.
    ///
    /// The date must be a parseable `YYYY-MM-DD` calendar date; an empty or
    /// malformed date fails validation with the store untouched. The
    /// snapshot is inserted keeping the history sorted by date descending,
    /// with equal dates staying in insertion order. Returns the snapshot id.
    pub fn record_snapshot(&mut self, date: &str, memo: &str) -> CoreResult<i64> {
        let trimmed = date.trim();
        if trimmed.is_empty() {
            return Err(CoreError::Validation("snapshot date is empty".into()));
        }
        let date: NaiveDate = trimmed
            .parse()
            .map_err(|_| CoreError::Validation(format!("unparseable snapshot date: {trimmed}")))?;

        let id = self.next_snapshot_id();
        let entries = self
            .members
            .iter()
            .map(|m| SnapshotEntry {
                member_id: m.id,
                name: m.name.clone(),
                scores: m.scores.clone(),
            })
            .collect();
        let snapshot = HistorySnapshot {
            id,
            date,
            memo: memo.to_string(),
            entries,
            ideal: self.ideal.clone(),
        };

        // First slot whose date is strictly older keeps descending order;
        // equal dates are passed over, so later recordings land after them.
        let position = self
            .history
            .iter()
            .position(|s| s.date < snapshot.date)
            .unwrap_or(self.history.len());
        self.history.insert(position, snapshot);
        self.dirty = true;
        tracing::debug!(snapshot = id, %date, "snapshot recorded");
        Ok(id)
    }

    /// Delete a snapshot by id. No-op if absent.
    pub fn delete_snapshot(&mut self, id: i64) {
        let before = self.history.len();
        self.history.retain(|s| s.id != id);
        if self.history.len() != before {
            self.dirty = true;
        }
    }

    // -- persistence surface ------------------------------------------------

    /// Record a completed save: clears the dirty flag and stamps the time.
    /// Called by the boundary layer only; the store itself never blocks on
    /// persistence.
    pub fn mark_saved(&mut self, at: DateTime<Utc>) {
        self.dirty = false;
        self.last_saved_at = Some(at);
    }

    /// Force the unsaved-changes flag on (import paths use this).
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    // -- internals ----------------------------------------------------------

    fn member_mut(&mut self, id: MemberId) -> Option<&mut Member> {
        self.members.iter_mut().find(|m| m.id == id)
    }

    /// Timestamp-derived id, bumped past any existing id on collision.
    fn next_snapshot_id(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let max_existing = self.history.iter().map(|s| s.id).max().unwrap_or(0);
        now.max(max_existing + 1)
    }
}

fn validate_level(level: u8) -> CoreResult<()> {
    if !(MIN_LEVEL..=MAX_LEVEL).contains(&level) {
        return Err(CoreError::Validation(format!(
            "level {level} out of range {MIN_LEVEL}-{MAX_LEVEL}"
        )));
    }
    Ok(())
}
