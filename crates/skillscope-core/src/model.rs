//! Core data model types for skillscope.
//!
//! Members, their score vectors, and the immutable history snapshots the
//! timeline is rebuilt from.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::competency::CompetencyKey;

/// Lowest and highest assignable level.
pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 5;

/// Mid-scale level assigned to every competency of a freshly added member.
pub const DEFAULT_LEVEL: u8 = 3;

/// Default level for the ideal profile — a target, not a midpoint.
pub const DEFAULT_IDEAL_LEVEL: u8 = 4;

/// Display colors assigned round-robin as members are added.
pub const MEMBER_PALETTE: [&str; 8] = [
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b5", "#59a14f", "#edc948", "#b07aa1", "#9c755f",
];

/// A complete competency → level mapping.
///
/// Every `Scores` owned by the store covers all ten keys. The map is ordered
/// by the canonical key enumeration order, which keeps iteration (and with it
/// ranking tiebreaks) stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scores(BTreeMap<CompetencyKey, u8>);

impl Scores {
    /// A score vector with every competency at the same level.
    pub fn uniform(level: u8) -> Self {
        Scores(CompetencyKey::ALL.iter().map(|&k| (k, level)).collect())
    }

    /// Level for a key. Complete coverage makes the lookup infallible; a map
    /// that arrived incomplete from an import reads as the default level.
    pub fn get(&self, key: CompetencyKey) -> u8 {
        self.0.get(&key).copied().unwrap_or(DEFAULT_LEVEL)
    }

    /// Replace the level for a single key, leaving the others untouched.
    /// Returns the previous level.
    pub fn set(&mut self, key: CompetencyKey, level: u8) -> Option<u8> {
        self.0.insert(key, level)
    }

    /// Iterate (key, level) pairs in canonical key order.
    pub fn iter(&self) -> impl Iterator<Item = (CompetencyKey, u8)> + '_ {
        self.0.iter().map(|(&k, &v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fill any key an imported map left out with the default level.
    pub fn fill_missing(&mut self) {
        for key in CompetencyKey::ALL {
            self.0.entry(key).or_insert(DEFAULT_LEVEL);
        }
    }
}

impl Default for Scores {
    fn default() -> Self {
        Scores::uniform(DEFAULT_LEVEL)
    }
}

impl FromIterator<(CompetencyKey, u8)> for Scores {
    fn from_iter<T: IntoIterator<Item = (CompetencyKey, u8)>>(iter: T) -> Self {
        Scores(iter.into_iter().collect())
    }
}

/// Stable member identifier, assigned from a store-owned monotonic counter
/// and never reused.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MemberId(pub u32);

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One rated person.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// Unique, stable id.
    pub id: MemberId,
    /// Mutable display name.
    pub name: String,
    /// Display color, stable after creation.
    pub color: String,
    /// Competency → level mapping, always complete.
    #[serde(default)]
    pub scores: Scores,
    /// Free-text memo.
    #[serde(default)]
    pub memo: String,
    /// UI-only expansion flag; transient, never persisted.
    #[serde(skip)]
    pub expanded: bool,
}

impl Member {
    /// A freshly added member: generated name, palette color, default scores.
    pub fn new(id: MemberId, name: String, color: String) -> Self {
        Member {
            id,
            name,
            color,
            scores: Scores::default(),
            memo: String::new(),
            expanded: false,
        }
    }
}

/// A member's scores as captured in a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotEntry {
    pub member_id: MemberId,
    pub name: String,
    #[serde(default)]
    pub scores: Scores,
}

/// An immutable, dated copy of all members' scores and the ideal profile.
///
/// Contents never change after creation; the store deep-copies at save time
/// so later edits to live state cannot reach into history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistorySnapshot {
    /// Unique id derived from the creation timestamp (Unix milliseconds).
    pub id: i64,
    /// User-supplied calendar date — the sole sort key, descending.
    pub date: NaiveDate,
    /// Optional note attached at save time.
    #[serde(default)]
    pub memo: String,
    /// Per-member score copies.
    #[serde(default)]
    pub entries: Vec<SnapshotEntry>,
    /// Ideal profile as it stood at save time.
    #[serde(default)]
    pub ideal: Scores,
}

impl HistorySnapshot {
    /// The entry for a member, if this snapshot contains one.
    pub fn entry_for(&self, id: MemberId) -> Option<&SnapshotEntry> {
        self.entries.iter().find(|e| e.member_id == id)
    }
}
