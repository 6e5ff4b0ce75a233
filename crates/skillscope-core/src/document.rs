//! Persistence and export document shapes, with JSON file I/O.
//!
//! Two distinct wire surfaces exist on purpose: the hosted backend row uses
//! snake_case field names, the local export file uses camelCase. Both are
//! kept rather than unified so either consumer keeps working; conversions
//! go through the store.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{HistorySnapshot, Member, Scores};
use crate::store::EvaluationStore;

/// Fixed id of the single logical row the whole store persists into.
pub const ROW_ID: &str = "default";

/// The hosted-backend row: one document holding the entire store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreDocument {
    #[serde(default)]
    pub employees: Vec<Member>,
    #[serde(default)]
    pub ideal_profile: Scores,
    #[serde(default)]
    pub team_memo: String,
    #[serde(default)]
    pub evaluation_history: Vec<HistorySnapshot>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl StoreDocument {
    /// Serialize the live store, stamping the current time.
    pub fn from_store(store: &EvaluationStore) -> Self {
        StoreDocument {
            employees: store.members().to_vec(),
            ideal_profile: store.ideal().clone(),
            team_memo: store.team_memo().to_string(),
            evaluation_history: store.history().to_vec(),
            updated_at: Utc::now(),
        }
    }

    /// Rebuild a store from a fetched document.
    pub fn into_store(self) -> EvaluationStore {
        EvaluationStore::from_parts(
            self.employees,
            self.ideal_profile,
            self.team_memo,
            self.evaluation_history,
        )
    }

    /// Write as pretty JSON, creating parent directories.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        write_pretty_json(self, path).context("failed to write store document")
    }

    /// Load from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read store from {}", path.display()))?;
        serde_json::from_str(&content).context("failed to parse store document JSON")
    }
}

/// The local export/import file. CamelCase field names, no timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportFile {
    #[serde(default)]
    pub employees: Option<Vec<Member>>,
    #[serde(default)]
    pub ideal_profile: Option<Scores>,
    #[serde(default)]
    pub team_memo: Option<String>,
    #[serde(default)]
    pub evaluation_history: Option<Vec<HistorySnapshot>>,
}

impl ExportFile {
    pub fn from_store(store: &EvaluationStore) -> Self {
        ExportFile {
            employees: Some(store.members().to_vec()),
            ideal_profile: Some(store.ideal().clone()),
            team_memo: Some(store.team_memo().to_string()),
            evaluation_history: Some(store.history().to_vec()),
        }
    }

    /// Merge into an existing store, producing the post-import store.
    ///
    /// Fields missing from the file keep the current values rather than
    /// failing the whole import; incomplete score maps are filled with the
    /// default level. The result carries unsaved changes.
    pub fn apply_to(self, current: &EvaluationStore) -> EvaluationStore {
        let members = self
            .employees
            .unwrap_or_else(|| current.members().to_vec());
        let ideal = self
            .ideal_profile
            .unwrap_or_else(|| current.ideal().clone());
        let team_memo = self
            .team_memo
            .unwrap_or_else(|| current.team_memo().to_string());
        let history = self
            .evaluation_history
            .unwrap_or_else(|| current.history().to_vec());

        let mut store = EvaluationStore::from_parts(members, ideal, team_memo, history);
        store.mark_dirty();
        store
    }

    /// Write as pretty JSON, creating parent directories.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        write_pretty_json(self, path).context("failed to write export file")
    }

    /// Load from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read export from {}", path.display()))?;
        serde_json::from_str(&content).context("failed to parse export JSON")
    }
}

/// Conventional export filename for a given date.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("ps-evaluation-{date}.json")
}

fn write_pretty_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::competency::CompetencyKey;
    use crate::model::MemberId;

    fn sample_store() -> EvaluationStore {
        let mut store = EvaluationStore::new();
        let a = store.add_member();
        let b = store.add_member();
        store.rename_member(a, "Ana");
        store.update_score(a, CompetencyKey::Strategy, 5).unwrap();
        store.update_score(b, CompetencyKey::Support, 1).unwrap();
        store.set_team_memo("Q2 review");
        store.record_snapshot("2024-01-01", "baseline").unwrap();
        store
    }

    #[test]
    fn document_roundtrip_preserves_store() {
        let store = sample_store();
        let doc = StoreDocument::from_store(&store);
        let restored = doc.into_store();

        let ids: Vec<MemberId> = restored.members().iter().map(|m| m.id).collect();
        let expected: Vec<MemberId> = store.members().iter().map(|m| m.id).collect();
        assert_eq!(ids, expected);
        assert_eq!(restored.members()[0].name, "Ana");
        assert_eq!(
            restored.members()[0].scores.get(CompetencyKey::Strategy),
            5
        );
        assert_eq!(restored.team_memo(), "Q2 review");
        assert_eq!(restored.history().len(), 1);
    }

    #[test]
    fn document_uses_snake_case_fields() {
        let doc = StoreDocument::from_store(&sample_store());
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json.get("ideal_profile").is_some());
        assert!(json.get("evaluation_history").is_some());
        assert!(json.get("updated_at").is_some());
    }

    #[test]
    fn export_uses_camel_case_fields() {
        let file = ExportFile::from_store(&sample_store());
        let json = serde_json::to_value(&file).unwrap();
        assert!(json.get("idealProfile").is_some());
        assert!(json.get("teamMemo").is_some());
        assert!(json.get("evaluationHistory").is_some());
        assert!(json.get("updated_at").is_none());
    }

    #[test]
    fn import_of_export_reproduces_store() {
        let store = sample_store();
        let file = ExportFile::from_store(&store);
        let imported = file.apply_to(&EvaluationStore::new());

        let ids: Vec<MemberId> = imported.members().iter().map(|m| m.id).collect();
        let expected: Vec<MemberId> = store.members().iter().map(|m| m.id).collect();
        assert_eq!(ids, expected);
        assert_eq!(imported.history().len(), store.history().len());
        assert!(imported.is_dirty());
    }

    #[test]
    fn partial_import_keeps_current_values() {
        let store = sample_store();
        let file: ExportFile =
            serde_json::from_str(r#"{"teamMemo": "imported memo"}"#).unwrap();
        let merged = file.apply_to(&store);

        assert_eq!(merged.team_memo(), "imported memo");
        assert_eq!(merged.members().len(), store.members().len());
        assert_eq!(merged.history().len(), 1);
    }

    #[test]
    fn import_fills_incomplete_score_maps() {
        let json = r##"{
            "employees": [
                {"id": 1, "name": "Ana", "color": "#4e79a7", "scores": {"strategy": 5}}
            ]
        }"##;
        let file: ExportFile = serde_json::from_str(json).unwrap();
        let store = file.apply_to(&EvaluationStore::new());

        let member = store.member(MemberId(1)).unwrap();
        assert_eq!(member.scores.len(), 10);
        assert_eq!(member.scores.get(CompetencyKey::Strategy), 5);
        assert_eq!(member.scores.get(CompetencyKey::Planning), 3);
    }

    #[test]
    fn file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let doc = StoreDocument::from_store(&sample_store());
        doc.save_json(&path).unwrap();
        let loaded = StoreDocument::load_json(&path).unwrap();
        assert_eq!(loaded.employees.len(), 2);

        let export_path = dir.path().join("export.json");
        ExportFile::from_store(&sample_store())
            .save_json(&export_path)
            .unwrap();
        let export = ExportFile::load_json(&export_path).unwrap();
        assert_eq!(export.employees.unwrap().len(), 2);
    }

    #[test]
    fn export_filename_convention() {
        let date: NaiveDate = "2024-06-01".parse().unwrap();
        assert_eq!(export_file_name(date), "ps-evaluation-2024-06-01.json");
    }
}
