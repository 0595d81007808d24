use super::{AssessmentStore, Candidate, CandidateStore, CatalogEntry, ProcessCatalog, SavedAssessment};
use crate::error::{AssessError, Result};
use crate::types::record::AssessmentRecord;
use crate::types::scoring::AssessmentResult;
use chrono::Utc;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const CATALOG_FILE: &str = "catalog.json";
pub const CANDIDATES_FILE: &str = "candidates.json";
pub const ASSESSMENTS_DIR: &str = "assessments";

/// JSON files under one data directory:
/// `catalog.json`, `candidates.json` and `assessments/<candidate>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn has_catalog(&self) -> bool {
        self.root.join(CATALOG_FILE).exists()
    }

    pub fn assessment_path(&self, candidate_id: &str) -> Result<PathBuf> {
        validate_candidate_id(candidate_id)?;
        Ok(self
            .root
            .join(ASSESSMENTS_DIR)
            .join(format!("{candidate_id}.json")))
    }

    fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        if !path.exists() {
            return Err(AssessError::PathNotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Candidate ids become file stems, so only a conservative character set passes.
pub fn validate_candidate_id(candidate_id: &str) -> Result<()> {
    let valid = !candidate_id.is_empty()
        && !candidate_id.starts_with('.')
        && candidate_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(AssessError::InvalidCandidateId(candidate_id.to_string()))
    }
}

impl ProcessCatalog for FileStore {
    fn processes(&self) -> Result<Vec<CatalogEntry>> {
        self.read_json(&self.root.join(CATALOG_FILE))
    }
}

impl CandidateStore for FileStore {
    fn candidate(&self, candidate_id: &str) -> Result<Candidate> {
        let candidates: Vec<Candidate> = self.read_json(&self.root.join(CANDIDATES_FILE))?;
        candidates
            .into_iter()
            .find(|candidate| candidate.candidate_id == candidate_id)
            .ok_or_else(|| AssessError::CandidateNotFound(candidate_id.to_string()))
    }
}

impl AssessmentStore for FileStore {
    fn prior_assessment(&self, candidate_id: &str) -> Result<Option<AssessmentRecord>> {
        let path = self.assessment_path(candidate_id)?;
        if !path.exists() {
            return Ok(None);
        }
        let saved: SavedAssessment = self.read_json(&path)?;
        Ok(Some(saved.record))
    }

    fn save(
        &self,
        candidate_id: &str,
        record: &AssessmentRecord,
        result: &AssessmentResult,
    ) -> Result<SavedAssessment> {
        let path = self.assessment_path(candidate_id)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let saved = SavedAssessment {
            candidate_id: candidate_id.to_string(),
            saved_at: Utc::now(),
            record: record.clone(),
            result: result.clone(),
        };
        fs::write(&path, serde_json::to_string_pretty(&saved)?)?;
        tracing::info!(
            candidate = candidate_id,
            path = %path.display(),
            grade = %result.final_assessment.grade,
            "assessment saved"
        );
        Ok(saved)
    }

    fn list(&self) -> Result<Vec<SavedAssessment>> {
        let dir = self.root.join(ASSESSMENTS_DIR);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut saved = Vec::new();
        for entry in WalkDir::new(&dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| entry.path().extension().and_then(|ext| ext.to_str()) == Some("json"))
        {
            match self.read_json::<SavedAssessment>(entry.path()) {
                Ok(assessment) => saved.push(assessment),
                Err(err) => {
                    tracing::warn!(path = %entry.path().display(), "skipping unreadable assessment: {err}");
                }
            }
        }
        saved.sort_by(|left, right| left.candidate_id.cmp(&right.candidate_id));
        Ok(saved)
    }
}
