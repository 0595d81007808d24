pub mod file;

use crate::error::{AssessError, Result};
use crate::scoring::Finding;
use crate::types::record::{AssessmentRecord, Dop, ProcessKey};
use crate::types::scoring::AssessmentResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use file::FileStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub name: String,
    pub smv: f64,
    pub process_status: Dop,
    #[serde(default)]
    pub is_assessment: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub name: String,
    pub candidate_id: String,
    #[serde(default)]
    pub nid: Option<String>,
    #[serde(default)]
    pub birth_certificate: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedAssessment {
    pub candidate_id: String,
    pub saved_at: DateTime<Utc>,
    pub record: AssessmentRecord,
    pub result: AssessmentResult,
}

pub trait ProcessCatalog {
    fn processes(&self) -> Result<Vec<CatalogEntry>>;

    /// Entries offered for assessment, keyed by normalized process name.
    fn assessable(&self) -> Result<BTreeMap<ProcessKey, CatalogEntry>> {
        Ok(self
            .processes()?
            .into_iter()
            .filter(|entry| entry.is_assessment)
            .map(|entry| (ProcessKey::new(&entry.name), entry))
            .collect())
    }

    fn lookup(&self, name: &str) -> Result<CatalogEntry> {
        let key = ProcessKey::new(name);
        let entry = self
            .processes()?
            .into_iter()
            .find(|entry| ProcessKey::new(&entry.name) == key)
            .ok_or_else(|| AssessError::UnknownProcess(name.to_string()))?;
        if !entry.is_assessment {
            return Err(AssessError::ProcessNotAssessable(entry.name));
        }
        Ok(entry)
    }
}

pub trait CandidateStore {
    fn candidate(&self, candidate_id: &str) -> Result<Candidate>;
}

pub trait AssessmentStore {
    fn prior_assessment(&self, candidate_id: &str) -> Result<Option<AssessmentRecord>>;

    fn save(
        &self,
        candidate_id: &str,
        record: &AssessmentRecord,
        result: &AssessmentResult,
    ) -> Result<SavedAssessment>;

    fn list(&self) -> Result<Vec<SavedAssessment>>;
}

/// Compares a record's process rows with the catalog they should come from.
pub fn catalog_findings(
    record: &AssessmentRecord,
    catalog: &impl ProcessCatalog,
) -> Result<Vec<Finding>> {
    let assessable = catalog.assessable()?;
    let mut findings = Vec::new();

    for (index, process) in record.processes.iter().enumerate() {
        let location = format!("process {} ({})", index + 1, process.process_name);
        let Some(entry) = assessable.get(&process.key()) else {
            findings.push(Finding::new(
                "catalog.unknown_process",
                "Process not in assessment catalog",
                format!("{location} is not an assessable catalog process"),
            ));
            continue;
        };
        if (entry.smv - process.smv).abs() > 1e-6 {
            findings.push(Finding::new(
                "catalog.smv_mismatch",
                "SMV differs from catalog",
                format!(
                    "{location} records smv {} but the catalog lists {}",
                    process.smv, entry.smv
                ),
            ));
        }
        if entry.process_status != process.dop {
            findings.push(Finding::new(
                "catalog.dop_mismatch",
                "Degree of process differs from catalog",
                format!(
                    "{location} records '{}' but the catalog lists '{}'",
                    process.dop, entry.process_status
                ),
            ));
        }
    }

    Ok(findings)
}
