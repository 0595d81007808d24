use crate::error::{AssessError, Result};
use crate::store::{Candidate, ProcessCatalog};
use crate::types::record::{
    AssessmentRecord, Attitude, EducationalStatus, MachineType, ProcessMeasurement,
    SupplementaryMachine, CYCLE_TIME_SLOTS,
};
use chrono::{NaiveDate, Utc};

/// Editable assessment, kept apart from the scored result. Always holds at
/// least one process row.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentDraft {
    record: AssessmentRecord,
}

impl AssessmentDraft {
    pub fn new(candidate: &Candidate) -> Self {
        Self::new_on(candidate, Utc::now().date_naive())
    }

    pub fn new_on(candidate: &Candidate, date: NaiveDate) -> Self {
        Self {
            record: AssessmentRecord {
                operator_name: candidate.name.clone(),
                father_husband_name: String::new(),
                candidate_id: Some(candidate.candidate_id.clone()),
                nid: candidate.nid.clone(),
                birth_certificate: candidate.birth_certificate.clone(),
                date,
                educational_status: EducationalStatus::EightAbove,
                attitude: Attitude::Good,
                sewing_floor: String::new(),
                processes: vec![ProcessMeasurement::blank()],
                supplementary_machines: SupplementaryMachine::checklist(),
            },
        }
    }

    /// Carries ratings and process rows forward from an earlier assessment.
    /// Identity fields stay those of the candidate.
    pub fn with_prior(mut self, prior: &AssessmentRecord) -> Self {
        let record = &mut self.record;
        record.father_husband_name = prior.father_husband_name.clone();
        record.educational_status = prior.educational_status.clone();
        record.attitude = prior.attitude.clone();
        record.sewing_floor = prior.sewing_floor.clone();
        if !prior.processes.is_empty() {
            record.processes = prior.processes.clone();
        }
        if !prior.supplementary_machines.is_empty() {
            record.supplementary_machines = prior.supplementary_machines.clone();
        }
        self
    }

    pub fn record(&self) -> &AssessmentRecord {
        &self.record
    }

    pub fn process_count(&self) -> usize {
        self.record.processes.len()
    }

    /// Appends a blank row and returns its index.
    pub fn add_process(&mut self) -> usize {
        self.record.processes.push(ProcessMeasurement::blank());
        self.record.processes.len() - 1
    }

    pub fn remove_process(&mut self, index: usize) -> Result<ProcessMeasurement> {
        self.check_row(index)?;
        if self.record.processes.len() == 1 {
            return Err(AssessError::LastProcessRow);
        }
        Ok(self.record.processes.remove(index))
    }

    /// Points a row at a catalog process, copying its DOP and SMV.
    pub fn select_process(
        &mut self,
        index: usize,
        name: &str,
        catalog: &impl ProcessCatalog,
    ) -> Result<()> {
        self.check_row(index)?;
        let entry = catalog.lookup(name)?;
        let row = &mut self.record.processes[index];
        row.process_name = entry.name;
        row.dop = entry.process_status;
        row.smv = entry.smv;
        Ok(())
    }

    pub fn set_machine(&mut self, index: usize, machine: MachineType) -> Result<()> {
        self.check_row(index)?;
        self.record.processes[index].machine_type = machine;
        Ok(())
    }

    /// Records one timed cycle. Zero clears the slot.
    pub fn set_cycle_time(&mut self, index: usize, slot: usize, seconds: f64) -> Result<()> {
        self.check_row(index)?;
        if slot >= CYCLE_TIME_SLOTS {
            return Err(AssessError::SlotOutOfRange {
                slot,
                slots: CYCLE_TIME_SLOTS,
            });
        }
        let row = &mut self.record.processes[index];
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(AssessError::invalid_measurement(
                &row.process_name,
                format!("cycle time {seconds} is not a non-negative number of seconds"),
            ));
        }
        row.cycle_times[slot] = seconds;
        Ok(())
    }

    pub fn into_record(self) -> AssessmentRecord {
        self.record
    }

    fn check_row(&self, index: usize) -> Result<()> {
        let len = self.record.processes.len();
        if index >= len {
            return Err(AssessError::RowOutOfRange { index, len });
        }
        Ok(())
    }
}
