pub mod decision;
pub mod machine;
pub mod metrics;
pub mod points;
pub mod practical;

use crate::error::{AssessError, Result};
use crate::types::config::{AssessConfig, PracticalRule, ScoreWeights};
use crate::types::record::AssessmentRecord;
use crate::types::scoring::{AssessmentResult, ProcessResult, Score, ScoreCard};
use decision::DecisionInput;
use serde::Serialize;

/// Knobs that select between the scoring rule sets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringPolicy {
    pub weights: ScoreWeights,
    pub practical_rule: PracticalRule,
    pub apply_overrides: bool,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            practical_rule: PracticalRule::MachineAware,
            apply_overrides: true,
        }
    }
}

impl ScoringPolicy {
    pub fn from_config(config: &AssessConfig) -> Self {
        Self {
            weights: config.weights(),
            practical_rule: config.practical_rule(),
            apply_overrides: config.apply_overrides(),
        }
    }
}

/// Non-blocking observation about a record that still scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub id: String,
    pub title: String,
    pub body: String,
}

impl Finding {
    pub fn new(id: &str, title: &str, body: String) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            body,
        }
    }
}

fn unrecognized(id: &str, field: &str, value: &str, location: &str) -> Finding {
    Finding::new(
        id,
        &format!("Unrecognized {field}"),
        format!("{location}: '{value}' is not a known {field} and scores 0 points"),
    )
}

/// Checks a record before scoring. Measurements that would make the result
/// undefined are errors; unknown vocabulary values are findings.
pub fn validate(record: &AssessmentRecord) -> Result<Vec<Finding>> {
    if record.processes.is_empty() {
        return Err(AssessError::NoProcesses);
    }

    let mut findings = Vec::new();
    for (index, process) in record.processes.iter().enumerate() {
        metrics::check(process)?;

        let location = format!("process {} ({})", index + 1, process.process_name);
        if process.process_name.trim().is_empty() {
            findings.push(Finding::new(
                "process.unnamed",
                "Unnamed process",
                format!("process {} has no process name", index + 1),
            ));
        }
        if !process.machine_type.is_recognized() {
            findings.push(unrecognized(
                "process.machine_type",
                "machine type",
                process.machine_type.as_str(),
                &location,
            ));
        }
        if !process.dop.is_recognized() {
            findings.push(unrecognized(
                "process.dop",
                "degree of process",
                process.dop.as_str(),
                &location,
            ));
        }
        if !process.quality_status.is_recognized() {
            findings.push(unrecognized(
                "process.quality_status",
                "quality status",
                process.quality_status.as_str(),
                &location,
            ));
        }
    }

    if !record.educational_status.is_recognized() {
        findings.push(unrecognized(
            "operator.educational_status",
            "educational status",
            record.educational_status.as_str(),
            "operator",
        ));
    }
    if !record.attitude.is_recognized() {
        findings.push(unrecognized(
            "operator.attitude",
            "attitude",
            record.attitude.as_str(),
            "operator",
        ));
    }
    for machine in &record.supplementary_machines {
        if !machine.name.is_recognized() {
            findings.push(unrecognized(
                "operator.supplementary_machine",
                "machine type",
                machine.name.as_str(),
                "supplementary machines",
            ));
        }
    }

    Ok(findings)
}

fn mean(values: impl Iterator<Item = Score>) -> Score {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as Score
    }
}

/// Scores one assessment. Pure: safe to call from any number of threads.
pub fn compute_assessment(
    record: &AssessmentRecord,
    policy: &ScoringPolicy,
) -> Result<AssessmentResult> {
    for finding in validate(record)? {
        tracing::warn!(finding = %finding.id, "{}", finding.body);
    }

    let metrics = record
        .processes
        .iter()
        .map(metrics::derive)
        .collect::<Result<Vec<_>>>()?;
    let marks = practical::practical_marks(policy.practical_rule, &record.processes, &metrics);

    let processes = record
        .processes
        .iter()
        .zip(metrics)
        .zip(marks)
        .map(|((measurement, metric), practical_marks)| ProcessResult {
            measurement: measurement.clone(),
            avg_cycle_time: metric.avg_cycle_time,
            target: metric.target,
            capacity: metric.capacity,
            performance: metric.performance,
            practical_marks,
        })
        .collect::<Vec<_>>();

    let weights = &policy.weights;
    let machine_score = machine::machine_score(&record.processes);
    let quality_average = mean(
        processes
            .iter()
            .map(|process| points::quality_points(&process.measurement.quality_status)),
    );
    let scores = ScoreCard {
        machine_score,
        final_machine_score: machine_score * weights.machine,
        dop_score: mean(
            processes
                .iter()
                .map(|process| points::dop_points(&process.measurement.dop)),
        ) * weights.dop,
        practical_score: mean(processes.iter().map(|process| process.practical_marks))
            * weights.practical,
        average_quality_score: quality_average * weights.quality,
        education_score: points::education_points(&record.educational_status) * weights.education,
        attitude_score: points::attitude_points(&record.attitude) * weights.attitude,
        total_score: 0.0,
    }
    .finalize();

    let (final_assessment, adjustments) = decision::decide(&DecisionInput {
        total_score: scores.total_score,
        quality_score: scores.average_quality_score,
        processes: &processes,
        multiskill: machine::is_multiskill(&record.processes),
        apply_overrides: policy.apply_overrides,
    });

    tracing::debug!(
        operator = %record.operator_name,
        total_score = scores.total_score,
        decision = %final_assessment,
        "assessment scored"
    );

    Ok(AssessmentResult {
        operator_name: record.operator_name.clone(),
        candidate_id: record.candidate_id.clone(),
        processes,
        scores,
        final_assessment,
        supplementary_machines: record
            .supplementary_machines
            .iter()
            .filter(|machine| machine.checked)
            .map(|machine| machine.name.clone())
            .collect(),
        adjustments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::record::{
        Attitude, Dop, EducationalStatus, MachineType, ProcessMeasurement, QualityStatus,
        SupplementaryMachine,
    };
    use crate::types::scoring::{Designation, Grade, Level};
    use chrono::NaiveDate;

    fn process(machine: MachineType, name: &str, smv: f64, cycle: f64) -> ProcessMeasurement {
        ProcessMeasurement {
            machine_type: machine,
            process_name: name.to_string(),
            dop: Dop::Critical,
            smv,
            cycle_times: [cycle; 5],
            quality_status: QualityStatus::NoDefect,
            remarks: String::new(),
        }
    }

    fn record(processes: Vec<ProcessMeasurement>) -> AssessmentRecord {
        AssessmentRecord {
            operator_name: "Rahima Begum".to_string(),
            father_husband_name: "Abdul Karim".to_string(),
            candidate_id: Some("C-1001".to_string()),
            nid: None,
            birth_certificate: None,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date"),
            educational_status: EducationalStatus::EightAbove,
            attitude: Attitude::Good,
            sewing_floor: "Floor 2".to_string(),
            processes,
            supplementary_machines: SupplementaryMachine::checklist(),
        }
    }

    fn close(left: f64, right: f64) -> bool {
        (left - right).abs() < 1e-9
    }

    #[test]
    fn single_kangaro_pocket_scores_grade_a() {
        let input = record(vec![process(
            MachineType::SnlsDnls,
            "Pocket-join-(Kangaro)",
            0.67,
            40.0,
        )]);

        let result = compute_assessment(&input, &ScoringPolicy::default()).expect("should score");
        let scores = &result.scores;
        assert!(close(result.processes[0].capacity, 90.0));
        assert_eq!(result.processes[0].practical_marks, 50.0);
        assert!(close(scores.final_machine_score, 12.0));
        assert!(close(scores.dop_score, 30.0));
        assert!(close(scores.practical_score, 10.0));
        assert!(close(scores.average_quality_score, 10.0));
        assert!(close(scores.education_score, 5.0));
        assert!(close(scores.attitude_score, 5.0));
        assert!(close(scores.total_score, 72.0));
        assert_eq!(result.final_assessment.grade, Grade::A);
        assert_eq!(result.final_assessment.level, Level::Good);
    }

    #[test]
    fn all_zero_cycle_times_are_rejected() {
        let input = record(vec![process(MachineType::SnlsDnls, "Side seam", 0.5, 0.0)]);
        let err = compute_assessment(&input, &ScoringPolicy::default()).expect_err("invalid");
        assert!(matches!(err, AssessError::InvalidMeasurement { .. }));
        assert!(err.is_validation());
    }

    #[test]
    fn empty_process_list_is_rejected() {
        let input = record(Vec::new());
        let err = compute_assessment(&input, &ScoringPolicy::default()).expect_err("invalid");
        assert!(matches!(err, AssessError::NoProcesses));
    }

    #[test]
    fn three_special_machines_earn_full_machine_score() {
        let mut input = record(vec![
            process(MachineType::SnlsDnls, "Side seam", 0.5, 60.0),
            process(MachineType::OverLock, "Shoulder join", 0.3, 60.0),
            process(MachineType::FlatLock, "Armhole cover", 0.4, 60.0),
        ]);
        input.educational_status = EducationalStatus::BelowFive;
        input.attitude = Attitude::Bad;

        let result = compute_assessment(&input, &ScoringPolicy::default()).expect("should score");
        assert_eq!(result.scores.machine_score, 100.0);
        assert!(close(result.scores.final_machine_score, 30.0));
        assert_eq!(result.final_assessment.level, Level::Multiskill);
    }

    #[test]
    fn five_defects_force_unskilled() {
        let mut only = process(MachineType::SnlsDnls, "Pocket-join-(Kangaro)", 0.67, 40.0);
        only.quality_status = QualityStatus::FiveDefects;
        let result = compute_assessment(&record(vec![only]), &ScoringPolicy::default())
            .expect("should score");
        assert_eq!(result.scores.average_quality_score, 0.0);
        assert_eq!(result.final_assessment.grade, Grade::Unskill);
        assert_eq!(result.final_assessment.level, Level::Unskill);
        assert_eq!(
            result.final_assessment.designation,
            Designation::AsstOperator
        );
    }

    #[test]
    fn fast_neck_join_promotes_weak_operator() {
        let mut neck = process(MachineType::SnlsDnls, "Neck join", 0.35, 22.5);
        neck.dop = Dop::Basic;
        let mut input = record(vec![neck]);
        input.educational_status = EducationalStatus::BelowFive;
        input.attitude = Attitude::Bad;

        let result = compute_assessment(&input, &ScoringPolicy::default()).expect("should score");
        assert!(close(result.processes[0].capacity, 160.0));
        assert!(close(result.scores.total_score, 40.0));
        assert!(result.final_assessment.grade >= Grade::APlus);
        assert_eq!(result.final_assessment.level, Level::VeryGood);
        assert_eq!(result.adjustments.len(), 1);
    }

    #[test]
    fn performance_only_rule_changes_practical_marks() {
        let input = record(vec![process(
            MachineType::SnlsDnls,
            "Pocket-join-(Kangaro)",
            0.67,
            40.0,
        )]);
        let policy = ScoringPolicy {
            practical_rule: PracticalRule::PerformanceOnly,
            ..ScoringPolicy::default()
        };
        let result = compute_assessment(&input, &policy).expect("should score");
        assert_eq!(result.processes[0].practical_marks, 100.0);
        assert!(close(result.scores.total_score, 82.0));
    }

    #[test]
    fn unrecognized_values_are_findings_not_errors() {
        let mut odd = process(MachineType::from("Zigzag"), "Side seam", 0.5, 30.0);
        odd.dop = Dop::from("Extreme");
        let mut input = record(vec![odd]);
        input.attitude = Attitude::from("Excellent");

        let findings = validate(&input).expect("should validate");
        let ids = findings.iter().map(|f| f.id.as_str()).collect::<Vec<_>>();
        assert!(ids.contains(&"process.machine_type"));
        assert!(ids.contains(&"process.dop"));
        assert!(ids.contains(&"operator.attitude"));

        let result = compute_assessment(&input, &ScoringPolicy::default()).expect("should score");
        assert_eq!(result.scores.machine_score, 0.0);
        assert_eq!(result.scores.dop_score, 0.0);
        assert_eq!(result.scores.attitude_score, 0.0);
    }

    #[test]
    fn checked_supplementary_machines_are_reported() {
        let mut input = record(vec![process(MachineType::SnlsDnls, "Side seam", 0.5, 30.0)]);
        input.supplementary_machines[1].checked = true;
        let result = compute_assessment(&input, &ScoringPolicy::default()).expect("should score");
        assert_eq!(result.supplementary_machines, vec![MachineType::Foa]);
    }

    #[test]
    fn invalid_process_anywhere_rejects_record() {
        let input = record(vec![
            process(MachineType::SnlsDnls, "Side seam", 0.5, 30.0),
            process(MachineType::OverLock, "Neck join", 0.0, 30.0),
        ]);
        let err = validate(&input).expect_err("invalid");
        assert!(err.to_string().contains("Neck join"));
    }
}
