use crate::types::record::{MachineType, ProcessMeasurement};
use serde::{Deserialize, Serialize};
use std::fmt;

pub type Score = f64;

/// A measured process with its derived rates and practical marks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResult {
    #[serde(flatten)]
    pub measurement: ProcessMeasurement,
    pub avg_cycle_time: f64,
    /// Pieces per hour needed to meet the SMV.
    pub target: f64,
    /// Pieces per hour observed from the average cycle time.
    pub capacity: f64,
    /// Capacity as a percentage of target.
    pub performance: f64,
    pub practical_marks: Score,
}

/// Weighted sub-scores. `machine_score` is the raw 0-100 qualification score;
/// every other field already carries its weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreCard {
    pub machine_score: Score,
    pub final_machine_score: Score,
    pub dop_score: Score,
    pub practical_score: Score,
    pub average_quality_score: Score,
    pub education_score: Score,
    pub attitude_score: Score,
    pub total_score: Score,
}

impl ScoreCard {
    pub fn finalize(mut self) -> Self {
        self.total_score = self.final_machine_score
            + self.dop_score
            + self.practical_score
            + self.average_quality_score
            + self.education_score
            + self.attitude_score;
        self
    }
}

/// Grade tiers in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    Unskill,
    B,
    #[serde(rename = "B+")]
    BPlus,
    A,
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A++")]
    APlusPlus,
}

impl Grade {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unskill => "Unskill",
            Self::B => "B",
            Self::BPlus => "B+",
            Self::A => "A",
            Self::APlus => "A+",
            Self::APlusPlus => "A++",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    Unskill,
    Average,
    Medium,
    Good,
    #[serde(rename = "Very Good")]
    VeryGood,
    Multiskill,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unskill => "Unskill",
            Self::Average => "Average",
            Self::Medium => "Medium",
            Self::Good => "Good",
            Self::VeryGood => "Very Good",
            Self::Multiskill => "Multiskill",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Designation {
    #[serde(rename = "Asst.Operator")]
    AsstOperator,
    #[serde(rename = "Gen.Operator")]
    GenOperator,
    #[serde(rename = "Jr.Operator")]
    JrOperator,
}

impl Designation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AsstOperator => "Asst.Operator",
            Self::GenOperator => "Gen.Operator",
            Self::JrOperator => "Jr.Operator",
        }
    }
}

macro_rules! display_as_str {
    ($($name:ident),+) => {
        $(
            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )+
    };
}

display_as_str!(Grade, Level, Designation);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalAssessment {
    pub grade: Grade,
    pub level: Level,
    pub designation: Designation,
}

impl FinalAssessment {
    pub const fn new(grade: Grade, level: Level, designation: Designation) -> Self {
        Self {
            grade,
            level,
            designation,
        }
    }

    pub const fn unskilled() -> Self {
        Self::new(Grade::Unskill, Level::Unskill, Designation::AsstOperator)
    }
}

impl fmt::Display for FinalAssessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {} / {}", self.grade, self.level, self.designation)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    pub operator_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_id: Option<String>,
    pub processes: Vec<ProcessResult>,
    pub scores: ScoreCard,
    pub final_assessment: FinalAssessment,
    /// Checked secondary machines, reported but not scored.
    #[serde(default)]
    pub supplementary_machines: Vec<MachineType>,
    /// Human-readable trail of override rules that changed the decision.
    #[serde(default)]
    pub adjustments: Vec<String>,
}
