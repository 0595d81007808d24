use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares a closed vocabulary stored as its display label.
///
/// Labels are matched case-insensitively after trimming. Anything else is kept
/// verbatim in `Unrecognized` so partially filled records still load and score.
macro_rules! vocabulary {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Unrecognized(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $label,)+
                    Self::Unrecognized(raw) => raw.as_str(),
                }
            }

            pub fn is_recognized(&self) -> bool {
                !matches!(self, Self::Unrecognized(_))
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                let trimmed = raw.trim();
                $(
                    if trimmed.eq_ignore_ascii_case($label) {
                        return Self::$variant;
                    }
                )+
                Self::Unrecognized(raw)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self::from(raw.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

vocabulary!(
    /// Machine category a process is sewn on.
    MachineType {
        SnlsDnls => "SNLS/DNLS",
        FlatLock => "Flat Lock",
        OverLock => "Over Lock",
        Eyelet => "Eyelet",
        Foa => "FOA",
        Kansai => "Kansai",
        Bh => "BH",
        Bs => "BS",
        Btk => "BTK",
        FSleamer => "F/Sleamer",
    }
);

vocabulary!(
    /// Degree of process: criticality tier copied from the catalog.
    Dop {
        Basic => "Basic",
        SemiCritical => "Semi Critical",
        Critical => "Critical",
    }
);

vocabulary!(
    QualityStatus {
        NoDefect => "No Defect",
        OneDefect => "1 Operation Defect",
        TwoDefects => "2 Operation Defect",
        ThreeDefects => "3 Operation Defect",
        FourDefects => "4 Operation Defect",
        FiveDefects => "5 Operation Defect",
    }
);

vocabulary!(
    EducationalStatus {
        EightAbove => "Eight Above",
        FiveAbove => "Five Above",
        BelowFive => "Below Five",
    }
);

vocabulary!(
    /// Stored attitude rating. Forms may label these differently; only these
    /// stored values are meaningful.
    Attitude {
        Good => "Good",
        Normal => "Normal",
        Bad => "Bad",
    }
);

pub const CYCLE_TIME_SLOTS: usize = 5;

/// One process the operator performed during the assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessMeasurement {
    pub machine_type: MachineType,
    pub process_name: String,
    pub dop: Dop,
    pub smv: f64,
    /// Seconds per repetition; zero means the slot was not measured.
    pub cycle_times: [f64; CYCLE_TIME_SLOTS],
    pub quality_status: QualityStatus,
    #[serde(default)]
    pub remarks: String,
}

impl ProcessMeasurement {
    pub fn blank() -> Self {
        Self {
            machine_type: MachineType::SnlsDnls,
            process_name: String::new(),
            dop: Dop::Basic,
            smv: 0.0,
            cycle_times: [0.0; CYCLE_TIME_SLOTS],
            quality_status: QualityStatus::NoDefect,
            remarks: String::new(),
        }
    }

    pub fn key(&self) -> ProcessKey {
        ProcessKey::new(&self.process_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplementaryMachine {
    pub name: MachineType,
    #[serde(default)]
    pub checked: bool,
}

impl SupplementaryMachine {
    /// The secondary machines an operator may additionally claim, all unchecked.
    pub fn checklist() -> Vec<SupplementaryMachine> {
        [
            MachineType::Eyelet,
            MachineType::Foa,
            MachineType::Kansai,
            MachineType::Bh,
            MachineType::Bs,
            MachineType::Btk,
            MachineType::FSleamer,
        ]
        .into_iter()
        .map(|name| SupplementaryMachine {
            name,
            checked: false,
        })
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRecord {
    pub operator_name: String,
    #[serde(default)]
    pub father_husband_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_certificate: Option<String>,
    pub date: NaiveDate,
    pub educational_status: EducationalStatus,
    pub attitude: Attitude,
    #[serde(default)]
    pub sewing_floor: String,
    pub processes: Vec<ProcessMeasurement>,
    #[serde(default)]
    pub supplementary_machines: Vec<SupplementaryMachine>,
}

/// Process name reduced to lowercase alphanumerics, so that "Neck join",
/// "Neck-join" and "neck_join" address the same process.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessKey(String);

impl ProcessKey {
    pub fn new(name: &str) -> Self {
        Self(
            name.chars()
                .filter(char::is_ascii_alphanumeric)
                .map(|c| c.to_ascii_lowercase())
                .collect(),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProcessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
