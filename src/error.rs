use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssessError {
    #[error("assessment has no process rows")]
    NoProcesses,

    #[error("invalid measurement for process '{process}': {reason}")]
    InvalidMeasurement { process: String, reason: String },

    #[error("process not found in catalog: {0}")]
    UnknownProcess(String),

    #[error("process is not offered for assessment: {0}")]
    ProcessNotAssessable(String),

    #[error("candidate not found: {0}")]
    CandidateNotFound(String),

    #[error("invalid candidate id: {0}")]
    InvalidCandidateId(String),

    #[error("process row {index} out of range (draft has {len} rows)")]
    RowOutOfRange { index: usize, len: usize },

    #[error("cycle time slot {slot} out of range (rows have {slots} slots)")]
    SlotOutOfRange { slot: usize, slots: usize },

    #[error("cannot remove the last process row")]
    LastProcessRow,

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AssessError {
    pub fn invalid_measurement(process: &str, reason: impl Into<String>) -> Self {
        Self::InvalidMeasurement {
            process: process.to_string(),
            reason: reason.into(),
        }
    }

    /// Errors raised by record validation rather than by the environment.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::NoProcesses | Self::InvalidMeasurement { .. })
    }
}

pub type Result<T> = std::result::Result<T, AssessError>;
