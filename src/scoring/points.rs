use crate::types::record::{Attitude, Dop, EducationalStatus, QualityStatus};
use crate::types::scoring::Score;

pub fn dop_points(dop: &Dop) -> Score {
    match dop {
        Dop::Basic => 30.0,
        Dop::SemiCritical => 50.0,
        Dop::Critical => 100.0,
        Dop::Unrecognized(_) => 0.0,
    }
}

pub fn quality_points(status: &QualityStatus) -> Score {
    match status {
        QualityStatus::NoDefect => 100.0,
        QualityStatus::OneDefect => 80.0,
        QualityStatus::TwoDefects => 60.0,
        QualityStatus::ThreeDefects => 40.0,
        QualityStatus::FourDefects => 20.0,
        QualityStatus::FiveDefects | QualityStatus::Unrecognized(_) => 0.0,
    }
}

pub fn education_points(status: &EducationalStatus) -> Score {
    match status {
        EducationalStatus::EightAbove => 100.0,
        EducationalStatus::FiveAbove => 50.0,
        EducationalStatus::BelowFive => 30.0,
        EducationalStatus::Unrecognized(_) => 0.0,
    }
}

pub fn attitude_points(attitude: &Attitude) -> Score {
    match attitude {
        Attitude::Good => 100.0,
        Attitude::Normal => 50.0,
        Attitude::Bad => 30.0,
        Attitude::Unrecognized(_) => 0.0,
    }
}
