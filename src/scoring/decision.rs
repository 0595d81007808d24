use crate::types::scoring::{Designation, FinalAssessment, Grade, Level, ProcessResult, Score};

/// Weighted quality scores below this force an unskilled result.
pub const QUALITY_FLOOR: Score = 5.0;

const PROMOTION_SMV: f64 = 0.35;
const SMV_TOLERANCE: f64 = 1e-6;

const A_PLUS: FinalAssessment =
    FinalAssessment::new(Grade::APlus, Level::VeryGood, Designation::JrOperator);
const A: FinalAssessment = FinalAssessment::new(Grade::A, Level::Good, Designation::JrOperator);
const B_PLUS: FinalAssessment =
    FinalAssessment::new(Grade::BPlus, Level::Medium, Designation::JrOperator);

/// A benchmark process whose measured capacity can lift the grade.
struct CapacityPromotion {
    key: &'static str,
    label: &'static str,
    tiers: [(f64, FinalAssessment); 3],
}

static PROMOTIONS: [CapacityPromotion; 2] = [
    CapacityPromotion {
        key: "neckjoin",
        label: "Neck join",
        tiers: [(150.0, A_PLUS), (120.0, A), (100.0, B_PLUS)],
    },
    CapacityPromotion {
        key: "bottomhem",
        label: "Bottom Hem",
        tiers: [(220.0, A_PLUS), (200.0, A), (180.0, B_PLUS)],
    },
];

pub fn grade_for(total_score: Score) -> FinalAssessment {
    if total_score >= 90.0 {
        FinalAssessment::new(Grade::APlusPlus, Level::Multiskill, Designation::JrOperator)
    } else if total_score >= 80.0 {
        A_PLUS
    } else if total_score >= 70.0 {
        A
    } else if total_score >= 60.0 {
        B_PLUS
    } else if total_score >= 50.0 {
        FinalAssessment::new(Grade::B, Level::Average, Designation::GenOperator)
    } else {
        FinalAssessment::unskilled()
    }
}

pub struct DecisionInput<'a> {
    pub total_score: Score,
    pub quality_score: Score,
    pub processes: &'a [ProcessResult],
    pub multiskill: bool,
    pub apply_overrides: bool,
}

/// Final grade, level and designation plus a note per override that fired.
pub fn decide(input: &DecisionInput<'_>) -> (FinalAssessment, Vec<String>) {
    let mut adjustments = Vec::new();

    if input.quality_score < QUALITY_FLOOR {
        adjustments.push(format!(
            "average quality score {:.2} below {:.0}: forced unskilled",
            input.quality_score, QUALITY_FLOOR
        ));
        return (FinalAssessment::unskilled(), adjustments);
    }

    let mut decision = grade_for(input.total_score);
    if !input.apply_overrides {
        return (decision, adjustments);
    }

    if input.multiskill {
        if decision.level != Level::Multiskill {
            adjustments.push(format!(
                "all special machines worked: level {} -> Multiskill",
                decision.level
            ));
        }
        decision.level = Level::Multiskill;
        if matches!(decision.grade, Grade::APlusPlus | Grade::APlus) {
            decision.designation = Designation::JrOperator;
        }
    }

    // Promotions replace the whole triple, level included.
    for process in input.processes {
        let key = process.measurement.key();
        let Some(promotion) = PROMOTIONS.iter().find(|rule| rule.key == key.as_str()) else {
            continue;
        };
        if (process.measurement.smv - PROMOTION_SMV).abs() > SMV_TOLERANCE {
            continue;
        }
        let Some((min, target)) = promotion
            .tiers
            .iter()
            .find(|(min, _)| process.capacity >= *min)
        else {
            continue;
        };
        if decision.grade < target.grade {
            tracing::debug!(
                process = promotion.label,
                capacity = process.capacity,
                from = %decision.grade,
                to = %target.grade,
                "capacity promotion"
            );
            adjustments.push(format!(
                "{} capacity {:.1} >= {:.0}: promoted {} -> {}",
                promotion.label, process.capacity, min, decision.grade, target.grade
            ));
            decision = *target;
        }
    }

    (decision, adjustments)
}
