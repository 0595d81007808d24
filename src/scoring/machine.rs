use crate::types::record::{MachineType, ProcessMeasurement};
use crate::types::scoring::Score;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineClass {
    Special,
    SemiSpecial,
    Other,
}

/// Unrecognized machine types have no class and earn nothing.
pub fn classify(machine: &MachineType) -> Option<MachineClass> {
    match machine {
        MachineType::SnlsDnls | MachineType::OverLock | MachineType::FlatLock => {
            Some(MachineClass::Special)
        }
        MachineType::FSleamer | MachineType::Kansai | MachineType::Foa => {
            Some(MachineClass::SemiSpecial)
        }
        MachineType::Eyelet | MachineType::Bh | MachineType::Bs | MachineType::Btk => {
            Some(MachineClass::Other)
        }
        MachineType::Unrecognized(_) => None,
    }
}

fn distinct_machines(processes: &[ProcessMeasurement]) -> BTreeSet<&MachineType> {
    processes
        .iter()
        .map(|process| &process.machine_type)
        .collect()
}

fn count_class(machines: &BTreeSet<&MachineType>, class: MachineClass) -> usize {
    machines
        .iter()
        .filter(|machine| classify(machine) == Some(class))
        .count()
}

/// True when the operator worked all three special machines.
pub fn is_multiskill(processes: &[ProcessMeasurement]) -> bool {
    count_class(&distinct_machines(processes), MachineClass::Special) == 3
}

/// Raw 0-100 machine qualification score.
pub fn machine_score(processes: &[ProcessMeasurement]) -> Score {
    let machines = distinct_machines(processes);
    let special = count_class(&machines, MachineClass::Special);
    if special == 3 {
        return 100.0;
    }

    let mut score: Score = match special {
        1 => 40.0,
        2 => 70.0,
        _ => 0.0,
    };
    if score < 100.0 {
        score += count_class(&machines, MachineClass::SemiSpecial) as Score * 20.0;
    }
    if score < 100.0 {
        score += count_class(&machines, MachineClass::Other) as Score * 10.0;
    }
    score.min(100.0)
}
