use super::metrics::ProcessMetrics;
use crate::types::config::PracticalRule;
use crate::types::record::{MachineType, ProcessKey, ProcessMeasurement};
use crate::types::scoring::Score;
use std::collections::BTreeSet;

/// SNLS/DNLS benchmark processes with the capacity each must reach to count.
const SNLS_BENCHMARKS: [(&str, f64); 4] = [
    ("Pocket-join-(Kangaro)", 90.0),
    ("Placket-box", 90.0),
    ("Zipper-join(2nd)", 60.0),
    ("Back-neck-tape-top-stitch-insert-label", 120.0),
];

const NECK_JOIN: &str = "neckjoin";
const BOTTOM_HEM: &str = "bottomhem";

/// Walks a descending ladder: the first rung is a strict `>`, the rest `>=`.
fn ladder(value: f64, above: f64, top: Score, steps: &[(f64, Score)]) -> Score {
    if value > above {
        return top;
    }
    steps
        .iter()
        .find(|(min, _)| value >= *min)
        .map(|(_, marks)| *marks)
        .unwrap_or(0.0)
}

/// Number of distinct SNLS/DNLS benchmark processes performed at or above
/// their minimum capacity.
pub fn snls_benchmarks_met(processes: &[ProcessMeasurement], metrics: &[ProcessMetrics]) -> usize {
    let benchmarks = SNLS_BENCHMARKS
        .iter()
        .map(|(name, min)| (ProcessKey::new(name), *min))
        .collect::<Vec<_>>();

    processes
        .iter()
        .zip(metrics)
        .filter(|(process, _)| process.machine_type == MachineType::SnlsDnls)
        .filter_map(|(process, metric)| {
            let key = process.key();
            benchmarks
                .iter()
                .find(|(benchmark, min)| *benchmark == key && metric.capacity >= *min)
                .map(|(benchmark, _)| benchmark.clone())
        })
        .collect::<BTreeSet<_>>()
        .len()
}

fn snls_marks(met: usize) -> Score {
    match met {
        0 => 30.0,
        1 => 50.0,
        2 => 60.0,
        3 => 80.0,
        _ => 100.0,
    }
}

fn machine_aware_marks(process: &ProcessMeasurement, metric: &ProcessMetrics, snls_met: usize) -> Score {
    let capacity = metric.capacity;
    let key = process.key();
    match process.machine_type {
        MachineType::SnlsDnls => snls_marks(snls_met),
        MachineType::OverLock if key.as_str() == NECK_JOIN => {
            ladder(capacity, 150.0, 100.0, &[(120.0, 80.0), (100.0, 60.0), (80.0, 50.0)])
        }
        MachineType::OverLock => ladder(capacity, 80.0, 90.0, &[(70.0, 60.0), (60.0, 50.0)]),
        MachineType::FlatLock if key.as_str() == BOTTOM_HEM => {
            ladder(capacity, 220.0, 100.0, &[(200.0, 80.0), (180.0, 60.0), (160.0, 50.0)])
        }
        MachineType::FlatLock => ladder(capacity, 120.0, 80.0, &[(100.0, 60.0), (90.0, 50.0)]),
        _ => ladder(
            metric.performance,
            90.0,
            85.0,
            &[(80.0, 80.0), (70.0, 70.0), (60.0, 60.0), (50.0, 50.0)],
        ),
    }
}

fn performance_only_marks(metric: &ProcessMetrics) -> Score {
    ladder(
        metric.performance,
        90.0,
        100.0,
        &[(80.0, 80.0), (70.0, 70.0), (60.0, 60.0), (50.0, 50.0)],
    )
}

/// Practical marks for each process, in input order.
pub fn practical_marks(
    rule: PracticalRule,
    processes: &[ProcessMeasurement],
    metrics: &[ProcessMetrics],
) -> Vec<Score> {
    match rule {
        PracticalRule::MachineAware => {
            let snls_met = snls_benchmarks_met(processes, metrics);
            tracing::debug!(snls_met, "SNLS/DNLS benchmark processes met");
            processes
                .iter()
                .zip(metrics)
                .map(|(process, metric)| machine_aware_marks(process, metric, snls_met))
                .collect()
        }
        PracticalRule::PerformanceOnly => metrics.iter().map(performance_only_marks).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn process(machine_type: MachineType, name: &str) -> ProcessMeasurement {
        ProcessMeasurement {
            machine_type,
            process_name: name.to_string(),
            smv: 0.5,
            cycle_times: [30.0; 5],
            ..ProcessMeasurement::blank()
        }
    }

    fn metric(capacity: f64, performance: f64) -> ProcessMetrics {
        ProcessMetrics {
            avg_cycle_time: 3600.0 / capacity,
            target: capacity * 100.0 / performance,
            capacity,
            performance,
        }
    }

    fn marks_for(process: ProcessMeasurement, metric: ProcessMetrics) -> Score {
        practical_marks(PracticalRule::MachineAware, &[process], &[metric])[0]
    }

    #[test]
    fn ladder_top_rung_is_strict() {
        let steps = [(120.0, 80.0), (100.0, 60.0), (80.0, 50.0)];
        assert_eq!(ladder(150.1, 150.0, 100.0, &steps), 100.0);
        assert_eq!(ladder(150.0, 150.0, 100.0, &steps), 80.0);
        assert_eq!(ladder(100.0, 150.0, 100.0, &steps), 60.0);
        assert_eq!(ladder(79.9, 150.0, 100.0, &steps), 0.0);
    }

    #[test]
    fn snls_marks_follow_benchmark_count() {
        let processes = vec![
            process(MachineType::SnlsDnls, "Pocket-join-(Kangaro)"),
            process(MachineType::SnlsDnls, "Placket-box"),
            process(MachineType::SnlsDnls, "Zipper-join(2nd)"),
            process(MachineType::SnlsDnls, "Back-neck-tape-top-stitch-insert-label"),
        ];
        let all_fast = vec![metric(130.0, 100.0); 4];
        let marks = practical_marks(PracticalRule::MachineAware, &processes, &all_fast);
        assert_eq!(marks, vec![100.0; 4]);

        // Back neck tape needs 120 and zipper join needs 60.
        let mixed = vec![
            metric(95.0, 100.0),
            metric(85.0, 100.0),
            metric(60.0, 100.0),
            metric(119.0, 100.0),
        ];
        let marks = practical_marks(PracticalRule::MachineAware, &processes, &mixed);
        assert_eq!(marks, vec![60.0; 4]);
    }

    #[test]
    fn snls_without_benchmarks_scores_thirty() {
        let marks = marks_for(process(MachineType::SnlsDnls, "Side seam"), metric(200.0, 150.0));
        assert_eq!(marks, 30.0);
    }

    #[test]
    fn snls_benchmark_counted_once_when_repeated() {
        let processes = vec![
            process(MachineType::SnlsDnls, "Placket-box"),
            process(MachineType::SnlsDnls, "Placket box"),
        ];
        let metrics = vec![metric(100.0, 100.0); 2];
        assert_eq!(snls_benchmarks_met(&processes, &metrics), 1);
    }

    #[test]
    fn benchmark_on_other_machine_does_not_count() {
        let processes = vec![process(MachineType::OverLock, "Placket-box")];
        assert_eq!(snls_benchmarks_met(&processes, &[metric(100.0, 100.0)]), 0);
    }

    #[test]
    fn over_lock_neck_join_uses_its_own_ladder() {
        let neck = || process(MachineType::OverLock, "Neck join");
        assert_eq!(marks_for(neck(), metric(151.0, 10.0)), 100.0);
        assert_eq!(marks_for(neck(), metric(120.0, 10.0)), 80.0);
        assert_eq!(marks_for(neck(), metric(100.0, 10.0)), 60.0);
        assert_eq!(marks_for(neck(), metric(80.0, 10.0)), 50.0);
        assert_eq!(marks_for(neck(), metric(79.0, 10.0)), 0.0);
    }

    #[test]
    fn over_lock_other_process() {
        let side = || process(MachineType::OverLock, "Side seam");
        assert_eq!(marks_for(side(), metric(81.0, 10.0)), 90.0);
        assert_eq!(marks_for(side(), metric(70.0, 10.0)), 60.0);
        assert_eq!(marks_for(side(), metric(60.0, 10.0)), 50.0);
        assert_eq!(marks_for(side(), metric(59.0, 10.0)), 0.0);
    }

    #[test]
    fn flat_lock_bottom_hem_and_other() {
        let hem = || process(MachineType::FlatLock, "Bottom-hem");
        assert_eq!(marks_for(hem(), metric(221.0, 10.0)), 100.0);
        assert_eq!(marks_for(hem(), metric(200.0, 10.0)), 80.0);
        assert_eq!(marks_for(hem(), metric(180.0, 10.0)), 60.0);
        assert_eq!(marks_for(hem(), metric(160.0, 10.0)), 50.0);
        assert_eq!(marks_for(hem(), metric(159.0, 10.0)), 0.0);

        let cover = || process(MachineType::FlatLock, "Armhole cover");
        assert_eq!(marks_for(cover(), metric(121.0, 10.0)), 80.0);
        assert_eq!(marks_for(cover(), metric(100.0, 10.0)), 60.0);
        assert_eq!(marks_for(cover(), metric(90.0, 10.0)), 50.0);
        assert_eq!(marks_for(cover(), metric(89.0, 10.0)), 0.0);
    }

    #[test]
    fn other_machines_use_performance_bands() {
        let eyelet = || process(MachineType::Eyelet, "Eyelet hole");
        assert_eq!(marks_for(eyelet(), metric(10.0, 95.0)), 85.0);
        assert_eq!(marks_for(eyelet(), metric(10.0, 80.0)), 80.0);
        assert_eq!(marks_for(eyelet(), metric(10.0, 50.0)), 50.0);
        assert_eq!(marks_for(eyelet(), metric(10.0, 49.0)), 0.0);
    }

    #[test]
    fn performance_only_rule_ignores_machine_type() {
        let processes = vec![
            process(MachineType::SnlsDnls, "Pocket-join-(Kangaro)"),
            process(MachineType::OverLock, "Neck join"),
        ];
        let metrics = vec![metric(95.0, 91.0), metric(200.0, 75.0)];
        let marks = practical_marks(PracticalRule::PerformanceOnly, &processes, &metrics);
        assert_eq!(marks, vec![100.0, 70.0]);
    }
}
