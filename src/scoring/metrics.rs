use crate::error::{AssessError, Result};
use crate::types::record::ProcessMeasurement;

const SECONDS_PER_HOUR: f64 = 3600.0;
const MINUTES_PER_HOUR: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessMetrics {
    pub avg_cycle_time: f64,
    pub target: f64,
    pub capacity: f64,
    pub performance: f64,
}

/// Rejects measurements that would make capacity or target undefined.
pub fn check(process: &ProcessMeasurement) -> Result<()> {
    let name = display_name(process);
    if !process.smv.is_finite() || process.smv <= 0.0 {
        return Err(AssessError::invalid_measurement(
            name,
            format!("smv must be a positive number (found {})", process.smv),
        ));
    }
    if process.cycle_times.iter().any(|time| !time.is_finite()) {
        return Err(AssessError::invalid_measurement(
            name,
            "cycle times must be finite numbers",
        ));
    }
    if !process.cycle_times.iter().any(|time| *time > 0.0) {
        return Err(AssessError::invalid_measurement(
            name,
            "no cycle time was measured",
        ));
    }
    Ok(())
}

pub fn derive(process: &ProcessMeasurement) -> Result<ProcessMetrics> {
    check(process)?;

    let valid = process
        .cycle_times
        .iter()
        .copied()
        .filter(|time| *time > 0.0)
        .collect::<Vec<_>>();
    let avg_cycle_time = valid.iter().sum::<f64>() / valid.len() as f64;
    let target = MINUTES_PER_HOUR / process.smv;
    let capacity = SECONDS_PER_HOUR / avg_cycle_time;
    let performance = capacity / target * 100.0;

    tracing::debug!(
        process = %process.process_name,
        avg_cycle_time,
        target,
        capacity,
        performance,
        "derived process metrics"
    );

    Ok(ProcessMetrics {
        avg_cycle_time,
        target,
        capacity,
        performance,
    })
}

fn display_name(process: &ProcessMeasurement) -> &str {
    if process.process_name.trim().is_empty() {
        "<unnamed>"
    } else {
        &process.process_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn process(smv: f64, cycle_times: [f64; 5]) -> ProcessMeasurement {
        ProcessMeasurement {
            process_name: "Side seam".to_string(),
            smv,
            cycle_times,
            ..ProcessMeasurement::blank()
        }
    }

    #[test]
    fn average_excludes_unmeasured_slots() {
        let metrics = derive(&process(0.5, [30.0, 0.0, 40.0, -1.0, 50.0])).expect("valid");
        assert!((metrics.avg_cycle_time - 40.0).abs() < 1e-9);
        assert!((metrics.capacity - 90.0).abs() < 1e-9);
    }

    #[test]
    fn performance_is_capacity_over_target() {
        let metrics = derive(&process(0.67, [40.0; 5])).expect("valid");
        assert!((metrics.target - 60.0 / 0.67).abs() < 1e-9);
        assert!((metrics.capacity - 90.0).abs() < 1e-9);
        assert!((metrics.performance - metrics.capacity / metrics.target * 100.0).abs() < 1e-9);
    }

    #[test]
    fn all_zero_cycle_times_are_rejected() {
        let err = derive(&process(0.5, [0.0; 5])).expect_err("should reject");
        assert!(matches!(err, AssessError::InvalidMeasurement { .. }));
        assert!(err.to_string().contains("no cycle time"));
    }

    #[test]
    fn non_positive_smv_is_rejected() {
        assert!(derive(&process(0.0, [40.0; 5])).is_err());
        assert!(derive(&process(-0.2, [40.0; 5])).is_err());
        assert!(derive(&process(f64::NAN, [40.0; 5])).is_err());
    }

    #[test]
    fn non_finite_cycle_time_is_rejected() {
        assert!(derive(&process(0.5, [40.0, f64::INFINITY, 0.0, 0.0, 0.0])).is_err());
    }
}
