use crate::types::scoring::AssessmentResult;

pub fn to_markdown(result: &AssessmentResult) -> String {
    let mut output = String::new();
    output.push_str("# Operator Assessment\n\n");
    output.push_str(&format!("Operator: {}\n", result.operator_name));
    if let Some(candidate_id) = &result.candidate_id {
        output.push_str(&format!("Candidate: {candidate_id}\n"));
    }
    output.push('\n');

    output.push_str("## Processes\n\n");
    output.push_str(
        "| Machine | Process | DOP | SMV | Avg cycle (s) | Target/h | Capacity/h | Performance % | Marks |\n",
    );
    output.push_str("|---|---|---|---|---|---|---|---|---|\n");
    for process in &result.processes {
        let measurement = &process.measurement;
        output.push_str(&format!(
            "| {} | {} | {} | {:.2} | {:.2} | {:.1} | {:.1} | {:.1} | {:.0} |\n",
            measurement.machine_type,
            measurement.process_name,
            measurement.dop,
            measurement.smv,
            process.avg_cycle_time,
            process.target,
            process.capacity,
            process.performance,
            process.practical_marks
        ));
    }
    output.push('\n');

    let scores = &result.scores;
    output.push_str("## Scores\n\n");
    output.push_str(&format!(
        "- machine: {:.2} (raw {:.0})\n- dop: {:.2}\n- practical: {:.2}\n- quality: {:.2}\n- education: {:.2}\n- attitude: {:.2}\n- total: {:.2}\n\n",
        scores.final_machine_score,
        scores.machine_score,
        scores.dop_score,
        scores.practical_score,
        scores.average_quality_score,
        scores.education_score,
        scores.attitude_score,
        scores.total_score
    ));

    let decision = &result.final_assessment;
    output.push_str("## Final Assessment\n\n");
    output.push_str(&format!(
        "- grade: {}\n- level: {}\n- designation: {}\n\n",
        decision.grade, decision.level, decision.designation
    ));

    output.push_str("## Supplementary Machines\n\n");
    if result.supplementary_machines.is_empty() {
        output.push_str("- none\n\n");
    } else {
        for machine in &result.supplementary_machines {
            output.push_str(&format!("- {machine}\n"));
        }
        output.push('\n');
    }

    output.push_str("## Adjustments\n\n");
    if result.adjustments.is_empty() {
        output.push_str("- none\n");
    } else {
        for adjustment in &result.adjustments {
            output.push_str(&format!("- {adjustment}\n"));
        }
    }

    output
}
