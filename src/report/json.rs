use crate::types::scoring::AssessmentResult;

pub fn to_json(result: &AssessmentResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}
