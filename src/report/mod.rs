pub mod json;
pub mod md;

use crate::error::AssessError;
use crate::types::scoring::AssessmentResult;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render(result: &AssessmentResult, format: OutputFormat) -> Result<String, AssessError> {
    match format {
        OutputFormat::Json => json::to_json(result).map_err(AssessError::Json),
        OutputFormat::Md => Ok(md::to_markdown(result)),
    }
}
