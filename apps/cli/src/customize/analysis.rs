//! Job analysis: extracts requirements and focus from a raw job description.
//!
//! The model's JSON is read leniently: a missing or mistyped key becomes an
//! empty value instead of an error. The raw JSON is kept for persistence.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::customize::prompts::{ANALYSIS_PROMPT_TEMPLATE, ANALYSIS_ROLE};
use crate::errors::AppError;
use crate::llm_client::prompts::json_system;
use crate::llm_client::JsonModel;

/// Structured view of a job description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobAnalysis {
    pub required_skills: Vec<String>,
    pub preferred_skills: Vec<String>,
    pub key_responsibilities: Vec<String>,
    pub company_values: Vec<String>,
    pub experience_level: String,
    pub industry_keywords: Vec<String>,
    pub role_focus: String,
}

impl JobAnalysis {
    pub fn from_value(value: &Value) -> Self {
        Self {
            required_skills: string_list(value, "required_skills"),
            preferred_skills: string_list(value, "preferred_skills"),
            key_responsibilities: string_list(value, "key_responsibilities"),
            company_values: string_list(value, "company_values"),
            experience_level: string(value, "experience_level"),
            industry_keywords: string_list(value, "industry_keywords"),
            role_focus: string(value, "role_focus"),
        }
    }
}

/// Strings of an array field; non-string elements and blanks are skipped.
pub(crate) fn string_list(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// A string field, trimmed; anything else is empty.
pub(crate) fn string(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Runs the analysis step. Returns the lenient view and the raw JSON.
pub async fn analyze_job(model: &dyn JsonModel, jd_text: &str) -> Result<(JobAnalysis, Value), AppError> {
    let prompt = ANALYSIS_PROMPT_TEMPLATE.replace("{jd_text}", jd_text);
    let raw = model
        .complete_json(&prompt, &json_system(ANALYSIS_ROLE))
        .await
        .map_err(|e| AppError::Llm(format!("Job analysis failed: {e}")))?;

    let analysis = JobAnalysis::from_value(&raw);
    info!(
        required = analysis.required_skills.len(),
        preferred = analysis.preferred_skills.len(),
        level = %analysis.experience_level,
        focus = %analysis.role_focus,
        "Analyzed job description"
    );
    Ok((analysis, raw))
}
