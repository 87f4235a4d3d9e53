//! Customization variant: a rewritten, re-tagged copy of a data directory.
//!
//! Output lands in `<data_dir>/custom_<label>/` in the same section format as
//! the input, plus the raw model JSON and a manifest. Every rewritten entry
//! carries the label as a tag, so rendering with `--focus <label>` selects it.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::customize::analysis::{analyze_job, string, string_list, JobAnalysis};
use crate::customize::prompts::{
    SKILLS_PROMPT_TEMPLATE, SKILLS_ROLE, SUMMARY_PROMPT_TEMPLATE, SUMMARY_ROLE, WORK_PROMPT_TEMPLATE,
    WORK_ROLE,
};
use crate::errors::AppError;
use crate::llm_client::prompts::{json_system, TRUTHFULNESS_INSTRUCTION};
use crate::llm_client::JsonModel;
use crate::models::resume::{
    ExperienceEntry, SkillCategory, PROJECTS_SECTION, SKILLS_SECTION, WORK_SECTION,
};
use crate::records::loader::{
    load_documents, EDUCATION_FILE, META_FILE, PROJECTS_FILE, SKILLS_FILE, WORK_FILE,
};
use crate::records::value::{Document, Field, Item, Record, Value as RecordValue};
use crate::records::writer::write_document;
use crate::selection::TagSet;

pub const ANALYSIS_FILE: &str = "job_analysis.json";
pub const SKILL_SUGGESTIONS_FILE: &str = "skill_suggestions.json";
pub const MANIFEST_FILE: &str = "variant.json";

/// `variant.json` contents.
#[derive(Debug, Clone, Serialize)]
pub struct VariantManifest {
    pub label: String,
    pub source_dir: String,
    pub model: String,
    pub generated_at: DateTime<Utc>,
}

/// What a finished customization produced.
#[derive(Debug, Clone)]
pub struct VariantReport {
    pub dir: PathBuf,
    pub label: String,
    pub files: Vec<String>,
    pub analysis: JobAnalysis,
}

/// A label names a directory and a tag: ASCII alphanumerics, `-` and `_` only.
pub fn validate_label(label: &str) -> Result<(), AppError> {
    if label.is_empty() {
        return Err(AppError::Validation("Label must not be empty".to_string()));
    }
    if let Some(bad) = label
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(AppError::Validation(format!(
            "Label '{label}' contains '{bad}'; use letters, digits, '-' or '_'"
        )));
    }
    Ok(())
}

pub fn variant_dir(data_dir: &Path, label: &str) -> PathBuf {
    data_dir.join(format!("custom_{label}"))
}

/// Builds the variant for `label` from `data_dir` and a job description.
pub async fn create_variant(
    model: &dyn JsonModel,
    data_dir: &Path,
    jd_text: &str,
    label: &str,
) -> Result<VariantReport, AppError> {
    validate_label(label)?;
    if !data_dir.is_dir() {
        return Err(AppError::Validation(format!(
            "Data directory not found: {}",
            data_dir.display()
        )));
    }

    let mut docs = load_documents(data_dir);

    info!("Analyzing job description");
    let (analysis, raw_analysis) = analyze_job(model, jd_text).await?;

    let dir = variant_dir(data_dir, label);
    std::fs::create_dir_all(&dir)?;
    let mut files = Vec::new();
    write_json(&dir, ANALYSIS_FILE, &raw_analysis, &mut files)?;

    if !docs.work.is_empty() {
        info!("Customizing work experience");
        for record in docs.work.records_mut(WORK_SECTION) {
            customize_work_record(model, record, &analysis, label).await?;
        }
        write_section(&dir, WORK_FILE, &docs.work, &mut files)?;
    }

    if !docs.meta.is_empty() {
        info!("Generating custom summary");
        let current = docs.meta.text("summary").unwrap_or_default().to_string();
        match generate_summary(model, &current, &analysis).await? {
            Some(summary) => docs.meta.insert("summary", RecordValue::Text(summary)),
            None => warn!("Model returned no summary; keeping the original"),
        }
        write_section(&dir, META_FILE, &docs.meta, &mut files)?;
    }

    if !docs.projects.is_empty() {
        for record in docs.projects.records_mut(PROJECTS_SECTION) {
            let mut tags = TagSet::from_field(record.get("tags"));
            tags.insert(label);
            record.insert("tags", Field::List(tags.into_vec()));
        }
        write_section(&dir, PROJECTS_FILE, &docs.projects, &mut files)?;
    }

    if !docs.education.is_empty() {
        write_section(&dir, EDUCATION_FILE, &docs.education, &mut files)?;
    }

    if !docs.skills.is_empty() {
        info!("Generating skill suggestions");
        let source: Vec<SkillCategory> = docs
            .skills
            .records(SKILLS_SECTION)
            .into_iter()
            .map(SkillCategory::from_record)
            .collect();
        let suggestions = suggest_skills(model, &source, &analysis).await?;
        write_json(&dir, SKILL_SUGGESTIONS_FILE, &suggestions, &mut files)?;

        let regrouped = regroup_skills(&source, &suggestions);
        if regrouped.is_empty() {
            warn!("No recommended category kept an existing skill; keeping the original grouping");
            write_section(&dir, SKILLS_FILE, &docs.skills, &mut files)?;
        } else {
            write_section(&dir, SKILLS_FILE, &skills_document(&regrouped), &mut files)?;
        }
    }

    let manifest = VariantManifest {
        label: label.to_string(),
        source_dir: data_dir.display().to_string(),
        model: model.model_name().to_string(),
        generated_at: Utc::now(),
    };
    let manifest = serde_json::to_value(&manifest).map_err(|e| AppError::Internal(e.into()))?;
    write_json(&dir, MANIFEST_FILE, &manifest, &mut files)?;

    info!(dir = %dir.display(), files = files.len(), "Custom resume variant created");
    Ok(VariantReport {
        dir,
        label: label.to_string(),
        files,
        analysis,
    })
}

/// Rewrites one work record in place: new details when the model gave any,
/// tags = existing ∪ suggested ∪ {label}.
async fn customize_work_record(
    model: &dyn JsonModel,
    record: &mut Record,
    analysis: &JobAnalysis,
    label: &str,
) -> Result<(), AppError> {
    let entry = ExperienceEntry::from_record(record);
    let details = entry
        .details
        .iter()
        .map(|d| format!("- {d}"))
        .collect::<Vec<_>>()
        .join("\n");

    let prompt = WORK_PROMPT_TEMPLATE
        .replace("{truthfulness_instruction}", TRUTHFULNESS_INSTRUCTION)
        .replace("{role}", &entry.role)
        .replace("{company}", &entry.company)
        .replace("{period}", &entry.period)
        .replace("{details}", &details)
        .replace("{required_skills}", &analysis.required_skills.join(", "))
        .replace("{key_responsibilities}", &analysis.key_responsibilities.join(", "))
        .replace("{role_focus}", &analysis.role_focus);

    let response = model
        .complete_json(&prompt, &json_system(WORK_ROLE))
        .await
        .map_err(|e| AppError::Llm(format!("Work experience rewrite for '{}' failed: {e}", entry.role)))?;

    let rewritten = string_list(&response, "details");
    if !rewritten.is_empty() {
        record.insert("details", Field::List(rewritten));
    }

    let mut tags = entry.tags;
    for tag in string_list(&response, "suggested_tags") {
        tags.insert(tag);
    }
    tags.insert(label);
    record.insert("tags", Field::List(tags.into_vec()));
    Ok(())
}

async fn generate_summary(
    model: &dyn JsonModel,
    current: &str,
    analysis: &JobAnalysis,
) -> Result<Option<String>, AppError> {
    let required: Vec<&str> = analysis.required_skills.iter().take(5).map(String::as_str).collect();
    let prompt = SUMMARY_PROMPT_TEMPLATE
        .replace("{truthfulness_instruction}", TRUTHFULNESS_INSTRUCTION)
        .replace("{current_summary}", current)
        .replace("{required_skills}", &required.join(", "))
        .replace("{role_focus}", &analysis.role_focus)
        .replace("{experience_level}", &analysis.experience_level);

    let response = model
        .complete_json(&prompt, &json_system(SUMMARY_ROLE))
        .await
        .map_err(|e| AppError::Llm(format!("Summary generation failed: {e}")))?;

    let summary = string(&response, "summary");
    Ok((!summary.is_empty()).then_some(summary))
}

async fn suggest_skills(
    model: &dyn JsonModel,
    skills: &[SkillCategory],
    analysis: &JobAnalysis,
) -> Result<Value, AppError> {
    let skills_json = serde_json::to_string_pretty(skills).map_err(|e| AppError::Internal(e.into()))?;
    let prompt = SKILLS_PROMPT_TEMPLATE
        .replace("{skills_json}", &skills_json)
        .replace("{required_skills}", &analysis.required_skills.join(", "))
        .replace("{preferred_skills}", &analysis.preferred_skills.join(", "));

    model
        .complete_json(&prompt, &json_system(SKILLS_ROLE))
        .await
        .map_err(|e| AppError::Llm(format!("Skill suggestions failed: {e}")))
}

/// Categories from `recommended_categories`, restricted to skills already in
/// `source` (matched case-insensitively, source spelling kept, each skill once).
/// Source skills no recommendation placed are appended afterwards, so the
/// regrouped set always covers the source. Empty when nothing was placed.
pub fn regroup_skills(source: &[SkillCategory], suggestions: &Value) -> Vec<SkillCategory> {
    let known: Vec<&str> = source
        .iter()
        .flat_map(|c| c.skills.iter().map(String::as_str))
        .collect();
    let mut placed: Vec<&str> = Vec::new();

    let Some(categories) = suggestions.get("recommended_categories").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut out = Vec::new();
    for category in categories {
        let name = string(category, "name");
        if name.is_empty() {
            continue;
        }
        let mut skills = Vec::new();
        for item in string_list(category, "items") {
            let Some(existing) = known.iter().find(|k| k.eq_ignore_ascii_case(&item)) else {
                continue;
            };
            if !placed.contains(existing) {
                placed.push(*existing);
                skills.push(existing.to_string());
            }
        }
        if !skills.is_empty() {
            out.push(SkillCategory { name, skills });
        }
    }
    if out.is_empty() {
        return out;
    }

    // Skills the model left out stay under their source category name.
    for category in source {
        let mut leftover = Vec::new();
        for skill in category.skills.iter().map(String::as_str) {
            if !placed.contains(&skill) {
                placed.push(skill);
                leftover.push(skill.to_string());
            }
        }
        if leftover.is_empty() {
            continue;
        }
        match out.iter_mut().find(|c| c.name.eq_ignore_ascii_case(&category.name)) {
            Some(existing) => existing.skills.extend(leftover),
            None => out.push(SkillCategory {
                name: category.name.clone(),
                skills: leftover,
            }),
        }
    }
    out
}

fn skills_document(categories: &[SkillCategory]) -> Document {
    let items = categories
        .iter()
        .map(|c| {
            let mut record = Record::new();
            record.insert("category", Field::Text(c.name.clone()));
            record.insert("skills", Field::List(c.skills.clone()));
            Item::Record(record)
        })
        .collect();
    let mut doc = Document::new();
    doc.insert(SKILLS_SECTION, RecordValue::Block(items));
    doc
}

fn write_section(dir: &Path, file: &str, doc: &Document, files: &mut Vec<String>) -> Result<(), AppError> {
    std::fs::write(dir.join(file), write_document(doc))?;
    files.push(file.to_string());
    Ok(())
}

fn write_json(dir: &Path, file: &str, value: &Value, files: &mut Vec<String>) -> Result<(), AppError> {
    let text = serde_json::to_string_pretty(value).map_err(|e| AppError::Internal(e.into()))?;
    std::fs::write(dir.join(file), text)?;
    files.push(file.to_string());
    Ok(())
}
