use serde::{Deserialize, Serialize};

use crate::records::loader::SectionDocuments;
use crate::records::value::{Document, Field, Record};
use crate::selection::tags::{TagSet, Tagged};

pub const WORK_SECTION: &str = "work_experience";
pub const PROJECTS_SECTION: &str = "projects";
pub const EDUCATION_SECTION: &str = "education";
pub const SKILLS_SECTION: &str = "skills";

const PLACEHOLDER_NAME: &str = "Your Name";
const PLACEHOLDER_EMAIL: &str = "email@example.com";
const PLACEHOLDER_PHONE: &str = "555-123-4567";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Free text, optionally `street, city, region-zip`.
    pub location: String,
    pub summary: Option<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self::from_document(&Document::new())
    }
}

impl Profile {
    pub fn from_document(doc: &Document) -> Self {
        let text_or = |key: &str, fallback: &str| {
            doc.text(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(fallback)
                .to_string()
        };
        Self {
            name: text_or("name", PLACEHOLDER_NAME),
            email: text_or("email", PLACEHOLDER_EMAIL),
            phone: text_or("phone", PLACEHOLDER_PHONE),
            location: doc.text("location").unwrap_or_default().to_string(),
            summary: doc
                .text("summary")
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub role: String,
    pub company: String,
    pub period: String,
    pub location: String,
    /// Insertion order is output order.
    pub details: Vec<String>,
    pub tags: TagSet,
}

impl ExperienceEntry {
    pub fn from_record(record: &Record) -> Self {
        Self {
            role: text(record, &["role"]),
            company: text(record, &["company_name", "company"]),
            period: text(record, &["period"]),
            location: text(record, &["location"]),
            details: record.strings("details"),
            tags: TagSet::from_field(record.get("tags")),
        }
    }
}

impl Tagged for ExperienceEntry {
    fn tags(&self) -> &TagSet {
        &self.tags
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: String,
    pub period: String,
    pub technologies: Vec<String>,
    pub description: String,
    pub details: Vec<String>,
    pub tags: TagSet,
}

impl ProjectEntry {
    pub fn from_record(record: &Record) -> Self {
        let technologies = match record.get("technologies") {
            Some(Field::Text(text)) => text
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
            Some(Field::List(items)) => items.clone(),
            None => Vec::new(),
        };
        Self {
            name: text(record, &["name"]),
            period: text(record, &["period"]),
            technologies,
            description: text(record, &["description"]),
            details: record.strings("details"),
            tags: TagSet::from_field(record.get("tags")),
        }
    }
}

impl Tagged for ProjectEntry {
    fn tags(&self) -> &TagSet {
        &self.tags
    }
}

/// Education is never tag-filtered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub period: String,
    pub location: String,
    pub details: Vec<String>,
}

impl EducationEntry {
    pub fn from_record(record: &Record) -> Self {
        Self {
            degree: text(record, &["degree"]),
            institution: text(record, &["institution"]),
            period: text(record, &["period"]),
            location: text(record, &["location"]),
            details: record.strings("details"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    pub skills: Vec<String>,
}

impl SkillCategory {
    pub fn from_record(record: &Record) -> Self {
        let skills = if record.contains_key("skills") {
            record.strings("skills")
        } else {
            record.strings("items")
        };
        Self {
            name: text(record, &["category", "name"]),
            skills,
        }
    }
}

/// Everything loaded for one render. Built fresh per run and then dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resume {
    pub profile: Profile,
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<SkillCategory>,
}

impl Resume {
    pub fn from_documents(docs: &SectionDocuments) -> Self {
        Self {
            profile: Profile::from_document(&docs.meta),
            experience: docs
                .work
                .records(WORK_SECTION)
                .into_iter()
                .map(ExperienceEntry::from_record)
                .collect(),
            projects: docs
                .projects
                .records(PROJECTS_SECTION)
                .into_iter()
                .map(ProjectEntry::from_record)
                .collect(),
            education: docs
                .education
                .records(EDUCATION_SECTION)
                .into_iter()
                .map(EducationEntry::from_record)
                .collect(),
            skills: docs
                .skills
                .records(SKILLS_SECTION)
                .into_iter()
                .map(SkillCategory::from_record)
                .collect(),
        }
    }
}

fn text(record: &Record, keys: &[&str]) -> String {
    record.text_any(keys).unwrap_or_default().to_string()
}
