//! Section loader: reads one front-matter file per résumé section.
//!
//! Fail-open: a missing or unreadable file yields an empty document and a
//! warning, so the section renders empty instead of aborting the document.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::models::resume::Resume;
use crate::records::parser::parse_block;
use crate::records::value::Document;

/// Section files expected in a data directory, in load order.
pub const META_FILE: &str = "meta.md";
pub const WORK_FILE: &str = "work_experience.md";
pub const PROJECTS_FILE: &str = "projects.md";
pub const EDUCATION_FILE: &str = "education.md";
pub const SKILLS_FILE: &str = "skills.md";

const MARKER: &str = "---";

/// Returns the text between the opening `---` line and the next `---` line.
/// Without a closing marker the block runs to the end of the file.
pub fn front_matter(content: &str) -> Option<&str> {
    let content = content.trim_start_matches('\u{feff}');
    let mut lines = content.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim() != MARKER {
        return None;
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        if line.trim() == MARKER {
            return Some(&content[start..offset]);
        }
        offset += line.len();
    }
    Some(&content[start..])
}

/// Parses a file's contents. No front matter → empty document.
pub fn parse_section(content: &str) -> Document {
    front_matter(content).map(parse_block).unwrap_or_default()
}

/// Loads one section file.
pub fn load_section(path: &Path) -> Document {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("{} not found, section will be empty", path.display());
            return Document::new();
        }
        Err(e) => {
            warn!("Failed to read {}: {e}; section will be empty", path.display());
            return Document::new();
        }
    };

    let doc = parse_section(&content);
    if doc.is_empty() {
        warn!("{} has no data block, section will be empty", path.display());
    } else {
        debug!("Loaded {} ({} keys)", path.display(), doc.iter().count());
    }
    doc
}

/// Raw documents for every section of a data directory.
#[derive(Debug, Clone, Default)]
pub struct SectionDocuments {
    pub meta: Document,
    pub work: Document,
    pub projects: Document,
    pub education: Document,
    pub skills: Document,
}

/// Loads every section file of a data directory without interpreting it.
pub fn load_documents(data_dir: &Path) -> SectionDocuments {
    SectionDocuments {
        meta: load_section(&data_dir.join(META_FILE)),
        work: load_section(&data_dir.join(WORK_FILE)),
        projects: load_section(&data_dir.join(PROJECTS_FILE)),
        education: load_section(&data_dir.join(EDUCATION_FILE)),
        skills: load_section(&data_dir.join(SKILLS_FILE)),
    }
}

/// Loads and types a whole résumé from a data directory.
pub fn load_resume(data_dir: &Path) -> Resume {
    Resume::from_documents(&load_documents(data_dir))
}
