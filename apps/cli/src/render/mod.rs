//! Section renderers: typed entries → markup fragments.
//!
//! Each renderer is a pure function over already-loaded entries. Work and
//! projects are tag-filtered here; profile, education and skills never are.

pub mod education;
pub mod escape;
pub mod header;
pub mod projects;
pub mod skills;
pub mod work;

use tracing::debug;

use crate::models::resume::Resume;
use crate::selection::filter_by_tag;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Full,
    /// One-page layout: capped entries, capped details, summarized text.
    Condensed,
}

pub const META_FRAGMENT: &str = "generated_meta_info.tex";
pub const SUMMARY_FRAGMENT: &str = "generated_summary.tex";

impl RenderMode {
    pub fn work_fragment(self) -> &'static str {
        match self {
            RenderMode::Full => "generated_work_experience.tex",
            RenderMode::Condensed => "generated_work_experience_summary.tex",
        }
    }

    pub fn projects_fragment(self) -> &'static str {
        match self {
            RenderMode::Full => "generated_projects.tex",
            RenderMode::Condensed => "generated_projects_summary.tex",
        }
    }

    pub fn education_fragment(self) -> &'static str {
        match self {
            RenderMode::Full => "generated_education.tex",
            RenderMode::Condensed => "generated_education_condensed.tex",
        }
    }

    pub fn skills_fragment(self) -> &'static str {
        match self {
            RenderMode::Full => "generated_skills.tex",
            RenderMode::Condensed => "generated_skills_condensed.tex",
        }
    }
}

/// One generated file the template `\input`s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub file_name: &'static str,
    pub body: String,
}

/// Renders every fragment the template for `mode` expects.
pub fn render_document(resume: &Resume, focus_tag: &str, mode: RenderMode) -> Vec<Fragment> {
    let work = filter_by_tag(&resume.experience, focus_tag);
    let projects = filter_by_tag(&resume.projects, focus_tag);
    debug!(
        focus_tag,
        work = work.len(),
        projects = projects.len(),
        ?mode,
        "Selected entries for render"
    );

    vec![
        Fragment {
            file_name: META_FRAGMENT,
            body: header::render_meta(&resume.profile),
        },
        Fragment {
            file_name: SUMMARY_FRAGMENT,
            body: header::render_summary(&resume.profile),
        },
        Fragment {
            file_name: mode.work_fragment(),
            body: work::render(&work, mode),
        },
        Fragment {
            file_name: mode.projects_fragment(),
            body: projects::render(&projects, mode),
        },
        Fragment {
            file_name: mode.education_fragment(),
            body: education::render(&resume.education, mode),
        },
        Fragment {
            file_name: mode.skills_fragment(),
            body: skills::render(&resume.skills, mode),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{EducationEntry, ExperienceEntry, Profile, ProjectEntry, SkillCategory};
    use crate::selection::TagSet;

    fn resume() -> Resume {
        let job = |role: &str, tags: &[&str]| ExperienceEntry {
            role: role.to_string(),
            company: "Co".to_string(),
            period: "2020".to_string(),
            location: String::new(),
            details: vec!["Did work".to_string()],
            tags: TagSet::new(tags.iter().copied()),
        };
        Resume {
            profile: Profile {
                location: "123 Main St, Springfield, 12345".to_string(),
                ..Profile::default()
            },
            experience: vec![job("Backend", &["core", "backend"]), job("Frontend", &["frontend"]), job("Untagged", &[])],
            projects: vec![ProjectEntry {
                name: "Tool".to_string(),
                period: "2021".to_string(),
                technologies: vec![],
                description: "A tool".to_string(),
                details: vec![],
                tags: TagSet::new(["backend"]),
            }],
            education: vec![EducationEntry {
                degree: "BSc".to_string(),
                institution: "Uni".to_string(),
                period: "2016".to_string(),
                location: String::new(),
                details: vec![],
            }],
            skills: vec![SkillCategory {
                name: "Languages".to_string(),
                skills: vec!["Rust".to_string()],
            }],
        }
    }

    fn body<'a>(fragments: &'a [Fragment], name: &str) -> &'a str {
        fragments
            .iter()
            .find(|f| f.file_name == name)
            .map(|f| f.body.as_str())
            .unwrap_or_else(|| panic!("missing fragment {name}"))
    }

    #[test]
    fn test_full_fragment_names() {
        let fragments = render_document(&resume(), "core", RenderMode::Full);
        let names: Vec<&str> = fragments.iter().map(|f| f.file_name).collect();
        assert_eq!(
            names,
            vec![
                "generated_meta_info.tex",
                "generated_summary.tex",
                "generated_work_experience.tex",
                "generated_projects.tex",
                "generated_education.tex",
                "generated_skills.tex",
            ]
        );
    }

    #[test]
    fn test_condensed_fragment_names() {
        let fragments = render_document(&resume(), "core", RenderMode::Condensed);
        assert!(fragments.iter().any(|f| f.file_name == "generated_work_experience_summary.tex"));
        assert!(fragments.iter().any(|f| f.file_name == "generated_projects_summary.tex"));
        assert!(fragments.iter().any(|f| f.file_name == "generated_education_condensed.tex"));
        assert!(fragments.iter().any(|f| f.file_name == "generated_skills_condensed.tex"));
    }

    #[test]
    fn test_focus_tag_filters_work_and_projects_only() {
        let fragments = render_document(&resume(), "backend", RenderMode::Full);
        let work = body(&fragments, "generated_work_experience.tex");
        assert!(work.contains("Backend"));
        assert!(!work.contains("Frontend"));
        assert!(!work.contains("Untagged"));
        assert!(body(&fragments, "generated_projects.tex").contains("Tool"));
        assert!(body(&fragments, "generated_education.tex").contains("BSc"));
        assert!(body(&fragments, "generated_skills.tex").contains("Rust"));

        let fragments = render_document(&resume(), "frontend", RenderMode::Full);
        let work = body(&fragments, "generated_work_experience.tex");
        assert!(!work.contains("Backend"));
        assert!(body(&fragments, "generated_projects.tex").is_empty());
    }

    #[test]
    fn test_meta_carries_split_location() {
        let fragments = render_document(&resume(), "core", RenderMode::Full);
        let meta = body(&fragments, META_FRAGMENT);
        assert!(meta.contains("\\newcommand{\\MyStreetAddress}{123 Main St}"));
        assert!(meta.contains("\\newcommand{\\MyCity}{Springfield}"));
        assert!(meta.contains("\\newcommand{\\MyCountryZip}{12345}"));
        assert!(meta.contains("\\newcommand{\\MyName}{Your Name}"));
    }
}
