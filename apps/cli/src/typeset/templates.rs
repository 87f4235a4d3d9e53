//! Templates: where the document skeleton comes from and how it is staged.
//!
//! A template directory follows the fixed naming convention below. Without
//! one, the built-in templates are written instead. Either way the template
//! `\input`s the fragment files for its mode.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::AppError;
use crate::render::RenderMode;

pub const ONEPAGE_TEMPLATE: &str = "onepage_cv_template.tex";
/// Full-mode templates in order of preference.
pub const FULL_TEMPLATES: &[&str] = &[
    "basic_cv_template.tex",
    "simple_cv_template.tex",
    "stylish_cv_template.tex",
];
/// Support file extensions copied next to a directory template.
const SUPPORT_EXTENSIONS: &[&str] = &["cls", "sty"];

pub const BUILTIN_FULL_NAME: &str = "resume.tex";
pub const BUILTIN_ONEPAGE_NAME: &str = "resume_onepage.tex";

const PREAMBLE: &str = r"\documentclass[11pt,letterpaper]{article}
\usepackage[margin=0.75in]{geometry}
\usepackage{fontspec}
\usepackage{enumitem}
\usepackage[hidelinks]{hyperref}
\pagestyle{empty}
\setlength{\parindent}{0pt}
\setcounter{secnumdepth}{0}

\input{generated_meta_info.tex}

\newcommand{\datedsubsection}[2]{\par\noindent #1 \hfill #2\par}
\newcommand{\cvsubsection}[1]{\par\noindent\textbf{#1}\par}
\newcommand{\cvsection}[1]{\vspace{0.6em}{\large\bfseries #1}\par\vspace{0.15em}\hrule\vspace{0.35em}}
";

const HEADER: &str = r"{\centering
{\LARGE\bfseries \MyName}\\[0.3em]
\MyEmail\ \textbar\ \MyPhone\ \textbar\ \MyStreetAddress\ \MyCity\ \MyCountryZip\par}
\vspace{0.5em}
\input{generated_summary.tex}
";

const FULL_BODY: &str = r"\cvsection{Experience}
\input{generated_work_experience.tex}

\cvsection{Projects}
\input{generated_projects.tex}

\cvsection{Education}
\input{generated_education.tex}

\cvsection{Skills}
\input{generated_skills.tex}
";

const ONEPAGE_BODY: &str = r"\cvsection{Experience}
\input{generated_work_experience_summary.tex}

\cvsection{Projects}
\input{generated_projects_summary.tex}

\cvsection{Education}
\input{generated_education_condensed.tex}

\cvsection{Skills}
\input{generated_skills_condensed.tex}
";

/// Where templates are taken from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Directory(PathBuf),
    BuiltIn,
}

/// Full text of the built-in template for `mode`.
pub fn builtin_template(mode: RenderMode) -> String {
    let (geometry, body) = match mode {
        RenderMode::Full => ("", FULL_BODY),
        RenderMode::Condensed => ("\\newgeometry{margin=0.5in}\n", ONEPAGE_BODY),
    };
    format!("{PREAMBLE}\n\\begin{{document}}\n{geometry}{HEADER}\n{body}\\end{{document}}\n")
}

/// Finds the template for `mode` in `dir`.
pub fn locate(dir: &Path, mode: RenderMode) -> Result<PathBuf, AppError> {
    match mode {
        RenderMode::Condensed => {
            let path = dir.join(ONEPAGE_TEMPLATE);
            if path.is_file() {
                Ok(path)
            } else {
                Err(AppError::TemplateNotFound(path.display().to_string()))
            }
        }
        RenderMode::Full => FULL_TEMPLATES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
            .ok_or_else(|| {
                AppError::TemplateNotFound(format!(
                    "no suitable template in {} (looked for {})",
                    dir.display(),
                    FULL_TEMPLATES.join(", ")
                ))
            }),
    }
}

impl TemplateSource {
    /// Puts the template (and any support files) into `scratch`.
    /// Returns the template's file name there.
    pub fn stage(&self, mode: RenderMode, scratch: &Path) -> Result<String, AppError> {
        match self {
            TemplateSource::BuiltIn => {
                let name = match mode {
                    RenderMode::Full => BUILTIN_FULL_NAME,
                    RenderMode::Condensed => BUILTIN_ONEPAGE_NAME,
                };
                std::fs::write(scratch.join(name), builtin_template(mode))?;
                debug!(template = name, "Wrote built-in template");
                Ok(name.to_string())
            }
            TemplateSource::Directory(dir) => {
                let template = locate(dir, mode)?;
                let name = template
                    .file_name()
                    .and_then(|n| n.to_str())
                    .ok_or_else(|| AppError::TemplateNotFound(template.display().to_string()))?
                    .to_string();
                std::fs::copy(&template, scratch.join(&name))?;
                debug!(template = %template.display(), "Copied template");

                for entry in std::fs::read_dir(dir)? {
                    let path = entry?.path();
                    let is_support = path
                        .extension()
                        .and_then(|e| e.to_str())
                        .is_some_and(|ext| SUPPORT_EXTENSIONS.contains(&ext));
                    if is_support && path.is_file() {
                        if let Some(file_name) = path.file_name() {
                            std::fs::copy(&path, scratch.join(file_name))?;
                            debug!(file = %path.display(), "Copied template support file");
                        }
                    }
                }
                Ok(name)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::Resume;
    use crate::render::render_document;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_templates_input_every_fragment() {
        for mode in [RenderMode::Full, RenderMode::Condensed] {
            let template = builtin_template(mode);
            for fragment in render_document(&Resume::default(), "core", mode) {
                let input = format!("\\input{{{}}}", fragment.file_name);
                assert!(template.contains(&input), "{mode:?} template lacks {input}");
            }
            assert!(template.contains("\\newcommand{\\datedsubsection}"));
            assert!(template.contains("\\newcommand{\\cvsubsection}"));
            assert!(template.trim_end().ends_with("\\end{document}"));
        }
    }

    #[test]
    fn test_locate_full_prefers_basic_then_simple() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("stylish_cv_template.tex"), "s").unwrap();
        std::fs::write(dir.path().join("simple_cv_template.tex"), "s").unwrap();
        let found = locate(dir.path(), RenderMode::Full).unwrap();
        assert_eq!(found.file_name().unwrap(), "simple_cv_template.tex");

        std::fs::write(dir.path().join("basic_cv_template.tex"), "b").unwrap();
        let found = locate(dir.path(), RenderMode::Full).unwrap();
        assert_eq!(found.file_name().unwrap(), "basic_cv_template.tex");
    }

    #[test]
    fn test_locate_missing_template() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("basic_cv_template.tex"), "b").unwrap();
        let err = locate(dir.path(), RenderMode::Condensed).unwrap_err();
        assert!(matches!(err, AppError::TemplateNotFound(_)));

        let empty = TempDir::new().unwrap();
        let err = locate(empty.path(), RenderMode::Full).unwrap_err();
        assert_eq!(err.code(), "TEMPLATE_NOT_FOUND");
    }

    #[test]
    fn test_stage_directory_copies_template_and_support_files() {
        let templates = TempDir::new().unwrap();
        std::fs::write(templates.path().join(ONEPAGE_TEMPLATE), "tpl").unwrap();
        std::fs::write(templates.path().join("stylishcv.cls"), "cls").unwrap();
        std::fs::write(templates.path().join("extra.sty"), "sty").unwrap();
        std::fs::write(templates.path().join("notes.txt"), "txt").unwrap();

        let scratch = TempDir::new().unwrap();
        let source = TemplateSource::Directory(templates.path().to_path_buf());
        let name = source.stage(RenderMode::Condensed, scratch.path()).unwrap();

        assert_eq!(name, ONEPAGE_TEMPLATE);
        assert!(scratch.path().join(ONEPAGE_TEMPLATE).is_file());
        assert!(scratch.path().join("stylishcv.cls").is_file());
        assert!(scratch.path().join("extra.sty").is_file());
        assert!(!scratch.path().join("notes.txt").exists());
    }

    #[test]
    fn test_stage_builtin_writes_template() {
        let scratch = TempDir::new().unwrap();
        let name = TemplateSource::BuiltIn
            .stage(RenderMode::Full, scratch.path())
            .unwrap();
        assert_eq!(name, BUILTIN_FULL_NAME);
        let written = std::fs::read_to_string(scratch.path().join(name)).unwrap();
        assert!(written.contains("\\input{generated_work_experience.tex}"));
    }
}
