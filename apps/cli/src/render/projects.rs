//! Projects fragment.

use crate::models::resume::ProjectEntry;
use crate::render::escape::escape;
use crate::render::RenderMode;
use crate::selection::summarize;

pub const CONDENSED_MAX_ENTRIES: usize = 3;
pub const CONDENSED_MAX_TECHNOLOGIES: usize = 4;
pub const CONDENSED_DESCRIPTION_WORDS: usize = 25;

pub fn render(entries: &[&ProjectEntry], mode: RenderMode) -> String {
    match mode {
        RenderMode::Full => render_full(entries),
        RenderMode::Condensed => {
            render_condensed(&entries[..entries.len().min(CONDENSED_MAX_ENTRIES)])
        }
    }
}

fn render_full(entries: &[&ProjectEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&format!("\\subsection{{\\textbf{{{}}}}}\n", escape(&entry.name)));

        let period = escape(&entry.period);
        if entry.technologies.is_empty() {
            out.push_str(&format!("\\hfill \\textit{{{period}}}\n"));
        } else {
            let technologies = escape(&entry.technologies.join(", "));
            out.push_str(&format!("\\textit{{{technologies}}} \\hfill \\textit{{{period}}}\n"));
        }

        if !entry.description.is_empty() || !entry.details.is_empty() {
            out.push_str("\\begin{itemize}\n");
            if !entry.description.is_empty() {
                out.push_str(&format!("    \\item {}\n", escape(&entry.description)));
            }
            for detail in &entry.details {
                out.push_str(&format!("    \\item {}\n", escape(detail)));
            }
            out.push_str("\\end{itemize}\n");
        }
        out.push_str("\\vspace{0.5em}\n\n");
    }
    out
}

/// Name with a short technology list, then the summarized description.
/// Detail bullets are dropped.
fn render_condensed(entries: &[&ProjectEntry]) -> String {
    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        out.push_str(&format!("\\textbf{{{}}}", escape(&entry.name)));
        if !entry.technologies.is_empty() {
            let technologies: Vec<String> = entry
                .technologies
                .iter()
                .take(CONDENSED_MAX_TECHNOLOGIES)
                .map(|t| escape(t))
                .collect();
            out.push_str(&format!(" \\textit{{({})}}", technologies.join(", ")));
        }
        out.push_str("\\\\\n");

        if !entry.description.is_empty() {
            let short = summarize(&entry.description, CONDENSED_DESCRIPTION_WORDS);
            out.push_str(&format!("{}\n", escape(&short)));
        }

        if i + 1 < entries.len() {
            out.push_str("\\vspace{0.3em}\n\n");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::escape::tests::assert_no_raw_reserved;
    use crate::selection::TagSet;

    fn project(name: &str, technologies: &[&str], description: &str) -> ProjectEntry {
        ProjectEntry {
            name: name.to_string(),
            period: "2022".to_string(),
            technologies: technologies.iter().map(|t| t.to_string()).collect(),
            description: description.to_string(),
            details: vec!["Wrote the parser".to_string()],
            tags: TagSet::new(["core"]),
        }
    }

    #[test]
    fn test_full_project_format() {
        let p = project("ledger_rs", &["Rust", "Tokio"], "A double-entry ledger");
        let out = render(&[&p], RenderMode::Full);
        assert_eq!(
            out,
            "\\subsection{\\textbf{ledger\\_rs}}\n\
             \\textit{Rust, Tokio} \\hfill \\textit{2022}\n\
             \\begin{itemize}\n    \\item A double-entry ledger\n    \\item Wrote the parser\n\\end{itemize}\n\
             \\vspace{0.5em}\n\n"
        );
    }

    #[test]
    fn test_full_project_without_technologies() {
        let mut p = project("Site", &[], "");
        p.details.clear();
        let out = render(&[&p], RenderMode::Full);
        assert!(out.contains("\\hfill \\textit{2022}\n"));
        assert!(!out.contains("\\textit{}"));
        assert!(!out.contains("itemize"));
    }

    #[test]
    fn test_condensed_caps_entries_and_technologies() {
        let projects: Vec<ProjectEntry> = (0..5)
            .map(|i| project(&format!("P{i}"), &["A", "B", "C", "D", "E"], "Short"))
            .collect();
        let refs: Vec<&ProjectEntry> = projects.iter().collect();
        let out = render(&refs, RenderMode::Condensed);
        assert_eq!(out.matches("\\textbf{").count(), 3);
        assert!(out.contains("\\textbf{P0} \\textit{(A, B, C, D)}\\\\\nShort\n"));
        assert!(!out.contains(", E"));
        assert!(!out.contains("Wrote the parser"));
        assert_eq!(out.matches("\\vspace{0.3em}").count(), 2);
    }

    #[test]
    fn test_condensed_description_summarized() {
        let description = (1..=30).map(|n| format!("w{n}")).collect::<Vec<_>>().join(" ");
        let p = project("P", &[], &description);
        let out = render(&[&p], RenderMode::Condensed);
        assert!(out.starts_with("\\textbf{P}\\\\\nw1 w2"));
        assert!(out.contains("w25...\n"));
        assert!(!out.contains("w26"));
    }

    #[test]
    fn test_no_raw_reserved_characters() {
        let p = project("50% off_{x}", &["C#", "F&B"], "Costs $3 ~ ^ \\ #1");
        let full = render(&[&p], RenderMode::Full)
            .replace("\\subsection{", "")
            .replace("\\textbf{", "")
            .replace("\\textit{", "")
            .replace("\\begin{itemize}", "")
            .replace("\\end{itemize}", "")
            .replace("\\vspace{0.5em}", "");
        assert_no_raw_reserved(&full, true);
        let condensed = render(&[&p], RenderMode::Condensed);
        assert_no_raw_reserved(&condensed, true);
    }
}
