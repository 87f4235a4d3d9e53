//! Education fragment. Never tag-filtered.

use crate::models::resume::EducationEntry;
use crate::render::escape::escape;
use crate::render::RenderMode;

/// Substrings that mark a distinction line, matched case-sensitively.
const EXACT_MARKERS: &[&str] = &["GPA", "SAT"];
/// Substrings matched against the lower-cased line.
const FOLDED_MARKERS: &[&str] = &["magna", "summa", "cum laude", "honors", "honours", "dean's list"];

pub fn is_distinction(detail: &str) -> bool {
    if EXACT_MARKERS.iter().any(|m| detail.contains(m)) {
        return true;
    }
    let folded = detail.to_lowercase();
    FOLDED_MARKERS.iter().any(|m| folded.contains(m))
}

pub fn render(entries: &[EducationEntry], mode: RenderMode) -> String {
    let mut out = String::new();
    for entry in entries {
        let degree = escape(&entry.degree);
        let institution = escape(&entry.institution);
        let period = escape(&entry.period);

        match mode {
            RenderMode::Full => {
                out.push_str(&format!(
                    "\\datedsubsection{{\\textbf{{{degree}}}, \\textit{{{institution}}}}}{{\\textbf{{{period}}}}}\n"
                ));
                if !entry.location.is_empty() {
                    out.push_str(&format!("{{\\hfill \\textit{{{}}}}}\n", escape(&entry.location)));
                }
                if !entry.details.is_empty() {
                    out.push_str("\\begin{itemize}\n");
                    for detail in &entry.details {
                        out.push_str(&format!("    \\item {}\n", escape(detail)));
                    }
                    out.push_str("\\end{itemize}\n");
                }
                out.push_str("\\vspace{0.5em}\n\n");
            }
            RenderMode::Condensed => {
                out.push_str(&format!(
                    "\\textbf{{{degree}}}, \\textit{{{institution}}} \\hfill \\textbf{{{period}}}\\\\\n"
                ));
                if let Some(distinction) = entry.details.iter().find(|d| is_distinction(d)) {
                    out.push_str(&format!("\\textit{{{}}}\\\\\n", escape(distinction)));
                }
                out.push_str("\\vspace{0.2em}\n");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn degree(details: &[&str]) -> EducationEntry {
        EducationEntry {
            degree: "B.Sc. Computer Science".to_string(),
            institution: "State University".to_string(),
            period: "2012 -- 2016".to_string(),
            location: "Springfield".to_string(),
            details: details.iter().map(|d| d.to_string()).collect(),
        }
    }

    #[test]
    fn test_distinction_markers() {
        assert!(is_distinction("GPA: 3.9/4.0"));
        assert!(is_distinction("SAT 1580"));
        assert!(!is_distinction("gpa 3.9"));
        assert!(is_distinction("Graduated Magna Cum Laude"));
        assert!(is_distinction("Summa cum laude"));
        assert!(is_distinction("First-class Honours"));
        assert!(is_distinction("Dean's List, 4 semesters"));
        assert!(!is_distinction("Thesis on distributed consensus"));
    }

    #[test]
    fn test_full_format_lists_every_detail() {
        let out = render(&[degree(&["Thesis on consensus", "GPA 3.9"])], RenderMode::Full);
        assert_eq!(
            out,
            "\\datedsubsection{\\textbf{B.Sc. Computer Science}, \\textit{State University}}{\\textbf{2012 -- 2016}}\n\
             {\\hfill \\textit{Springfield}}\n\
             \\begin{itemize}\n    \\item Thesis on consensus\n    \\item GPA 3.9\n\\end{itemize}\n\
             \\vspace{0.5em}\n\n"
        );
    }

    #[test]
    fn test_condensed_emits_first_distinction_only() {
        let entry = degree(&["Thesis on consensus", "Dean's List", "GPA 3.9"]);
        let out = render(&[entry], RenderMode::Condensed);
        assert_eq!(
            out,
            "\\textbf{B.Sc. Computer Science}, \\textit{State University} \\hfill \\textbf{2012 -- 2016}\\\\\n\
             \\textit{Dean's List}\\\\\n\
             \\vspace{0.2em}\n"
        );
    }

    #[test]
    fn test_condensed_without_distinction() {
        let out = render(&[degree(&["Thesis on consensus"])], RenderMode::Condensed);
        assert!(!out.contains("Thesis"));
        assert_eq!(out.matches("\\textit{").count(), 1);
    }

    #[test]
    fn test_escapes_distinction_line() {
        let out = render(&[degree(&["GPA top 5%"])], RenderMode::Condensed);
        assert!(out.contains("\\textit{GPA top 5\\%}"));
    }
}
