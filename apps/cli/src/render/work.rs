//! Work experience fragment.

use crate::models::resume::ExperienceEntry;
use crate::render::escape::escape;
use crate::render::RenderMode;
use crate::selection::summarize;

pub const CONDENSED_MAX_ENTRIES: usize = 4;
pub const CONDENSED_MAX_DETAILS: usize = 2;
pub const CONDENSED_DETAIL_WORDS: usize = 20;

const CONDENSED_ITEMIZE: &str = "\\begin{itemize}[leftmargin=*, itemsep=0pt, parsep=0pt, topsep=0pt]\n";

/// Renders already-filtered entries. Condensed mode keeps the first
/// [`CONDENSED_MAX_ENTRIES`] entries.
pub fn render(entries: &[&ExperienceEntry], mode: RenderMode) -> String {
    let shown = match mode {
        RenderMode::Full => entries,
        RenderMode::Condensed => &entries[..entries.len().min(CONDENSED_MAX_ENTRIES)],
    };

    let mut out = String::new();
    for (i, entry) in shown.iter().enumerate() {
        out.push_str(&format!(
            "\\datedsubsection{{\\textbf{{{}}}, {}}}{{\\textbf{{{}}}}}\n",
            escape(&entry.role),
            escape(&entry.company),
            escape(&entry.period)
        ));

        if !entry.location.is_empty() {
            out.push_str(&format!("{{\\hfill \\textbf{{{}}}}}\n", escape(&entry.location)));
        }

        if !entry.details.is_empty() {
            match mode {
                RenderMode::Full => {
                    out.push_str("\\begin{itemize}\n");
                    for detail in &entry.details {
                        out.push_str(&format!("    \\item {}\n", escape(detail)));
                    }
                }
                RenderMode::Condensed => {
                    out.push_str(CONDENSED_ITEMIZE);
                    for detail in entry.details.iter().take(CONDENSED_MAX_DETAILS) {
                        let short = summarize(detail, CONDENSED_DETAIL_WORDS);
                        out.push_str(&format!("    \\item {}\n", escape(&short)));
                    }
                }
            }
            out.push_str("\\end{itemize}\n");
        }

        if i + 1 < shown.len() {
            let spacing = match mode {
                RenderMode::Full => "0.5em",
                RenderMode::Condensed => "0.2em",
            };
            out.push_str(&format!("\\vspace{{{spacing}}}\n\n"));
        }
    }
    out
}
