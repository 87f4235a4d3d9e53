//! Skills fragment. Never tag-filtered.

use crate::models::resume::SkillCategory;
use crate::render::escape::escape;
use crate::render::RenderMode;

pub const CONDENSED_MAX_SKILLS: usize = 6;

pub fn render(categories: &[SkillCategory], mode: RenderMode) -> String {
    match mode {
        RenderMode::Full => render_full(categories),
        RenderMode::Condensed => render_condensed(categories),
    }
}

fn render_full(categories: &[SkillCategory]) -> String {
    let mut out = String::new();
    for category in categories {
        if category.name.is_empty() && category.skills.is_empty() {
            continue;
        }
        out.push_str(&format!("\\cvsubsection{{{}}}\n", escape(&category.name)));
        out.push_str("\\begin{itemize}\n");
        for skill in &category.skills {
            out.push_str(&format!("    \\item {}\n", escape(skill)));
        }
        out.push_str("\\end{itemize}\n");
        out.push_str("\\vspace{0.5em}\n\n");
    }
    out
}

/// One flowing block: `Category: a, b, c` lines joined by short breaks.
fn render_condensed(categories: &[SkillCategory]) -> String {
    let lines: Vec<String> = categories
        .iter()
        .filter(|c| !c.name.is_empty() && !c.skills.is_empty())
        .map(|c| {
            let skills: Vec<String> = c
                .skills
                .iter()
                .take(CONDENSED_MAX_SKILLS)
                .map(|s| escape(s))
                .collect();
            format!("\\textbf{{{}:}} {}", escape(&c.name), skills.join(", "))
        })
        .collect();

    if lines.is_empty() {
        return String::new();
    }
    let mut out = lines.join("\\\\[0.2em]\n");
    out.push('\n');
    out
}
