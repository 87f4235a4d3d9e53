//! The one escape table for text embedded in markup.
//!
//! A single left-to-right pass maps each reserved character to its literal-safe
//! form, so no replacement is ever scanned again. Input is assumed raw.

/// Reserved characters and their replacements.
pub const ESCAPE_TABLE: &[(char, &str)] = &[
    ('\\', r"\textbackslash{}"),
    ('&', r"\&"),
    ('%', r"\%"),
    ('#', r"\#"),
    ('_', r"\_"),
    ('$', r"\$"),
    ('{', r"\{"),
    ('}', r"\}"),
    ('~', r"\textasciitilde{}"),
    ('^', r"\textasciicircum{}"),
];

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        match ESCAPE_TABLE.iter().find(|(reserved, _)| *reserved == c) {
            Some((_, replacement)) => out.push_str(replacement),
            None => out.push(c),
        }
    }
    out
}
