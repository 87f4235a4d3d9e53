//! Serializes documents back into the front-matter notation read by the parser.
//!
//! Scalars are always double-quoted and every list is written in block form,
//! so values containing commas, colons or brackets survive a re-read.

use crate::records::value::{Document, Field, Item, Record, Value};

const INDENT: &str = "  ";

/// Renders a full section file, markers included.
pub fn write_document(doc: &Document) -> String {
    let mut out = String::from("---\n");
    for (key, value) in doc.iter() {
        match value {
            Value::Text(text) => out.push_str(&format!("{key}: {}\n", quote(text))),
            Value::List(items) => {
                out.push_str(&format!("{key}:\n"));
                write_strings(&mut out, items, 1);
            }
            Value::Block(items) => {
                out.push_str(&format!("{key}:\n"));
                for item in items {
                    match item {
                        Item::Text(text) => out.push_str(&format!("{INDENT}- {}\n", quote(text))),
                        Item::Record(record) => write_record(&mut out, record),
                    }
                }
            }
        }
    }
    out.push_str("---\n");
    out
}

fn write_record(out: &mut String, record: &Record) {
    if record.is_empty() {
        return;
    }
    for (idx, (key, field)) in record.iter().enumerate() {
        let lead = if idx == 0 {
            format!("{INDENT}- ")
        } else {
            INDENT.repeat(2)
        };
        match field {
            Field::Text(text) => out.push_str(&format!("{lead}{key}: {}\n", quote(text))),
            Field::List(items) => {
                out.push_str(&format!("{lead}{key}:\n"));
                write_strings(out, items, 3);
            }
        }
    }
}

fn write_strings(out: &mut String, items: &[String], depth: usize) {
    let pad = INDENT.repeat(depth);
    for item in items {
        out.push_str(&format!("{pad}- {}\n", quote(item)));
    }
}

/// Wraps a value in double quotes, folding line breaks to spaces.
fn quote(text: &str) -> String {
    let single_line = text
        .split(['\n', '\r'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    format!("\"{single_line}\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::loader::parse_section;

    fn job(role: &str, details: &[&str], tags: &[&str]) -> Record {
        let mut record = Record::new();
        record.insert("role", Field::Text(role.to_string()));
        record.insert(
            "details",
            Field::List(details.iter().map(|d| d.to_string()).collect()),
        );
        record.insert(
            "tags",
            Field::List(tags.iter().map(|t| t.to_string()).collect()),
        );
        record
    }

    #[test]
    fn test_written_section_reads_back() {
        let mut doc = Document::new();
        doc.insert("name", Value::Text("Jane: \"JD\" Doe".to_string()));
        doc.insert(
            "work_experience",
            Value::Block(vec![
                Item::Record(job(
                    "Lead, Platform",
                    &["Cut cost: 30%", "Migrated [legacy] jobs, all 40 of them"],
                    &["core", "acme_sre"],
                )),
                Item::Record(job("Intern", &[], &["core"])),
            ]),
        );

        let reread = parse_section(&write_document(&doc));

        assert_eq!(reread.text("name"), Some("Jane: \"JD\" Doe"));
        let jobs = reread.records("work_experience");
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].text("role"), Some("Lead, Platform"));
        assert_eq!(
            jobs[0].strings("details"),
            vec!["Cut cost: 30%", "Migrated [legacy] jobs, all 40 of them"]
        );
        assert_eq!(jobs[0].strings("tags"), vec!["core", "acme_sre"]);
        assert!(jobs[1].strings("details").is_empty());
        assert_eq!(jobs[1].strings("tags"), vec!["core"]);
    }

    #[test]
    fn test_inline_list_is_written_as_block() {
        let mut doc = Document::new();
        doc.insert("links", Value::List(vec!["a, b".to_string(), "c".to_string()]));
        let text = write_document(&doc);
        assert_eq!(text, "---\nlinks:\n  - \"a, b\"\n  - \"c\"\n---\n");
        assert_eq!(parse_section(&text).strings("links"), vec!["a, b", "c"]);
    }

    #[test]
    fn test_quote_folds_line_breaks() {
        assert_eq!(quote("line one\n  line two\r\n"), "\"line one line two\"");
    }
}
