//! Recursive-descent parser for the indentation-sensitive front-matter notation.
//!
//! Grammar (one level of nesting):
//!
//! ```text
//! document := entry*
//! entry    := KEY ':' scalar                  -- any indent
//!           | KEY ':' NEWLINE item*           -- indent 0 only
//! item     := '-' KEY ':' scalar? field*      -- a record
//!           | '-' TEXT                        -- a plain string
//! field    := KEY ':' scalar                  -- indent > 0
//!           | KEY ':' NEWLINE ('-' TEXT)*     -- a string list
//! scalar   := '[' TEXT (',' TEXT)* ']' | QUOTED | TEXT
//! ```
//!
//! Parsing never fails. Lines that fit nowhere are skipped and traced at debug level.

use tracing::debug;

use crate::records::value::{Document, Field, Item, Record, Value};

/// Field that receives bare `- text` lines inside a record with no open list.
const DEFAULT_LIST_FIELD: &str = "details";

/// A non-blank, non-comment source line.
#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    number: usize,
    indent: usize,
    text: &'a str,
}

impl<'a> Line<'a> {
    fn dash_content(&self) -> Option<&'a str> {
        self.text.strip_prefix('-').map(str::trim)
    }
}

/// Explicit position over the pre-scanned lines of a block.
struct Cursor<'a> {
    lines: Vec<Line<'a>>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        let lines = src
            .lines()
            .enumerate()
            .filter_map(|(idx, raw)| {
                let text = raw.trim();
                if text.is_empty() || text.starts_with('#') || text.starts_with("---") {
                    return None;
                }
                Some(Line {
                    number: idx + 1,
                    indent: raw.len() - raw.trim_start().len(),
                    text,
                })
            })
            .collect();
        Self { lines, pos: 0 }
    }

    fn peek(&self) -> Option<Line<'a>> {
        self.lines.get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }
}

/// Right-hand side of a `key: value` pair.
#[derive(Debug, PartialEq)]
enum Scalar {
    Empty,
    Text(String),
    List(Vec<String>),
}

/// Parses the contents of a front-matter block (without its `---` markers).
pub fn parse_block(src: &str) -> Document {
    let mut cursor = Cursor::new(src);
    let mut doc = Document::new();

    while let Some(line) = cursor.peek() {
        cursor.bump();

        if line.dash_content().is_some() {
            debug!(line = line.number, "skipping list item with no owning key");
            continue;
        }
        let Some((key, raw)) = split_key(line.text) else {
            debug!(line = line.number, "skipping line without a key");
            continue;
        };

        match parse_scalar(raw) {
            Scalar::Empty if line.indent == 0 => {
                let items = parse_items(&mut cursor);
                doc.insert(key, Value::Block(items));
            }
            Scalar::Empty => {
                debug!(line = line.number, key, "skipping nested key with no owning entry");
            }
            Scalar::Text(text) => doc.insert(key, Value::Text(text)),
            Scalar::List(items) => doc.insert(key, Value::List(items)),
        }
    }

    doc
}

/// Parses the `- ...` items of a block list until the next top-level key.
fn parse_items(cursor: &mut Cursor<'_>) -> Vec<Item> {
    let mut items = Vec::new();

    while let Some(line) = cursor.peek() {
        let Some(content) = line.dash_content() else {
            if line.indent == 0 {
                break;
            }
            debug!(line = line.number, "skipping field with no owning entry");
            cursor.bump();
            continue;
        };
        cursor.bump();

        match split_key(content) {
            Some((key, raw)) => {
                let record = parse_record(cursor, line.indent, key, raw);
                items.push(Item::Record(record));
            }
            None => items.push(Item::Text(unquote(content).to_string())),
        }
    }

    items
}

/// Parses one record: the field on its dash line plus every continuation line.
fn parse_record(cursor: &mut Cursor<'_>, dash_indent: usize, key: &str, raw: &str) -> Record {
    let mut record = Record::new();
    let mut open_list = apply_field(&mut record, key, raw);

    while let Some(line) = cursor.peek() {
        match line.dash_content() {
            Some(content) => {
                let nested = line.indent > dash_indent && open_list.is_some();
                if split_key(content).is_some() && !nested {
                    break;
                }
                let target = open_list.as_deref().unwrap_or(DEFAULT_LIST_FIELD);
                record.push_to(target, unquote(content).to_string());
            }
            None => {
                if line.indent == 0 {
                    break;
                }
                match split_key(line.text) {
                    Some((key, raw)) => open_list = apply_field(&mut record, key, raw),
                    None => debug!(line = line.number, "skipping line without a key"),
                }
            }
        }
        cursor.bump();
    }

    record
}

/// Stores a field and returns its key when it opens a string list.
fn apply_field(record: &mut Record, key: &str, raw: &str) -> Option<String> {
    match parse_scalar(raw) {
        Scalar::Empty => {
            record.insert(key, Field::List(Vec::new()));
            Some(key.to_string())
        }
        Scalar::Text(text) => {
            record.insert(key, Field::Text(text));
            None
        }
        Scalar::List(items) => {
            record.insert(key, Field::List(items));
            None
        }
    }
}

/// Splits `key: value`. The key must be a bare token and the colon must be
/// followed by whitespace or the end of the line, so `https://...` and
/// `Reduced cost: 30%` stay plain text.
fn split_key(text: &str) -> Option<(&str, &str)> {
    let colon = text.find(':')?;
    let (key, rest) = (&text[..colon], &text[colon + 1..]);
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let is_key = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'));
    is_key.then(|| (key, rest.trim()))
}

fn parse_scalar(raw: &str) -> Scalar {
    if raw.is_empty() {
        return Scalar::Empty;
    }
    if let Some(inner) = raw.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
        let items = inner
            .split(',')
            .map(|item| item.trim().trim_matches(|c| c == '"' || c == '\''))
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect();
        return Scalar::List(items);
    }
    Scalar::Text(unquote(raw).to_string())
}

/// Strips one pair of matching outer quotes.
fn unquote(text: &str) -> &str {
    for quote in ['"', '\''] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            return &text[1..text.len() - 1];
        }
    }
    text
}
