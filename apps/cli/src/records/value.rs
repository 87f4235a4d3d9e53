//! Tagged value model for parsed front-matter blocks.
//!
//! One level of nesting only: a document maps keys to scalars, inline lists or
//! block lists; a block list holds plain strings or records; a record maps keys
//! to scalars or string lists. Keys keep their insertion order.

/// A top-level value in a section document.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    /// Inline `[a, b]` list.
    List(Vec<String>),
    /// `key:` followed by `- ...` lines.
    Block(Vec<Item>),
}

/// One entry of a block list.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Text(String),
    Record(Record),
}

/// A value inside a record.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Text(String),
    List(Vec<String>),
}

impl Field {
    /// Returns the field as a list of strings. A text field is a one-element list.
    pub fn to_strings(&self) -> Vec<String> {
        match self {
            Field::Text(text) => vec![text.clone()],
            Field::List(items) => items.clone(),
        }
    }
}

/// An ordered key → field mapping (one job, one project, ...).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Field)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, replacing an existing one in place.
    pub fn insert(&mut self, key: impl Into<String>, value: Field) {
        let key = key.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Text value of a field; lists are not coerced.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.get(key) {
            Some(Field::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// First text value among `keys`, e.g. `company_name` then `company`.
    pub fn text_any(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.text(key))
    }

    /// String-list value of a field; text is a one-element list, absent is empty.
    pub fn strings(&self, key: &str) -> Vec<String> {
        self.get(key).map(Field::to_strings).unwrap_or_default()
    }

    /// Appends a string to a list field, creating or promoting it as needed.
    pub fn push_to(&mut self, key: &str, item: String) {
        match self.get_mut(key) {
            Some(Field::List(items)) => items.push(item),
            Some(slot @ Field::Text(_)) => {
                let mut items = slot.to_strings();
                items.push(item);
                *slot = Field::List(items);
            }
            None => self.insert(key, Field::List(vec![item])),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A parsed section file. Empty when the file was missing or unreadable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    entries: Vec<(String, Value)>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.get(key) {
            Some(Value::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Records of a block list, in order. Plain-string items are skipped.
    pub fn records(&self, key: &str) -> Vec<&Record> {
        match self.get(key) {
            Some(Value::Block(items)) => items
                .iter()
                .filter_map(|item| match item {
                    Item::Record(record) => Some(record),
                    Item::Text(_) => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Mutable records of a block list, in order.
    pub fn records_mut(&mut self, key: &str) -> Vec<&mut Record> {
        match self.get_mut(key) {
            Some(Value::Block(items)) => items
                .iter_mut()
                .filter_map(|item| match item {
                    Item::Record(record) => Some(record),
                    Item::Text(_) => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Strings of an inline or block list.
    pub fn strings(&self, key: &str) -> Vec<String> {
        match self.get(key) {
            Some(Value::Text(text)) => vec![text.clone()],
            Some(Value::List(items)) => items.clone(),
            Some(Value::Block(items)) => items
                .iter()
                .filter_map(|item| match item {
                    Item::Text(text) => Some(text.clone()),
                    Item::Record(_) => None,
                })
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
