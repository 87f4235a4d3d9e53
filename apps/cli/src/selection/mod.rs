// Tag Filter and Summarizer. Pure functions, no I/O.

pub mod summarize;
pub mod tags;

pub use summarize::summarize;
pub use tags::{filter_by_tag, TagSet};
