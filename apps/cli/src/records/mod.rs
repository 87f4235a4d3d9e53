// Record Loader: front-matter section files → tagged values.
// Parsing is best-effort and never aborts a render.

pub mod loader;
pub mod parser;
pub mod value;
pub mod writer;

pub use loader::load_resume;
