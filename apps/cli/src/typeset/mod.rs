pub mod assembler;
pub mod compiler;
pub mod templates;

pub use assembler::Assembler;
pub use compiler::{resolve, Typesetter, DEFAULT_PROGRAM};
pub use templates::TemplateSource;
