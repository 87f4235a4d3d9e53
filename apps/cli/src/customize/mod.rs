pub mod analysis;
pub mod prompts;
pub mod variant;

pub use analysis::analyze_job;
pub use variant::create_variant;
