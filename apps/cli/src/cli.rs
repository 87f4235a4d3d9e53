//! Command-line surface.
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Default focus tag for renders.
pub const DEFAULT_FOCUS: &str = "core";

#[derive(Parser, Debug)]
#[command(
    name = "resume",
    version,
    about = "Render a résumé from structured section files, optionally tailored to a job",
    after_help = "Examples:\n  resume render data/ out/resume.pdf\n  resume render data/ out/onepage.pdf --onepage --focus backend --template-dir templates/\n  resume customize data/ jobs/acme.txt acme_backend\n  resume render data/custom_acme_backend/ out/acme.pdf --focus acme_backend\n  resume analyze jobs/acme.txt",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    /// Debug-level logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Render(RenderArgs),
    Customize(CustomizeArgs),
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug)]
#[command(about = "Render the résumé to a typeset document")]
pub struct RenderArgs {
    /// Directory holding meta.md, work_experience.md, projects.md, education.md, skills.md
    #[arg(value_name = "DATA_DIR")]
    pub data_dir: PathBuf,

    /// Destination of the typeset document
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Template directory; the built-in templates are used when omitted
    #[arg(long, value_name = "DIR")]
    pub template_dir: Option<PathBuf>,

    /// Only work and project entries carrying this tag are rendered
    #[arg(long, value_name = "TAG", default_value = DEFAULT_FOCUS)]
    pub focus: String,

    /// Condensed one-page layout
    #[arg(long)]
    pub onepage: bool,

    /// Typesetting compiler binary (overrides RESUME_TYPESETTER)
    #[arg(long, value_name = "PATH")]
    pub compiler: Option<PathBuf>,
}

#[derive(Args, Debug)]
#[command(about = "Create a job-specific variant of the data directory")]
pub struct CustomizeArgs {
    #[arg(value_name = "DATA_DIR")]
    pub data_dir: PathBuf,

    /// File containing the job description
    #[arg(value_name = "JOB_DESCRIPTION_FILE")]
    pub job_description: PathBuf,

    /// Variant name; also the tag added to every rewritten entry
    #[arg(value_name = "LABEL")]
    pub label: String,

    /// API key (overrides ANTHROPIC_API_KEY)
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,
}

#[derive(Args, Debug)]
#[command(about = "Print the structured analysis of a job description as JSON")]
pub struct AnalyzeArgs {
    #[arg(value_name = "JOB_DESCRIPTION_FILE")]
    pub job_description: PathBuf,

    /// API key (overrides ANTHROPIC_API_KEY)
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,
}
