mod cli;
mod config;
mod customize;
mod errors;
mod llm_client;
mod models;
mod records;
mod render;
mod selection;
mod typeset;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{AnalyzeArgs, Command, CustomizeArgs, RenderArgs, RootArgs};
use crate::config::Config;
use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::render::{render_document, RenderMode};
use crate::typeset::{Assembler, TemplateSource, Typesetter};

#[tokio::main]
async fn main() -> Result<()> {
    let args = RootArgs::parse();

    let config = Config::from_env().context("Failed to load configuration")?;

    // Logs go to stderr so `analyze` output on stdout stays clean
    let level = if args.verbose { "debug" } else { config.rust_log.as_str() };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("resume v{}", env!("CARGO_PKG_VERSION"));

    let outcome = match args.command {
        Command::Render(args) => run_render(args, &config).await,
        Command::Customize(args) => run_customize(args, &config).await,
        Command::Analyze(args) => run_analyze(args, &config).await,
    };

    if let Err(e) = outcome {
        error!(code = e.code(), "{e}");
        if let AppError::Compile { log_tail, .. } = &e {
            if !log_tail.is_empty() {
                error!("Compiler log:\n{log_tail}");
            }
        }
        std::process::exit(1);
    }
    Ok(())
}

async fn run_render(args: RenderArgs, config: &Config) -> Result<(), AppError> {
    require_dir(&args.data_dir, "Data directory")?;
    let templates = match args.template_dir {
        Some(dir) => {
            require_dir(&dir, "Template directory")?;
            TemplateSource::Directory(dir)
        }
        None => TemplateSource::BuiltIn,
    };

    // Resolved before any work so a missing compiler fails fast
    let explicit = args.compiler.as_deref().or(config.typesetter.as_deref());
    let program = typeset::resolve(explicit, typeset::DEFAULT_PROGRAM, &config.typesetter_paths)?;
    info!("Typesetting compiler: {}", program.display());

    let mode = if args.onepage {
        RenderMode::Condensed
    } else {
        RenderMode::Full
    };
    info!(focus = %args.focus, ?mode, "Loading resume data from {}", args.data_dir.display());
    let resume = records::load_resume(&args.data_dir);
    let fragments = render_document(&resume, &args.focus, mode);

    let assembler = Assembler::new(Typesetter::new(program, config.compile_timeout), templates);
    let assembled = assembler.assemble(&fragments, mode, &args.output).await?;
    info!(
        "Resume written to {} (working files in {})",
        assembled.output.display(),
        assembled.scratch_dir.display()
    );
    Ok(())
}

async fn run_customize(args: CustomizeArgs, config: &Config) -> Result<(), AppError> {
    require_dir(&args.data_dir, "Data directory")?;
    let jd_text = read_job_description(&args.job_description)?;
    let llm = build_llm_client(args.api_key, config)?;

    let report = customize::create_variant(&llm, &args.data_dir, &jd_text, &args.label).await?;
    info!(
        level = %report.analysis.experience_level,
        focus = %report.analysis.role_focus,
        required = report.analysis.required_skills.len(),
        "Custom resume variant created in {}",
        report.dir.display()
    );
    info!("Files: {}", report.files.join(", "));
    info!(
        "To render it: resume render {} resume_{}.pdf --focus {}",
        report.dir.display(),
        report.label,
        report.label
    );
    Ok(())
}

async fn run_analyze(args: AnalyzeArgs, config: &Config) -> Result<(), AppError> {
    let jd_text = read_job_description(&args.job_description)?;
    let llm = build_llm_client(args.api_key, config)?;

    let (_, raw) = customize::analyze_job(&llm, &jd_text).await?;
    let pretty = serde_json::to_string_pretty(&raw).map_err(|e| AppError::Internal(e.into()))?;
    println!("{pretty}");
    Ok(())
}

fn build_llm_client(api_key: Option<String>, config: &Config) -> Result<LlmClient, AppError> {
    let api_key = api_key.or_else(|| config.anthropic_api_key.clone());
    let llm = LlmClient::new(api_key, config.llm_model.clone(), config.llm_timeout)
        .map_err(|e| AppError::Llm(e.to_string()))?;
    info!("LLM client initialized (model: {})", config.llm_model);
    Ok(llm)
}

fn require_dir(path: &Path, what: &str) -> Result<(), AppError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(AppError::Validation(format!("{what} not found: {}", path.display())))
    }
}

fn read_job_description(path: &Path) -> Result<String, AppError> {
    if !path.is_file() {
        return Err(AppError::Validation(format!(
            "Job description file not found: {}",
            path.display()
        )));
    }
    Ok(std::fs::read_to_string(path)?)
}
