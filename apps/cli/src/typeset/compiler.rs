//! Typesetting compiler: resolution and the two-pass run.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::errors::AppError;

pub const DEFAULT_PROGRAM: &str = "xelatex";
pub const PASSES: usize = 2;

const INSTALL_HINT: &str = "Install XeLaTeX (macOS: `brew install --cask basictex`, \
    Debian/Ubuntu: `apt install texlive-xetex`), make sure it is on PATH, \
    or point RESUME_TYPESETTER at the binary.";

/// Lines of log kept when no error line matches.
const LOG_TAIL_LINES: usize = 20;
const MAX_ERROR_LINES: usize = 5;

/// Finds the compiler binary: explicit path, then `PATH`, then `fallbacks`.
pub fn resolve(
    explicit: Option<&Path>,
    program: &str,
    fallbacks: &[PathBuf],
) -> Result<PathBuf, AppError> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        return Err(AppError::CompilerMissing {
            hint: format!("{} does not exist. {INSTALL_HINT}", path.display()),
        });
    }

    if let Ok(found) = which::which(program) {
        return Ok(found);
    }

    fallbacks
        .iter()
        .find(|path| path.is_file())
        .cloned()
        .ok_or_else(|| AppError::CompilerMissing {
            hint: INSTALL_HINT.to_string(),
        })
}

/// A resolved compiler plus its per-pass timeout.
#[derive(Debug, Clone)]
pub struct Typesetter {
    program: PathBuf,
    timeout: Duration,
}

enum PassOutcome {
    Ok,
    Failed { code: Option<i32>, stderr: String },
    TimedOut,
}

impl Typesetter {
    pub fn new(program: PathBuf, timeout: Duration) -> Self {
        Self { program, timeout }
    }

    /// Runs both passes over `template_name` inside `work_dir` and returns the
    /// artifact path. Both passes always run; the first failure is reported.
    pub async fn compile(&self, work_dir: &Path, template_name: &str) -> Result<PathBuf, AppError> {
        let stem = Path::new(template_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(template_name)
            .to_string();

        // (message, stderr) of the first failing pass
        let mut failure: Option<(String, String)> = None;
        for pass in 1..=PASSES {
            debug!(pass, program = %self.program.display(), template_name, "Running compiler pass");
            let failed = match self.run_pass(work_dir, template_name).await? {
                PassOutcome::Ok => None,
                PassOutcome::Failed { code, stderr } => {
                    let exit = code.map_or_else(|| "a signal".to_string(), |c| format!("code {c}"));
                    warn!(pass, %exit, "Compiler pass failed");
                    Some((format!("pass {pass} exited with {exit}"), stderr))
                }
                PassOutcome::TimedOut => {
                    warn!(pass, timeout_secs = self.timeout.as_secs(), "Compiler pass timed out");
                    Some((
                        format!("pass {pass} timed out after {}s", self.timeout.as_secs()),
                        String::new(),
                    ))
                }
            };
            if failure.is_none() {
                failure = failed;
            }
        }

        let artifact = work_dir.join(format!("{stem}.pdf"));
        if failure.is_none() && !artifact.is_file() {
            failure = Some((
                format!("{stem}.pdf not produced after {PASSES} passes"),
                String::new(),
            ));
        }

        match failure {
            None => {
                info!(artifact = %artifact.display(), "Compilation succeeded");
                Ok(artifact)
            }
            Some((message, stderr)) => Err(AppError::Compile {
                message,
                log_tail: diagnostic(&work_dir.join(format!("{stem}.log")), &stderr),
            }),
        }
    }

    async fn run_pass(&self, work_dir: &Path, template_name: &str) -> Result<PassOutcome, AppError> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-interaction=nonstopmode")
            .arg(template_name)
            .current_dir(work_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        match tokio::time::timeout(self.timeout, cmd.output()).await {
            Err(_) => Ok(PassOutcome::TimedOut),
            Ok(output) => {
                let output = output?;
                if output.status.success() {
                    Ok(PassOutcome::Ok)
                } else {
                    Ok(PassOutcome::Failed {
                        code: output.status.code(),
                        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
                    })
                }
            }
        }
    }
}

/// Error lines from the compiler log, or its tail, or the captured stderr.
pub fn diagnostic(log_path: &Path, stderr: &str) -> String {
    if let Ok(bytes) = std::fs::read(log_path) {
        let log = String::from_utf8_lossy(&bytes);
        let lines: Vec<&str> = log.lines().collect();

        let errors: Vec<&str> = lines
            .iter()
            .copied()
            .filter(|line| line.contains('!') || line.contains("Error") || line.contains("error"))
            .take(MAX_ERROR_LINES)
            .collect();
        if !errors.is_empty() {
            return errors.join("\n");
        }

        let start = lines.len().saturating_sub(LOG_TAIL_LINES);
        let tail = lines[start..].join("\n");
        if !tail.trim().is_empty() {
            return tail;
        }
    }
    stderr.trim().to_string()
}
