use thiserror::Error;

/// Application-level error type.
/// Every variant is fatal for the run; `main` logs it with its code and exits non-zero.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Typesetting compiler not found. {hint}")]
    CompilerMissing { hint: String },

    #[error("Compilation failed: {message}")]
    Compile { message: String, log_tail: String },

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable machine-readable code for the final log line.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::CompilerMissing { .. } => "COMPILER_MISSING",
            AppError::Compile { .. } => "COMPILE_FAILED",
            AppError::TemplateNotFound(_) => "TEMPLATE_NOT_FOUND",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Llm(_) => "LLM_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
