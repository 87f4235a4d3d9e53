//! Document Assembler: stages fragments and a template in a fresh scratch
//! directory, compiles, and copies the artifact to its destination.
//!
//! The scratch directory is kept on every path for post-mortem inspection.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::render::{Fragment, RenderMode};
use crate::typeset::compiler::Typesetter;
use crate::typeset::templates::TemplateSource;

/// Result of a successful assembly.
#[derive(Debug, Clone)]
pub struct Assembled {
    pub output: PathBuf,
    pub scratch_dir: PathBuf,
}

pub struct Assembler {
    typesetter: Typesetter,
    templates: TemplateSource,
    scratch_root: PathBuf,
}

impl Assembler {
    pub fn new(typesetter: Typesetter, templates: TemplateSource) -> Self {
        Self {
            typesetter,
            templates,
            scratch_root: std::env::temp_dir(),
        }
    }

    /// Creates scratch directories under `root` instead of the system temp dir.
    #[cfg(test)]
    pub fn with_scratch_root(mut self, root: PathBuf) -> Self {
        self.scratch_root = root;
        self
    }

    pub async fn assemble(
        &self,
        fragments: &[Fragment],
        mode: RenderMode,
        output: &Path,
    ) -> Result<Assembled, AppError> {
        let scratch_dir = self.create_scratch(mode)?;
        info!(scratch_dir = %scratch_dir.display(), "Working directory");

        match self.build(&scratch_dir, fragments, mode, output).await {
            Ok(()) => {
                info!(output = %output.display(), "Resume generated");
                Ok(Assembled {
                    output: output.to_path_buf(),
                    scratch_dir,
                })
            }
            Err(e) => {
                warn!(scratch_dir = %scratch_dir.display(), "Assembly failed; scratch files kept");
                Err(e)
            }
        }
    }

    fn create_scratch(&self, mode: RenderMode) -> Result<PathBuf, AppError> {
        let prefix = match mode {
            RenderMode::Full => "resume_",
            RenderMode::Condensed => "resume_onepage_",
        };
        let dir = tempfile::Builder::new()
            .prefix(prefix)
            .tempdir_in(&self.scratch_root)?;
        Ok(dir.keep())
    }

    async fn build(
        &self,
        scratch_dir: &Path,
        fragments: &[Fragment],
        mode: RenderMode,
        output: &Path,
    ) -> Result<(), AppError> {
        for fragment in fragments {
            std::fs::write(scratch_dir.join(fragment.file_name), &fragment.body)?;
            debug!(file = fragment.file_name, bytes = fragment.body.len(), "Wrote fragment");
        }

        let template_name = self.templates.stage(mode, scratch_dir)?;
        info!(template = %template_name, "Compiling");
        let artifact = self.typesetter.compile(scratch_dir, &template_name).await?;

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::copy(&artifact, output)?;
        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::models::resume::Resume;
    use crate::render::render_document;
    use crate::typeset::compiler::tests::fake;
    use std::time::Duration;
    use tempfile::TempDir;

    fn assembler(bin: &Path, body: &str, root: &Path, templates: TemplateSource) -> Assembler {
        let program = fake::compiler(bin, body);
        Assembler::new(Typesetter::new(program, Duration::from_secs(10)), templates)
            .with_scratch_root(root.to_path_buf())
    }

    fn scratch_dirs(root: &Path) -> Vec<String> {
        std::fs::read_dir(root)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_assemble_writes_fragments_and_copies_artifact() {
        let bin = TempDir::new().unwrap();
        let root = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();
        let output = out_dir.path().join("nested/dir/resume.pdf");

        let fragments = render_document(&Resume::default(), "core", RenderMode::Full);
        let assembled = assembler(bin.path(), fake::WRITES_PDF, root.path(), TemplateSource::BuiltIn)
            .assemble(&fragments, RenderMode::Full, &output)
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(&output).unwrap(), "%PDF-1.4 fake");
        assert!(assembled.scratch_dir.exists());
        for fragment in &fragments {
            assert!(assembled.scratch_dir.join(fragment.file_name).is_file());
        }
        let passes = std::fs::read_to_string(assembled.scratch_dir.join("passes.log")).unwrap();
        assert_eq!(passes.lines().count(), 2);
        let name = assembled.scratch_dir.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("resume_"));
        assert!(!name.starts_with("resume_onepage_"));
    }

    #[tokio::test]
    async fn test_onepage_uses_directory_template() {
        let bin = TempDir::new().unwrap();
        let root = TempDir::new().unwrap();
        let templates = TempDir::new().unwrap();
        std::fs::write(templates.path().join("onepage_cv_template.tex"), "tpl").unwrap();
        std::fs::write(templates.path().join("stylishcv.cls"), "cls").unwrap();
        let output = root.path().join("out.pdf");

        let fragments = render_document(&Resume::default(), "core", RenderMode::Condensed);
        let assembled = assembler(
            bin.path(),
            fake::WRITES_PDF,
            root.path(),
            TemplateSource::Directory(templates.path().to_path_buf()),
        )
        .assemble(&fragments, RenderMode::Condensed, &output)
        .await
        .unwrap();

        assert!(output.is_file());
        assert!(assembled.scratch_dir.join("stylishcv.cls").is_file());
        assert!(assembled.scratch_dir.join("onepage_cv_template.pdf").is_file());
        let passes = std::fs::read_to_string(assembled.scratch_dir.join("passes.log")).unwrap();
        assert!(passes.contains("onepage_cv_template.tex"));
        let name = assembled.scratch_dir.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("resume_onepage_"));
    }

    #[tokio::test]
    async fn test_failure_keeps_scratch_and_writes_no_output() {
        let bin = TempDir::new().unwrap();
        let root = TempDir::new().unwrap();
        let output = root.path().join("never.pdf");

        let fragments = render_document(&Resume::default(), "core", RenderMode::Full);
        let err = assembler(bin.path(), "exit 2", root.path(), TemplateSource::BuiltIn)
            .assemble(&fragments, RenderMode::Full, &output)
            .await
            .unwrap_err();

        assert_eq!(err.code(), "COMPILE_FAILED");
        assert!(!output.exists());
        let dirs = scratch_dirs(root.path());
        assert_eq!(dirs.len(), 1);
        assert!(dirs[0].starts_with("resume_"));
    }

    #[tokio::test]
    async fn test_missing_template_dir_entry_fails_before_compiling() {
        let bin = TempDir::new().unwrap();
        let root = TempDir::new().unwrap();
        let templates = TempDir::new().unwrap();
        let output = root.path().join("never.pdf");

        let fragments = render_document(&Resume::default(), "core", RenderMode::Full);
        let err = assembler(
            bin.path(),
            fake::WRITES_PDF,
            root.path(),
            TemplateSource::Directory(templates.path().to_path_buf()),
        )
        .assemble(&fragments, RenderMode::Full, &output)
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::TemplateNotFound(_)));
        let dirs = scratch_dirs(root.path());
        assert_eq!(dirs.len(), 1);
        let scratch = root.path().join(&dirs[0]);
        assert!(!scratch.join("passes.log").exists());
    }
}
