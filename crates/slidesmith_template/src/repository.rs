//! Filesystem-backed template repository.

use crate::SlideTemplate;
use slidesmith_error::{SlidesmithResult, TemplateError, TemplateErrorKind};
use std::path::{Path, PathBuf};

/// Scans a directory of template subdirectories.
///
/// The repository is a read-only filesystem resource; concurrent pipeline
/// runs may scan it safely.
#[derive(Debug, Clone, derive_getters::Getters)]
pub struct TemplateRepository {
    /// Root directory containing one subdirectory per template
    templates_dir: PathBuf,
}

impl TemplateRepository {
    /// Create a repository rooted at the given directory.
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
        }
    }

    /// List all templates found under the root, sorted by identifier.
    ///
    /// Subdirectories that fail to load are skipped with a warning rather
    /// than failing the whole scan.
    #[tracing::instrument(skip(self), fields(dir = %self.templates_dir.display()))]
    pub fn list(&self) -> SlidesmithResult<Vec<SlideTemplate>> {
        let entries = std::fs::read_dir(&self.templates_dir).map_err(|e| {
            TemplateError::new(TemplateErrorKind::FileRead(format!(
                "{}: {}",
                self.templates_dir.display(),
                e
            )))
        })?;

        let mut templates = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            match SlideTemplate::from_dir(&path) {
                Ok(template) => templates.push(template),
                Err(e) => {
                    tracing::warn!(
                        dir = %path.display(),
                        error = %e,
                        "Skipping unloadable template directory"
                    );
                }
            }
        }

        templates.sort_by(|a, b| a.id().cmp(b.id()));
        tracing::debug!(count = templates.len(), "Scanned template repository");
        Ok(templates)
    }

    /// Load a template by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if no subdirectory with that identifier exists.
    pub fn get(&self, template_id: &str) -> SlidesmithResult<SlideTemplate> {
        let dir = self.templates_dir.join(template_id);
        if !dir.is_dir() {
            return Err(TemplateError::new(TemplateErrorKind::NotFound(
                template_id.to_string(),
            )))?;
        }
        SlideTemplate::from_dir(&dir)
    }

    /// Root directory as a path.
    pub fn root(&self) -> &Path {
        &self.templates_dir
    }
}
