//! On-disk slide template model.

use serde::{Deserialize, Serialize};
use slidesmith_error::{SlidesmithResult, TemplateError, TemplateErrorKind};
use slidesmith_interface::TemplateSource;
use std::path::{Path, PathBuf};

/// Template metadata from the `template.toml` config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Human-readable template name
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Intended presentation length in minutes
    #[serde(default = "default_duration")]
    pub duration_minutes: u32,
}

fn default_duration() -> u32 {
    10
}

/// A slide template backed by a directory.
///
/// Layout:
///
/// ```text
/// templates/basic_deck/
/// ├── template.toml   (name, description, duration)
/// ├── content.md      (whole-document templates only)
/// └── theme.css       (optional stylesheet)
/// ```
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct SlideTemplate {
    /// Template identifier (directory name)
    id: String,
    /// Human-readable name
    name: String,
    /// Human-readable description
    description: String,
    /// Backing directory
    template_dir: PathBuf,
    /// Intended presentation length in minutes
    duration_minutes: u32,
}

impl SlideTemplate {
    /// Load a template from its backing directory.
    ///
    /// Reads `template.toml` if present; otherwise synthesizes the name and
    /// description from the directory name.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory does not exist or `template.toml`
    /// is present but malformed.
    #[tracing::instrument(skip_all, fields(dir = %dir.as_ref().display()))]
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> SlidesmithResult<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(TemplateError::new(TemplateErrorKind::NotFound(
                dir.display().to_string(),
            )))?;
        }

        let id = dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let config_path = dir.join("template.toml");
        let config = if config_path.exists() {
            let raw = std::fs::read_to_string(&config_path).map_err(|e| {
                TemplateError::new(TemplateErrorKind::FileRead(format!(
                    "{}: {}",
                    config_path.display(),
                    e
                )))
            })?;
            toml::from_str::<TemplateConfig>(&raw).map_err(|e| {
                TemplateError::new(TemplateErrorKind::ConfigParse(format!(
                    "{}: {}",
                    config_path.display(),
                    e
                )))
            })?
        } else {
            TemplateConfig {
                name: id.replace('_', " "),
                description: format!("Template: {}", id),
                duration_minutes: default_duration(),
            }
        };

        Ok(Self {
            id,
            name: config.name,
            description: config.description,
            template_dir: dir.to_path_buf(),
            duration_minutes: config.duration_minutes,
        })
    }

    /// Path of the whole-document Markdown source.
    pub fn document_path(&self) -> PathBuf {
        self.template_dir.join("content.md")
    }

    /// Path of the optional stylesheet.
    pub fn stylesheet_path(&self) -> PathBuf {
        self.template_dir.join("theme.css")
    }

    /// Whether the backing directory and document exist.
    pub fn has_document(&self) -> bool {
        self.document_path().exists()
    }
}

impl TemplateSource for SlideTemplate {
    fn template_id(&self) -> &str {
        &self.id
    }

    fn read_document_text(&self) -> SlidesmithResult<String> {
        let path = self.document_path();
        if !path.exists() {
            return Err(TemplateError::new(TemplateErrorKind::NotFound(
                path.display().to_string(),
            )))?;
        }
        std::fs::read_to_string(&path).map_err(|e| {
            TemplateError::new(TemplateErrorKind::FileRead(format!(
                "{}: {}",
                path.display(),
                e
            )))
            .into()
        })
    }

    fn read_stylesheet_text(&self) -> Option<String> {
        std::fs::read_to_string(self.stylesheet_path()).ok()
    }

    fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }
}
