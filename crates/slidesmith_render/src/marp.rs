//! Marp CLI invocation.

use slidesmith_core::RenderFormat;
use slidesmith_error::{RenderError, RenderErrorKind, SlidesmithResult};
use slidesmith_interface::Renderer;
use std::path::PathBuf;
use tokio::process::{Child, Command};
use tracing::{debug, info, instrument};

/// Renders Markdown decks through the external `marp` CLI.
#[derive(Debug, Clone)]
pub struct MarpRenderer {
    /// Binary to invoke (normally `marp` on PATH)
    command: String,
    /// Working directory for temp files
    work_dir: PathBuf,
}

/// Handle to a running `marp --server --watch` preview process.
///
/// Dropping the handle does not stop the process; call [`PreviewHandle::stop`].
pub struct PreviewHandle {
    child: Child,
}

impl PreviewHandle {
    /// Terminate the preview process.
    pub async fn stop(mut self) -> SlidesmithResult<()> {
        self.child.kill().await.map_err(|e| {
            RenderError::new(RenderErrorKind::ProcessFailed(format!(
                "failed to stop preview: {}",
                e
            )))
            .into()
        })
    }
}

impl MarpRenderer {
    /// Create a renderer using `marp` from PATH and the system temp
    /// directory for working files.
    pub fn new() -> SlidesmithResult<Self> {
        Self::with_command("marp")
    }

    /// Create a renderer invoking a custom binary.
    pub fn with_command(command: impl Into<String>) -> SlidesmithResult<Self> {
        let work_dir = std::env::temp_dir().join("slidesmith");
        std::fs::create_dir_all(&work_dir).map_err(|e| {
            RenderError::new(RenderErrorKind::Io(format!(
                "{}: {}",
                work_dir.display(),
                e
            )))
        })?;

        Ok(Self {
            command: command.into(),
            work_dir,
        })
    }

    /// Launch interactive preview (serve + watch) over a directory.
    ///
    /// Outside the pipeline's concern; provided for callers that want live
    /// editing against rendered output.
    #[instrument(skip(self))]
    pub fn preview(&self, directory: &std::path::Path) -> SlidesmithResult<PreviewHandle> {
        let child = Command::new(&self.command)
            .arg("--server")
            .arg("--watch")
            .arg(directory)
            .kill_on_drop(false)
            .spawn()
            .map_err(|e| {
                RenderError::new(RenderErrorKind::ProcessFailed(format!(
                    "failed to spawn preview: {}",
                    e
                )))
            })?;

        info!(dir = %directory.display(), "Started marp preview server");
        Ok(PreviewHandle { child })
    }

    fn scratch_path(&self, token: &str, extension: &str) -> PathBuf {
        self.work_dir.join(format!("{}.{}", token, extension))
    }
}

#[async_trait::async_trait]
impl Renderer for MarpRenderer {
    #[instrument(skip(self, markdown, stylesheet), fields(format = %format, markdown_chars = markdown.len()))]
    async fn render(
        &self,
        markdown: &str,
        stylesheet: Option<&str>,
        format: RenderFormat,
    ) -> SlidesmithResult<Vec<u8>> {
        let token = uuid::Uuid::new_v4().to_string();
        let md_path = self.scratch_path(&token, "md");
        let css_path = self.scratch_path(&token, "css");
        let out_path = self.scratch_path(&token, format.extension());

        let io_err =
            |e: std::io::Error| RenderError::new(RenderErrorKind::Io(e.to_string()));

        tokio::fs::write(&md_path, markdown).await.map_err(io_err)?;

        let mut command = Command::new(&self.command);
        command.arg(&md_path);
        if let Some(css) = stylesheet {
            tokio::fs::write(&css_path, css).await.map_err(io_err)?;
            command.arg("--theme").arg(&css_path);
        }
        command.arg("-o").arg(&out_path);

        debug!(out = %out_path.display(), "Invoking marp");
        let result = async {
            let output = command.output().await.map_err(|e| {
                RenderError::new(RenderErrorKind::ProcessFailed(e.to_string()))
            })?;

            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                return Err(RenderError::new(RenderErrorKind::ProcessFailed(format!(
                    "{}: {}",
                    output.status, stderr
                ))))?;
            }

            tokio::fs::read(&out_path).await.map_err(|_| {
                RenderError::new(RenderErrorKind::MissingOutput(
                    out_path.display().to_string(),
                ))
                .into()
            })
        }
        .await;

        // Scratch files are per-invocation; clean up regardless of outcome.
        let _ = tokio::fs::remove_file(&md_path).await;
        let _ = tokio::fs::remove_file(&css_path).await;
        let _ = tokio::fs::remove_file(&out_path).await;

        result
    }
}
