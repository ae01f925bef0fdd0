//! Rasterization of page trees through the Typst CLI.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tempfile::tempdir;
use thiserror::Error;
use tokio::process::Command;

use crate::render::typst::to_typst_source;
use crate::render::{PageGeometry, VisualTree};

const SOURCE_FILE: &str = "document.typ";
const OUTPUT_FILE: &str = "page.png";

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("failed to create temporary directory: {0}")]
    TempDir(#[source] std::io::Error),
    #[error("failed to load embedded image {path}: {source}")]
    Asset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write Typst source: {0}")]
    WriteSource(#[source] std::io::Error),
    #[error("Typst CLI execution failed: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("Typst CLI exited with status {code}: {stderr}")]
    Exit { code: i32, stderr: String },
    #[error("failed to read rasterized page: {0}")]
    ReadOutput(#[source] std::io::Error),
    #[error("rasterizer produced an empty image")]
    Empty,
}

/// Turns a page tree into a PNG of the content area.
#[async_trait]
pub trait Rasterizer: Send + Sync {
    async fn rasterize(&self, tree: &VisualTree) -> Result<Vec<u8>, RasterError>;
}

/// Compiles the tree with `typst compile --format png` at twice 72 dpi.
pub struct TypstRasterizer {
    binary: String,
}

impl TypstRasterizer {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for TypstRasterizer {
    fn default() -> Self {
        Self::new("typst")
    }
}

#[async_trait]
impl Rasterizer for TypstRasterizer {
    async fn rasterize(&self, tree: &VisualTree) -> Result<Vec<u8>, RasterError> {
        let temp_dir = tempdir().map_err(RasterError::TempDir)?;

        // Typst only reads files below the compilation root.
        let logo_file = match &tree.header.logo {
            Some(logo) => Some(stage_logo(logo, temp_dir.path()).await?),
            None => None,
        };

        let source = to_typst_source(tree, logo_file.as_deref());
        tokio::fs::write(temp_dir.path().join(SOURCE_FILE), source)
            .await
            .map_err(RasterError::WriteSource)?;

        let output = Command::new(&self.binary)
            .arg("compile")
            .arg(SOURCE_FILE)
            .arg(OUTPUT_FILE)
            .arg("--format")
            .arg("png")
            .arg("--ppi")
            .arg(PageGeometry::raster_ppi().to_string())
            .current_dir(temp_dir.path())
            .output()
            .await
            .map_err(RasterError::Spawn)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            log::error!("Typst rasterization failed: {}", stderr);
            return Err(RasterError::Exit {
                code: output.status.code().unwrap_or(-1),
                stderr,
            });
        }

        let png = tokio::fs::read(temp_dir.path().join(OUTPUT_FILE))
            .await
            .map_err(RasterError::ReadOutput)?;
        if png.is_empty() {
            return Err(RasterError::Empty);
        }

        log::debug!("Rasterized page: {} bytes", png.len());
        Ok(png)
    }
}

/// Copy the logo next to the source; returns its relative name.
async fn stage_logo(logo: &Path, root: &Path) -> Result<String, RasterError> {
    let extension = logo
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("png")
        .to_lowercase();
    let name = format!("logo.{extension}");

    tokio::fs::copy(logo, root.join(&name))
        .await
        .map_err(|source| RasterError::Asset {
            path: logo.to_path_buf(),
            source,
        })?;
    Ok(name)
}
