// src/infrastructure/renderer.rs
use crate::constants::BROWSER_LAUNCH_DELAY_MS;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{Builder, TempDir};
use tracing::{debug, instrument};

/// Writes rendered pages to disk and hands them to the browser.
#[derive(Debug, Default)]
pub struct PageRenderer {
    // Keep last temp dir alive to prevent deletion
    temp_dir: Option<TempDir>,
}

impl PageRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_to(&self, path: &Path, html: &str) -> Result<()> {
        File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?
            .write_all(html.as_bytes())
            .with_context(|| format!("Failed to write page to {}", path.display()))?;
        debug!(?path, bytes = html.len(), "Wrote page");
        Ok(())
    }

    pub fn create_temp_file(&mut self, html: &str) -> Result<PathBuf> {
        let temp_dir = Builder::new()
            .prefix("notesboard-")
            .rand_bytes(5)
            .tempdir()
            .context("Failed to create temporary directory")?;

        let file_path = temp_dir.path().join("notes.html");
        self.write_to(&file_path, html)?;
        self.temp_dir = Some(temp_dir);

        Ok(file_path)
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn open_in_browser(&self, path: &Path) -> Result<()> {
        let path_str = path.to_str().context("Failed to convert path to string")?;

        #[cfg(target_os = "macos")]
        {
            std::process::Command::new("open")
                .arg(path_str)
                .spawn()
                .context("Failed to open browser")?;
        }
        #[cfg(target_os = "windows")]
        {
            std::process::Command::new("cmd")
                .args(["/C", "start", path_str])
                .spawn()
                .context("Failed to open browser")?;
        }
        #[cfg(target_os = "linux")]
        {
            std::process::Command::new("xdg-open")
                .arg(path_str)
                .spawn()
                .context("Failed to open browser")?;
        }

        wait_for_browser_launch().await;

        Ok(())
    }
}

/// Give the browser time to read the file before the temp dir goes away
async fn wait_for_browser_launch() {
    tokio::time::sleep(std::time::Duration::from_millis(BROWSER_LAUNCH_DELAY_MS)).await;
}
