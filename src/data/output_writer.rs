//! Writes segmentation results to the output directory.

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use anyhow::Context;
use image::RgbImage;
use ndarray::ArrayD;

#[derive(Debug, Clone)]
pub struct OutputWriter {
    dir: PathBuf,
}

impl OutputWriter {
    /// Creates the output directory (and parents) if it does not exist.
    pub fn new<P: AsRef<Path>>(dir: P) -> anyhow::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        Self::create_directory(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn color_label_path(&self, stem: &str) -> PathBuf {
        self.dir.join(format!("{stem}_colorlabel.png"))
    }

    pub fn logits_path(&self, stem: &str) -> PathBuf {
        self.dir.join(format!("{stem}_predlogit.bin"))
    }

    /// Saves the colorized mask as `<stem>_colorlabel.png`.
    pub fn write_color_label(&self, stem: &str, img: &RgbImage) -> anyhow::Result<PathBuf> {
        let path = self.color_label_path(stem);
        img.save_with_format(&path, image::ImageFormat::Png)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Dumps raw scores as little-endian f32, row-major in the model's output layout.
    pub fn write_logits(&self, stem: &str, logits: &ArrayD<f32>) -> anyhow::Result<PathBuf> {
        let path = self.logits_path(stem);
        let file = std::fs::File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let mut w = BufWriter::new(file);
        // iter() walks in logical order regardless of memory layout
        for v in logits.iter() {
            w.write_all(&v.to_le_bytes())?;
        }
        w.flush()?;
        Ok(path)
    }

    fn create_directory(path: &Path) -> anyhow::Result<()> {
        if !path.exists() {
            std::fs::create_dir_all(path)
                .with_context(|| format!("Failed to create output directory {}", path.display()))?;
        }
        Ok(())
    }
}

/// File name without its extension, used to name outputs.
pub fn image_stem<P: AsRef<Path>>(path: P) -> String {
    path.as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string())
}
