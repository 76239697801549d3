use std::path::{Path, PathBuf};
use std::time::Instant;
use anyhow::Context;
use crate::common::LabelMap;
use crate::data::{image_stem, OutputWriter, SegMask};
use crate::segmentation_runners::inference_process::InferenceProcess;
use crate::segmentation_runners::OrtSegmenter;

/// What was produced for one input image.
#[derive(Debug, Clone)]
pub struct ImageOutcome {
    pub stem: String,
    pub color_label_path: PathBuf,
    pub logits_path: Option<PathBuf>,
    pub mask: SegMask,
}

/// Expands a glob pattern into a sorted, de-duplicated list of files.
pub fn find_images(pattern: &str) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in glob::glob(pattern).with_context(|| format!("Invalid image file pattern `{pattern}`"))? {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(err) => log::warn!("Skipping unreadable path: {}", err),
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

/// Counts of a run over a list of images.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn succeeded(&self) -> usize {
        self.total - self.failed
    }

    pub fn all_ok(&self) -> bool {
        self.failed == 0
    }
}

/// Runs `process` on every image in order. A failing image is logged and counted,
/// the rest are still processed.
pub fn process_images<F>(images: &[PathBuf], mut process: F) -> BatchSummary
where
    F: FnMut(&Path) -> anyhow::Result<PathBuf>,
{
    let total = images.len();
    let mut failed = 0usize;
    for (i, path) in images.iter().enumerate() {
        match process(path) {
            Ok(written) => log::info!("[{}/{}] {}", i + 1, total, written.display()),
            Err(err) => {
                failed += 1;
                log::error!("[{}/{}] {}: {:#}", i + 1, total, path.display(), err);
            }
        }
    }
    BatchSummary { total, failed }
}

/// Segments one image file and writes its colorized mask, plus the raw scores
/// when `save_logits` is set. The segmenter must be built with `retain_scores`
/// for the scores to be available.
pub fn process_image_file(
    segmenter: &mut OrtSegmenter,
    path: &Path,
    writer: &OutputWriter,
    save_logits: bool,
    label_map: &LabelMap,
    profile: bool,
) -> anyhow::Result<ImageOutcome> {
    let now = Instant::now();

    let image = image::open(path).with_context(|| format!("Failed to decode {}", path.display()))?;
    let stem = image_stem(path);

    let mut masks = segmenter.forward(std::slice::from_ref(&image), profile)?;
    let mask = match masks.pop() {
        Some(mask) => mask,
        None => anyhow::bail!("Model returned no mask for {}", path.display()),
    };

    let color_label = mask.to_rgb8().with_context(|| format!("Failed to colorize {}", path.display()))?;
    let color_label_path = writer.write_color_label(&stem, &color_label)?;

    let logits_path = match (save_logits, segmenter.take_scores()) {
        (true, Some(scores)) => Some(writer.write_logits(&stem, &scores.0)?),
        (true, None) => anyhow::bail!("No class scores retained for {}", path.display()),
        (false, _) => None,
    };

    log::info!(
        "Processed {} ({}x{}) in {:.2?}: {}",
        stem,
        mask.dim().1,
        mask.dim().0,
        now.elapsed(),
        mask.summary(label_map)
    );

    Ok(ImageOutcome {
        stem,
        color_label_path,
        logits_path,
        mask,
    })
}
