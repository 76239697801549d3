use anyhow::Result;
use image::RgbImage;
use ndarray::{Array2, Array3};
use crate::common::{label_to_color, label_to_rgb8, LabelMap};

/// Per-image segmentation result.
///
/// Holds the class index map produced by arg-maxing the model scores, at the
/// model's output resolution.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SegMask {
    labels: Array2<usize>,
    num_classes: usize,
}

impl SegMask {
    pub fn new(labels: Array2<usize>, num_classes: usize) -> Self {
        Self { labels, num_classes }
    }

    pub fn labels(&self) -> &Array2<usize> {
        &self.labels
    }

    pub fn into_labels(self) -> Array2<usize> {
        self.labels
    }

    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    /// (height, width)
    pub fn dim(&self) -> (usize, usize) {
        self.labels.dim()
    }

    pub fn colorize(&self) -> Result<Array3<f32>> {
        Ok(label_to_color(self.labels.view())?)
    }

    pub fn to_rgb8(&self) -> Result<RgbImage> {
        label_to_rgb8(self.labels.view())
    }

    /// Pixel count per class, only for classes present in the mask, sorted by id.
    pub fn class_histogram(&self) -> Vec<(usize, usize)> {
        let mut counts = vec![0usize; self.num_classes.max(1)];
        for &l in self.labels.iter() {
            if l >= counts.len() {
                counts.resize(l + 1, 0);
            }
            counts[l] += 1;
        }
        counts
            .into_iter()
            .enumerate()
            .filter(|(_, n)| *n > 0)
            .collect()
    }

    /// One line summary of the classes found, e.g. `background 80.0% | person 20.0%`.
    pub fn summary(&self, label_map: &LabelMap) -> String {
        let total = self.labels.len().max(1) as f32;
        self.class_histogram()
            .into_iter()
            .map(|(id, n)| format!("{} {:.1}%", label_map.display_name(id), n as f32 * 100.0 / total))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}
