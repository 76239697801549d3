//! File/code adapted from https://github.com/jamjamjon/usls

use anyhow::Result;
use image::DynamicImage;
use ndarray::{ArrayViewD, Axis, Ix3};
use rayon::prelude::*;

use crate::common::InputLayout;
use crate::data::{ConfigOrt, SegMask, Xs, X};
use crate::segmentation_runners::inference_process::InferenceProcess;
use crate::segmentation_runners::ort_segmenter::image_ops;
use crate::segmentation_runners::ort_segmenter::OrtEngine;

#[derive(Debug)]
pub struct OrtSegmenter {
    engine: OrtEngine,
    image_size: u32,
    layout: InputLayout,
    output_name: String,
    mean: [f32; 3],
    std: [f32; 3],
    retain_scores: bool,
    scores: Option<X>,
}

impl InferenceProcess for OrtSegmenter {
    type Input = DynamicImage;

    fn new(options: ConfigOrt) -> Result<Self> {
        let engine = OrtEngine::new(&options)?;

        let output_name = if engine.out_names().iter().any(|n| *n == options.output_name) {
            options.output_name.clone()
        } else {
            match engine.out_names().first() {
                Some(first) => {
                    log::warn!(
                        "Model has no `{}` output, using `{}` for class scores",
                        options.output_name, first
                    );
                    first.clone()
                }
                None => anyhow::bail!("Model has no outputs"),
            }
        };

        let mut segmenter = Self {
            engine,
            image_size: options.image_size,
            layout: options.layout,
            output_name,
            mean: options.mean,
            std: options.std,
            retain_scores: options.retain_scores,
            scores: None,
        };

        // warm up
        for _ in 0..options.num_dry_run {
            let size = segmenter.image_size as usize;
            let shape = match segmenter.layout {
                InputLayout::Nhwc => [1, size, size, 3],
                InputLayout::Nchw => [1, 3, size, size],
            };
            let x = X::from_shape_vec(&shape, vec![0.0; 3 * size * size])?;
            segmenter.engine.run(Xs::from(x))?;
        }
        segmenter.engine.infer_time.clear();

        log::info!(
            "Segmenter ready | Input: {}x{} {} | Scores: {}",
            segmenter.image_size,
            segmenter.image_size,
            segmenter.layout.str(),
            segmenter.output_name
        );

        Ok(segmenter)
    }

    fn preprocess(&self, xs: &[Self::Input]) -> Result<Xs> {
        let x = image_ops::preprocess(
            xs,
            self.image_size,
            self.image_size,
            self.layout,
            self.mean,
            self.std,
        )?;
        Ok(Xs::from(x))
    }

    fn inference(&mut self, xs: Xs) -> Result<Xs> {
        let ys = self.engine.run(xs)?;
        self.scores = match self.retain_scores {
            true => ys.get(&self.output_name).cloned(),
            false => None,
        };
        Ok(ys)
    }

    fn postprocess(&self, xs: Xs, xs0: &[Self::Input]) -> Result<Vec<SegMask>> {
        let scores = match xs.get(&self.output_name) {
            Some(x) => x,
            None => anyhow::bail!("Output `{}` missing from model results", self.output_name),
        };
        let masks = argmax_class_map(scores.view(), self.layout)?;
        if masks.len() != xs0.len() {
            anyhow::bail!("Got {} masks for {} images", masks.len(), xs0.len());
        }
        Ok(masks)
    }
}

#[allow(dead_code)]
impl OrtSegmenter {
    pub fn image_size(&self) -> u32 {
        self.image_size
    }

    pub fn layout(&self) -> InputLayout {
        self.layout
    }

    pub fn output_name(&self) -> &str {
        &self.output_name
    }

    pub fn engine(&self) -> &OrtEngine {
        &self.engine
    }

    /// Raw class scores of the last run. Only kept when built with `retain_scores`.
    pub fn take_scores(&mut self) -> Option<X> {
        self.scores.take()
    }

    pub fn print_time(&self) {
        log::info!("Avg: {:?}", self.engine.infer_time.avg());
    }
}

/// Arg-max over the class axis of a 4-D score tensor, one mask per batch item.
///
/// Ties go to the lowest class index and NaN scores never win.
pub fn argmax_class_map(scores: ArrayViewD<'_, f32>, layout: InputLayout) -> Result<Vec<SegMask>> {
    if scores.ndim() != 4 {
        anyhow::bail!("Expected 4-D class scores, got shape {:?}", scores.shape());
    }
    let class_axis = layout.channel_axis() - 1;
    let num_classes = scores.shape()[layout.channel_axis()];
    if num_classes == 0 {
        anyhow::bail!("Class scores have an empty class axis: {:?}", scores.shape());
    }

    scores
        .axis_iter(Axis(0))
        .into_par_iter()
        .map(|item| -> Result<SegMask> {
            let item = item.into_dimensionality::<Ix3>()?;
            let labels = item.map_axis(Axis(class_axis), |lane| {
                let mut best = 0usize;
                let mut best_score = f32::NEG_INFINITY;
                for (c, &s) in lane.iter().enumerate() {
                    if s > best_score {
                        best = c;
                        best_score = s;
                    }
                }
                best
            });
            Ok(SegMask::new(labels, num_classes))
        })
        .collect()
}
