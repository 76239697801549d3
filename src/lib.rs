mod utils;
pub mod common;
pub mod data;
pub mod segmentation_processing;
pub mod segmentation_runners;

use std::time::Instant;
use image::DynamicImage;
use crate::common::SegmentConfig;
use crate::data::{ConfigOrt, SegMask};
use crate::segmentation_runners::inference_process::InferenceProcess;
use crate::segmentation_runners::OrtSegmenter;

pub fn init_segmenter(config: &SegmentConfig) -> anyhow::Result<OrtSegmenter> {
    config.validate()?;
    let ort_options = ConfigOrt::from_segment_config(config)?;

    log::info!("Initializing ORT session with ({}) execution provider", config.inference_device);
    OrtSegmenter::new(ort_options)
}

pub fn run_segmentation(segmenter: &mut OrtSegmenter, image: DynamicImage, profile: bool) -> anyhow::Result<SegMask> {
    let now = Instant::now();

    let mut masks = segmenter.forward(&[image], profile)?;
    let mask = match masks.pop() {
        Some(mask) => mask,
        None => anyhow::bail!("Model returned no mask"),
    };

    log::debug!("Processing time: {:?}", now.elapsed());

    Ok(mask)
}
