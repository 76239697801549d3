mod config_ort;
mod output_writer;
mod seg_mask;
mod time_calc;

pub use config_ort::ConfigOrt;
pub use output_writer::{image_stem, OutputWriter};
pub use seg_mask::SegMask;
pub use time_calc::TimeCalc;

pub use crate::segmentation_runners::ort_segmenter::input_wrapper::X;
pub use crate::segmentation_runners::ort_segmenter::xs::Xs;

pub(crate) const CROSS_MARK: &str = "❌";
