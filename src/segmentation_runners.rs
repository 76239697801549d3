pub mod inference_process;
pub mod ort_segmenter;

pub use ort_segmenter::*;
