//! File/code adapted from https://github.com/jamjamjon/usls
//!
//! Options for building the ORT backed segmenter.

use anyhow::Result;
use crate::common::{
    InferenceDevice, InputLayout, SegmentConfig, DEFAULT_DRY_RUNS, DEFAULT_IMAGE_SIZE, DEFAULT_MEAN,
    DEFAULT_OUTPUT_NAME, DEFAULT_STD,
};

#[derive(Debug, Clone)]
pub struct ConfigOrt {
    pub onnx_path: String,
    pub ort_lib_path: String,
    pub device: InferenceDevice,
    pub image_size: u32,
    pub layout: InputLayout,
    pub output_name: String,
    pub profile: bool,
    pub num_dry_run: usize,
    pub retain_scores: bool,

    // trt related
    pub trt_engine_cache_enable: bool,
    pub trt_fp16_enable: bool,

    // per-channel normalization applied after scaling to [0, 1]
    pub mean: [f32; 3],
    pub std: [f32; 3],
}

impl Default for ConfigOrt {
    fn default() -> Self {
        Self {
            onnx_path: String::new(),
            ort_lib_path: String::new(),
            device: InferenceDevice::CPU,
            image_size: DEFAULT_IMAGE_SIZE,
            layout: InputLayout::Nhwc,
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
            profile: false,
            num_dry_run: DEFAULT_DRY_RUNS,
            retain_scores: false,

            trt_engine_cache_enable: true,
            trt_fp16_enable: false,

            mean: DEFAULT_MEAN,
            std: DEFAULT_STD,
        }
    }
}

impl ConfigOrt {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_model(mut self, onnx_path: &str) -> Result<Self> {
        if !std::path::Path::new(onnx_path).exists() {
            anyhow::bail!("Model file not found: {}", onnx_path);
        }
        self.onnx_path = onnx_path.to_string();
        Ok(self)
    }

    /// An empty path leaves library discovery to `ort`.
    pub fn with_ort_lib_path(mut self, ort_lib_path: &str) -> Result<Self> {
        if !ort_lib_path.is_empty() && !std::path::Path::new(ort_lib_path).is_file() {
            anyhow::bail!("OnnxRuntime library not found: {}", ort_lib_path);
        }
        self.ort_lib_path = ort_lib_path.to_string();
        Ok(self)
    }

    pub fn with_device(mut self, device_type: InferenceDevice) -> Self {
        self.device = device_type;
        self
    }

    pub fn with_image_size(mut self, n: u32) -> Self {
        self.image_size = n;
        self
    }

    pub fn with_layout(mut self, layout: InputLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_output_name(mut self, name: &str) -> Self {
        self.output_name = name.to_string();
        self
    }

    pub fn with_dry_run(mut self, n: usize) -> Self {
        self.num_dry_run = n;
        self
    }

    pub fn with_trt_fp16(mut self, x: bool) -> Self {
        self.trt_fp16_enable = x;
        self
    }

    pub fn with_profile(mut self, profile: bool) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_normalization(mut self, mean: [f32; 3], std: [f32; 3]) -> Self {
        self.mean = mean;
        self.std = std;
        self
    }

    /// Keep the raw class scores of the last run around for [`take_scores`].
    ///
    /// [`take_scores`]: crate::segmentation_runners::OrtSegmenter::take_scores
    pub fn with_retain_scores(mut self, x: bool) -> Self {
        self.retain_scores = x;
        self
    }

    pub fn from_segment_config(config: &SegmentConfig) -> Result<Self> {
        Ok(Self::new()
            .with_model(&config.weights_path)?
            .with_ort_lib_path(&config.ort_lib_path)?
            .with_device(config.inference_device)
            .with_image_size(config.image_size)
            .with_layout(config.input_layout)
            .with_output_name(&config.output_name)
            .with_dry_run(config.dry_runs)
            .with_trt_fp16(config.trt_fp16)
            .with_normalization(config.mean, config.std)
            .with_retain_scores(config.save_logits)
            .with_profile(config.profile))
    }
}
