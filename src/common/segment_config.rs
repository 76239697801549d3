use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use crate::common::{InferenceDevice, InputLayout, LabelMapFormat};

pub const DEFAULT_IMAGE_SIZE: u32 = 640;
pub const DEFAULT_OUTPUT_NAME: &str = "logits";
pub const DEFAULT_OUTPUT_DIR: &str = "./_output";
pub const DEFAULT_DRY_RUNS: usize = 1;

// ImageNet statistics
pub const DEFAULT_MEAN: [f32; 3] = [0.485, 0.456, 0.406];
pub const DEFAULT_STD: [f32; 3] = [0.229, 0.224, 0.225];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentConfig {
    pub weights_path: String,
    pub ort_lib_path: String,
    pub label_map_path: String,
    pub label_map_format: LabelMapFormat,
    pub inference_device: InferenceDevice,
    pub image_size: u32,
    pub input_layout: InputLayout,
    pub output_name: String,
    pub output_dir: PathBuf,
    pub save_logits: bool,
    pub max_images: Option<usize>,
    pub profile: bool,
    pub dry_runs: usize,
    pub trt_fp16: bool,
    pub mean: [f32; 3],
    pub std: [f32; 3],
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            weights_path: String::new(),
            ort_lib_path: String::new(),
            label_map_path: String::new(),
            label_map_format: LabelMapFormat::Csv,
            inference_device: InferenceDevice::CPU,
            image_size: DEFAULT_IMAGE_SIZE,
            input_layout: InputLayout::Nhwc,
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            save_logits: false,
            max_images: None,
            profile: false,
            dry_runs: DEFAULT_DRY_RUNS,
            trt_fp16: false,
            mean: DEFAULT_MEAN,
            std: DEFAULT_STD,
        }
    }
}

impl SegmentConfig {
    pub fn new(weights_path: String, label_map_path: String) -> Self {
        Self {
            weights_path,
            label_map_path,
            ..Default::default()
        }
    }

    pub fn set_device_type(&mut self, device_type: InferenceDevice) {
        self.inference_device = device_type;
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.weights_path.is_empty() {
            anyhow::bail!("A model weights path is required");
        }
        if self.label_map_path.is_empty() {
            anyhow::bail!("A label map path is required");
        }
        if self.image_size == 0 {
            anyhow::bail!("Image size must be greater than zero");
        }
        if self.output_name.is_empty() {
            anyhow::bail!("Output name must not be empty");
        }
        if self.std.iter().any(|&s| s == 0.0) {
            anyhow::bail!("Normalization std must be non-zero, got {:?}", self.std);
        }
        if !self.ort_lib_path.is_empty() && !std::path::Path::new(&self.ort_lib_path).is_file() {
            anyhow::bail!("OnnxRuntime library not found: {}", self.ort_lib_path);
        }
        Ok(())
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn summary(&self) -> String {
        format!("Weights File Path: {}\n\
        Label Map: {} ({})\n\
        OnnxRuntime Lib Path: {}\n\
        Inference Device: {}\n\
        Model Input: {}x{} ({})\n\
        Normalization: mean {:?} std {:?}\n\
        Output Tensor: {}\n\
        Output Dir: {}",
                self.weights_path, self.label_map_path, self.label_map_format.str(),
                if self.ort_lib_path.is_empty() { "<default>" } else { self.ort_lib_path.as_str() },
                self.inference_device, self.image_size, self.image_size, self.input_layout.str(),
                self.mean, self.std, self.output_name, self.output_dir.display())
    }
}
