use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InferenceDevice {
    #[default] CPU,
    CUDA(usize),
    TensorRT(usize),
    CoreML(usize),
}

// Storing the "proper" spelling and the lowercase version.
const CPU: [&str; 2] = ["CPU", "cpu"];
const CUDA: [&str; 2] = ["CUDA", "cuda"];
const TENSOR_RT: [&str; 2] = ["TensorRT", "tensorrt"];
const CORE_ML: [&str; 2] = ["CoreML", "coreml"];

impl InferenceDevice {
    pub fn from_str(device: &str, device_id: usize) -> Option<Self> {
        match device.to_lowercase().as_str() {
            "cpu" => Some(InferenceDevice::CPU),
            "cuda" => Some(InferenceDevice::CUDA(device_id)),
            "tensorrt" | "trt" => Some(InferenceDevice::TensorRT(device_id)),
            "coreml" => Some(InferenceDevice::CoreML(device_id)),
            _ => None,
        }
    }

    /// Same as [`InferenceDevice::from_str`] but with an error naming the valid devices.
    pub fn parse(device: &str, device_id: usize) -> anyhow::Result<Self> {
        Self::from_str(device, device_id).ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown inference device `{}`. Valid devices: {}",
                device,
                Self::all_inference_devices().join(", ")
            )
        })
    }

    fn names(&self) -> &'static [&'static str; 2] {
        match self {
            InferenceDevice::CPU => &CPU,
            InferenceDevice::CUDA(_) => &CUDA,
            InferenceDevice::TensorRT(_) => &TENSOR_RT,
            InferenceDevice::CoreML(_) => &CORE_ML,
        }
    }

    pub fn str(&self) -> &'static str {
        self.names()[0]
    }

    pub fn str_lowercase(&self) -> &'static str {
        self.names()[1]
    }

    pub fn device_id(&self) -> Option<usize> {
        match self {
            InferenceDevice::CPU => None,
            InferenceDevice::CUDA(id) | InferenceDevice::TensorRT(id) | InferenceDevice::CoreML(id) => Some(*id),
        }
    }

    pub fn all_inference_devices() -> Vec<&'static str> {
        vec![CPU[1], CUDA[1], TENSOR_RT[1], CORE_ML[1]]
    }

    pub fn is_valid_inference_device(inference_device: &str) -> bool {
        InferenceDevice::from_str(inference_device, 0).is_some()
    }
}

impl std::fmt::Display for InferenceDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.device_id() {
            Some(id) => write!(f, "{}:{}", self.str(), id),
            None => write!(f, "{}", self.str()),
        }
    }
}
