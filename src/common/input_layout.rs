use serde::{Deserialize, Serialize};

/// Memory layout of the image tensor fed to the model, and of its class scores.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputLayout {
    /// `[N, H, W, C]`, what TF exported graphs expect.
    #[default] Nhwc,
    /// `[N, C, H, W]`
    Nchw,
}

impl InputLayout {
    pub fn from_str(layout: &str) -> Option<Self> {
        match layout.to_lowercase().as_str() {
            "nhwc" => Some(InputLayout::Nhwc),
            "nchw" => Some(InputLayout::Nchw),
            _ => None,
        }
    }

    pub fn str(&self) -> &'static str {
        match self {
            InputLayout::Nhwc => "nhwc",
            InputLayout::Nchw => "nchw",
        }
    }

    /// Axis holding the channels (input) or class scores (output) of a 4-D tensor.
    pub fn channel_axis(&self) -> usize {
        match self {
            InputLayout::Nhwc => 3,
            InputLayout::Nchw => 1,
        }
    }
}
