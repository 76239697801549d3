mod inference_device;
mod input_layout;
mod label_map;
mod palette;
mod segment_config;

pub use inference_device::*;
pub use input_layout::*;
pub use label_map::*;
pub use palette::*;
pub use segment_config::*;
