//! Fixed 21 class palette used to visualize segmentation masks.
//!
//! Index 0 is background and maps to black. The table is the usual VOC style
//! colormap, truncated to the 21 classes the segmentation heads predict.

use anyhow::{bail, Result};
use image::RgbImage;
use ndarray::{Array3, ArrayView2, ArrayView3};
use thiserror::Error;

/// Number of classes the palette can colorize.
pub const NUM_CLASSES: usize = 21;

pub const PALETTE: [[u8; 3]; NUM_CLASSES] = [
    [0, 0, 0],
    [128, 0, 0],
    [0, 128, 0],
    [128, 128, 0],
    [0, 0, 128],
    [128, 0, 128],
    [0, 128, 128],
    [128, 128, 128],
    [64, 0, 0],
    [192, 0, 0],
    [64, 128, 0],
    [192, 128, 0],
    [64, 0, 128],
    [192, 0, 128],
    [64, 128, 128],
    [192, 128, 128],
    [0, 64, 0],
    [128, 64, 0],
    [0, 192, 0],
    [128, 192, 0],
    [0, 64, 128],
];

/// A class index outside `0..NUM_CLASSES` was found in a label map.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid label {label} at pixel (row {row}, col {col}): expected a class index in 0..={max}", max = NUM_CLASSES - 1)]
pub struct InvalidLabelError {
    pub row: usize,
    pub col: usize,
    pub label: String,
}

/// Normalized `[0, 1]` RGB color of a single class, `None` when out of range.
pub fn palette_color(index: usize) -> Option<[f32; 3]> {
    PALETTE
        .get(index)
        .map(|&[r, g, b]| [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0])
}

/// Converts an `(H, W)` class index map into an `(H, W, 3)` RGB image with
/// channels in `[0, 1]`.
///
/// Every pixel must hold a valid class index. The first offending pixel in
/// row-major order is reported and nothing is returned for the image.
pub fn label_to_color<T>(labels: ArrayView2<'_, T>) -> Result<Array3<f32>, InvalidLabelError>
where
    T: Copy + TryInto<usize> + std::fmt::Display,
{
    let (height, width) = labels.dim();

    // validate first so the lookup below can't see a bad index
    let mut indices = Vec::with_capacity(height * width);
    for ((row, col), &label) in labels.indexed_iter() {
        match TryInto::<usize>::try_into(label) {
            Ok(idx) if idx < NUM_CLASSES => indices.push(idx),
            _ => {
                return Err(InvalidLabelError {
                    row,
                    col,
                    label: label.to_string(),
                })
            }
        }
    }

    let rgb = Array3::from_shape_fn((height, width, 3), |(y, x, c)| {
        PALETTE[indices[y * width + x]][c] as f32 / 255.0
    });

    Ok(rgb)
}

/// Scales a `[0, 1]` color image back to 8 bits per channel.
pub fn color_to_rgb8(color: ArrayView3<'_, f32>) -> Result<RgbImage> {
    let (height, width, channels) = color.dim();
    if channels != 3 {
        bail!("Expected an (H, W, 3) color image, got {} channels", channels);
    }

    let img = RgbImage::from_fn(width as u32, height as u32, |x, y| {
        let (y, x) = (y as usize, x as usize);
        image::Rgb([
            to_u8(color[[y, x, 0]]),
            to_u8(color[[y, x, 1]]),
            to_u8(color[[y, x, 2]]),
        ])
    });

    Ok(img)
}

fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Colorizes a label map straight into an 8-bit image.
pub fn label_to_rgb8<T>(labels: ArrayView2<'_, T>) -> Result<RgbImage>
where
    T: Copy + TryInto<usize> + std::fmt::Display,
{
    let color = label_to_color(labels)?;
    color_to_rgb8(color.view())
}
