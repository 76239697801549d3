//! File adapted from: https://github.com/jamjamjon
//!
//! Functions to preprocess images.

use anyhow::{bail, Result};
use fast_image_resize::{
    images::Image as FirImage,
    pixels::PixelType,
    FilterType, ResizeAlg, ResizeOptions, Resizer,
};
use image::{DynamicImage, RgbImage};
use rayon::prelude::*;
use crate::common::InputLayout;
use crate::data::X;

/// Main preprocessing entry point.
///
/// Every image is converted to RGB, resized to `target_h` x `target_w`,
/// scaled to `[0, 1]`, normalized with `mean` / `std` and stacked into a single
/// `[N, H, W, 3]` or `[N, 3, H, W]` batch.
pub fn preprocess(
    xs: &[DynamicImage],
    target_h: u32,
    target_w: u32,
    layout: InputLayout,
    mean: [f32; 3],
    std: [f32; 3],
) -> Result<X> {
    if xs.is_empty() {
        bail!("No images to preprocess");
    }
    if std.iter().any(|s| *s == 0.0) {
        bail!("Normalization std must be non-zero, got {:?}", std);
    }

    let options = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Bilinear));

    // Parallel preprocessing per image
    let image_tensors: Vec<Vec<f32>> = xs
        .par_iter()
        .map(|img| {
            let src = to_fir_image(img.to_rgb8())?;
            let mut resizer = Resizer::new();
            let resized = resize_image(&src, target_h, target_w, &mut resizer, &options)?;
            normalize_flat(resized.buffer(), target_w as usize, target_h as usize, layout, mean, std)
        })
        .collect::<Result<_>>()?;

    let (height, width) = (target_h as usize, target_w as usize);
    let mut batch_flat: Vec<f32> = Vec::with_capacity(xs.len() * height * width * 3);
    for img in image_tensors.iter() {
        batch_flat.extend_from_slice(img);
    }

    let shape = match layout {
        InputLayout::Nhwc => [xs.len(), height, width, 3],
        InputLayout::Nchw => [xs.len(), 3, height, width],
    };
    X::from_shape_vec(&shape, batch_flat)
}

pub fn to_fir_image<'a>(image: RgbImage) -> Result<FirImage<'a>> {
    let (width, height) = image.dimensions();
    let buffer = image.into_raw();

    Ok(FirImage::from_vec_u8(width, height, buffer, PixelType::U8x3)?)
}

fn resize_image<'a>(
    img: &FirImage,
    target_h: u32,
    target_w: u32,
    resizer: &mut Resizer,
    config: &ResizeOptions,
) -> Result<FirImage<'a>> {
    let mut dst = FirImage::new(target_w, target_h, PixelType::U8x3);
    resizer.resize(img, &mut dst, config)?;
    Ok(dst)
}

/// Normalizes an interleaved RGB8 buffer into the requested layout.
pub fn normalize_flat(
    buf: &[u8],
    w: usize,
    h: usize,
    layout: InputLayout,
    mean: [f32; 3],
    std: [f32; 3],
) -> Result<Vec<f32>> {
    if buf.len() != w * h * 3 {
        bail!("Unexpected buffer size: got {}, expected {}", buf.len(), w * h * 3);
    }

    let hw = w * h;
    let norm = |v: u8, c: usize| (v as f32 / 255.0 - mean[c]) / std[c];

    let out = match layout {
        InputLayout::Nhwc => buf
            .iter()
            .enumerate()
            .map(|(i, &v)| norm(v, i % 3))
            .collect(),
        InputLayout::Nchw => {
            let mut out = vec![0.0f32; buf.len()];
            for i in 0..hw {
                out[i] = norm(buf[3 * i], 0);
                out[i + hw] = norm(buf[3 * i + 1], 1);
                out[i + 2 * hw] = norm(buf[3 * i + 2], 2);
            }
            out
        }
    };

    Ok(out)
}
