//! Size normalization for evaluation samples.
//!
//! Benign images go through [`resize_normalize`], which rescales before
//! cropping. Adversarial images must instead be fitted with
//! [`crop_or_pad`]: resampling attenuates the perturbations baked into
//! their pixels, so that path only ever crops or pads.

use image::imageops::{self, FilterType};
use image::DynamicImage;

use crate::{Error, Result, Tensor};

/// Scales the shorter side to `target` (aspect preserved, long side
/// truncated to whole pixels), centrally crops the long axis, and
/// returns a `[target, target, 3]` tensor clamped to [0, 255].
///
/// Square inputs always take the width-is-shorter branch: the width is
/// scaled to `target` and the crop window runs over the rows.
pub fn resize_normalize(image: &DynamicImage, target: u32) -> Result<Tensor> {
    let rgb = image.to_rgb8();
    let (w, h) = rgb.dimensions();

    let (new_w, new_h, crop_columns) = if h < w {
        (scaled_long_side(w, h, target), target, true)
    } else {
        (target, scaled_long_side(h, w, target), false)
    };

    let resized = if (new_w, new_h) == (w, h) {
        rgb
    } else {
        imageops::resize(&rgb, new_w, new_h, FilterType::Triangle)
    };

    let cropped = if crop_columns {
        let cut_low = (new_w - target) / 2;
        imageops::crop_imm(&resized, cut_low, 0, target, target).to_image()
    } else {
        let cut_low = (new_h - target) / 2;
        imageops::crop_imm(&resized, 0, cut_low, target, target).to_image()
    };

    // Guards against rounding residue in the crop window.
    let exact = if cropped.dimensions() == (target, target) {
        cropped
    } else {
        imageops::resize(&cropped, target, target, FilterType::Triangle)
    };

    let mut tensor = Tensor::from_rgb8(&exact);
    tensor.clamp(0.0, 255.0);
    Ok(tensor)
}

/// Fits an HWC tensor into `[target, target, 3]` without resampling.
///
/// Axes longer than `target` are centrally cropped with
/// `cut_low = (dim - target) / 2`; shorter axes are centered on a zero
/// (black) canvas at offset `(target - dim) / 2`. Pixel content is
/// copied verbatim in both cases, never resampled.
pub fn crop_or_pad(sample: &Tensor, target: u32) -> Result<Tensor> {
    let shape = sample.shape();
    if shape.len() != 3 || shape[2] != 3 {
        return Err(Error::ShapeMismatch {
            expected: vec![0, 0, 3],
            actual: shape.to_vec(),
        });
    }
    let (h, w) = (shape[0], shape[1]);
    let t = target as usize;

    let mut canvas = Tensor::zeros(&[t, t, 3]);
    let (src_y, dst_y, rows) = centered_span(h, t);
    let (src_x, dst_x, cols) = centered_span(w, t);

    let src = sample.data();
    let dst = canvas.data_mut();
    for y in 0..rows {
        for x in 0..cols {
            for c in 0..3 {
                dst[[dst_y + y, dst_x + x, c]] = src[[src_y + y, src_x + x, c]];
            }
        }
    }

    Ok(canvas)
}

// Long side after scaling the short side to `target`, truncated.
fn scaled_long_side(long: u32, short: u32, target: u32) -> u32 {
    (target as u64 * long as u64 / short as u64) as u32
}

// (source offset, destination offset, copied length) for one axis.
fn centered_span(dim: usize, target: usize) -> (usize, usize, usize) {
    if dim > target {
        ((dim - target) / 2, 0, target)
    } else {
        (0, (target - dim) / 2, dim)
    }
}
