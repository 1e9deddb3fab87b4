use image::{DynamicImage, Rgb, RgbImage};
use top1_eval::geometry::{crop_or_pad, resize_normalize};
use top1_eval::Tensor;

fn gradient_image(w: u32, h: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(w, h, |x, y| {
        Rgb([x as u8, y as u8, 7])
    }))
}

fn solid_image(w: u32, h: u32, color: [u8; 3]) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, Rgb(color)))
}

// Row-major HWC tensor where every cell holds a distinct value.
fn gradient_tensor(h: usize, w: usize) -> Tensor {
    let values: Vec<f32> = (0..h * w * 3).map(|i| i as f32).collect();
    Tensor::from_vec(values, &[h, w, 3]).unwrap()
}

fn cell(w: usize, y: usize, x: usize, c: usize) -> f32 {
    ((y * w + x) * 3 + c) as f32
}

#[test]
fn test_resize_normalize_identity_on_exact_size() {
    let image = gradient_image(224, 224);
    let out = resize_normalize(&image, 224).unwrap();

    assert_eq!(out.shape(), &[224, 224, 3]);
    let rgb = image.to_rgb8();
    for (x, y, pixel) in rgb.enumerate_pixels() {
        for c in 0..3 {
            assert_eq!(
                out.data()[[y as usize, x as usize, c]],
                pixel[c] as f32,
                "pixel ({}, {}) channel {}",
                x,
                y,
                c
            );
        }
    }
}

#[test]
fn test_resize_normalize_shape_and_range() {
    for (w, h) in [(300, 500), (500, 300), (100, 67), (224, 224), (31, 97)] {
        let out = resize_normalize(&gradient_image(w, h), 224).unwrap();
        assert_eq!(out.shape(), &[224, 224, 3], "input {}x{}", w, h);
        assert!(out.to_vec().iter().all(|&v| (0.0..=255.0).contains(&v)));
    }
}

#[test]
fn test_resize_normalize_square_takes_fixed_branch() {
    // Squares scale the width to the target and crop rows; the window
    // covers the whole image, so a solid square stays solid.
    let out = resize_normalize(&solid_image(100, 100, [200, 50, 25]), 64).unwrap();
    assert_eq!(out.shape(), &[64, 64, 3]);
    for chunk in out.to_vec().chunks(3) {
        assert_eq!(chunk, [200.0, 50.0, 25.0]);
    }
}

#[test]
fn test_resize_normalize_crops_wide_images_centrally() {
    // 240x150 with target 150: the short side already matches, so no
    // resampling happens and the column window is exactly 45..195.
    let out = resize_normalize(&gradient_image(240, 150), 150).unwrap();
    assert_eq!(out.shape(), &[150, 150, 3]);
    for y in 0..150 {
        for x in 0..150 {
            assert_eq!(out.data()[[y, x, 0]], (x + 45) as f32);
            assert_eq!(out.data()[[y, x, 1]], y as f32);
        }
    }
}

#[test]
fn test_resize_normalize_crops_tall_images_centrally() {
    let out = resize_normalize(&gradient_image(150, 240), 150).unwrap();
    assert_eq!(out.shape(), &[150, 150, 3]);
    for y in 0..150 {
        for x in 0..150 {
            assert_eq!(out.data()[[y, x, 0]], x as f32);
            assert_eq!(out.data()[[y, x, 1]], (y + 45) as f32);
        }
    }
}

#[test]
fn test_crop_or_pad_identity_on_exact_size() {
    let sample = gradient_tensor(224, 224);
    let out = crop_or_pad(&sample, 224).unwrap();
    assert_eq!(out.shape(), &[224, 224, 3]);
    assert_eq!(out.to_vec(), sample.to_vec());
}

#[test]
fn test_crop_or_pad_pads_small_images_centered() {
    let sample = gradient_tensor(100, 80);
    let out = crop_or_pad(&sample, 224).unwrap();
    assert_eq!(out.shape(), &[224, 224, 3]);

    // Original pixels land unresampled at offset (62, 72).
    for y in 0..100 {
        for x in 0..80 {
            for c in 0..3 {
                assert_eq!(out.data()[[62 + y, 72 + x, c]], cell(80, y, x, c));
            }
        }
    }
    // Everything else is black.
    for (idx, v) in out.data().indexed_iter() {
        let inside = (62..162).contains(&idx[0]) && (72..152).contains(&idx[1]);
        if !inside {
            assert_eq!(*v, 0.0, "expected zero at {:?}", idx);
        }
    }
}

#[test]
fn test_crop_or_pad_crops_large_images_centered() {
    let sample = gradient_tensor(300, 260);
    let out = crop_or_pad(&sample, 224).unwrap();
    assert_eq!(out.shape(), &[224, 224, 3]);

    for y in 0..224 {
        for x in 0..224 {
            for c in 0..3 {
                assert_eq!(
                    out.data()[[y, x, c]],
                    cell(260, y + 38, x + 18, c)
                );
            }
        }
    }
}

#[test]
fn test_crop_or_pad_mixed_wide_and_short() {
    // Wider than the target but shorter: columns are cropped while
    // rows are padded, in the same pass.
    let sample = gradient_tensor(150, 300);
    let out = crop_or_pad(&sample, 224).unwrap();
    assert_eq!(out.shape(), &[224, 224, 3]);

    for y in 0..150 {
        for x in 0..224 {
            assert_eq!(out.data()[[37 + y, x, 0]], cell(300, y, x + 38, 0));
        }
    }
    for x in 0..224 {
        assert_eq!(out.data()[[0, x, 0]], 0.0);
        assert_eq!(out.data()[[223, x, 0]], 0.0);
    }
}

#[test]
fn test_crop_or_pad_floors_odd_offsets() {
    let sample = gradient_tensor(5, 5);
    let out = crop_or_pad(&sample, 4).unwrap();
    assert_eq!(out.shape(), &[4, 4, 3]);

    // cut_low = (5 - 4) / 2 = 0: the window keeps the first four
    // rows and columns.
    for y in 0..4 {
        for x in 0..4 {
            assert_eq!(out.data()[[y, x, 0]], cell(5, y, x, 0));
        }
    }
}
