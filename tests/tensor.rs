use image::{Rgb, RgbImage};
use top1_eval::Tensor;

#[test]
fn test_tensor_creation_from_vec() {
    let vec = vec![1.0, 2.0, 3.0, 4.0];
    let tensor = Tensor::from_vec(vec.clone(), &[4]).expect("Failed to create tensor");

    assert_eq!(tensor.shape(), &[4]);
    assert_eq!(tensor.to_vec(), vec);
}

#[test]
fn test_tensor_creation_3d() {
    let vec: Vec<f32> = (0..24).map(|i| i as f32).collect();
    let tensor = Tensor::from_vec(vec, &[2, 4, 3]).expect("Failed to create tensor");

    assert_eq!(tensor.shape(), &[2, 4, 3]);
    assert_eq!(tensor.len(), 24);
}

#[test]
fn test_tensor_shape_mismatch() {
    let vec = vec![1.0, 2.0, 3.0];
    let result = Tensor::from_vec(vec, &[4]);

    assert!(
        result.is_err(),
        "Should fail when shape doesn't match vector length"
    );
}

#[test]
fn test_tensor_zeros() {
    let tensor = Tensor::zeros(&[3, 2]);

    assert_eq!(tensor.shape(), &[3, 2]);
    assert_eq!(tensor.len(), 6);
    assert!(tensor.to_vec().iter().all(|&x| x == 0.0));
}

#[test]
fn test_tensor_from_rgb8_is_hwc() {
    let image = RgbImage::from_fn(3, 2, |x, y| Rgb([x as u8, y as u8, 9]));
    let tensor = Tensor::from_rgb8(&image);

    assert_eq!(tensor.shape(), &[2, 3, 3]);
    assert_eq!(tensor.data()[[0, 2, 0]], 2.0);
    assert_eq!(tensor.data()[[1, 0, 1]], 1.0);
    assert_eq!(tensor.data()[[1, 2, 2]], 9.0);
}

#[test]
fn test_tensor_clamp() {
    let mut tensor = Tensor::from_vec(vec![-5.0, 0.0, 128.0, 300.0], &[4]).unwrap();
    tensor.clamp(0.0, 255.0);

    assert_eq!(tensor.to_vec(), vec![0.0, 0.0, 128.0, 255.0]);
}

#[test]
fn test_tensor_empty() {
    let tensor = Tensor::from_vec(vec![], &[0]).expect("Failed to create tensor");

    assert_eq!(tensor.len(), 0);
    assert!(tensor.is_empty());
}
