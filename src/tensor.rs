use image::RgbImage;
use ndarray::{Array, ArrayD, IxDyn};

/// Owned f32 tensor. Images are held as `[height, width, 3]` in HWC
/// order; classifier outputs as flat score vectors.
#[derive(Clone, Debug)]
pub struct Tensor {
    data: ArrayD<f32>,
}

impl Tensor {
    pub fn new(data: ArrayD<f32>) -> Self {
        Self { data }
    }

    pub fn from_vec(vec: Vec<f32>, shape: &[usize]) -> crate::Result<Self> {
        let expected: usize = shape.iter().product();
        if expected != vec.len() {
            return Err(crate::Error::ShapeMismatch {
                expected: shape.to_vec(),
                actual: vec![vec.len()],
            });
        }
        let data = Array::from_shape_vec(IxDyn(shape), vec)
            .map_err(|e| crate::Error::Inference(format!("Tensor construction failed: {}", e)))?;
        Ok(Self { data })
    }

    /// Copies an 8-bit RGB image into an HWC tensor of `[h, w, 3]`.
    pub fn from_rgb8(image: &RgbImage) -> Self {
        let (w, h) = image.dimensions();
        let mut data = ArrayD::zeros(IxDyn(&[h as usize, w as usize, 3]));
        for (x, y, pixel) in image.enumerate_pixels() {
            for c in 0..3 {
                data[[y as usize, x as usize, c]] = pixel[c] as f32;
            }
        }
        Self { data }
    }

    pub fn zeros(shape: &[usize]) -> Self {
        let data = ArrayD::zeros(IxDyn(shape));
        Self { data }
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn data(&self) -> &ArrayD<f32> {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut ArrayD<f32> {
        &mut self.data
    }

    pub fn into_data(self) -> ArrayD<f32> {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn clamp(&mut self, min: f32, max: f32) {
        self.data.mapv_inplace(|x| x.clamp(min, max));
    }

    pub fn to_vec(&self) -> Vec<f32> {
        self.data.iter().copied().collect()
    }
}

impl From<ArrayD<f32>> for Tensor {
    fn from(data: ArrayD<f32>) -> Self {
        Self::new(data)
    }
}
