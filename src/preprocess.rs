use crate::{Error, Result, Tensor};
use ndarray::Zip;
use serde::{Deserialize, Serialize};

/// Per-network input normalization, matching the convention each
/// pretrained family was trained with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreprocessMode {
    /// RGB -> BGR, ImageNet channel means subtracted, no scaling.
    Caffe,
    /// Scaled to [-1, 1].
    Tf,
    /// Scaled to [0, 1], then normalized with ImageNet mean and std.
    Torch,
}

const CAFFE_BGR_MEAN: [f32; 3] = [103.939, 116.779, 123.68];
const TORCH_MEAN: [f32; 3] = [0.485, 0.456, 0.406];
const TORCH_STD: [f32; 3] = [0.229, 0.224, 0.225];

impl PreprocessMode {
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "caffe" => Ok(PreprocessMode::Caffe),
            "tf" => Ok(PreprocessMode::Tf),
            "torch" => Ok(PreprocessMode::Torch),
            _ => Err(Error::UnsupportedPreprocess(s.to_string())),
        }
    }

    /// Normalizes an HWC `[h, w, 3]` tensor of [0, 255] values in place.
    pub fn apply(&self, tensor: &mut Tensor) -> Result<()> {
        let shape = tensor.shape();
        if shape.len() != 3 || shape[2] != 3 {
            return Err(Error::ShapeMismatch {
                expected: vec![0, 0, 3],
                actual: shape.to_vec(),
            });
        }
        let (h, w) = (shape[0], shape[1]);

        match self {
            PreprocessMode::Caffe => {
                let data = tensor.data_mut();
                for y in 0..h {
                    for x in 0..w {
                        let r = data[[y, x, 0]];
                        let b = data[[y, x, 2]];
                        data[[y, x, 0]] = b - CAFFE_BGR_MEAN[0];
                        data[[y, x, 1]] -= CAFFE_BGR_MEAN[1];
                        data[[y, x, 2]] = r - CAFFE_BGR_MEAN[2];
                    }
                }
                Ok(())
            }
            PreprocessMode::Tf => {
                Zip::from(tensor.data_mut()).for_each(|x| {
                    *x = *x / 127.5 - 1.0;
                });
                Ok(())
            }
            PreprocessMode::Torch => {
                for (idx, v) in tensor.data_mut().indexed_iter_mut() {
                    let c = idx[2];
                    *v = (*v / 255.0 - TORCH_MEAN[c]) / TORCH_STD[c];
                }
                Ok(())
            }
        }
    }
}
