//! ONNX-backed inference oracle.
//!
//! Models are expected as ONNX graphs taking a `[1, N, N, 3]` f32
//! input (already preprocessed) and producing a 1000-way score
//! vector. Execution is CPU-only; an accelerator id given on the
//! command line is logged and ignored.

use std::path::Path;

use tract_onnx::prelude::*;

use crate::network::Classifier;
use crate::{Error, Result};

pub struct OnnxClassifier {
    plan: TypedSimplePlan<TypedModel>,
    input_size: u32,
}

impl OnnxClassifier {
    pub fn load(path: &Path, input_size: u32) -> Result<Self> {
        let s = input_size as usize;
        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|m| m.with_input_fact(0, f32::fact([1, s, s, 3]).into()))
            .and_then(|m| m.into_optimized())
            .and_then(|m| m.into_runnable())
            .map_err(|e| Error::ModelLoad(format!("{}: {}", path.display(), e)))?;

        log::debug!(
            "Loaded {} (input {}x{})",
            path.display(),
            input_size,
            input_size
        );
        Ok(Self { plan, input_size })
    }
}

impl Classifier for OnnxClassifier {
    fn scores(&self, input: &crate::Tensor) -> Result<Vec<f32>> {
        let s = self.input_size as usize;
        if input.shape() != [s, s, 3] {
            return Err(Error::ShapeMismatch {
                expected: vec![s, s, 3],
                actual: input.shape().to_vec(),
            });
        }

        let data = input.data();
        let batch =
            tract_ndarray::Array4::from_shape_fn((1, s, s, 3), |(_, y, x, c)| data[[y, x, c]]);

        let outputs = self
            .plan
            .run(tvec!(Tensor::from(batch).into()))
            .map_err(|e| Error::Inference(e.to_string()))?;
        let scores = outputs[0]
            .to_array_view::<f32>()
            .map_err(|e| Error::Inference(e.to_string()))?;

        Ok(scores.iter().copied().collect())
    }
}
