//! # top1-eval
//!
//! Measures the top-1 error of pretrained image classifiers on a
//! directory of samples — the ImageNet validation set or an
//! adversarially perturbed counterpart such as DAmageNet.
//!
//! ## Example
//!
//! ```rust,ignore
//! use top1_eval::{eval, EvalContext, EvalOptions, Registry};
//!
//! let registry = Registry::builtin();
//! let ctx = EvalContext::load(&registry, &names, Path::new("models"))?;
//! let report = eval::run(&ctx, Path::new("./DAmageNet"), &EvalOptions::default())?;
//! println!("{}", report.render());
//! ```

pub mod error;
pub mod eval;
pub mod geometry;
pub mod labels;
pub mod network;
pub mod preprocess;
pub mod report;
pub mod tensor;

#[cfg(feature = "onnx")]
pub mod oracle;

pub use error::{Error, Result};
pub use eval::EvalOptions;
pub use labels::LabelMap;
pub use network::{Classifier, EvalContext, NetworkDescriptor, Registry};
pub use preprocess::PreprocessMode;
pub use report::EvalReport;
pub use tensor::Tensor;
