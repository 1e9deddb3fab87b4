use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::preprocess::PreprocessMode;
use crate::{Error, Result, Tensor};

/// Inference oracle boundary: a loaded network scores a single
/// preprocessed image over the 1000 ImageNet classes.
pub trait Classifier: Send {
    fn scores(&self, input: &Tensor) -> Result<Vec<f32>>;
}

/// Everything the harness needs to know about a network, looked up
/// once by name. Adding a network is a data change.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkDescriptor {
    pub name: String,
    pub input_size: u32,
    pub preprocess: PreprocessMode,
    pub weights_file: String,
}

impl NetworkDescriptor {
    fn new(name: &str, input_size: u32, preprocess: PreprocessMode) -> Self {
        Self {
            name: name.to_string(),
            input_size,
            preprocess,
            weights_file: format!("{}.onnx", name.to_lowercase()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Registry {
    networks: Vec<NetworkDescriptor>,
}

impl Registry {
    /// The thirteen pretrained families the harness knows out of the
    /// box. Input sizes: 299 for InceptionV3 and Xception, 331 for
    /// NASNetLarge, 224 for everything else.
    pub fn builtin() -> Self {
        use PreprocessMode::{Caffe, Tf, Torch};
        let networks = vec![
            NetworkDescriptor::new("ResNet50", 224, Caffe),
            NetworkDescriptor::new("ResNet101", 224, Tf),
            NetworkDescriptor::new("ResNet152", 224, Tf),
            NetworkDescriptor::new("InceptionResNetV2", 224, Tf),
            NetworkDescriptor::new("InceptionV3", 299, Tf),
            NetworkDescriptor::new("Xception", 299, Tf),
            NetworkDescriptor::new("VGG16", 224, Caffe),
            NetworkDescriptor::new("VGG19", 224, Caffe),
            NetworkDescriptor::new("DenseNet121", 224, Torch),
            NetworkDescriptor::new("DenseNet169", 224, Torch),
            NetworkDescriptor::new("DenseNet201", 224, Torch),
            NetworkDescriptor::new("NASNetMobile", 224, Tf),
            NetworkDescriptor::new("NASNetLarge", 331, Tf),
        ];
        Self { networks }
    }

    pub fn get(&self, name: &str) -> Result<&NetworkDescriptor> {
        self.networks
            .iter()
            .find(|n| n.name == name)
            .ok_or_else(|| Error::UnknownNetwork(name.to_string()))
    }

    pub fn names(&self) -> Vec<&str> {
        self.networks.iter().map(|n| n.name.as_str()).collect()
    }

    /// Merges descriptors from a JSON manifest; a manifest entry with
    /// a known name replaces the builtin one.
    pub fn extend_from_manifest(&mut self, path: &Path) -> Result<()> {
        let file = File::open(path)?;
        let extra: Vec<NetworkDescriptor> = serde_json::from_reader(BufReader::new(file))?;
        for descriptor in extra {
            match self.networks.iter_mut().find(|n| n.name == descriptor.name) {
                Some(existing) => *existing = descriptor,
                None => self.networks.push(descriptor),
            }
        }
        Ok(())
    }
}

/// Index of the highest score; ties resolve to the lowest index.
pub fn argmax(scores: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &s) in scores.iter().enumerate() {
        if s.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if s <= b => {}
            _ => best = Some((i, s)),
        }
    }
    best.map(|(i, _)| i)
}

/// A descriptor paired with its loaded classifier.
pub struct LoadedNetwork {
    descriptor: NetworkDescriptor,
    classifier: Box<dyn Classifier>,
}

impl LoadedNetwork {
    pub fn descriptor(&self) -> &NetworkDescriptor {
        &self.descriptor
    }

    pub fn predict(&self, input: &Tensor) -> Result<usize> {
        let scores = self.classifier.scores(input)?;
        argmax(&scores).ok_or_else(|| {
            Error::Inference(format!("{} returned no scores", self.descriptor.name))
        })
    }
}

/// All state for one evaluation run, built once and passed by
/// reference to every call site. Networks are kept in load order,
/// which is also the reporting order.
pub struct EvalContext {
    networks: Vec<LoadedNetwork>,
}

impl EvalContext {
    pub fn new() -> Self {
        Self {
            networks: Vec::new(),
        }
    }

    pub fn add(&mut self, descriptor: NetworkDescriptor, classifier: Box<dyn Classifier>) {
        self.networks.push(LoadedNetwork {
            descriptor,
            classifier,
        });
    }

    pub fn networks(&self) -> &[LoadedNetwork] {
        &self.networks
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }

    /// Loads every requested network from `models_dir`. Names are
    /// sorted first so load and reporting order do not depend on how
    /// the list was typed.
    #[cfg(feature = "onnx")]
    pub fn load(registry: &Registry, names: &[String], models_dir: &Path) -> Result<Self> {
        let mut sorted: Vec<&String> = names.iter().collect();
        sorted.sort();

        let mut ctx = Self::new();
        for name in sorted {
            let descriptor = registry.get(name)?;
            log::info!("Loading {}", descriptor.name);
            let classifier = crate::oracle::OnnxClassifier::load(
                &models_dir.join(&descriptor.weights_file),
                descriptor.input_size,
            )?;
            ctx.add(descriptor.clone(), Box::new(classifier));
        }
        Ok(ctx)
    }
}

impl Default for EvalContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_input_sizes() {
        let registry = Registry::builtin();
        assert_eq!(registry.get("InceptionV3").unwrap().input_size, 299);
        assert_eq!(registry.get("Xception").unwrap().input_size, 299);
        assert_eq!(registry.get("NASNetLarge").unwrap().input_size, 331);
        assert_eq!(registry.get("ResNet50").unwrap().input_size, 224);
        assert_eq!(registry.names().len(), 13);
    }

    #[test]
    fn test_unknown_network() {
        let registry = Registry::builtin();
        assert!(matches!(
            registry.get("AlexNet"),
            Err(Error::UnknownNetwork(_))
        ));
    }

    #[test]
    fn test_argmax_ties_take_lowest_index() {
        assert_eq!(argmax(&[0.1, 0.7, 0.7, 0.2]), Some(1));
        assert_eq!(argmax(&[]), None);
        assert_eq!(argmax(&[f32::NAN, 0.5]), Some(1));
    }
}
