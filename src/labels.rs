use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::{Error, Result};

/// Ground-truth class per sample filename, loaded once and shared
/// read-only across networks.
#[derive(Debug, Clone)]
pub struct LabelMap {
    entries: HashMap<String, u32>,
}

impl LabelMap {
    /// Parses line-oriented `<filename> <class_id>` records. Blank
    /// lines are skipped; anything else malformed is fatal. `suffix`
    /// is the extension actually found on disk (e.g. `.png`) and
    /// replaces whatever extension the index carries, since datasets
    /// are often re-encoded after the index was written.
    pub fn load(index_path: &Path, suffix: &str) -> Result<Self> {
        if !index_path.is_file() {
            return Err(Error::LabelIndexNotFound(index_path.to_path_buf()));
        }

        let raw = fs::read_to_string(index_path)?;
        let mut entries = HashMap::new();

        for (idx, line) in raw.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let mut fields = line.split_whitespace();
            let (name, raw_class) = match (fields.next(), fields.next()) {
                (Some(name), Some(class)) => (name, class),
                _ => {
                    return Err(Error::LabelParse {
                        line: idx + 1,
                        reason: "expected `<filename> <class_id>`".to_string(),
                    })
                }
            };

            let class: u32 = raw_class.parse().map_err(|_| Error::LabelParse {
                line: idx + 1,
                reason: format!("invalid class id: {}", raw_class),
            })?;
            if class >= 1000 {
                return Err(Error::LabelParse {
                    line: idx + 1,
                    reason: format!("class id out of range: {}", class),
                });
            }

            entries.insert(rewrite_suffix(name, suffix), class);
        }

        Ok(Self { entries })
    }

    pub fn get(&self, filename: &str) -> Result<u32> {
        self.entries
            .get(filename)
            .copied()
            .ok_or_else(|| Error::MissingLabel(filename.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn rewrite_suffix(name: &str, suffix: &str) -> String {
    let stem = match name.rfind('.') {
        Some(pos) => &name[..pos],
        None => name,
    };
    format!("{}{}", stem, suffix)
}
