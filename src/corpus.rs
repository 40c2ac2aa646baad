use crate::TextSample;
use crate::error::DataError;
use log::info;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Ordered text subsets, as read from the corpus file.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    samples: Vec<TextSample>,
}

impl Corpus {
    /// Parses a JSON array of strings, or an object of strings taken in key
    /// order (numeric when every key is an unsigned integer).
    pub fn from_json_str(json: &str) -> Result<Self, DataError> {
        let value: Value = serde_json::from_str(json)?;
        let texts = match value {
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| into_text(i.to_string(), item))
                .collect::<Result<Vec<_>, _>>()?,
            Value::Object(map) => ordered_values(map)
                .into_iter()
                .map(|(key, item)| into_text(key, item))
                .collect::<Result<Vec<_>, _>>()?,
            _ => return Err(DataError::UnexpectedShape),
        };

        Ok(Self {
            samples: texts.into_iter().map(TextSample::new).collect(),
        })
    }

    pub fn samples(&self) -> &[TextSample] {
        &self.samples
    }

    /// Character count of each sample, parallel to [`Corpus::samples`].
    pub fn lengths(&self) -> Vec<usize> {
        self.samples.iter().map(TextSample::length).collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn into_samples(self) -> Vec<TextSample> {
        self.samples
    }
}

pub fn load_corpus(path: impl AsRef<Path>) -> Result<Corpus, DataError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let corpus = Corpus::from_json_str(&raw)?;
    info!(
        "[CORPUS] Loaded {} samples from {} (lengths: {:?})",
        corpus.len(),
        path.display(),
        corpus.lengths()
    );
    Ok(corpus)
}

fn into_text(key: String, value: Value) -> Result<String, DataError> {
    match value {
        Value::String(text) => Ok(text),
        _ => Err(DataError::NotAString { key }),
    }
}

fn ordered_values(map: Map<String, Value>) -> Vec<(String, Value)> {
    let mut entries: Vec<(String, Value)> = map.into_iter().collect();

    if entries.iter().all(|(k, _)| k.parse::<u64>().is_ok()) {
        entries.sort_by_key(|(k, _)| k.parse::<u64>().unwrap_or(u64::MAX));
    } else {
        entries.sort_by(|a, b| a.0.cmp(&b.0));
    }
    entries
}
