use crate::error::{AnnealError, AnnealResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub const ELEMENTS_FILE: &str = "elements.json";
pub const NODES_FILE: &str = "nodes.json";

/// Bounding client rect at the initial (unscrolled) position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Rect {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn pixels(&self) -> f64 {
        self.width() * self.height()
    }
}

/// One element of a parsed page, in document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub tag: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl Element {
    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub element: Element,
    pub rect: Rect,
}

/// A captured page: its elements paired with the geometry measured for
/// each one.
#[derive(Debug, Clone)]
pub struct Sample {
    pub name: String,
    pub nodes: Vec<Node>,
}

impl Sample {
    pub fn new(name: impl Into<String>, elements: Vec<Element>, rects: Vec<Rect>) -> AnnealResult<Self> {
        let name = name.into();
        if elements.len() != rects.len() {
            return Err(AnnealError::DataMismatch {
                sample: name,
                elements: elements.len(),
                rects: rects.len(),
            });
        }
        let nodes = elements
            .into_iter()
            .zip(rects)
            .map(|(element, rect)| Node { element, rect })
            .collect();
        Ok(Self { name, nodes })
    }

    pub fn load<P: AsRef<Path>>(dir: P) -> AnnealResult<Self> {
        let dir = dir.as_ref();
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| dir.display().to_string());

        let elements: Vec<Element> =
            serde_json::from_str(&fs::read_to_string(dir.join(ELEMENTS_FILE))?)?;
        let rects: Vec<Rect> = serde_json::from_str(&fs::read_to_string(dir.join(NODES_FILE))?)?;
        Self::new(name, elements, rects)
    }
}

/// Every sample under a base folder, loaded once up front.
#[derive(Debug, Clone)]
pub struct Corpus {
    pub samples: Vec<Sample>,
}

impl Corpus {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    /// Loads each subdirectory of `base` as a sample, in name order.
    pub fn load<P: AsRef<Path>>(base: P) -> AnnealResult<Self> {
        let base = base.as_ref();
        let mut dirs = Vec::new();
        for entry in fs::read_dir(base)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                dirs.push(entry.path());
            }
        }
        dirs.sort();

        let mut samples = Vec::with_capacity(dirs.len());
        for dir in &dirs {
            debug!("   Loading sample {}", dir.display());
            samples.push(Sample::load(dir)?);
        }

        if samples.is_empty() {
            return Err(AnnealError::Config(format!(
                "no samples found in '{}'",
                base.display()
            )));
        }
        info!("Loaded {} samples from {}", samples.len(), base.display());
        Ok(Self { samples })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn img() -> Element {
        Element {
            tag: "IMG".into(),
            attributes: BTreeMap::new(),
        }
    }

    #[test]
    fn test_rect_dimensions() {
        let r = Rect {
            top: 10.0,
            left: 5.0,
            bottom: 70.0,
            right: 473.0,
        };
        assert_eq!(r.width(), 468.0);
        assert_eq!(r.height(), 60.0);
        assert_eq!(r.pixels(), 468.0 * 60.0);
    }

    #[test]
    fn test_mismatch_names_both_counts() {
        let err = Sample::new("page", vec![img(), img()], vec![]).unwrap_err();
        match err {
            AnnealError::DataMismatch {
                ref sample,
                elements,
                rects,
            } => {
                assert_eq!(sample, "page");
                assert_eq!((elements, rects), (2, 0));
            }
            ref other => panic!("unexpected {other}"),
        }
        let msg = err.to_string();
        assert!(msg.contains('2') && msg.contains('0'));
    }

    #[test]
    fn test_tag_match_is_case_insensitive() {
        assert!(img().is_tag("img"));
    }
}
