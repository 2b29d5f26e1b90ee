use std::collections::HashSet;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// An element of a [`ForceSet`]: something that applies force to a model
/// once it has been connected to the model's coordinates or bodies.
pub trait ForceElement: Clone + std::fmt::Debug {
    /// Name of the element. Names must be unique within a set.
    fn name(&self) -> &str;

    /// Resolve the element's references against the model topology.
    fn connect(&mut self, coordinates: &[String], bodies: &[String]);

    /// Whether the last [`connect`](Self::connect) resolved every reference.
    fn is_connected(&self) -> bool;

    /// Describe an invalid parameter, if any.
    fn parameter_problem(&self) -> Option<String> {
        None
    }
}

/// An ordered, mutable collection of force elements.
///
/// Serialized as a plain JSON array, so a force-set file is just a list of
/// elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ForceSet<T> {
    elements: Vec<T>,
}

impl<T> Default for ForceSet<T> {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
        }
    }
}

impl<T> FromIterator<T> for ForceSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

impl<T: ForceElement> ForceSet<T> {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of elements in the set.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the set has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Shrink the set to size zero.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Add a single element at the end of the set.
    pub fn push(&mut self, element: T) {
        self.elements.push(element);
    }

    /// Append every element of `other`, preserving its order.
    pub fn append(&mut self, other: ForceSet<T>) {
        self.elements.extend(other.elements);
    }

    /// Iterate over the elements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    /// Look up an element by name.
    pub fn get(&self, name: &str) -> Option<&T> {
        self.elements.iter().find(|e| e.name() == name)
    }

    /// Element names, in set order.
    pub fn names(&self) -> Vec<&str> {
        self.elements.iter().map(|e| e.name()).collect()
    }

    /// Connect every element to the given topology.
    pub fn connect(&mut self, coordinates: &[String], bodies: &[String]) {
        for element in &mut self.elements {
            element.connect(coordinates, bodies);
        }
    }

    /// Problems that make the set unusable after setup. Empty when valid.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let mut seen = HashSet::new();
        for (index, element) in self.elements.iter().enumerate() {
            let name = element.name();
            if name.trim().is_empty() {
                problems.push(format!("element {index} has no name"));
                continue;
            }
            if !seen.insert(name) {
                problems.push(format!("duplicate name \"{name}\""));
            }
            if !element.is_connected() {
                problems.push(format!("\"{name}\" is not connected to the model"));
            }
            if let Some(problem) = element.parameter_problem() {
                problems.push(format!("\"{name}\": {problem}"));
            }
        }
        problems
    }

    /// Post-setup validity check.
    pub fn check(&self) -> bool {
        self.problems().is_empty()
    }
}

impl<T: ForceElement + DeserializeOwned> ForceSet<T> {
    /// Read a set from a JSON file containing an array of elements.
    pub fn from_file(path: &Path) -> ModelResult<Self> {
        read_document(path)
    }
}

impl<'a, T> IntoIterator for &'a ForceSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

/// Read and deserialize a JSON document, attaching the path to any failure.
pub(crate) fn read_document<T: DeserializeOwned>(path: &Path) -> ModelResult<T> {
    let text = std::fs::read_to_string(path).map_err(|source| ModelError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ModelError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
