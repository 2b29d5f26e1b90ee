use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ModelResult;
use crate::model::{Model, ModelId};
use crate::storage::Storage;

/// A module that observes a model during simulation and writes results.
///
/// Instances are bound to exactly one model at a time. Templates are never
/// bound; tools bind independent copies made with [`clone_box`](Self::clone_box).
pub trait Analysis: std::fmt::Debug {
    /// Human-readable name, also used in results file names.
    fn name(&self) -> &str;

    /// Create an independent copy of this analysis.
    fn clone_box(&self) -> Box<dyn Analysis>;

    /// Bind this analysis to `model`, replacing any previous binding.
    fn set_model(&mut self, model: &Model);

    /// The model this analysis is bound to, if any.
    fn model(&self) -> Option<ModelId>;

    /// Observe one integration step.
    fn record(&mut self, time: f64, values: &[f64]);

    /// Recorded results.
    fn storage(&self) -> &Storage;

    /// Write results as `{base_name}_{name}.{extension}` inside `dir`.
    ///
    /// A positive `sample_interval` resamples with linear interpolation;
    /// `None` or a negative interval writes every recorded step.
    fn print_results(
        &self,
        base_name: &str,
        dir: &Path,
        sample_interval: Option<f64>,
        extension: &str,
    ) -> ModelResult<PathBuf> {
        let extension = extension.trim_start_matches('.');
        let file_name = if extension.is_empty() {
            format!("{base_name}_{}", self.name())
        } else {
            format!("{base_name}_{}.{extension}", self.name())
        };
        let path = dir.join(file_name);
        match sample_interval {
            Some(dt) if dt > 0.0 => self.storage().resample(dt)?.write_tsv(&path)?,
            _ => self.storage().write_tsv(&path)?,
        }
        Ok(path)
    }

    /// Support downcasting to concrete analysis types.
    fn as_any(&self) -> &dyn std::any::Any;
}

impl Clone for Box<dyn Analysis> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Which model quantities a [`Recorder`] stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// One column per generalized coordinate.
    #[default]
    Coordinates,
    /// One column per actuator.
    Actuators,
    /// One column per contact force.
    ContactForces,
}

fn default_on() -> bool {
    true
}

fn default_step_interval() -> u32 {
    1
}

/// Declarative description of an analysis to run.
///
/// A descriptor is stateless with respect to any model; [`create`](Self::create)
/// produces a fresh instance every time it is called.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisDescriptor {
    /// Name of the analysis.
    pub name: String,
    /// Quantities to record.
    #[serde(default)]
    pub kind: RecordKind,
    /// Whether the analysis records anything.
    #[serde(default = "default_on")]
    pub on: bool,
    /// Record every n-th integration step.
    #[serde(default = "default_step_interval")]
    pub step_interval: u32,
}

impl AnalysisDescriptor {
    /// Describe an enabled analysis recording every step.
    pub fn new(name: impl Into<String>, kind: RecordKind) -> Self {
        Self {
            name: name.into(),
            kind,
            on: default_on(),
            step_interval: default_step_interval(),
        }
    }

    /// Create a new, unbound analysis instance from this description.
    pub fn create(&self) -> Box<dyn Analysis> {
        Box::new(Recorder::from_descriptor(self))
    }
}

/// Analysis that stores model quantities at every n-th step.
#[derive(Debug, Clone)]
pub struct Recorder {
    descriptor: AnalysisDescriptor,
    model: Option<ModelId>,
    storage: Storage,
    steps_seen: u64,
}

impl Recorder {
    /// Create an unbound recorder.
    pub fn from_descriptor(descriptor: &AnalysisDescriptor) -> Self {
        Self {
            descriptor: descriptor.clone(),
            model: None,
            storage: Storage::default(),
            steps_seen: 0,
        }
    }
}

impl Analysis for Recorder {
    fn name(&self) -> &str {
        &self.descriptor.name
    }

    fn clone_box(&self) -> Box<dyn Analysis> {
        Box::new(self.clone())
    }

    fn set_model(&mut self, model: &Model) {
        let labels = match self.descriptor.kind {
            RecordKind::Coordinates => model.coordinates().to_vec(),
            RecordKind::Actuators => owned(model.actuators().names()),
            RecordKind::ContactForces => owned(model.contacts().names()),
        };
        self.model = Some(model.id());
        self.storage = Storage::new(labels);
        self.steps_seen = 0;
    }

    fn model(&self) -> Option<ModelId> {
        self.model
    }

    fn record(&mut self, time: f64, values: &[f64]) {
        let step = self.steps_seen;
        self.steps_seen += 1;
        if !self.descriptor.on {
            return;
        }
        if step % u64::from(self.descriptor.step_interval.max(1)) != 0 {
            return;
        }
        if values.len() != self.storage.labels().len() {
            warn!(
                analysis = %self.descriptor.name,
                expected = self.storage.labels().len(),
                got = values.len(),
                time,
                "skipping row with wrong number of values"
            );
            return;
        }
        self.storage.push(time, values.to_vec());
    }

    fn storage(&self) -> &Storage {
        &self.storage
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

fn owned(names: Vec<&str>) -> Vec<String> {
    names.into_iter().map(String::from).collect()
}
