use std::fmt;
use std::path::Path;

use serde::Deserialize;
use uuid::Uuid;

use crate::actuator::ActuatorSet;
use crate::contact::ContactForceSet;
use crate::error::ModelResult;
use crate::force::read_document;
use crate::registry::AnalysisRegistry;

/// Identity of a loaded model instance. Two loads of the same file get
/// different ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelId(pub Uuid);

impl ModelId {
    /// Generate a new random model ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ModelId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// A simulation model: topology, force sets, and the registry of analyses
/// observing it.
///
/// Model files are JSON documents:
///
/// ```json
/// {
///   "name": "leg",
///   "coordinates": ["hip", "knee"],
///   "bodies": ["ground", "thigh", "shank"],
///   "actuators": [{"name": "m1", "coordinate": "hip"}],
///   "contact_forces": []
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct Model {
    name: String,
    #[serde(default)]
    coordinates: Vec<String>,
    #[serde(default)]
    bodies: Vec<String>,
    #[serde(default)]
    actuators: ActuatorSet,
    #[serde(default, rename = "contact_forces")]
    contacts: ContactForceSet,
    #[serde(skip)]
    analyses: AnalysisRegistry,
    #[serde(skip)]
    id: ModelId,
    #[serde(skip)]
    is_setup: bool,
}

impl Model {
    /// Create an empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            coordinates: Vec::new(),
            bodies: Vec::new(),
            actuators: ActuatorSet::new(),
            contacts: ContactForceSet::new(),
            analyses: AnalysisRegistry::new(),
            id: ModelId::new(),
            is_setup: false,
        }
    }

    /// Read a model from a JSON file.
    pub fn from_file(path: &Path) -> ModelResult<Self> {
        let model: Model = read_document(path)?;
        tracing::debug!(
            model = %model.name,
            coordinates = model.coordinates.len(),
            actuators = model.actuators.len(),
            "read model file"
        );
        Ok(model)
    }

    /// Set the generalized coordinates.
    pub fn with_coordinates<I, S>(mut self, coordinates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.coordinates = coordinates.into_iter().map(Into::into).collect();
        self
    }

    /// Set the bodies.
    pub fn with_bodies<I, S>(mut self, bodies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bodies = bodies.into_iter().map(Into::into).collect();
        self
    }

    /// Model name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identity of this instance.
    pub fn id(&self) -> ModelId {
        self.id
    }

    /// Generalized coordinate names.
    pub fn coordinates(&self) -> &[String] {
        &self.coordinates
    }

    /// Body names.
    pub fn bodies(&self) -> &[String] {
        &self.bodies
    }

    /// The model's actuators.
    pub fn actuators(&self) -> &ActuatorSet {
        &self.actuators
    }

    /// Mutable access to the model's actuators.
    pub fn actuators_mut(&mut self) -> &mut ActuatorSet {
        self.is_setup = false;
        &mut self.actuators
    }

    /// The model's contact forces.
    pub fn contacts(&self) -> &ContactForceSet {
        &self.contacts
    }

    /// Mutable access to the model's contact forces.
    pub fn contacts_mut(&mut self) -> &mut ContactForceSet {
        self.is_setup = false;
        &mut self.contacts
    }

    /// Analyses registered on this model.
    pub fn analyses(&self) -> &AnalysisRegistry {
        &self.analyses
    }

    /// Mutable access to the analysis registry.
    pub fn analyses_mut(&mut self) -> &mut AnalysisRegistry {
        &mut self.analyses
    }

    /// Connect every force element to the model's coordinates and bodies.
    ///
    /// Unresolved references are left unconnected; the force sets' `check`
    /// reports them.
    pub fn setup(&mut self) {
        self.actuators.connect(&self.coordinates, &self.bodies);
        self.contacts.connect(&self.coordinates, &self.bodies);
        self.is_setup = true;
    }

    /// Whether [`setup`](Self::setup) ran since the force sets last changed.
    pub fn is_setup(&self) -> bool {
        self.is_setup
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actuator::Actuator;
    use crate::contact::ContactForce;
    use crate::error::ModelError;

    #[test]
    fn from_file_reads_topology_and_sets() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("leg.json");
        std::fs::write(
            &path,
            r#"{
                "name": "leg",
                "coordinates": ["hip", "knee"],
                "bodies": ["ground", "foot"],
                "actuators": [{"name": "m1", "coordinate": "hip"}],
                "contact_forces": [{"name": "heel", "body_a": "foot", "body_b": "ground"}]
            }"#,
        )
        .unwrap();

        let model = Model::from_file(&path).unwrap();
        assert_eq!(model.name(), "leg");
        assert_eq!(model.bodies(), ["ground", "foot"]);
        assert_eq!(model.actuators().names(), vec!["m1"]);
        assert_eq!(model.contacts().names(), vec!["heel"]);
        assert!(model.analyses().is_empty());
        assert!(!model.is_setup());
    }

    #[test]
    fn from_file_rejects_malformed_document() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Model::from_file(&path),
            Err(ModelError::Parse { .. })
        ));
    }

    #[test]
    fn setup_connects_force_sets() {
        let mut model = Model::new("leg")
            .with_coordinates(["hip"])
            .with_bodies(["ground", "foot"]);
        model.actuators_mut().push(Actuator::new("m1", "hip"));
        model
            .contacts_mut()
            .push(ContactForce::new("heel", "foot", "ground"));
        assert!(!model.actuators().check());

        model.setup();
        assert!(model.is_setup());
        assert!(model.actuators().check());
        assert!(model.contacts().check());

        model.actuators_mut().clear();
        assert!(!model.is_setup());
    }

    #[test]
    fn every_load_gets_a_fresh_id() {
        assert_ne!(Model::new("a").id(), Model::new("a").id());
    }
}
