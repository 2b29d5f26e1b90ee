use serde::{Deserialize, Serialize};

use crate::force::{ForceElement, ForceSet};

/// An ordered set of actuators.
pub type ActuatorSet = ForceSet<Actuator>;

fn default_optimal_force() -> f64 {
    1.0
}

/// A force generator driving one generalized coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actuator {
    /// Unique actuator name.
    pub name: String,
    /// Name of the coordinate this actuator drives.
    pub coordinate: String,
    /// Force produced at full excitation. Must be positive.
    #[serde(default = "default_optimal_force")]
    pub optimal_force: f64,
    /// Index of `coordinate` in the model, set by `connect`.
    #[serde(skip)]
    pub coordinate_index: Option<usize>,
}

impl Actuator {
    /// Create an unconnected actuator with unit optimal force.
    pub fn new(name: impl Into<String>, coordinate: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            coordinate: coordinate.into(),
            optimal_force: default_optimal_force(),
            coordinate_index: None,
        }
    }

    /// Set the optimal force.
    pub fn with_optimal_force(mut self, force: f64) -> Self {
        self.optimal_force = force;
        self
    }
}

impl ForceElement for Actuator {
    fn name(&self) -> &str {
        &self.name
    }

    fn connect(&mut self, coordinates: &[String], _bodies: &[String]) {
        self.coordinate_index = coordinates.iter().position(|c| *c == self.coordinate);
    }

    fn is_connected(&self) -> bool {
        self.coordinate_index.is_some()
    }

    fn parameter_problem(&self) -> Option<String> {
        (self.optimal_force.is_nan() || self.optimal_force <= 0.0)
            .then(|| format!("optimal force must be positive, got {}", self.optimal_force))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords() -> Vec<String> {
        vec!["hip_flexion".to_string(), "knee_angle".to_string()]
    }

    #[test]
    fn connect_resolves_coordinate_index() {
        let mut act = Actuator::new("knee_act", "knee_angle");
        act.connect(&coords(), &[]);
        assert_eq!(act.coordinate_index, Some(1));
        assert!(act.is_connected());
    }

    #[test]
    fn unknown_coordinate_stays_unconnected() {
        let mut act = Actuator::new("ankle_act", "ankle_angle");
        act.connect(&coords(), &[]);
        assert!(!act.is_connected());
    }

    #[test]
    fn optimal_force_defaults_when_missing() {
        let act: Actuator =
            serde_json::from_str(r#"{"name": "m1", "coordinate": "hip_flexion"}"#).unwrap();
        assert!((act.optimal_force - 1.0).abs() < f64::EPSILON);
        assert_eq!(act.coordinate_index, None);
    }

    #[test]
    fn set_check_reports_duplicates_and_unconnected() {
        let mut set: ActuatorSet = [
            Actuator::new("m1", "hip_flexion"),
            Actuator::new("m1", "knee_angle"),
            Actuator::new("m2", "missing"),
            Actuator::new("m3", "knee_angle").with_optimal_force(0.0),
        ]
        .into_iter()
        .collect();
        set.connect(&coords(), &[]);

        let problems = set.problems();
        assert!(!set.check());
        assert_eq!(problems.len(), 3);
        assert!(problems[0].contains("duplicate name \"m1\""));
        assert!(problems[1].contains("\"m2\" is not connected"));
        assert!(problems[2].contains("optimal force must be positive"));
    }

    #[test]
    fn set_check_passes_for_connected_set() {
        let mut set: ActuatorSet = [
            Actuator::new("m1", "hip_flexion").with_optimal_force(500.0),
            Actuator::new("m2", "knee_angle"),
        ]
        .into_iter()
        .collect();
        set.connect(&coords(), &[]);
        assert!(set.check());
    }

    #[test]
    fn set_check_fails_before_connect() {
        let set: ActuatorSet = [Actuator::new("m1", "hip_flexion")].into_iter().collect();
        assert!(!set.check());
    }

    #[test]
    fn clear_then_append_keeps_order() {
        let mut set: ActuatorSet = [Actuator::new("m1", "hip_flexion")].into_iter().collect();
        set.clear();
        assert!(set.is_empty());

        set.append([Actuator::new("a1", "x"), Actuator::new("a2", "y")].into_iter().collect());
        set.append([Actuator::new("b1", "z")].into_iter().collect());
        assert_eq!(set.names(), vec!["a1", "a2", "b1"]);
    }
}
