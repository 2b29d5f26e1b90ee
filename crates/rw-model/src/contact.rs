use serde::{Deserialize, Serialize};

use crate::force::{ForceElement, ForceSet};

/// An ordered set of contact forces.
pub type ContactForceSet = ForceSet<ContactForce>;

fn default_stiffness() -> f64 {
    1.0e6
}

/// A compliant contact between two bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactForce {
    /// Unique contact name.
    pub name: String,
    /// First body in contact.
    pub body_a: String,
    /// Second body in contact.
    pub body_b: String,
    /// Normal stiffness. Must be positive.
    #[serde(default = "default_stiffness")]
    pub stiffness: f64,
    /// Normal damping. Must not be negative.
    #[serde(default)]
    pub damping: f64,
    /// Body indices in the model, set by `connect`.
    #[serde(skip)]
    pub body_indices: Option<(usize, usize)>,
}

impl ContactForce {
    /// Create an unconnected contact with default stiffness and no damping.
    pub fn new(
        name: impl Into<String>,
        body_a: impl Into<String>,
        body_b: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            body_a: body_a.into(),
            body_b: body_b.into(),
            stiffness: default_stiffness(),
            damping: 0.0,
            body_indices: None,
        }
    }
}

impl ForceElement for ContactForce {
    fn name(&self) -> &str {
        &self.name
    }

    fn connect(&mut self, _coordinates: &[String], bodies: &[String]) {
        let find = |name: &str| bodies.iter().position(|b| b == name);
        self.body_indices = find(&self.body_a).zip(find(&self.body_b));
    }

    fn is_connected(&self) -> bool {
        self.body_indices.is_some()
    }

    fn parameter_problem(&self) -> Option<String> {
        if self.stiffness.is_nan() || self.stiffness <= 0.0 {
            Some(format!("stiffness must be positive, got {}", self.stiffness))
        } else if self.damping < 0.0 {
            Some(format!("damping must not be negative, got {}", self.damping))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_needs_both_bodies() {
        let bodies = vec!["ground".to_string(), "foot".to_string()];

        let mut heel = ContactForce::new("heel", "foot", "ground");
        heel.connect(&[], &bodies);
        assert_eq!(heel.body_indices, Some((1, 0)));

        let mut toe = ContactForce::new("toe", "toes", "ground");
        toe.connect(&[], &bodies);
        assert!(!toe.is_connected());
    }

    #[test]
    fn negative_damping_is_a_problem() {
        let mut contact = ContactForce::new("heel", "foot", "ground");
        contact.damping = -1.0;
        assert!(contact.parameter_problem().unwrap().contains("damping"));
    }

    #[test]
    fn file_is_a_plain_array() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("contacts.json");
        std::fs::write(
            &path,
            r#"[{"name": "heel", "body_a": "foot", "body_b": "ground", "damping": 2.5}]"#,
        )
        .unwrap();

        let set = ContactForceSet::from_file(&path).unwrap();
        assert_eq!(set.names(), vec!["heel"]);
        let heel = set.get("heel").unwrap();
        assert!((heel.stiffness - 1.0e6).abs() < f64::EPSILON);
        assert!((heel.damping - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn unreadable_file_reports_path() {
        let err = ContactForceSet::from_file(std::path::Path::new("/nonexistent/contacts.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/contacts.json"));
    }
}
