use std::path::Path;

use rw_model::AnalysisDescriptor;
use serde::{Deserialize, Serialize};

use crate::error::{ToolError, ToolResult};

/// Declarative settings for a tool run.
///
/// Every field missing from a setup file takes its default. Numeric ranges are
/// not validated here; the solver interprets tolerances and step bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Model file to load, relative to the setup file. Empty means no model.
    pub model_file: String,
    /// Replace the model's actuator set with the sets in `actuator_set_files`.
    /// If false, those sets are appended to it.
    pub replace_actuator_set: bool,
    /// Actuator-set files, merged in order.
    pub actuator_set_files: Vec<String>,
    /// Replace the model's contact-force set with the sets in
    /// `contact_force_set_files`. If false, those sets are appended to it.
    pub replace_contact_force_set: bool,
    /// Contact-force-set files, merged in order.
    pub contact_force_set_files: Vec<String>,
    /// Directory used for writing results.
    pub results_directory: String,
    /// Number of significant digits in results.
    pub output_precision: u32,
    /// Initial simulation time.
    pub initial_time: f64,
    /// Final simulation time.
    pub final_time: f64,
    /// Compute equilibrium values for auxiliary states such as muscle fiber
    /// lengths before integrating.
    pub solve_for_equilibrium_for_auxiliary_states: bool,
    /// Maximum number of integrator steps.
    pub maximum_number_of_integrator_steps: u32,
    /// Maximum integration step size.
    pub maximum_integrator_step_size: f64,
    /// Minimum integration step size.
    pub minimum_integrator_step_size: f64,
    /// Step size is decreased when the error exceeds this.
    pub integrator_error_tolerance: f64,
    /// Step size is increased when the error falls below this.
    pub integrator_fine_tolerance: f64,
    /// Analyses to attach to the model, in order. `None` entries are skipped.
    pub analyses: Vec<Option<AnalysisDescriptor>>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            model_file: String::new(),
            replace_actuator_set: true,
            actuator_set_files: Vec::new(),
            replace_contact_force_set: true,
            contact_force_set_files: Vec::new(),
            results_directory: "./".to_string(),
            output_precision: 20,
            initial_time: 0.0,
            final_time: 1.0,
            solve_for_equilibrium_for_auxiliary_states: false,
            maximum_number_of_integrator_steps: 20_000,
            maximum_integrator_step_size: 1.0,
            minimum_integrator_step_size: 1.0e-8,
            integrator_error_tolerance: 1.0e-3,
            integrator_fine_tolerance: 1.0e-5,
            analyses: Vec::new(),
        }
    }
}

impl ToolConfig {
    /// Read a JSON setup file.
    pub fn from_file(path: impl AsRef<Path>) -> ToolResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ToolError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ToolError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Render as a pretty-printed JSON setup document.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Whether a model file is configured.
    pub fn has_model(&self) -> bool {
        !self.model_file.is_empty()
    }

    /// Set the model file.
    pub fn with_model_file(mut self, path: impl Into<String>) -> Self {
        self.model_file = path.into();
        self
    }

    /// Set whether supplementary actuator sets replace the model's own.
    pub fn with_replace_actuator_set(mut self, replace: bool) -> Self {
        self.replace_actuator_set = replace;
        self
    }

    /// Set the actuator-set files.
    pub fn with_actuator_set_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.actuator_set_files = files.into_iter().map(Into::into).collect();
        self
    }

    /// Set whether supplementary contact sets replace the model's own.
    pub fn with_replace_contact_force_set(mut self, replace: bool) -> Self {
        self.replace_contact_force_set = replace;
        self
    }

    /// Set the contact-force-set files.
    pub fn with_contact_force_set_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.contact_force_set_files = files.into_iter().map(Into::into).collect();
        self
    }

    /// Set the results directory.
    pub fn with_results_directory(mut self, dir: impl Into<String>) -> Self {
        self.results_directory = dir.into();
        self
    }

    /// Set the simulation time window.
    pub fn with_time_range(mut self, initial: f64, final_time: f64) -> Self {
        self.initial_time = initial;
        self.final_time = final_time;
        self
    }

    /// Append an analysis descriptor.
    pub fn with_analysis(mut self, descriptor: AnalysisDescriptor) -> Self {
        self.analyses.push(Some(descriptor));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rw_model::RecordKind;

    #[test]
    fn config_default_values() {
        let config = ToolConfig::default();
        assert!(config.model_file.is_empty());
        assert!(!config.has_model());
        assert!(config.replace_actuator_set);
        assert!(config.replace_contact_force_set);
        assert_eq!(config.results_directory, "./");
        assert_eq!(config.output_precision, 20);
        assert!((config.initial_time - 0.0).abs() < f64::EPSILON);
        assert!((config.final_time - 1.0).abs() < f64::EPSILON);
        assert!(!config.solve_for_equilibrium_for_auxiliary_states);
        assert_eq!(config.maximum_number_of_integrator_steps, 20_000);
        assert!((config.maximum_integrator_step_size - 1.0).abs() < f64::EPSILON);
        assert!((config.minimum_integrator_step_size - 1.0e-8).abs() < f64::EPSILON);
        assert!((config.integrator_error_tolerance - 1.0e-3).abs() < f64::EPSILON);
        assert!((config.integrator_fine_tolerance - 1.0e-5).abs() < f64::EPSILON);
        assert!(config.analyses.is_empty());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: ToolConfig = serde_json::from_str(
            r#"{
                "model_file": "leg.json",
                "replace_actuator_set": false,
                "actuator_set_files": ["a.json", "b.json"],
                "final_time": 2.5
            }"#,
        )
        .unwrap();
        assert_eq!(config.model_file, "leg.json");
        assert!(!config.replace_actuator_set);
        assert_eq!(config.actuator_set_files, vec!["a.json", "b.json"]);
        assert!((config.final_time - 2.5).abs() < f64::EPSILON);
        assert!(config.replace_contact_force_set);
        assert_eq!(config.output_precision, 20);
    }

    #[test]
    fn analyses_may_contain_empty_slots() {
        let config: ToolConfig = serde_json::from_str(
            r#"{"analyses": [{"name": "Kinematics"}, null, {"name": "Forces", "kind": "actuators"}]}"#,
        )
        .unwrap();
        assert_eq!(config.analyses.len(), 3);
        assert!(config.analyses[1].is_none());
        assert_eq!(
            config.analyses[2].as_ref().map(|d| d.kind),
            Some(RecordKind::Actuators)
        );
    }

    #[test]
    fn config_builder_chain() {
        let config = ToolConfig::default()
            .with_model_file("leg.json")
            .with_replace_actuator_set(false)
            .with_actuator_set_files(["a.json"])
            .with_contact_force_set_files(["c.json"])
            .with_results_directory("out")
            .with_time_range(0.5, 3.0)
            .with_analysis(AnalysisDescriptor::new("q", RecordKind::Coordinates));
        assert_eq!(config.model_file, "leg.json");
        assert!(!config.replace_actuator_set);
        assert_eq!(config.contact_force_set_files, vec!["c.json"]);
        assert_eq!(config.results_directory, "out");
        assert!((config.initial_time - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.analyses.len(), 1);
    }

    #[test]
    fn json_round_trip_preserves_settings() {
        let config = ToolConfig::default()
            .with_model_file("leg.json")
            .with_analysis(AnalysisDescriptor::new("q", RecordKind::Coordinates));
        let parsed: ToolConfig = serde_json::from_str(&config.to_json()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn from_file_reports_missing_and_malformed() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(matches!(
            ToolConfig::from_file(dir.path().join("missing.json")),
            Err(ToolError::ConfigRead { .. })
        ));

        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"output_precision": "high"}"#).unwrap();
        assert!(matches!(
            ToolConfig::from_file(&path),
            Err(ToolError::ConfigParse { .. })
        ));
    }
}
