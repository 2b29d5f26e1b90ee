use std::path::Path;

use rw_model::{ActuatorSet, ContactForceSet, ForceElement, ForceSet, Model};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::config::ToolConfig;
use crate::error::{ToolError, ToolResult};
use crate::scope::{DirectoryScope, with_directory};

/// Force sets the base model carried before supplementary sets were merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OriginalSets {
    /// The base model's actuators.
    pub actuators: ActuatorSet,
    /// The base model's contact forces.
    pub contacts: ContactForceSet,
}

/// Builds a ready-to-simulate [`Model`] from a [`ToolConfig`].
///
/// The base model file and every supplementary force-set file are resolved
/// relative to the setup file's directory.
#[derive(Debug, Clone, Copy)]
pub struct ModelAssembler<'a> {
    config: &'a ToolConfig,
}

impl<'a> ModelAssembler<'a> {
    /// Create an assembler for `config`.
    pub fn new(config: &'a ToolConfig) -> Self {
        Self { config }
    }

    /// Load, merge, set up, and validate the configured model.
    ///
    /// Returns `Ok(None)` when no model file is configured.
    pub fn assemble(&self, setup_file: impl AsRef<Path>) -> ToolResult<Option<Model>> {
        self.assemble_inner(setup_file.as_ref(), None)
    }

    /// Like [`assemble`](Self::assemble), also returning the base model's
    /// force sets as they were before any replace or append.
    pub fn assemble_with_originals(
        &self,
        setup_file: impl AsRef<Path>,
    ) -> ToolResult<Option<(Model, OriginalSets)>> {
        let mut originals = OriginalSets::default();
        let model = self.assemble_inner(setup_file.as_ref(), Some(&mut originals))?;
        Ok(model.map(|m| (m, originals)))
    }

    fn assemble_inner(
        &self,
        setup_file: &Path,
        originals: Option<&mut OriginalSets>,
    ) -> ToolResult<Option<Model>> {
        if !self.config.has_model() {
            debug!("no model file configured, nothing to load");
            return Ok(None);
        }
        let setup_dir = setup_file.parent().unwrap_or(Path::new(""));
        let mut model = with_directory(setup_dir, |scope| self.merge(scope, originals))?;
        finalize(&mut model)?;
        Ok(Some(model))
    }

    /// Load the base model and merge the supplementary actuator and contact
    /// sets into it, without setting it up.
    pub fn merge(
        &self,
        scope: &DirectoryScope,
        originals: Option<&mut OriginalSets>,
    ) -> ToolResult<Model> {
        info!(model = %self.config.model_file, "loading model");
        let mut model = scope.load(&self.config.model_file, Model::from_file)?;

        let (original_actuators, original_contacts) = match originals {
            Some(o) => (Some(&mut o.actuators), Some(&mut o.contacts)),
            None => (None, None),
        };
        merge_set(
            scope,
            model.actuators_mut(),
            self.config.replace_actuator_set,
            &self.config.actuator_set_files,
            "actuator",
            original_actuators,
        )?;
        merge_set(
            scope,
            model.contacts_mut(),
            self.config.replace_contact_force_set,
            &self.config.contact_force_set_files,
            "contact force",
            original_contacts,
        )?;
        Ok(model)
    }
}

fn merge_set<T: ForceElement + DeserializeOwned>(
    scope: &DirectoryScope,
    set: &mut ForceSet<T>,
    replace: bool,
    files: &[String],
    kind: &str,
    original: Option<&mut ForceSet<T>>,
) -> ToolResult<()> {
    if let Some(original) = original {
        *original = set.clone();
    }
    if replace {
        debug!(discarded = set.len(), "replacing {kind} set");
        set.clear();
    }
    for file in files {
        info!(file = %file, "adding {kind} set");
        set.append(scope.load(file, ForceSet::from_file)?);
    }
    Ok(())
}

/// Set up `model` and check its actuator set.
pub fn finalize(model: &mut Model) -> ToolResult<()> {
    model.setup();
    let problems = model.actuators().problems();
    if problems.is_empty() {
        Ok(())
    } else {
        Err(ToolError::Validation(problems.join("; ")))
    }
}
