use std::fmt;
use std::path::{Path, PathBuf};

use rw_model::{AnalysisDescriptor, AnalysisHandle, Model};
use tracing::info;

use crate::assembler::{ModelAssembler, OriginalSets};
use crate::attachment::AnalysisLedger;
use crate::config::ToolConfig;
use crate::error::{ToolError, ToolResult};

/// The model a tool works on, and who is responsible for dropping it.
#[derive(Debug, Default)]
pub enum ModelSlot<'m> {
    /// No model installed.
    #[default]
    Empty,
    /// Built by the tool; dropped with it.
    Owned(Box<Model>),
    /// Supplied by the caller, who keeps ownership.
    Borrowed(&'m mut Model),
}

impl ModelSlot<'_> {
    /// The installed model, if any.
    pub fn get(&self) -> Option<&Model> {
        match self {
            Self::Empty => None,
            Self::Owned(model) => Some(&**model),
            Self::Borrowed(model) => Some(&**model),
        }
    }

    /// The installed model mutably, if any.
    pub fn get_mut(&mut self) -> Option<&mut Model> {
        match self {
            Self::Empty => None,
            Self::Owned(model) => Some(&mut **model),
            Self::Borrowed(model) => Some(&mut **model),
        }
    }

    /// Whether the tool owns the installed model.
    pub fn is_owned(&self) -> bool {
        matches!(self, Self::Owned(_))
    }
}

/// Assembles a model from a [`ToolConfig`] and manages the analyses
/// attached to it.
///
/// Analyses are detached from the installed model whenever it is replaced
/// and when the tool is dropped, so a borrowed model never keeps handles to
/// instances that no longer exist.
pub struct Tool<'m> {
    name: String,
    config: ToolConfig,
    model: ModelSlot<'m>,
    ledger: AnalysisLedger,
}

impl fmt::Debug for Tool<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("model", &self.model.get().map(Model::name))
            .field("owns_model", &self.model.is_owned())
            .field("analyses", &self.ledger.len())
            .finish()
    }
}

impl Clone for Tool<'_> {
    /// Copies the name and configuration. The clone starts without a model.
    fn clone(&self) -> Self {
        Self::new(self.name.clone(), self.config.clone())
    }
}

impl<'m> Tool<'m> {
    /// Create a tool with no model installed.
    pub fn new(name: impl Into<String>, config: ToolConfig) -> Self {
        Self {
            name: name.into(),
            config,
            model: ModelSlot::Empty,
            ledger: AnalysisLedger::new(),
        }
    }

    /// Create a tool from a JSON setup file, named after the file stem.
    pub fn from_setup_file(path: impl AsRef<Path>) -> ToolResult<Self> {
        let path = path.as_ref();
        let config = ToolConfig::from_file(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(name, config))
    }

    /// Tool name, used in log output.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The configuration this tool was built with.
    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    /// Configured analysis descriptors, including empty slots.
    pub fn analysis_descriptors(&self) -> &[Option<AnalysisDescriptor>] {
        &self.config.analyses
    }

    /// Assemble the configured model and install it as owned.
    ///
    /// Paths in the configuration resolve relative to `setup_file`'s
    /// directory. With no model file configured this does nothing. On
    /// failure the previously installed model, if any, stays in place.
    pub fn load_model(&mut self, setup_file: impl AsRef<Path>) -> ToolResult<()> {
        let model = ModelAssembler::new(&self.config).assemble(setup_file)?;
        if let Some(model) = model {
            self.install(ModelSlot::Owned(Box::new(model)))?;
        }
        Ok(())
    }

    /// Like [`load_model`](Self::load_model), also returning the base
    /// model's actuator and contact sets from before the merge.
    pub fn load_model_with_originals(
        &mut self,
        setup_file: impl AsRef<Path>,
    ) -> ToolResult<Option<OriginalSets>> {
        let assembled = ModelAssembler::new(&self.config).assemble_with_originals(setup_file)?;
        match assembled {
            Some((model, originals)) => {
                self.install(ModelSlot::Owned(Box::new(model)))?;
                Ok(Some(originals))
            }
            None => Ok(None),
        }
    }

    /// Install a caller-owned model, or clear the slot with `None`.
    ///
    /// Analyses are detached from the previous model first, and an owned
    /// previous model is dropped. Configured analyses are attached to the
    /// new model.
    pub fn set_model(&mut self, model: Option<&'m mut Model>) -> ToolResult<()> {
        match model {
            Some(model) => self.install(ModelSlot::Borrowed(model)),
            None => {
                self.release();
                Ok(())
            }
        }
    }

    /// The installed model, if any.
    pub fn model(&self) -> Option<&Model> {
        self.model.get()
    }

    /// The installed model mutably, if any.
    pub fn model_mut(&mut self) -> Option<&mut Model> {
        self.model.get_mut()
    }

    /// Whether the installed model was built by this tool.
    pub fn owns_model(&self) -> bool {
        self.model.is_owned()
    }

    /// Analyses this tool has attached.
    pub fn ledger(&self) -> &AnalysisLedger {
        &self.ledger
    }

    /// Mutable access to attached analyses.
    pub fn ledger_mut(&mut self) -> &mut AnalysisLedger {
        &mut self.ledger
    }

    /// Attach the configured analyses to the installed model.
    pub fn attach_all(&mut self) -> ToolResult<usize> {
        self.ledger
            .attach_all(self.model.get_mut(), &self.config.analyses)
    }

    /// Detach every analysis this tool attached, newest first, returning
    /// the detached handles. No-op without a model.
    pub fn detach_all(&mut self) -> Vec<AnalysisHandle> {
        self.ledger.detach_all(self.model.get_mut())
    }

    /// Write the results of every attached analysis into `output_dir`,
    /// creating it if needed.
    ///
    /// `sample_interval` of `None` or a negative value writes every recorded
    /// step without interpolation.
    pub fn print_results(
        &self,
        base_name: &str,
        output_dir: impl AsRef<Path>,
        sample_interval: Option<f64>,
        extension: &str,
    ) -> ToolResult<Vec<PathBuf>> {
        let output_dir = output_dir.as_ref();
        let model = self.model.get().ok_or(ToolError::NoModel)?;
        info!(
            tool = %self.name,
            dir = %output_dir.display(),
            "printing results"
        );
        std::fs::create_dir_all(output_dir).map_err(|source| ToolError::ResultsDir {
            path: output_dir.to_path_buf(),
            source,
        })?;
        self.ledger
            .iter()
            .filter(|(handle, _)| model.analyses().contains(*handle))
            .map(|(_, analysis)| {
                analysis
                    .print_results(base_name, output_dir, sample_interval, extension)
                    .map_err(ToolError::Results)
            })
            .collect()
    }

    fn install(&mut self, slot: ModelSlot<'m>) -> ToolResult<()> {
        self.release();
        self.model = slot;
        if self.config.analyses.is_empty() {
            return Ok(());
        }
        self.attach_all().map(|_| ())
    }

    fn release(&mut self) {
        self.detach_all();
        self.model = ModelSlot::Empty;
    }
}

impl Drop for Tool<'_> {
    fn drop(&mut self) {
        self.detach_all();
    }
}
