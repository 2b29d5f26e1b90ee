use rw_model::{Analysis, AnalysisDescriptor, AnalysisHandle, Model, ModelId};
use tracing::{debug, warn};

use crate::error::{ToolError, ToolResult};

/// Analysis instances a tool has attached to a model.
///
/// The ledger owns every instance; the model's registry only holds their
/// handles. Each instance is created fresh from a descriptor, so no two
/// entries share state and no entry is owned anywhere else.
#[derive(Debug, Default)]
pub struct AnalysisLedger {
    model: Option<ModelId>,
    entries: Vec<(AnalysisHandle, Box<dyn Analysis>)>,
}

impl AnalysisLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// The model the current entries are attached to.
    pub fn model(&self) -> Option<ModelId> {
        self.model
    }

    /// Number of attached analyses.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is attached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Handles in registration order.
    pub fn handles(&self) -> impl Iterator<Item = AnalysisHandle> + '_ {
        self.entries.iter().map(|(h, _)| *h)
    }

    /// Attached analyses in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (AnalysisHandle, &dyn Analysis)> + '_ {
        self.entries.iter().map(|(h, a)| (*h, a.as_ref()))
    }

    /// Look up an attached analysis.
    pub fn get(&self, handle: AnalysisHandle) -> Option<&dyn Analysis> {
        self.entries
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, a)| a.as_ref())
    }

    /// Look up an attached analysis mutably, e.g. to feed it samples.
    pub fn get_mut(&mut self, handle: AnalysisHandle) -> Option<&mut (dyn Analysis + 'static)> {
        self.entries
            .iter_mut()
            .find(|(h, _)| *h == handle)
            .map(|(_, a)| a.as_mut())
    }

    /// Create, bind, and register one analysis per descriptor, in order.
    ///
    /// `None` descriptors are skipped. Fails with [`ToolError::NoModel`] when
    /// `model` is `None`, and with [`ToolError::AlreadyAttached`] when this
    /// ledger still holds analyses; nothing is registered in either case.
    /// Returns the number of analyses attached.
    pub fn attach_all(
        &mut self,
        model: Option<&mut Model>,
        descriptors: &[Option<AnalysisDescriptor>],
    ) -> ToolResult<usize> {
        let model = model.ok_or(ToolError::NoModel)?;
        if let Some(attached) = self.model.filter(|_| !self.entries.is_empty()) {
            return Err(ToolError::AlreadyAttached(attached));
        }

        for (index, descriptor) in descriptors.iter().enumerate() {
            let Some(descriptor) = descriptor else {
                warn!(index, "skipping empty analysis slot");
                continue;
            };
            let mut analysis = descriptor.create();
            analysis.set_model(model);
            let handle = AnalysisHandle::new();
            model.analyses_mut().add(handle);
            debug!(analysis = analysis.name(), %handle, model = model.name(), "attached analysis");
            self.entries.push((handle, analysis));
        }
        self.model = Some(model.id());
        Ok(self.entries.len())
    }

    /// Unregister every entry from `model`, newest first, then clear the
    /// ledger. Returns the handles in the order they were unregistered.
    ///
    /// No-op when `model` is `None`, or when it is not the model these
    /// entries were attached to.
    pub fn detach_all(&mut self, model: Option<&mut Model>) -> Vec<AnalysisHandle> {
        let Some(model) = model else {
            return Vec::new();
        };
        if self.entries.is_empty() {
            return Vec::new();
        }
        if self.model != Some(model.id()) {
            warn!(
                model = model.name(),
                "analyses are attached to a different model, not detaching"
            );
            return Vec::new();
        }
        let mut detached = Vec::with_capacity(self.entries.len());
        for (handle, analysis) in self.entries.iter().rev() {
            model.analyses_mut().remove(*handle);
            debug!(analysis = analysis.name(), %handle, "detached analysis");
            detached.push(*handle);
        }
        self.entries.clear();
        self.model = None;
        detached
    }
}

/// Attach one fresh analysis per descriptor to `model`, returning the ledger
/// that owns them.
pub fn attach_all(
    model: Option<&mut Model>,
    descriptors: &[Option<AnalysisDescriptor>],
) -> ToolResult<AnalysisLedger> {
    let mut ledger = AnalysisLedger::new();
    ledger.attach_all(model, descriptors)?;
    Ok(ledger)
}

/// Detach every analysis in `ledger` from `model`, newest first.
pub fn detach_all(model: Option<&mut Model>, ledger: &mut AnalysisLedger) -> Vec<AnalysisHandle> {
    ledger.detach_all(model)
}
