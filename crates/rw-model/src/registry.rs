use std::fmt;

use uuid::Uuid;

/// Handle to an analysis instance owned outside the model.
///
/// The model only records which handles are registered on it; the instances
/// themselves live in whichever ledger created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnalysisHandle(pub Uuid);

impl AnalysisHandle {
    /// Generate a new random handle.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AnalysisHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AnalysisHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// The model's record of registered analyses, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisRegistry {
    handles: Vec<AnalysisHandle>,
}

impl AnalysisRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handle. Returns `false` if it was already registered.
    pub fn add(&mut self, handle: AnalysisHandle) -> bool {
        if self.contains(handle) {
            return false;
        }
        self.handles.push(handle);
        true
    }

    /// Unregister a handle. Returns `false` if it was not registered.
    pub fn remove(&mut self, handle: AnalysisHandle) -> bool {
        match self.handles.iter().position(|h| *h == handle) {
            Some(index) => {
                self.handles.remove(index);
                true
            }
            None => false,
        }
    }

    /// Whether `handle` is registered.
    pub fn contains(&self, handle: AnalysisHandle) -> bool {
        self.handles.contains(&handle)
    }

    /// Number of registered analyses.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether no analysis is registered.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Registered handles in registration order.
    pub fn iter(&self) -> impl Iterator<Item = AnalysisHandle> + '_ {
        self.handles.iter().copied()
    }
}
