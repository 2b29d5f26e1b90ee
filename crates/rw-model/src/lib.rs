//! Model types assembled by Rigwright tools.
//!
//! A [`Model`] carries its topology (coordinates and bodies), an ordered
//! [`ActuatorSet`] and [`ContactForceSet`], and a registry of the analyses
//! observing it. Analysis instances are not stored in the model; the registry
//! only records [`AnalysisHandle`]s, and whoever attached the analyses owns
//! them.

/// Actuator elements and the actuator set.
pub mod actuator;
/// Analysis trait, descriptors, and the built-in recorder.
pub mod analysis;
/// Contact-force elements and the contact-force set.
pub mod contact;
/// Error types for the model crate.
pub mod error;
/// Generic ordered force-element collection.
pub mod force;
/// The model itself.
pub mod model;
/// Analysis handles and the model's analysis registry.
pub mod registry;
/// Time-indexed result tables.
pub mod storage;

/// Re-exports of actuator types.
pub use actuator::{Actuator, ActuatorSet};
/// Re-exports of analysis types.
pub use analysis::{Analysis, AnalysisDescriptor, RecordKind, Recorder};
/// Re-exports of contact types.
pub use contact::{ContactForce, ContactForceSet};
/// Re-exports of [`error::ModelError`] and [`error::ModelResult`].
pub use error::{ModelError, ModelResult};
/// Re-exports of force-set types.
pub use force::{ForceElement, ForceSet};
/// Re-exports of model types.
pub use model::{Model, ModelId};
/// Re-exports of registry types.
pub use registry::{AnalysisHandle, AnalysisRegistry};
/// Re-exports of storage types.
pub use storage::{MAX_RESAMPLED_ROWS, StateRow, Storage};
