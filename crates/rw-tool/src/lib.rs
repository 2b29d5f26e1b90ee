//! Model assembly and analysis attachment for Rigwright simulation tools.
//!
//! A [`Tool`] reads a [`ToolConfig`], loads the base model it names, merges
//! supplementary actuator and contact-force sets into it under the
//! configured replace-or-append policy, validates the result, and attaches
//! fresh analysis instances to it. Numerical integration happens elsewhere;
//! this crate only builds and wires the objects a solver will drive.
//!
//! All relative file names resolve against the setup file's directory
//! through a [`DirectoryScope`]. The process working directory is never
//! changed, so several tools may assemble models concurrently.

/// Loading and merging of the configured model.
pub mod assembler;
/// The analysis ledger and attach/detach operations.
pub mod attachment;
/// Tool configuration and its defaults.
pub mod config;
/// Error types for the tool crate.
pub mod error;
/// Base-directory scoping for relative file names.
pub mod scope;
/// The tool facade tying assembly and analyses together.
pub mod tool;

/// Re-exports of assembler types.
pub use assembler::{ModelAssembler, OriginalSets};
/// Re-exports of attachment types and operations.
pub use attachment::{AnalysisLedger, attach_all, detach_all};
/// Re-export of [`config::ToolConfig`].
pub use config::ToolConfig;
/// Re-exports of [`error::ToolError`] and [`error::ToolResult`].
pub use error::{ToolError, ToolResult};
/// Re-exports of scope types.
pub use scope::{DirectoryScope, with_directory};
/// Re-exports of tool types.
pub use tool::{ModelSlot, Tool};
