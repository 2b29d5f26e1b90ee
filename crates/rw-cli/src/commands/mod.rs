pub mod assemble;
pub mod defaults;
pub mod results;

use std::path::Path;

use rw_tool::Tool;
use tracing_subscriber::EnvFilter;

/// Install a stderr subscriber filtered by `RUST_LOG` (default: warnings only).
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Read a setup file into a tool.
fn open_tool(setup: &Path) -> Result<Tool<'static>, String> {
    Tool::from_setup_file(setup).map_err(|e| e.to_string())
}
