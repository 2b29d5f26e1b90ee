use std::path::{Path, PathBuf};

use rw_model::ModelResult;

use crate::error::{ToolError, ToolResult};

/// A base directory that relative file names resolve against.
///
/// Setup files name their model and force-set files relative to their own
/// location. The scope carries that location explicitly instead of changing
/// the process working directory, so loading never has to undo anything and
/// tools on different threads cannot observe each other's directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryScope {
    base: PathBuf,
}

impl DirectoryScope {
    /// Scope rooted at `dir`, made absolute against the current directory.
    pub fn new(dir: impl AsRef<Path>) -> ToolResult<Self> {
        let dir = dir.as_ref();
        let dir = if dir.as_os_str().is_empty() {
            Path::new(".")
        } else {
            dir
        };
        let base = std::path::absolute(dir).map_err(|source| ToolError::Directory {
            path: dir.to_path_buf(),
            source,
        })?;
        Ok(Self { base })
    }

    /// Scope rooted at the directory containing `file`.
    pub fn of_file(file: impl AsRef<Path>) -> ToolResult<Self> {
        Self::new(file.as_ref().parent().unwrap_or(Path::new("")))
    }

    /// The absolute base directory.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Resolve `path` against the base. Absolute paths are returned as-is.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base.join(path)
        }
    }

    /// Resolve `path` and hand it to `loader`, reporting failures as
    /// [`ToolError::Load`].
    pub fn load<T>(
        &self,
        path: impl AsRef<Path>,
        loader: impl FnOnce(&Path) -> ModelResult<T>,
    ) -> ToolResult<T> {
        loader(&self.resolve(path)).map_err(ToolError::Load)
    }
}

/// Run `operation` with relative paths resolving against `dir`.
///
/// Errors from `operation` are returned unchanged. The process working
/// directory is the same before and after the call on every exit path.
pub fn with_directory<T, E>(
    dir: impl AsRef<Path>,
    operation: impl FnOnce(&DirectoryScope) -> Result<T, E>,
) -> Result<T, E>
where
    E: From<ToolError>,
{
    let scope = DirectoryScope::new(dir)?;
    operation(&scope)
}
