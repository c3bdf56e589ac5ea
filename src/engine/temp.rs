use std::{
    fs::OpenOptions,
    io::Write as _,
    path::{Path, PathBuf},
};

use crate::foundation::error::{AnimateError, AnimateResult};

/// A script file owned by one job, removed when dropped.
///
/// Removal runs on every exit path, including early returns and unwinding.
#[derive(Debug)]
pub struct TempScript {
    path: PathBuf,
}

impl TempScript {
    /// Create `path` (which must not exist yet) and write `contents` to it.
    pub fn create(path: impl Into<PathBuf>, contents: &str) -> AnimateResult<Self> {
        let path = path.into();
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| AnimateError::io(format!("create script '{}'", path.display()), e))?;

        // From here on the file is ours; a failed write still removes it.
        let guard = Self { path };
        file.write_all(contents.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| {
                AnimateError::io(format!("write script '{}'", guard.path.display()), e)
            })?;
        Ok(guard)
    }

    /// Location of the script.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempScript {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::trace!(path = %self.path.display(), "removed temp script"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to remove temp script")
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/temp.rs"]
mod tests;
