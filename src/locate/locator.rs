use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use crate::{
    foundation::error::{AnimateError, AnimateResult},
    locate::layout::{ArtifactQuery, ManimLayout, OutputLayout},
    pipeline::job::Artifact,
};

/// Engine scratch directory holding per-animation fragments; never the final video.
const PARTIAL_DIR: &str = "partial_movie_files";

/// Resolves where the engine actually put its output.
///
/// Phase 1 probes the layout's candidates in order. Phase 2 walks the output
/// directory in sorted order and picks, in preference: the exact file name, a
/// name containing the query prefix, then any file with the right extension.
#[derive(Clone, Debug, Default)]
pub struct ArtifactLocator<L = ManimLayout> {
    layout: L,
}

impl ArtifactLocator<ManimLayout> {
    /// Locator using the engine's known layouts.
    pub fn new() -> Self {
        Self {
            layout: ManimLayout,
        }
    }
}

impl<L: OutputLayout> ArtifactLocator<L> {
    /// Locator with custom candidate paths.
    pub fn with_layout(layout: L) -> Self {
        Self { layout }
    }

    /// Find the artifact or fail with [`AnimateError::ArtifactNotFound`].
    #[tracing::instrument(skip_all, fields(filename = query.filename))]
    pub fn locate(&self, query: &ArtifactQuery<'_>) -> AnimateResult<Artifact> {
        for candidate in self.layout.candidates(query) {
            if candidate.is_file() {
                tracing::debug!(path = %candidate.display(), "artifact found at candidate path");
                return Ok(Artifact { path: candidate });
            }
        }

        match scan_for_artifact(query)? {
            Some(path) => {
                tracing::warn!(
                    path = %path.display(),
                    "artifact not at any candidate path, resolved by directory scan"
                );
                Ok(Artifact { path })
            }
            None => Err(AnimateError::ArtifactNotFound {
                output_dir: query.output_dir.to_path_buf(),
                filename: query.filename.to_string(),
            }),
        }
    }
}

/// Recursively scan `query.output_dir` for the best-ranked artifact.
///
/// Directory entries are visited in sorted order so the result is stable. A
/// missing output directory yields `Ok(None)`.
pub fn scan_for_artifact(query: &ArtifactQuery<'_>) -> AnimateResult<Option<PathBuf>> {
    let mut best: [Option<PathBuf>; 3] = [None, None, None];
    let exact = walk(query.output_dir, query, &mut best, true)?;
    if exact {
        return Ok(best[0].take());
    }
    Ok(best.into_iter().flatten().next())
}

// Returns `true` once an exact file-name match has been recorded.
fn walk(
    dir: &Path,
    query: &ArtifactQuery<'_>,
    best: &mut [Option<PathBuf>; 3],
    is_root: bool,
) -> AnimateResult<bool> {
    let entries = match sorted_entries(dir) {
        Ok(entries) => entries,
        Err(e) if is_root && e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(e) if is_root => {
            return Err(AnimateError::io(
                format!("scan output directory '{}'", dir.display()),
                e,
            ));
        }
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "skipping unreadable directory");
            return Ok(false);
        }
    };

    for (path, is_dir) in entries {
        if is_dir {
            if path.file_name() == Some(OsStr::new(PARTIAL_DIR)) {
                continue;
            }
            if walk(&path, query, best, false)? {
                return Ok(true);
            }
            continue;
        }

        let Some(name) = path.file_name().and_then(OsStr::to_str) else {
            continue;
        };
        if !has_extension(&path, query.extension) {
            continue;
        }

        let rank = if name == query.filename {
            0
        } else if name.contains(query.prefix) {
            1
        } else {
            2
        };
        if best[rank].is_none() {
            best[rank] = Some(path);
        }
        if rank == 0 {
            return Ok(true);
        }
    }
    Ok(false)
}

fn sorted_entries(dir: &Path) -> std::io::Result<Vec<(PathBuf, bool)>> {
    let mut out = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let ft = entry.file_type()?;
        let path = entry.path();
        // Symlinked directories are not followed.
        if ft.is_dir() {
            out.push((path, true));
        } else if ft.is_file() || (ft.is_symlink() && path.is_file()) {
            out.push((path, false));
        }
    }
    out.sort();
    Ok(out)
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

#[cfg(test)]
#[path = "../../tests/unit/locate/locator.rs"]
mod tests;
