use std::path::{Path, PathBuf};

use crate::foundation::core::Quality;

#[derive(Clone, Copy, Debug)]
/// What the locator is looking for.
pub struct ArtifactQuery<'a> {
    /// Engine media directory.
    pub output_dir: &'a Path,
    /// Expected output file name.
    pub filename: &'a str,
    /// Scene class that was rendered.
    pub scene: &'a str,
    /// Stem of the script the engine was given.
    pub script_stem: &'a str,
    /// Quality tier the engine was run with.
    pub quality: Quality,
    /// Name fragment shared by this crate's outputs; used to rank scan hits.
    pub prefix: &'a str,
    /// Extension of the artifact, without the dot.
    pub extension: &'a str,
}

/// Supplies the ordered candidate paths probed before falling back to a scan.
pub trait OutputLayout {
    /// Candidate paths, most specific first.
    fn candidates(&self, query: &ArtifactQuery<'_>) -> Vec<PathBuf>;
}

/// The engine's known output conventions across versions.
#[derive(Clone, Copy, Debug, Default)]
pub struct ManimLayout;

impl OutputLayout for ManimLayout {
    fn candidates(&self, q: &ArtifactQuery<'_>) -> Vec<PathBuf> {
        let videos = q.output_dir.join("videos");
        vec![
            videos
                .join(q.script_stem)
                .join(q.quality.media_subdir())
                .join(q.filename),
            videos.join(q.scene).join(q.filename),
            videos.join(q.filename),
            q.output_dir.join(q.filename),
        ]
    }
}

/// A fixed list of candidates, used as-is.
impl OutputLayout for Vec<PathBuf> {
    fn candidates(&self, _query: &ArtifactQuery<'_>) -> Vec<PathBuf> {
        self.clone()
    }
}
