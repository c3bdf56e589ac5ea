use std::path::PathBuf;

use crate::{
    extract::steps::StepSequence,
    foundation::core::{JobId, Quality},
};

/// Prefix shared by every output file this crate asks the engine to produce.
pub const OUTPUT_PREFIX: &str = "solution";

/// Extension of the produced video.
pub const ARTIFACT_EXTENSION: &str = "mp4";

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// What a caller hands to [`crate::Animator::animate`].
pub struct AnimationRequest {
    /// Top-level expression (typically OCR output), as LaTeX.
    pub expression: String,
    /// Free-form step-by-step explanation (typically LLM output).
    pub explanation: String,
    /// Output quality tier.
    #[serde(default)]
    pub quality: Quality,
    /// Where the engine writes its media. Falls back to the animator's configured directory.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

impl AnimationRequest {
    /// Request with default quality and output directory.
    pub fn new(expression: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            explanation: explanation.into(),
            quality: Quality::default(),
            output_dir: None,
        }
    }

    /// Set the quality tier.
    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }
}

#[derive(Clone, Debug)]
/// One render request, created per call and discarded afterwards.
///
/// The job owns its temporary script exclusively; file names derive from `job_id`.
pub struct AnimationJob {
    /// Top-level expression.
    pub expression: String,
    /// Extracted steps.
    pub steps: StepSequence,
    /// Output quality tier.
    pub quality: Quality,
    /// Engine media directory (absolute).
    pub output_dir: PathBuf,
    /// Directory for the temporary script (absolute).
    pub temp_dir: PathBuf,
    /// Unique token for this job.
    pub job_id: JobId,
}

impl AnimationJob {
    /// File stem of the temporary script; the engine also uses it as a media subdirectory.
    pub fn script_stem(&self) -> String {
        format!("{OUTPUT_PREFIX}_script_{}", self.job_id)
    }

    /// Full path of the temporary script.
    pub fn script_path(&self) -> PathBuf {
        self.temp_dir.join(format!("{}.py", self.script_stem()))
    }

    /// File name the engine is asked to write.
    pub fn output_filename(&self) -> String {
        format!("{OUTPUT_PREFIX}_{}.{ARTIFACT_EXTENSION}", self.job_id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
/// The produced video.
pub struct Artifact {
    /// Resolved location of the file.
    pub path: PathBuf,
}
