use std::{path::PathBuf, time::Duration};

/// Result alias used throughout the crate.
pub type AnimateResult<T> = Result<T, AnimateError>;

#[derive(thiserror::Error, Debug)]
/// Typed failure surface of the animation pipeline.
///
/// Step extraction and script generation are total and never produce these.
/// Every variant originates in configuration, the render orchestrator, or the
/// artifact locator.
pub enum AnimateError {
    /// No equation-bearing line was found and the caller asked for at least one step.
    #[error("no equation-bearing lines found in explanation")]
    EmptyStepSequence,

    /// The engine exited with a non-zero status.
    #[error("render engine failed ({}): {}", fmt_code(.code), .stderr.trim())]
    RenderProcessFailure {
        /// Exit code, `None` when the process was terminated by a signal.
        code: Option<i32>,
        /// Captured standard error of the engine.
        stderr: String,
    },

    /// The engine ran longer than the configured timeout and was killed.
    #[error("render engine timed out after {timeout:?}")]
    RenderTimeout {
        /// The timeout that elapsed.
        timeout: Duration,
    },

    /// The job was cancelled while the engine was running.
    #[error("render cancelled")]
    Cancelled,

    /// The engine reported success but no output file could be resolved.
    #[error("artifact '{filename}' not found under '{}'", .output_dir.display())]
    ArtifactNotFound {
        /// Directory that was probed and scanned.
        output_dir: PathBuf,
        /// Expected output file name.
        filename: String,
    },

    /// Directory creation or temp-file write failed.
    #[error("io error: {context}: {source}")]
    Io {
        /// What was being attempted.
        context: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The engine executable could not be started.
    #[error("failed to spawn render engine '{engine}': {source}")]
    EngineSpawn {
        /// Engine program as configured.
        engine: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Anything else.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AnimateError {
    /// Build an [`AnimateError::Io`] with a human-readable context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Build an [`AnimateError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// `true` for failures a caller may resolve by resubmitting a fresh job.
    pub fn is_render_failure(&self) -> bool {
        matches!(
            self,
            Self::RenderProcessFailure { .. }
                | Self::RenderTimeout { .. }
                | Self::ArtifactNotFound { .. }
        )
    }
}

fn fmt_code(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit code {c}"),
        None => "terminated by signal".to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
