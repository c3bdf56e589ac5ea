use std::path::{Path, PathBuf};

use crate::{
    engine::{
        cancel::CancelToken,
        runner::{RenderOrchestrator, engine_available},
    },
    extract::steps::extract_steps,
    foundation::{
        core::JobId,
        error::{AnimateError, AnimateResult},
    },
    locate::{
        layout::{ArtifactQuery, ManimLayout, OutputLayout},
        locator::ArtifactLocator,
    },
    pipeline::{
        config::AnimatorConfig,
        job::{ARTIFACT_EXTENSION, AnimationJob, AnimationRequest, Artifact, OUTPUT_PREFIX},
    },
    script::{builder::SceneBuilder, serialize::ScriptSerializer},
};

/// A job plus the script compiled for it, ready to hand to the engine.
#[derive(Clone, Debug)]
pub struct PreparedJob {
    /// The job.
    pub job: AnimationJob,
    /// Generated engine script.
    pub script: String,
}

/// Runs the whole pipeline: extract, generate, render, locate.
///
/// Construct one explicitly and share it; it holds no mutable state, so
/// concurrent `animate` calls from several threads are independent.
///
/// ```rust,no_run
/// use mathanim::{AnimationRequest, Animator, AnimatorConfig, Quality};
///
/// # fn main() -> mathanim::AnimateResult<()> {
/// let animator = Animator::new(AnimatorConfig::default())?;
/// let request = AnimationRequest::new(
///     "2x + 5 = 15",
///     "Step 1: 2x + 5 = 15\nSubtract 5.\nStep 2: x = 5\nDone.",
/// )
/// .with_quality(Quality::Low);
/// let artifact = animator.animate(&request)?;
/// println!("{}", artifact.path.display());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Animator<L = ManimLayout> {
    config: AnimatorConfig,
    orchestrator: RenderOrchestrator,
    locator: ArtifactLocator<L>,
}

impl Animator<ManimLayout> {
    /// Validate `config` and build an animator using the engine's standard output layout.
    pub fn new(config: AnimatorConfig) -> AnimateResult<Self> {
        Self::with_locator(config, ArtifactLocator::new())
    }
}

impl<L: OutputLayout> Animator<L> {
    /// Build an animator with a custom artifact locator.
    pub fn with_locator(config: AnimatorConfig, locator: ArtifactLocator<L>) -> AnimateResult<Self> {
        config.validate()?;
        let orchestrator = RenderOrchestrator::new(config.engine.clone())?;
        Ok(Self {
            config,
            orchestrator,
            locator,
        })
    }

    /// Configuration in use.
    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    /// `true` when the configured engine answers `--version`.
    pub fn engine_available(&self) -> bool {
        engine_available(&self.config.engine)
    }

    /// Extract steps and generate the script without touching the filesystem.
    #[tracing::instrument(skip_all)]
    pub fn prepare(&self, request: &AnimationRequest) -> AnimateResult<PreparedJob> {
        let steps = extract_steps(&request.explanation);
        if steps.is_empty() {
            if self.config.require_steps {
                return Err(AnimateError::EmptyStepSequence);
            }
            tracing::warn!("no equation-bearing lines in explanation; rendering expression only");
        }

        let output_dir = request
            .output_dir
            .as_deref()
            .unwrap_or(self.config.output_dir.as_path());
        let job = AnimationJob {
            expression: request.expression.clone(),
            steps,
            quality: request.quality,
            output_dir: absolute(output_dir)?,
            temp_dir: absolute(&self.config.temp_dir)?,
            job_id: JobId::next(),
        };
        let scene = SceneBuilder::new(job.expression.as_str())
            .class_name(self.config.engine.scene.as_str())?
            .steps(&job.steps)
            .build();
        let script = ScriptSerializer::new().serialize(&scene);
        Ok(PreparedJob { job, script })
    }

    /// Run the pipeline to completion.
    pub fn animate(&self, request: &AnimationRequest) -> AnimateResult<Artifact> {
        self.animate_with_cancel(request, &CancelToken::new())
    }

    /// Run the pipeline; triggering `cancel` kills a running render.
    #[tracing::instrument(skip_all, fields(quality = %request.quality))]
    pub fn animate_with_cancel(
        &self,
        request: &AnimationRequest,
        cancel: &CancelToken,
    ) -> AnimateResult<Artifact> {
        let prepared = self.prepare(request)?;
        self.render_prepared(&prepared, cancel)
    }

    /// Render an already prepared job and locate its artifact.
    pub fn render_prepared(
        &self,
        prepared: &PreparedJob,
        cancel: &CancelToken,
    ) -> AnimateResult<Artifact> {
        let job = &prepared.job;
        tracing::info!(
            job = %job.job_id,
            steps = job.steps.len(),
            quality = %job.quality,
            "rendering animation"
        );

        self.orchestrator.render(job, &prepared.script, cancel)?;

        let filename = job.output_filename();
        let script_stem = job.script_stem();
        let query = ArtifactQuery {
            output_dir: &job.output_dir,
            filename: &filename,
            scene: &self.config.engine.scene,
            script_stem: &script_stem,
            quality: job.quality,
            prefix: OUTPUT_PREFIX,
            extension: ARTIFACT_EXTENSION,
        };
        let artifact = self.locator.locate(&query)?;
        tracing::info!(job = %job.job_id, path = %artifact.path.display(), "animation ready");
        Ok(artifact)
    }
}

fn absolute(path: &Path) -> AnimateResult<PathBuf> {
    std::path::absolute(path)
        .map_err(|e| AnimateError::io(format!("resolve path '{}'", path.display()), e))
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/animator.rs"]
mod tests;
