//! mathanim turns a step-by-step explanation of a solved equation into a short
//! Manim animation.
//!
//! # Pipeline overview
//!
//! 1. **Extract**: free-form text -> [`StepSequence`] ([`extract_steps`])
//! 2. **Script**: expression + steps -> [`Scene`] commands -> Manim source
//!    ([`SceneBuilder`], [`ScriptSerializer`], [`generate_script`])
//! 3. **Render**: run the external engine on a scoped temporary script with a timeout
//!    and cancellation ([`RenderOrchestrator`])
//! 4. **Locate**: find the produced video, whose location the engine does not
//!    guarantee ([`ArtifactLocator`])
//!
//! [`Animator`] wires the four stages together. It is built explicitly by the
//! caller; nothing in this crate initializes global state.
//!
//! Extraction and script generation are pure and never fail. Every failure
//! comes back as a typed [`AnimateError`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod engine;
mod extract;
mod foundation;
mod locate;
mod pipeline;
mod script;

pub use engine::cancel::CancelToken;
pub use engine::config::EngineConfig;
pub use engine::runner::{RenderOrchestrator, RenderOutput, engine_available};
pub use engine::temp::TempScript;
pub use extract::steps::{
    EQUATION_MARKERS, Step, StepSequence, extract_steps, is_equation_line, strip_step_prefix,
};
pub use foundation::core::{JobId, Quality};
pub use foundation::error::{AnimateError, AnimateResult};
pub use locate::layout::{ArtifactQuery, ManimLayout, OutputLayout};
pub use locate::locator::{ArtifactLocator, scan_for_artifact};
pub use pipeline::animator::{Animator, PreparedJob};
pub use pipeline::config::AnimatorConfig;
pub use pipeline::job::{
    ARTIFACT_EXTENSION, AnimationJob, AnimationRequest, Artifact, OUTPUT_PREFIX,
};
pub use script::builder::{SceneBuilder, generate_script};
pub use script::scene::{Anchor, SCENE_NAME, Scene, SceneCommand, is_python_identifier};
pub use script::serialize::{ScriptSerializer, python_string_literal};
