use std::time::Duration;

use crate::{
    foundation::error::{AnimateError, AnimateResult},
    script::scene::{SCENE_NAME, check_class_name},
};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// How to invoke the external rendering engine.
pub struct EngineConfig {
    /// Engine executable, looked up on `PATH` when not absolute.
    pub program: String,
    /// Arguments inserted before the script path (e.g. `["-m", "manim"]` with `python3`).
    pub args: Vec<String>,
    /// Scene class to render; the generated script declares a class of this name.
    pub scene: String,
    /// Hard limit on a single render; the process is killed when it elapses.
    pub timeout_secs: u64,
    /// How often the running process is checked for exit, timeout, and cancellation.
    pub poll_interval_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            program: "manim".to_string(),
            args: Vec::new(),
            scene: SCENE_NAME.to_string(),
            timeout_secs: 300,
            poll_interval_ms: 50,
        }
    }
}

impl EngineConfig {
    /// Reject values that would make every render fail or spin.
    pub fn validate(&self) -> AnimateResult<()> {
        if self.program.trim().is_empty() {
            return Err(AnimateError::config("engine program must be non-empty"));
        }
        check_class_name(&self.scene)?;
        if self.timeout_secs == 0 {
            return Err(AnimateError::config("engine timeout_secs must be non-zero"));
        }
        if self.poll_interval_ms == 0 {
            return Err(AnimateError::config(
                "engine poll_interval_ms must be non-zero",
            ));
        }
        Ok(())
    }

    /// Render timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Poll interval.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
