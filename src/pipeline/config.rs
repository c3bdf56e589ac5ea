use std::{fs::File, io::BufReader, path::Path, path::PathBuf};

use crate::{
    engine::config::EngineConfig,
    foundation::error::{AnimateError, AnimateResult},
};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Settings for an [`crate::Animator`].
///
/// Every field has a default, so a JSON config file only needs the keys it changes:
///
/// ```json
/// { "output_dir": "media", "engine": { "timeout_secs": 120 } }
/// ```
pub struct AnimatorConfig {
    /// Engine invocation.
    pub engine: EngineConfig,
    /// Default media directory when a request does not name one.
    pub output_dir: PathBuf,
    /// Directory for temporary scripts.
    pub temp_dir: PathBuf,
    /// Fail with [`AnimateError::EmptyStepSequence`] instead of rendering a step-less scene.
    pub require_steps: bool,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            output_dir: PathBuf::from("animations"),
            temp_dir: PathBuf::from("temp_manim"),
            require_steps: false,
        }
    }
}

impl AnimatorConfig {
    /// Load from a JSON file; missing keys take their defaults.
    pub fn from_json_file(path: &Path) -> AnimateResult<Self> {
        let f = File::open(path)
            .map_err(|e| AnimateError::io(format!("open config '{}'", path.display()), e))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            AnimateError::config(format!("parse config '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check every field.
    pub fn validate(&self) -> AnimateResult<()> {
        self.engine.validate()?;
        if self.output_dir.as_os_str().is_empty() {
            return Err(AnimateError::config("output_dir must be non-empty"));
        }
        if self.temp_dir.as_os_str().is_empty() {
            return Err(AnimateError::config("temp_dir must be non-empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/config.rs"]
mod tests;
