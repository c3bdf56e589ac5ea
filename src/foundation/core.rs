use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
/// Output quality tier.
///
/// Each tier maps to the engine's single-character quality flag and a target
/// resolution. Parsing is lenient: anything unrecognized is [`Quality::Medium`].
pub enum Quality {
    /// 480p at 15 fps.
    Low,
    /// 720p at 30 fps.
    #[default]
    Medium,
    /// 1080p at 60 fps.
    High,
}

impl Quality {
    /// Parse a user-supplied tier name (case-insensitive). Never fails.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            _ => Self::Medium,
        }
    }

    /// Flag passed to the engine as `-q <flag>`.
    pub fn flag(self) -> &'static str {
        match self {
            Self::Low => "l",
            Self::Medium => "m",
            Self::High => "h",
        }
    }

    /// Target resolution label.
    pub fn resolution(self) -> &'static str {
        match self {
            Self::Low => "480p",
            Self::Medium => "720p",
            Self::High => "1080p",
        }
    }

    /// Frame rate the engine uses for this tier.
    pub fn frame_rate(self) -> u32 {
        match self {
            Self::Low => 15,
            Self::Medium => 30,
            Self::High => 60,
        }
    }

    /// Directory name the engine uses for this tier's videos, e.g. `720p30`.
    pub fn media_subdir(self) -> String {
        format!("{}{}", self.resolution(), self.frame_rate())
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for Quality {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_lenient(s))
    }
}

static JOB_COUNTER: AtomicU64 = AtomicU64::new(0);

#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Per-job unique token used to name the temp script and the output file.
///
/// Format: `<unix-millis>-<pid>-<counter>`. The counter is process-wide, so two
/// ids minted within the same millisecond still differ, and the pid separates
/// concurrent processes sharing an output directory.
pub struct JobId(String);

impl JobId {
    /// Mint a fresh id.
    pub fn next() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        let seq = JOB_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self(format!("{millis}-{}-{seq}", std::process::id()))
    }

    /// Wrap an existing token. Callers are responsible for uniqueness.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
