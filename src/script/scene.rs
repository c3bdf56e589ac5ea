use crate::foundation::error::{AnimateError, AnimateResult};

/// Class name of the generated Manim scene; passed to the engine as the scene selector.
pub const SCENE_NAME: &str = "MathSolutionAnimation";

const PYTHON_KEYWORDS: [&str; 35] = [
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// `true` when `name` can be emitted verbatim as a Python class name.
///
/// Only ASCII identifiers are accepted; keywords are rejected.
pub fn is_python_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !PYTHON_KEYWORDS.contains(&name)
}

/// Reject a scene class name that is not a plain Python identifier.
pub(crate) fn check_class_name(name: &str) -> AnimateResult<()> {
    if is_python_identifier(name) {
        Ok(())
    } else {
        Err(AnimateError::config(format!(
            "scene name {name:?} is not a Python identifier"
        )))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
/// Object a step equation is placed below.
pub enum Anchor {
    /// The "Solution Steps:" header (first step only).
    SectionHeader,
    /// The equation of the step with this 1-based index.
    Step(usize),
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
/// One typed instruction of the animation, in play order.
///
/// Text payloads are raw; escaping is the serializer's job.
pub enum SceneCommand {
    /// Title written at the top edge.
    ShowTitle {
        /// Title text.
        text: String,
    },
    /// Top-level expression, shown under the title then moved to the header corner.
    ShowExpression {
        /// LaTeX source.
        tex: String,
    },
    /// Header introducing the step list.
    ShowSectionHeader {
        /// Header text.
        text: String,
    },
    /// A step's equation, placed below `anchor`.
    ShowEquation {
        /// 1-based step index.
        index: usize,
        /// LaTeX source.
        tex: String,
        /// What the equation is positioned against.
        anchor: Anchor,
    },
    /// A step's explanation, placed to the right of that step's equation.
    ShowExplanation {
        /// 1-based step index.
        index: usize,
        /// Plain text.
        text: String,
    },
    /// Frame plus label around a step's equation, marking it as the result.
    Highlight {
        /// 1-based step index.
        index: usize,
        /// Label text.
        label: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
/// A complete scene: a class name plus ordered commands.
///
/// The class name is always a valid Python identifier.
pub struct Scene {
    class_name: String,
    /// Commands in play order.
    pub commands: Vec<SceneCommand>,
}

impl Scene {
    /// Scene named [`SCENE_NAME`].
    pub fn new(commands: Vec<SceneCommand>) -> Self {
        Self {
            class_name: SCENE_NAME.to_string(),
            commands,
        }
    }

    /// Scene with a custom class name; fails unless `class_name` is a Python identifier.
    pub fn with_class_name(
        class_name: impl Into<String>,
        commands: Vec<SceneCommand>,
    ) -> AnimateResult<Self> {
        let class_name = class_name.into();
        check_class_name(&class_name)?;
        Ok(Self {
            class_name,
            commands,
        })
    }

    // Caller has already run `check_class_name`.
    pub(crate) fn from_checked(class_name: String, commands: Vec<SceneCommand>) -> Self {
        Self {
            class_name,
            commands,
        }
    }

    /// Python class name of the scene.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Number of step equations in the scene.
    pub fn step_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, SceneCommand::ShowEquation { .. }))
            .count()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/script/scene.rs"]
mod tests;
