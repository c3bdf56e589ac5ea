use crate::{
    extract::steps::StepSequence,
    foundation::error::AnimateResult,
    script::scene::{Anchor, SCENE_NAME, Scene, SceneCommand, check_class_name},
    script::serialize::ScriptSerializer,
};

/// Builds a [`Scene`] from an expression and its solution steps.
///
/// ```rust
/// use mathanim::{SceneBuilder, Step, StepSequence};
///
/// let steps = StepSequence::new(vec![Step {
///     equation: "x = 5".to_string(),
///     explanation: "Divide by 2.".to_string(),
/// }]);
/// let scene = SceneBuilder::new("2x = 10").steps(&steps).build();
/// assert_eq!(scene.step_count(), 1);
/// ```
pub struct SceneBuilder {
    class_name: String,
    title: String,
    section_header: String,
    result_label: String,
    expression: String,
    steps: StepSequence,
}

impl SceneBuilder {
    /// Start a scene for `expression` with the default labels.
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            class_name: SCENE_NAME.to_string(),
            title: "Step-by-Step Solution".to_string(),
            section_header: "Solution Steps:".to_string(),
            result_label: "Final Answer".to_string(),
            expression: expression.into(),
            steps: StepSequence::default(),
        }
    }

    /// Override the scene class name; it must be a Python identifier.
    ///
    /// The engine is told which class to render, so this has to match the
    /// scene name the engine is invoked with.
    pub fn class_name(mut self, name: impl Into<String>) -> AnimateResult<Self> {
        let name = name.into();
        check_class_name(&name)?;
        self.class_name = name;
        Ok(self)
    }

    /// Override the title text.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Override the label placed next to the final step.
    pub fn result_label(mut self, label: impl Into<String>) -> Self {
        self.result_label = label.into();
        self
    }

    /// Steps to animate, in order.
    pub fn steps(mut self, steps: &StepSequence) -> Self {
        self.steps = steps.clone();
        self
    }

    /// Produce the command list.
    pub fn build(self) -> Scene {
        let mut commands = vec![
            SceneCommand::ShowTitle { text: self.title },
            SceneCommand::ShowExpression {
                tex: self.expression.trim().to_string(),
            },
            SceneCommand::ShowSectionHeader {
                text: self.section_header,
            },
        ];

        let mut anchor = Anchor::SectionHeader;
        let mut last_index = None;
        for (i, step) in self.steps.iter().enumerate() {
            let equation = step.equation.trim();
            if equation.is_empty() {
                continue;
            }
            let index = i + 1;
            commands.push(SceneCommand::ShowEquation {
                index,
                tex: equation.to_string(),
                anchor,
            });
            let explanation = step.explanation.trim();
            if !explanation.is_empty() {
                commands.push(SceneCommand::ShowExplanation {
                    index,
                    text: explanation.to_string(),
                });
            }
            anchor = Anchor::Step(index);
            last_index = Some(index);
        }

        if let Some(index) = last_index {
            commands.push(SceneCommand::Highlight {
                index,
                label: self.result_label,
            });
        }

        Scene::from_checked(self.class_name, commands)
    }
}

/// Compile an expression and its steps into Manim source.
///
/// Pure and deterministic: the same input always yields the same script.
#[tracing::instrument(skip_all, fields(steps = steps.len()))]
pub fn generate_script(expression: &str, steps: &StepSequence) -> String {
    let scene = SceneBuilder::new(expression).steps(steps).build();
    ScriptSerializer::new().serialize(&scene)
}

#[cfg(test)]
#[path = "../../tests/unit/script/builder.rs"]
mod tests;
