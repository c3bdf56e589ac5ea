use std::fmt::Write as _;

use crate::script::scene::{Anchor, Scene, SceneCommand};

const INDENT: &str = "        ";

/// Renders a [`Scene`] into Manim (Python) source.
///
/// Every user-provided string goes through [`python_string_literal`]. The class
/// name is the only bare identifier, and [`Scene`] only holds valid ones.
#[derive(Clone, Debug)]
pub struct ScriptSerializer {
    /// Pause after each step, in seconds.
    pub step_pause_sec: f64,
    /// Pause after the final highlight, in seconds.
    pub final_pause_sec: f64,
}

impl Default for ScriptSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptSerializer {
    /// Serializer with the default pacing (1s per step, 2s hold at the end).
    pub fn new() -> Self {
        Self {
            step_pause_sec: 1.0,
            final_pause_sec: 2.0,
        }
    }

    /// Render the scene.
    pub fn serialize(&self, scene: &Scene) -> String {
        let mut out = String::new();
        out.push_str("from manim import *\n\n\n");
        let _ = writeln!(out, "class {}(Scene):", scene.class_name());
        out.push_str("    def construct(self):\n");

        for cmd in &scene.commands {
            out.push('\n');
            self.write_command(&mut out, cmd);
        }
        out
    }

    fn write_command(&self, out: &mut String, cmd: &SceneCommand) {
        let pause = fmt_secs(self.step_pause_sec);
        let mut line = |s: &str| {
            out.push_str(INDENT);
            out.push_str(s);
            out.push('\n');
        };

        match cmd {
            SceneCommand::ShowTitle { text } => {
                line("# Title");
                line(&format!(
                    "title = Text({}, color=BLUE).scale(0.8)",
                    python_string_literal(text)
                ));
                line("title.to_edge(UP)");
                line("self.play(Write(title))");
                line("self.wait(0.5)");
            }
            SceneCommand::ShowExpression { tex } => {
                line("# Expression");
                line(&format!("expression = MathTex({})", python_string_literal(tex)));
                line("expression.next_to(title, DOWN, buff=0.5)");
                line("self.play(Write(expression))");
                line(&format!("self.wait({pause})"));
                line(
                    "self.play(expression.animate.scale(0.8).to_corner(UL).shift(DOWN * 0.5 + RIGHT * 0.5))",
                );
                line("self.wait(0.5)");
            }
            SceneCommand::ShowSectionHeader { text } => {
                line("# Steps header");
                line(&format!(
                    "steps_title = Text({}, color=YELLOW).scale(0.7)",
                    python_string_literal(text)
                ));
                line("steps_title.next_to(title, DOWN, buff=0.5)");
                line("self.play(Write(steps_title))");
                line("self.wait(0.5)");
            }
            SceneCommand::ShowEquation { index, tex, anchor } => {
                let name = equation_var(*index);
                line(&format!("# Step {index}"));
                line(&format!("{name} = MathTex({})", python_string_literal(tex)));
                line(&format!(
                    "{name}.next_to({}, DOWN, buff=0.5)",
                    anchor_var(*anchor)
                ));
                line(&format!("self.play(Write({name}))"));
                line(&format!("self.wait({pause})"));
            }
            SceneCommand::ShowExplanation { index, text } => {
                let name = format!("step{index}_exp");
                line(&format!(
                    "{name} = Text({}, color=GRAY).scale(0.5)",
                    python_string_literal(text)
                ));
                line(&format!(
                    "{name}.next_to({}, RIGHT, buff=0.5)",
                    equation_var(*index)
                ));
                line(&format!("self.play(Write({name}))"));
                line(&format!("self.wait({pause})"));
            }
            SceneCommand::Highlight { index, label } => {
                line("# Final answer");
                line(&format!(
                    "final_box = SurroundingRectangle({}, color=GREEN, buff=0.2)",
                    equation_var(*index)
                ));
                line(&format!(
                    "final_text = Text({}, color=GREEN).scale(0.7)",
                    python_string_literal(label)
                ));
                line("final_text.next_to(final_box, RIGHT, buff=0.5)");
                line("self.play(Create(final_box), Write(final_text))");
                line(&format!("self.wait({})", fmt_secs(self.final_pause_sec)));
            }
        }
    }
}

fn equation_var(index: usize) -> String {
    format!("step{index}_eq")
}

fn anchor_var(anchor: Anchor) -> String {
    match anchor {
        Anchor::SectionHeader => "steps_title".to_string(),
        Anchor::Step(i) => equation_var(i),
    }
}

fn fmt_secs(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v}")
    }
}

/// Quote `s` as a double-quoted Python string literal that decodes back to `s`.
///
/// Backslashes are doubled, quotes and line breaks escaped, and other control
/// characters written as `\xNN`, so no input can close the literal or
/// start a new statement.
pub fn python_string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            // Unicode control characters all sit below U+0100.
            c if c.is_control() => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
#[path = "../../tests/unit/script/serialize.rs"]
mod tests;
