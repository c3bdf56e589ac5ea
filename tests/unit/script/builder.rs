use super::*;
use crate::extract::steps::{Step, extract_steps};

fn step(eq: &str, ex: &str) -> Step {
    Step {
        equation: eq.to_string(),
        explanation: ex.to_string(),
    }
}

fn step_headers(script: &str) -> Vec<String> {
    script
        .lines()
        .map(str::trim)
        .filter(|l| l.starts_with("# Step "))
        .map(str::to_string)
        .collect()
}

#[test]
fn script_has_one_block_per_step_in_order() {
    let steps = StepSequence::new(vec![
        step("2x+5=15", "Subtract 5."),
        step("2x=10", ""),
        step("x=5", "Divide by 2."),
    ]);
    let script = generate_script("2x+5=15", &steps);

    assert_eq!(step_headers(&script), vec!["# Step 1", "# Step 2", "# Step 3"]);
    let p1 = script.find("step1_eq = MathTex(\"2x+5=15\")").unwrap();
    let p2 = script.find("step2_eq = MathTex(\"2x=10\")").unwrap();
    let p3 = script.find("step3_eq = MathTex(\"x=5\")").unwrap();
    assert!(p1 < p2 && p2 < p3);
}

#[test]
fn empty_steps_yield_only_title_and_expression() {
    let script = generate_script("x^2 = 4", &StepSequence::default());
    assert!(step_headers(&script).is_empty());
    assert!(script.contains("title = Text(\"Step-by-Step Solution\""));
    assert!(script.contains("expression = MathTex(\"x^2 = 4\")"));
    assert!(!script.contains("SurroundingRectangle"));
}

#[test]
fn equations_are_anchored_explicitly_to_the_previous_block() {
    let steps = StepSequence::new(vec![step("a=1", "first"), step("b=2", "")]);
    let script = generate_script("a+b", &steps);
    assert!(script.contains("step1_eq.next_to(steps_title, DOWN, buff=0.5)"));
    assert!(script.contains("step2_eq.next_to(step1_eq, DOWN, buff=0.5)"));
    assert!(script.contains("step1_exp.next_to(step1_eq, RIGHT, buff=0.5)"));
    assert!(!script.contains("step2_exp"));
}

#[test]
fn final_step_is_highlighted() {
    let steps = StepSequence::new(vec![step("a=1", ""), step("b=2", "")]);
    let scene = SceneBuilder::new("a+b").steps(&steps).build();
    assert_eq!(
        scene.commands.last(),
        Some(&SceneCommand::Highlight {
            index: 2,
            label: "Final Answer".to_string()
        })
    );
    let script = generate_script("a+b", &steps);
    assert!(script.contains("SurroundingRectangle(step2_eq, color=GREEN, buff=0.2)"));
}

#[test]
fn builder_emits_typed_commands() {
    let steps = StepSequence::new(vec![step("x=1", "done")]);
    let scene = SceneBuilder::new(" x ")
        .title("Solving")
        .result_label("Answer")
        .steps(&steps)
        .build();
    assert_eq!(scene.class_name(), SCENE_NAME);
    assert_eq!(
        scene.commands,
        vec![
            SceneCommand::ShowTitle {
                text: "Solving".to_string()
            },
            SceneCommand::ShowExpression {
                tex: "x".to_string()
            },
            SceneCommand::ShowSectionHeader {
                text: "Solution Steps:".to_string()
            },
            SceneCommand::ShowEquation {
                index: 1,
                tex: "x=1".to_string(),
                anchor: Anchor::SectionHeader
            },
            SceneCommand::ShowExplanation {
                index: 1,
                text: "done".to_string()
            },
            SceneCommand::Highlight {
                index: 1,
                label: "Answer".to_string()
            },
        ]
    );
    assert_eq!(scene.step_count(), 1);
}

#[test]
fn generation_is_deterministic() {
    let steps = extract_steps("Step 1: 2x+5=15\nFirst, subtract 5.\nStep 2: x=5\nFinal answer.");
    assert_eq!(
        generate_script("2x+5=15", &steps),
        generate_script("2x+5=15", &steps)
    );
}

#[test]
fn explanation_quotes_are_escaped() {
    let steps = StepSequence::new(vec![step("x=1", r#"He said "done"."#)]);
    let script = generate_script("x", &steps);
    assert!(script.contains(r#"Text("He said \"done\".", color=GRAY)"#));
}

#[test]
fn latex_backslashes_survive_generation() {
    let steps = StepSequence::new(vec![step(r"x = \frac{10}{2}", "")]);
    let script = generate_script(r"\sqrt{4}", &steps);
    assert!(script.contains(r#"MathTex("x = \\frac{10}{2}")"#));
    assert!(script.contains(r#"MathTex("\\sqrt{4}")"#));
}

#[test]
fn custom_class_name_reaches_the_script() {
    let steps = StepSequence::new(vec![step("x=1", "")]);
    let scene = SceneBuilder::new("x")
        .class_name("LinearSolve")
        .unwrap()
        .steps(&steps)
        .build();
    assert_eq!(scene.class_name(), "LinearSolve");
    let script = ScriptSerializer::new().serialize(&scene);
    assert!(script.contains("class LinearSolve(Scene):"));
    assert!(!script.contains(SCENE_NAME));
}

#[test]
fn class_name_that_would_break_the_script_is_rejected() {
    for bad in ["", "Two Words", "X(Scene):\n    pass\nimport os#", "9Lives", "class"] {
        assert!(
            matches!(
                SceneBuilder::new("x").class_name(bad),
                Err(crate::AnimateError::Config(_))
            ),
            "accepted {bad:?}"
        );
    }
}
