use super::*;

#[test]
fn identifiers_follow_python_rules() {
    for ok in ["MathSolutionAnimation", "_Private", "Scene2", "a"] {
        assert!(is_python_identifier(ok), "{ok}");
    }
    for bad in ["", "2Scene", "My Scene", "Scene-1", "Scène", "None", "def", "x;y"] {
        assert!(!is_python_identifier(bad), "{bad}");
    }
}

#[test]
fn default_scene_uses_the_standard_class_name() {
    let scene = Scene::new(Vec::new());
    assert_eq!(scene.class_name(), SCENE_NAME);
    assert_eq!(scene.step_count(), 0);
}

#[test]
fn custom_class_name_is_checked() {
    let scene = Scene::with_class_name("CustomScene", Vec::new()).unwrap();
    assert_eq!(scene.class_name(), "CustomScene");

    let err = Scene::with_class_name("Custom(Scene):\n", Vec::new()).unwrap_err();
    assert!(matches!(err, AnimateError::Config(_)));
}
