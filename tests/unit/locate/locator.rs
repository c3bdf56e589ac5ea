use super::*;
use crate::foundation::core::{JobId, Quality};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target")
        .join("unit_tmp")
        .join(format!("{name}-{}", JobId::next()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn touch(path: &Path) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, b"mp4").unwrap();
}

fn query<'a>(out: &'a Path, filename: &'a str) -> ArtifactQuery<'a> {
    ArtifactQuery {
        output_dir: out,
        filename,
        scene: "MathSolutionAnimation",
        script_stem: "solution_script_7",
        quality: Quality::Medium,
        prefix: "solution",
        extension: "mp4",
    }
}

#[test]
fn manim_layout_probes_most_specific_first() {
    let out = PathBuf::from("media");
    let candidates = ManimLayout.candidates(&query(&out, "solution_7.mp4"));
    assert_eq!(
        candidates,
        vec![
            out.join("videos/solution_script_7/720p30/solution_7.mp4"),
            out.join("videos/MathSolutionAnimation/solution_7.mp4"),
            out.join("videos/solution_7.mp4"),
            out.join("solution_7.mp4"),
        ]
    );
}

#[test]
fn primary_candidate_wins() {
    let out = scratch_dir("locate_primary");
    let expected = out.join("videos/solution_script_7/720p30/solution_7.mp4");
    touch(&expected);
    touch(&out.join("solution_7.mp4"));

    let artifact = ArtifactLocator::new()
        .locate(&query(&out, "solution_7.mp4"))
        .unwrap();
    assert_eq!(artifact.path, expected);
}

#[test]
fn non_primary_candidate_is_found() {
    let out = scratch_dir("locate_secondary");
    let expected = out.join("videos/solution_7.mp4");
    touch(&expected);

    let artifact = ArtifactLocator::new()
        .locate(&query(&out, "solution_7.mp4"))
        .unwrap();
    assert_eq!(artifact.path, expected);
}

#[test]
fn scan_finds_artifact_outside_every_candidate() {
    let out = scratch_dir("locate_scan");
    let expected = out.join("videos/renamed/1080p60/solution_7.mp4");
    touch(&expected);

    let artifact = ArtifactLocator::new()
        .locate(&query(&out, "solution_7.mp4"))
        .unwrap();
    assert_eq!(artifact.path, expected);
}

#[test]
fn injected_candidates_replace_the_default_layout() {
    let out = scratch_dir("locate_injected");
    let custom = out.join("custom/place/clip.mp4");
    touch(&custom);

    let locator = ArtifactLocator::with_layout(vec![out.join("missing.mp4"), custom.clone()]);
    let artifact = locator.locate(&query(&out, "solution_7.mp4")).unwrap();
    assert_eq!(artifact.path, custom);
}

#[test]
fn scan_prefers_exact_name_then_prefix_then_any() {
    let out = scratch_dir("locate_rank");
    touch(&out.join("a/aaa.mp4"));
    touch(&out.join("b/solution_other.mp4"));
    touch(&out.join("c/solution_7.mp4"));
    let q = query(&out, "solution_7.mp4");
    assert_eq!(
        scan_for_artifact(&q).unwrap(),
        Some(out.join("c/solution_7.mp4"))
    );

    std::fs::remove_file(out.join("c/solution_7.mp4")).unwrap();
    assert_eq!(
        scan_for_artifact(&q).unwrap(),
        Some(out.join("b/solution_other.mp4"))
    );

    std::fs::remove_file(out.join("b/solution_other.mp4")).unwrap();
    assert_eq!(scan_for_artifact(&q).unwrap(), Some(out.join("a/aaa.mp4")));
}

#[test]
fn scan_is_deterministic_among_equal_ranks() {
    let out = scratch_dir("locate_sorted");
    touch(&out.join("z/solution_b.mp4"));
    touch(&out.join("m/solution_a.mp4"));
    touch(&out.join("m/solution_c.MP4"));
    let q = query(&out, "solution_7.mp4");
    assert_eq!(
        scan_for_artifact(&q).unwrap(),
        Some(out.join("m/solution_a.mp4"))
    );
}

#[test]
fn partial_movie_fragments_and_other_extensions_are_ignored() {
    let out = scratch_dir("locate_partial");
    touch(&out.join("videos/x/720p30/partial_movie_files/MathSolutionAnimation/00000.mp4"));
    touch(&out.join("videos/x/720p30/solution_7.png"));
    touch(&out.join("images/solution_7.mp4.txt"));

    let err = ArtifactLocator::new()
        .locate(&query(&out, "solution_7.mp4"))
        .unwrap_err();
    assert!(matches!(err, AnimateError::ArtifactNotFound { .. }));
}

#[test]
fn missing_output_dir_is_not_found() {
    let out = scratch_dir("locate_missing").join("never_created");
    let err = ArtifactLocator::new()
        .locate(&query(&out, "solution_7.mp4"))
        .unwrap_err();
    match err {
        AnimateError::ArtifactNotFound {
            output_dir,
            filename,
        } => {
            assert_eq!(output_dir, out);
            assert_eq!(filename, "solution_7.mp4");
        }
        other => panic!("unexpected error: {other}"),
    }
}
