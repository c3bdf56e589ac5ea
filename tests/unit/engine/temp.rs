use super::*;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target")
        .join("unit_tmp")
        .join(format!("{name}-{}", crate::JobId::next()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn script_is_written_then_removed_on_drop() {
    let path = scratch_dir("temp_drop").join("scene.py");
    {
        let script = TempScript::create(&path, "print('hi')\n").unwrap();
        assert_eq!(script.path(), path.as_path());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "print('hi')\n");
    }
    assert!(!path.exists());
}

#[test]
fn script_is_removed_when_an_error_unwinds_past_it() {
    let path = scratch_dir("temp_err").join("scene.py");
    let result: AnimateResult<()> = (|| {
        let _script = TempScript::create(&path, "x = 1\n")?;
        Err(AnimateError::Cancelled)
    })();
    assert!(matches!(result, Err(AnimateError::Cancelled)));
    assert!(!path.exists());
}

#[test]
fn existing_file_is_neither_clobbered_nor_removed() {
    let path = scratch_dir("temp_exists").join("scene.py");
    std::fs::write(&path, "other job").unwrap();

    let err = TempScript::create(&path, "mine").unwrap_err();
    assert!(matches!(err, AnimateError::Io { .. }));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "other job");
}

#[test]
fn missing_directory_is_an_io_error() {
    let path = scratch_dir("temp_missing").join("nope").join("scene.py");
    let err = TempScript::create(&path, "x").unwrap_err();
    assert!(err.to_string().contains("create script"));
}
