#[test]
fn test_log_file_is_written_under_the_given_directory() {
    let dir = tempfile::tempdir().unwrap();
    let guard = scopemux_core::logging::init_logging_in(dir.path(), "scopemux-test", false);
    tracing::info!(language = "c", "logging smoke test");
    drop(guard);

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert!(names.iter().any(|n| n.starts_with("scopemux-test")));
}
