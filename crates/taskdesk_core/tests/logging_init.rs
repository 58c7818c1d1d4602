use taskdesk_core::{init_logging, logging_status, LogConfig, TaskTracker};

#[test]
fn init_logging_is_idempotent_for_same_config_and_rejects_conflicts() {
    let log_dir = tempfile::tempdir().unwrap();
    let config = LogConfig {
        level: "info".to_string(),
        dir: Some(log_dir.path().to_path_buf()),
    };

    init_logging(&config).expect("first init should succeed");
    init_logging(&config).expect("same config should be idempotent");

    let level_error = init_logging(&LogConfig {
        level: "debug".to_string(),
        ..config.clone()
    })
    .expect_err("level conflict should fail");
    assert!(level_error.contains("refusing to switch"));

    let target_error = init_logging(&LogConfig {
        level: "info".to_string(),
        dir: None,
    })
    .expect_err("target conflict should fail");
    assert!(target_error.contains("refusing to switch"));

    let (active_level, active_dir) = logging_status().expect("logging should be active");
    assert_eq!(active_level, "info");
    assert_eq!(active_dir.as_deref(), Some(log_dir.path()));

    let tracker = TaskTracker::new();
    tracker.create_user("Ana", "a@x.com").unwrap();
    log::logger().flush();

    let wrote_file = std::fs::read_dir(log_dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .any(|entry| entry.file_name().to_string_lossy().starts_with("taskdesk"));
    assert!(wrote_file, "expected a taskdesk log file in the log dir");
}

#[test]
fn init_logging_rejects_bad_level_before_touching_state() {
    let err = init_logging(&LogConfig {
        level: "loud".to_string(),
        dir: None,
    })
    .unwrap_err();
    assert!(err.contains("unsupported log level"));
}
