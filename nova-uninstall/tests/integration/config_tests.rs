use crate::common::{TestHome, assert_contains, init_test_logging};

#[test]
fn test_settings_flag_overrides_env() {
    init_test_logging();
    crate::test_log!("TEST START: test_settings_flag_overrides_env");

    let home = TestHome::new();
    let other = home.dir.path().join("other-settings.json");
    std::fs::write(
        &other,
        r#"{"hooks":{"SessionEnd":[{"command":"uv run hooks/session-end.py"}]},"x":1}"#,
    )
    .unwrap();
    home.write_settings(r#"{"hooks":{"SessionEnd":[{"command":"uv run hooks/session-end.py"}]}}"#);

    let output = home.run(&["--skip-sweep", "--settings", other.to_str().unwrap()]);
    assert!(output.status.success());

    let rewritten: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&other).unwrap()).unwrap();
    assert_eq!(rewritten, serde_json::json!({"x": 1}));
    assert_contains(&home.read_settings(), "session-end.py");

    crate::test_log!("TEST PASS: test_settings_flag_overrides_env");
}

#[test]
fn test_max_depth_out_of_range_rejected() {
    init_test_logging();
    let home = TestHome::new();

    for depth in ["0", "33", "deep"] {
        let output = home.run(&["--max-depth", depth]);
        assert!(!output.status.success(), "depth {depth} should be rejected");
    }
}

#[test]
fn test_missing_sweep_root_is_error_only_when_searching() {
    init_test_logging();
    crate::test_log!("TEST START: test_missing_sweep_root_is_error_only_when_searching");

    let home = TestHome::new();
    let missing = home.dir.path().join("nope");

    // Non-interactive: the search prompt answers no, so the root is never walked.
    let output = home.run(&["--sweep-root", missing.to_str().unwrap()]);
    assert!(output.status.success());

    crate::test_log!("TEST PASS: test_missing_sweep_root_is_error_only_when_searching");
}

#[test]
fn test_help_lists_flags() {
    init_test_logging();
    let home = TestHome::new();
    let output = home.run(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in ["--settings", "--dry-run", "--status", "--skip-sweep", "--sweep-root", "--max-depth"] {
        assert_contains(&stdout, flag);
    }
}
