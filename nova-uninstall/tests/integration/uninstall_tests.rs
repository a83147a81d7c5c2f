use serde_json::json;
use std::fs;

use crate::common::{TestHome, assert_contains, assert_path_exists, init_test_logging};

const FULL_INSTALL: &str = r#"{
  "model": "opus",
  "hooks": {
    "SessionStart": [
      {"type": "command", "command": "uv run /opt/nova/hooks/session-start.py"}
    ],
    "PreToolUse": [
      {"matcher": "Bash", "hooks": [
        {"type": "command", "command": "uv run /opt/nova/hooks/pre-tool-guard.py"}
      ]},
      {"matcher": "Bash", "hooks": [
        {"type": "command", "command": "rch hook"}
      ]}
    ],
    "PostToolUse": [
      {"matcher": "*", "hooks": [
        {"type": "command", "command": "uv run /opt/nova/hooks/post-tool-nova-guard.py", "timeout": 15}
      ]}
    ],
    "SessionEnd": [
      {"type": "command", "command": "uv run /opt/nova/hooks/session-end.py"}
    ],
    "Notification": [
      {"type": "command", "command": "notify-send nova"}
    ]
  },
  "permissions": {"allow": ["Bash(ls)"]}
}"#;

#[test]
fn test_removes_direct_entry_keeps_sibling() {
    init_test_logging();
    crate::test_log!("TEST START: test_removes_direct_entry_keeps_sibling");

    let home = TestHome::new();
    home.write_settings(
        r#"{"hooks":{"PreToolUse":[{"command":"run pre-tool-guard.py"},{"command":"run other-tool.py"}]}}"#,
    );

    let output = home.run(&["--skip-sweep"]);
    assert!(output.status.success());
    assert_eq!(
        home.settings_json(),
        json!({"hooks": {"PreToolUse": [{"command": "run other-tool.py"}]}})
    );

    crate::test_log!("TEST PASS: test_removes_direct_entry_keeps_sibling");
}

#[test]
fn test_collapses_to_no_hooks_key() {
    init_test_logging();
    crate::test_log!("TEST START: test_collapses_to_no_hooks_key");

    let home = TestHome::new();
    home.write_settings(
        r#"{"hooks":{"SessionStart":[{"matcher":"*","hooks":[{"command":"session-start.py"}]}]}}"#,
    );

    let output = home.run(&["--skip-sweep"]);
    assert!(output.status.success());
    assert_eq!(home.settings_json(), json!({}));

    crate::test_log!("TEST PASS: test_collapses_to_no_hooks_key");
}

#[test]
fn test_full_install_preserves_foreign_config_and_order() {
    init_test_logging();
    crate::test_log!("TEST START: test_full_install_preserves_foreign_config_and_order");

    let home = TestHome::new();
    home.write_settings(FULL_INSTALL);

    let output = home.run(&["--skip-sweep"]);
    assert!(output.status.success());

    let written = home.read_settings();
    let keys: Vec<String> = home
        .settings_json()
        .as_object()
        .unwrap()
        .keys()
        .cloned()
        .collect();
    assert_eq!(keys, vec!["model", "hooks", "permissions"]);
    assert_eq!(
        home.settings_json()["hooks"],
        json!({
            "PreToolUse": [
                {"matcher": "Bash", "hooks": [{"type": "command", "command": "rch hook"}]}
            ],
            "Notification": [{"type": "command", "command": "notify-send nova"}]
        })
    );
    assert!(written.ends_with('\n'));

    let backups = home.backups();
    assert_eq!(backups.len(), 1);
    assert_eq!(fs::read_to_string(&backups[0]).unwrap(), FULL_INSTALL);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_contains(&stdout, "Removed 4 hook entries");
    assert_contains(&stdout, "Uninstallation Complete");

    crate::test_log!("TEST PASS: test_full_install_preserves_foreign_config_and_order");
}

#[test]
fn test_second_run_is_noop() {
    init_test_logging();
    crate::test_log!("TEST START: test_second_run_is_noop");

    let home = TestHome::new();
    home.write_settings(FULL_INSTALL);

    assert!(home.run(&["--skip-sweep"]).status.success());
    let after_first = home.read_settings();

    let output = home.run(&["--skip-sweep"]);
    assert!(output.status.success());
    assert_eq!(home.read_settings(), after_first);
    assert_eq!(home.backups().len(), 1, "no-op run must not back up again");
    assert_contains(
        &String::from_utf8_lossy(&output.stdout),
        "No nova-tracer hooks registered",
    );

    crate::test_log!("TEST PASS: test_second_run_is_noop");
}

#[test]
fn test_no_hooks_section_is_untouched() {
    init_test_logging();
    crate::test_log!("TEST START: test_no_hooks_section_is_untouched");

    let home = TestHome::new();
    let original = "{\n    \"theme\": \"dark\"\n}";
    home.write_settings(original);

    let output = home.run(&["--skip-sweep"]);
    assert!(output.status.success());
    assert_eq!(home.read_settings(), original);
    assert!(home.backups().is_empty());

    crate::test_log!("TEST PASS: test_no_hooks_section_is_untouched");
}

#[test]
fn test_missing_settings_exits_zero() {
    init_test_logging();
    crate::test_log!("TEST START: test_missing_settings_exits_zero");

    let home = TestHome::new();
    let output = home.run(&["--skip-sweep"]);
    assert!(output.status.success());
    assert!(!home.settings.exists());
    assert_contains(
        &String::from_utf8_lossy(&output.stdout),
        "settings file not found",
    );

    crate::test_log!("TEST PASS: test_missing_settings_exits_zero");
}

#[test]
fn test_invalid_json_fails_without_mutation() {
    init_test_logging();
    crate::test_log!("TEST START: test_invalid_json_fails_without_mutation");

    let home = TestHome::new();
    home.write_settings("{\"hooks\": [");

    let output = home.run(&["--skip-sweep"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(home.read_settings(), "{\"hooks\": [");
    assert!(home.backups().is_empty());
    assert_contains(&String::from_utf8_lossy(&output.stderr), "NOVA-E003");

    crate::test_log!("TEST PASS: test_invalid_json_fails_without_mutation");
}

#[test]
fn test_non_object_root_fails() {
    init_test_logging();
    let home = TestHome::new();
    home.write_settings("[1, 2]");

    let output = home.run(&["--skip-sweep"]);
    assert_eq!(output.status.code(), Some(1));
    assert_contains(&String::from_utf8_lossy(&output.stderr), "NOVA-E004");
    assert_eq!(home.read_settings(), "[1, 2]");
}

#[test]
fn test_dry_run_changes_nothing() {
    init_test_logging();
    crate::test_log!("TEST START: test_dry_run_changes_nothing");

    let home = TestHome::new();
    home.write_settings(FULL_INSTALL);
    let session = home.add_session_dir("app");

    let output = home.run(&["--dry-run"]);
    assert!(output.status.success());
    assert_eq!(home.read_settings(), FULL_INSTALL);
    assert!(home.backups().is_empty());
    assert_path_exists(&session);
    assert_contains(
        &String::from_utf8_lossy(&output.stdout),
        "would remove 4 hook entries",
    );

    crate::test_log!("TEST PASS: test_dry_run_changes_nothing");
}

#[test]
fn test_status_reports_installed_and_not_installed() {
    init_test_logging();
    crate::test_log!("TEST START: test_status_reports_installed_and_not_installed");

    let home = TestHome::new();
    home.write_settings(FULL_INSTALL);

    let output = home.run(&["--status"]);
    assert!(output.status.success());
    assert_contains(
        &String::from_utf8_lossy(&output.stdout),
        "Installed (4 entries)",
    );
    assert_eq!(home.read_settings(), FULL_INSTALL);

    assert!(home.run(&["--skip-sweep"]).status.success());
    let output = home.run(&["--status"]);
    assert_contains(&String::from_utf8_lossy(&output.stdout), "Not installed");

    crate::test_log!("TEST PASS: test_status_reports_installed_and_not_installed");
}

#[test]
fn test_status_conflicts_with_dry_run() {
    init_test_logging();
    let home = TestHome::new();
    let output = home.run(&["--status", "--dry-run"]);
    assert!(!output.status.success());
}

#[test]
fn test_non_interactive_sweep_keeps_session_dirs() {
    init_test_logging();
    crate::test_log!("TEST START: test_non_interactive_sweep_keeps_session_dirs");

    let home = TestHome::new();
    home.write_settings(FULL_INSTALL);
    let first = home.add_session_dir("alpha");
    let second = home.add_session_dir("beta/service");

    let output = home.run(&[]);
    assert!(output.status.success());
    assert_path_exists(&first);
    assert_path_exists(&second);
    assert_contains(
        &String::from_utf8_lossy(&output.stdout),
        "Skipping session directory search",
    );

    crate::test_log!("TEST PASS: test_non_interactive_sweep_keeps_session_dirs");
}
