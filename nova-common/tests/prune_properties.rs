//! Property tests for hook pruning: idempotence, completeness, preservation,
//! and collapse of emptied structure.

use nova_common::settings::{HookType, SubsystemMatcher, prune};
use proptest::prelude::*;
use serde_json::{Map, Value, json};

const COMMANDS: &[&str] = &[
    "uv run /home/u/nova_claude_code_protector/hooks/session-start.py",
    "uv run /opt/hooks/pre-tool-guard.py",
    "uv run /opt/hooks/post-tool-nova-guard.py",
    "python3 session-end.py",
    "/other/hook.py",
    "run other-tool.py",
    "rch",
    "npx prettier --check",
];

const HOOK_KEYS: &[&str] = &[
    "SessionStart",
    "PreToolUse",
    "PostToolUse",
    "SessionEnd",
    "Stop",
];

fn direct_entry() -> impl Strategy<Value = Value> {
    (0..COMMANDS.len(), any::<bool>()).prop_map(|(idx, with_type)| {
        if with_type {
            json!({"type": "command", "command": COMMANDS[idx]})
        } else {
            json!({"command": COMMANDS[idx]})
        }
    })
}

fn hook_group() -> impl Strategy<Value = Value> {
    prop_oneof![
        direct_entry(),
        (
            prop::sample::select(vec!["Bash", "Read", "*"]),
            prop::collection::vec(direct_entry(), 0..4)
        )
            .prop_map(|(selector, nested)| json!({"matcher": selector, "hooks": nested})),
    ]
}

fn settings_document() -> impl Strategy<Value = Value> {
    (
        prop::collection::vec(
            (
                prop::sample::select(HOOK_KEYS.to_vec()),
                prop::collection::vec(hook_group(), 0..4),
            ),
            0..6,
        ),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(entries, with_hooks, with_extra)| {
            let mut root = Map::new();
            if with_extra {
                root.insert("theme".to_string(), json!("dark"));
            }
            if with_hooks {
                let mut hooks = Map::new();
                for (key, groups) in entries {
                    hooks.insert(key.to_string(), Value::Array(groups));
                }
                root.insert("hooks".to_string(), Value::Object(hooks));
            }
            root.insert("model".to_string(), json!("opus"));
            Value::Object(root)
        })
}

fn matcher() -> SubsystemMatcher {
    SubsystemMatcher::nova().expect("built-in allow-list compiles")
}

/// Commands under `key` in document order, descending into matcher entries.
fn flatten_commands(document: &Value, key: &str) -> Vec<String> {
    let Some(groups) = document
        .get("hooks")
        .and_then(|h| h.get(key))
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    let mut out = Vec::new();
    for group in groups {
        if let Some(nested) = group.get("hooks").and_then(Value::as_array) {
            for entry in nested {
                if let Some(command) = entry.get("command").and_then(Value::as_str) {
                    out.push(command.to_string());
                }
            }
        } else if let Some(command) = group.get("command").and_then(Value::as_str) {
            out.push(command.to_string());
        }
    }
    out
}

proptest! {
    #[test]
    fn prune_is_idempotent(document in settings_document()) {
        let m = matcher();
        let once = prune(&document, &m);
        let twice = prune(&once.document, &m);
        prop_assert_eq!(&twice.document, &once.document);
        prop_assert!(twice.report.is_noop());
    }

    #[test]
    fn no_target_entry_survives(document in settings_document()) {
        let m = matcher();
        let pruned = prune(&document, &m).document;
        for hook_type in HookType::ALL {
            for command in flatten_commands(&pruned, hook_type.as_str()) {
                prop_assert!(!m.matches_command(&command), "survivor matched: {}", command);
            }
        }
    }

    #[test]
    fn non_target_entries_keep_relative_order(document in settings_document()) {
        let m = matcher();
        let pruned = prune(&document, &m).document;
        for hook_type in HookType::ALL {
            let expected: Vec<String> = flatten_commands(&document, hook_type.as_str())
                .into_iter()
                .filter(|c| !m.matches_command(c))
                .collect();
            prop_assert_eq!(flatten_commands(&pruned, hook_type.as_str()), expected);
        }
    }

    #[test]
    fn emptied_structure_collapses(document in settings_document()) {
        let pruned = prune(&document, &matcher()).document;
        if let Some(hooks) = pruned.get("hooks") {
            let hooks = hooks.as_object().expect("hooks stays an object");
            prop_assert!(!hooks.is_empty());
            for (key, value) in hooks {
                prop_assert!(
                    value.as_array().is_none_or(|list| !list.is_empty()),
                    "empty list survived under {}",
                    key
                );
            }
            for hook_type in HookType::ALL {
                if let Some(groups) = hooks.get(hook_type.as_str()) {
                    let groups = groups.as_array().expect("hook list stays an array");
                    prop_assert!(!groups.is_empty());
                    for group in groups {
                        if let Some(nested) = group.get("hooks").and_then(Value::as_array) {
                            prop_assert!(!nested.is_empty());
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn unrelated_keys_untouched(document in settings_document()) {
        let pruned = prune(&document, &matcher()).document;
        prop_assert_eq!(pruned.get("model"), document.get("model"));
        prop_assert_eq!(pruned.get("theme"), document.get("theme"));
        let original_stop = document
            .get("hooks")
            .and_then(|h| h.get("Stop"))
            .filter(|v| v.as_array().is_none_or(|list| !list.is_empty()));
        prop_assert_eq!(pruned.get("hooks").and_then(|h| h.get("Stop")), original_stop);
    }

    #[test]
    fn only_empty_lists_drop_hooks(
        keys in prop::collection::vec(prop::sample::select(HOOK_KEYS.to_vec()), 1..5)
    ) {
        let hooks: Map<String, Value> = keys
            .iter()
            .map(|k| (k.to_string(), Value::Array(Vec::new())))
            .collect();
        let document = json!({"theme": "dark", "hooks": hooks});
        let pruned = prune(&document, &matcher());
        prop_assert_eq!(pruned.document, json!({"theme": "dark"}));
        prop_assert!(pruned.report.hooks_removed);
    }

    #[test]
    fn documents_without_hooks_are_unchanged(document in settings_document()) {
        prop_assume!(document.get("hooks").is_none());
        let pruned = prune(&document, &matcher());
        prop_assert_eq!(pruned.document, document);
        prop_assert!(pruned.report.is_noop());
    }
}
