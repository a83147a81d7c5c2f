//! Removal of nova-tracer hooks from a settings tree.
//!
//! [`prune`] never mutates its input. It rebuilds the document bottom-up,
//! keeping every surviving value in its original position, so running it on
//! its own output changes nothing.

use super::matcher::SubsystemMatcher;
use super::{COMMAND_KEY, HOOKS_KEY, HookType};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use tracing::debug;

/// A direct entry removed from the settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemovedHook {
    pub hook_type: HookType,
    /// Selector of the enclosing matcher entry, when the entry was nested.
    pub matcher: Option<String>,
    pub command: String,
}

/// What a prune pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PruneReport {
    /// Whether the document had a `hooks` key at all.
    pub hooks_present: bool,
    /// Direct entries removed, in document order.
    pub removed: Vec<RemovedHook>,
    /// Matcher entries dropped because their nested list ended up empty.
    pub dropped_groups: usize,
    /// Hook-type keys deleted because their list ended up empty.
    pub collapsed_keys: Vec<HookType>,
    /// Other hook keys deleted because they held an empty list.
    pub dropped_empty_keys: Vec<String>,
    /// Whether the whole `hooks` mapping was deleted.
    pub hooks_removed: bool,
}

impl PruneReport {
    /// True when the pruned document is identical to the input.
    pub fn is_noop(&self) -> bool {
        self.removed.is_empty()
            && self.dropped_groups == 0
            && self.collapsed_keys.is_empty()
            && self.dropped_empty_keys.is_empty()
            && !self.hooks_removed
    }

    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }
}

/// Result of [`prune`].
#[derive(Debug, Clone, PartialEq)]
pub struct Pruned {
    pub document: Value,
    pub report: PruneReport,
}

/// Remove every nova-tracer entry from the recognized hook types.
///
/// For each hook type: drop matching direct entries, filter the nested list of
/// each matcher entry (dropping the matcher entry if nothing is left), then
/// delete the hook-type key if its list is empty. Any other hook key holding
/// an empty list is deleted too, and the `hooks` key itself is deleted once it
/// holds nothing. Entries of unrecognized hook types and values of unexpected
/// shape are copied through as-is.
pub fn prune(document: &Value, matcher: &SubsystemMatcher) -> Pruned {
    let mut report = PruneReport::default();

    let Some(root) = document.as_object() else {
        return Pruned {
            document: document.clone(),
            report,
        };
    };
    let Some(hooks_value) = root.get(HOOKS_KEY) else {
        return Pruned {
            document: document.clone(),
            report,
        };
    };
    report.hooks_present = true;

    let Some(hooks) = hooks_value.as_object() else {
        debug!("hooks is a JSON {}, leaving it untouched", super::json_type_name(hooks_value));
        return Pruned {
            document: document.clone(),
            report,
        };
    };

    let pruned_hooks = prune_hooks_map(hooks, matcher, &mut report);

    let mut rebuilt = Map::with_capacity(root.len());
    let mut pruned_hooks = Some(pruned_hooks);
    for (key, value) in root {
        if key != HOOKS_KEY {
            rebuilt.insert(key.clone(), value.clone());
            continue;
        }
        match pruned_hooks.take() {
            Some(map) if map.is_empty() => report.hooks_removed = true,
            Some(map) => {
                rebuilt.insert(key.clone(), Value::Object(map));
            }
            None => {}
        }
    }

    Pruned {
        document: Value::Object(rebuilt),
        report,
    }
}

fn prune_hooks_map(
    hooks: &Map<String, Value>,
    matcher: &SubsystemMatcher,
    report: &mut PruneReport,
) -> Map<String, Value> {
    let mut rebuilt = Map::with_capacity(hooks.len());

    for (key, value) in hooks {
        let (Some(hook_type), Some(groups)) = (HookType::from_key(key), value.as_array()) else {
            if value.as_array().is_some_and(Vec::is_empty) {
                debug!(key = %key, "empty hook list, removing key");
                report.dropped_empty_keys.push(key.clone());
            } else {
                rebuilt.insert(key.clone(), value.clone());
            }
            continue;
        };

        let kept: Vec<Value> = groups
            .iter()
            .filter_map(|group| prune_group(hook_type, group, matcher, report))
            .collect();

        if kept.is_empty() {
            debug!(hook_type = %hook_type, "hook type left empty, removing key");
            report.collapsed_keys.push(hook_type);
        } else {
            rebuilt.insert(key.clone(), Value::Array(kept));
        }
    }

    rebuilt
}

/// Returns the group to keep, or `None` when it should be dropped.
fn prune_group(
    hook_type: HookType,
    group: &Value,
    matcher: &SubsystemMatcher,
    report: &mut PruneReport,
) -> Option<Value> {
    if matcher.is_target_entry(group) {
        report.removed.push(removed_hook(hook_type, None, group));
        return None;
    }

    let Some(object) = group.as_object() else {
        return Some(group.clone());
    };
    let Some(nested) = object.get(HOOKS_KEY).and_then(Value::as_array) else {
        return Some(group.clone());
    };

    let selector = object
        .get("matcher")
        .and_then(Value::as_str)
        .map(str::to_string);

    let mut kept = Vec::with_capacity(nested.len());
    for entry in nested {
        if matcher.is_target_entry(entry) {
            report
                .removed
                .push(removed_hook(hook_type, selector.clone(), entry));
        } else {
            kept.push(entry.clone());
        }
    }

    if kept.is_empty() {
        report.dropped_groups += 1;
        return None;
    }
    if kept.len() == nested.len() {
        return Some(group.clone());
    }

    let mut rebuilt = Map::with_capacity(object.len());
    let mut kept = Some(kept);
    for (key, value) in object {
        if key == HOOKS_KEY {
            if let Some(entries) = kept.take() {
                rebuilt.insert(key.clone(), Value::Array(entries));
            }
        } else {
            rebuilt.insert(key.clone(), value.clone());
        }
    }
    Some(Value::Object(rebuilt))
}

fn removed_hook(hook_type: HookType, matcher: Option<String>, entry: &Value) -> RemovedHook {
    RemovedHook {
        hook_type,
        matcher,
        command: entry
            .get(COMMAND_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    }
}

/// Whether nova-tracer hooks are registered in a settings document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HookStatus {
    /// At least one entry matches the allow-list.
    Installed { entries: usize },
    /// No entry matches.
    NotInstalled,
}

impl fmt::Display for HookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookStatus::Installed { entries: 1 } => write!(f, "Installed (1 entry)"),
            HookStatus::Installed { entries } => write!(f, "Installed ({} entries)", entries),
            HookStatus::NotInstalled => write!(f, "Not installed"),
        }
    }
}

/// Report hook status without building a new document.
pub fn inspect(document: &Value, matcher: &SubsystemMatcher) -> HookStatus {
    let Some(hooks) = document.get(HOOKS_KEY).and_then(Value::as_object) else {
        return HookStatus::NotInstalled;
    };

    let entries = hooks
        .iter()
        .filter(|(key, _)| HookType::from_key(key).is_some())
        .filter_map(|(_, value)| value.as_array())
        .flatten()
        .map(|group| {
            if matcher.is_target_entry(group) {
                return 1;
            }
            group
                .get(HOOKS_KEY)
                .and_then(Value::as_array)
                .map(|nested| nested.iter().filter(|e| matcher.is_target_entry(e)).count())
                .unwrap_or(0)
        })
        .sum();

    if entries == 0 {
        HookStatus::NotInstalled
    } else {
        HookStatus::Installed { entries }
    }
}
