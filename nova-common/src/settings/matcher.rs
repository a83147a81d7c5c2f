//! Recognition of hook entries that belong to nova-tracer.

use super::COMMAND_KEY;
use crate::errors::ErrorCode;
use regex::RegexSet;
use serde_json::Value;
use thiserror::Error;

/// One allow-list entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowPattern {
    /// Matches when the command contains this text verbatim.
    Substring(&'static str),
    /// Matches when the regular expression finds a match anywhere in the command.
    Regex(&'static str),
}

impl AllowPattern {
    fn to_regex(self) -> String {
        match self {
            AllowPattern::Substring(text) => regex::escape(text),
            AllowPattern::Regex(pattern) => pattern.to_string(),
        }
    }
}

/// Identifiers of the commands nova-tracer registers.
///
/// `nova` covers the install directory (`nova_claude_code_protector/hooks/...`)
/// and `post-tool-nova-guard.py`; the script names catch installs from a
/// renamed checkout.
pub const NOVA_ALLOW_LIST: &[AllowPattern] = &[
    AllowPattern::Substring("nova"),
    AllowPattern::Substring("session-start.py"),
    AllowPattern::Substring("session-end.py"),
    AllowPattern::Substring("pre-tool-guard.py"),
    AllowPattern::Substring("post-tool-nova-guard.py"),
];

#[derive(Debug, Error)]
pub enum MatcherError {
    #[error("Invalid allow-list pattern: {source}")]
    InvalidPattern {
        #[source]
        source: regex::Error,
    },
}

impl MatcherError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::ConfigInvalidPattern
    }
}

/// Predicate over hook entries, compiled from an allow-list table.
#[derive(Debug, Clone)]
pub struct SubsystemMatcher {
    set: RegexSet,
}

impl SubsystemMatcher {
    pub fn new(table: &[AllowPattern]) -> Result<Self, MatcherError> {
        let set = RegexSet::new(table.iter().map(|p| p.to_regex()))
            .map_err(|source| MatcherError::InvalidPattern { source })?;
        Ok(Self { set })
    }

    /// Matcher for the built-in [`NOVA_ALLOW_LIST`].
    pub fn nova() -> Result<Self, MatcherError> {
        Self::new(NOVA_ALLOW_LIST)
    }

    pub fn matches_command(&self, command: &str) -> bool {
        self.set.is_match(command)
    }

    /// True when `entry` is an object whose `command` string matches the allow-list.
    ///
    /// Matcher entries (no `command` of their own) never match here; their
    /// nested entries are checked one by one by the pruner.
    pub fn is_target_entry(&self, entry: &Value) -> bool {
        entry
            .get(COMMAND_KEY)
            .and_then(Value::as_str)
            .is_some_and(|command| self.matches_command(command))
    }
}
