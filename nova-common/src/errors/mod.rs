//! Error catalog and definitions for the nova-tracer uninstaller
//!
//! Every failure the uninstaller can report carries a stable code, a message,
//! and remediation steps so users can recover without reading source.
//!
//! # Error Code Ranges
//!
//! | Range      | Category    | Description                          |
//! |------------|-------------|--------------------------------------|
//! | E001-E099  | Settings    | Loading, backing up, writing settings |
//! | E100-E199  | Config      | Environment and pattern configuration |
//! | E200-E299  | Sweep       | Session directory search and removal  |
//! | E500-E599  | Internal    | Prompting, logging, unexpected state  |

pub mod catalog;

pub use catalog::{ErrorCategory, ErrorCode, ErrorEntry};
