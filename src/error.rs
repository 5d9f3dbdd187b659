// SPDX-License-Identifier: PMPL-1.0-or-later
//! Error types for accessguard
//!
//! Scanning a string never fails; these cover the file, config and
//! report plumbing around it.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for accessguard
#[derive(Error, Debug)]
pub enum GuardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{path} is {size} bytes, over the {limit} byte input limit")]
    InputTooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, GuardError>;
