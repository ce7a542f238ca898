//! Caller-facing options and their process-wide defaults.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::{LazyLock, RwLock};

/// Shape of query results handed back to callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Values only.
    #[default]
    Simple,
    /// Values with their type and name.
    Complex,
}

/// Effective options for one call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Options {
    /// Lowercase key and value names in results.
    pub lowercase: bool,
    pub format: OutputFormat,
    /// Fields this crate does not interpret, kept for callers further up.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            lowercase: true,
            format: OutputFormat::Simple,
            extra: Map::new(),
        }
    }
}

/// Per-call overrides; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lowercase: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PartialOptions {
    pub fn lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = Some(lowercase);
        self
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }
}

static DEFAULT_OPTIONS: LazyLock<RwLock<Options>> =
    LazyLock::new(|| RwLock::new(Options::default()));

/// Current process-wide defaults.
pub fn default_options() -> Options {
    DEFAULT_OPTIONS
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}

/// Replace the process-wide defaults.
pub fn set_default_options(options: Options) {
    *DEFAULT_OPTIONS
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner()) = options;
}

/// Overlay `user` on the current defaults. Fields present in `user` win.
pub fn merge_options(user: Option<&PartialOptions>) -> Options {
    merge_onto(default_options(), user)
}

fn merge_onto(mut options: Options, user: Option<&PartialOptions>) -> Options {
    let Some(user) = user else {
        return options;
    };
    if let Some(lowercase) = user.lowercase {
        options.lowercase = lowercase;
    }
    if let Some(format) = user.format {
        options.format = format;
    }
    for (key, value) in &user.extra {
        options.extra.insert(key.clone(), value.clone());
    }
    options
}
