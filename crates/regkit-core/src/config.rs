//! Centralized constants for talking to `reg.exe`.

/// Environment variable that overrides the tool used by the default spawner.
pub const PROGRAM_ENV_VAR: &str = "REGKIT_PROGRAM";

/// Tool and wire-format constants.
pub struct RegConfig;

impl RegConfig {
    pub const PROGRAM: &'static str = "reg.exe";

    /// "Not found" line printed by an English-locale `reg.exe`.
    pub const DEFAULT_NOT_FOUND_MESSAGE: &'static str =
        "ERROR: The system was unable to find the specified registry key or value.";

    /// Query against a key that never exists, used to learn the localized
    /// "not found" line.
    pub const DETECTION_ARGS: [&'static str; 2] = ["QUERY", "HKLM\\NONEXISTENT"];

    /// Length of the `ERROR: ` prefix on diagnostic lines.
    pub const ERROR_PREFIX_LEN: usize = 7;

    pub const TYPE_PREFIX: &'static str = "REG_";

    /// Literal backslash-zero, not a NUL byte.
    pub const MULTI_SZ_SEPARATOR: &'static str = "\\0";

    pub const LINE_BREAK: &'static str = "\r\n";
}

/// Resolve the tool program, honoring [`PROGRAM_ENV_VAR`].
pub fn program() -> String {
    std::env::var(PROGRAM_ENV_VAR)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| RegConfig::PROGRAM.to_string())
}
