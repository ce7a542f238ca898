//! Key path and type name normalization.
//!
//! Both run before anything reaches `reg.exe` or the codec, so callers can
//! write `HKLM/Software/Foo` and `dword`.

use crate::config::RegConfig;

/// Trim a key path and convert forward slashes to backslashes.
///
/// A path without forward slashes is returned as-is (after trimming), so
/// existing backslashes are preserved.
pub fn normalize_path(path: &str) -> String {
    let path = path.trim();
    if path.contains('/') {
        path.replace('/', "\\")
    } else {
        path.to_string()
    }
}

/// Uppercase a type name and add the `REG_` prefix if missing.
///
/// `None` means "infer the type" and passes through untouched.
pub fn normalize_type(value_type: Option<&str>) -> Option<String> {
    let upper = value_type?.to_uppercase();
    if upper.starts_with(RegConfig::TYPE_PREFIX) {
        Some(upper)
    } else {
        Some(format!("{}{}", RegConfig::TYPE_PREFIX, upper))
    }
}
