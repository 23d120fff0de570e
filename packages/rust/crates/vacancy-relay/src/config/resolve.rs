//! Env > settings > default resolution shared by the runtime configs.

use std::fmt::Display;
use std::str::FromStr;

/// Resolve one value. Env wins when it parses and passes `valid`; otherwise settings, then default.
pub(crate) fn resolve_with<T, F, V>(
    lookup: &F,
    name: &str,
    setting_value: Option<T>,
    default: T,
    valid: V,
) -> T
where
    T: FromStr + Display + Copy,
    F: Fn(&str) -> Option<String>,
    V: Fn(T) -> bool,
{
    if let Some(raw) = lookup(name) {
        match raw.trim().parse::<T>() {
            Ok(value) if valid(value) => return value,
            _ => tracing::warn!(
                env_var = %name,
                value = %raw,
                "invalid runtime config env value; using settings/default"
            ),
        }
    }
    match setting_value {
        Some(value) if valid(value) => value,
        Some(value) => {
            tracing::warn!(
                setting = %name,
                value = %value,
                default = %default,
                "invalid runtime config settings value; using default"
            );
            default
        }
        None => default,
    }
}

pub(crate) fn resolve_u64<F>(lookup: &F, name: &str, setting_value: Option<u64>, default: u64) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    resolve_with(lookup, name, setting_value, default, |value| value > 0)
}

pub(crate) fn resolve_u32<F>(lookup: &F, name: &str, setting_value: Option<u32>, default: u32) -> u32
where
    F: Fn(&str) -> Option<String>,
{
    resolve_with(lookup, name, setting_value, default, |value| value > 0)
}

pub(crate) fn resolve_usize<F>(
    lookup: &F,
    name: &str,
    setting_value: Option<usize>,
    default: usize,
) -> usize
where
    F: Fn(&str) -> Option<String>,
{
    resolve_with(lookup, name, setting_value, default, |value| value > 0)
}

/// Non-empty trimmed string from env, then settings, then default.
pub(crate) fn resolve_string<F>(
    lookup: &F,
    name: &str,
    setting_value: Option<&str>,
    default: &str,
) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .or_else(|| {
            setting_value
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(ToString::to_string)
        })
        .unwrap_or_else(|| default.to_string())
}
