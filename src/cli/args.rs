//! Helpers for the free-form `key=value` parameters the subcommands accept.

use anyhow::{Context, Result, bail};
use std::ffi::OsString;

/// Token that switches any command to indented JSON output.
pub const JSON_FLAG: &str = "json";

/// Splits `key=value` at the first `=`. Tokens without `=` are not
/// parameters.
pub fn split_param(arg: &str) -> Option<(&str, &str)> {
    arg.split_once('=')
}

/// Removes every `json` token after the program name and reports whether
/// one was present.
pub fn extract_json_flag<I>(args: I) -> (Vec<OsString>, bool)
where
    I: IntoIterator<Item = OsString>,
{
    let mut json = false;
    let mut kept = Vec::new();
    for (i, arg) in args.into_iter().enumerate() {
        if i > 0 && arg == JSON_FLAG {
            json = true;
        } else {
            kept.push(arg);
        }
    }
    (kept, json)
}

/// Parses every token as `key=value`, keeping their order.
pub fn parse_params(args: &[String]) -> Result<Vec<(String, String)>> {
    args.iter()
        .map(|arg| {
            split_param(arg)
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .with_context(|| format!("expected key=value, got '{arg}'"))
        })
        .collect()
}

/// Parses a parameter that must be a whole number.
pub fn parse_count(key: &str, value: &str) -> Result<i64> {
    let count = value
        .trim()
        .parse::<i64>()
        .with_context(|| format!("{key} must be a number, got '{value}'"))?;
    if count < 0 {
        bail!("{key} must not be negative, got {count}");
    }
    Ok(count)
}
