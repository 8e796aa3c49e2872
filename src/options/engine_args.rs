//! Parsing of free-form engine option strings.
//!
//! Users can pass extra engine options as one string in command-line syntax,
//! `--key[=value] --flag --key2 value2`. Options are applied one by one; a
//! rejected option is counted and logged but never stops the rest.

use std::fmt::Display;

/// Splits an option string into `(key, value)` pairs.
///
/// Text before the first `--` is ignored. Each option runs until the next
/// `--` that follows whitespace (spaces, tabs or newlines) and loses its
/// trailing whitespace. The key ends at the first `=` or whitespace; an
/// option without either gets an empty value.
///
/// # Parameters
///
/// * `args` - Options in command-line syntax, e.g. `--key=value --flag`
///
/// # Returns
///
/// The pairs in input order. Empty options (a bare `--`) are dropped.
///
/// # Example
///
/// ```
/// use mpv_mirror::options::split_options;
///
/// let pairs = split_options("--vo=gpu --mute --sub-font Sans Bold\n");
/// assert_eq!(
///     pairs,
///     vec![
///         ("vo".to_string(), "gpu".to_string()),
///         ("mute".to_string(), String::new()),
///         ("sub-font".to_string(), "Sans Bold".to_string()),
///     ]
/// );
/// ```
#[must_use]
pub fn split_options(args: &str) -> Vec<(String, String)> {
    let mut options = Vec::new();
    let Some(start) = args.find("--") else {
        return options;
    };

    let mut rest = &args[start..];
    while let Some(body) = rest.strip_prefix("--") {
        let end = option_end(body);
        let token = body[..end].trim_end();

        if !token.is_empty() {
            let (key, value) = token
                .split_once(|c: char| c == '=' || c.is_whitespace())
                .unwrap_or((token, ""));
            options.push((key.to_string(), value.to_string()));
        }

        rest = body[end..].trim_start();
    }

    options
}

/// Byte offset of the whitespace run that precedes the next option in
/// `body`, or `body.len()` for the last option.
fn option_end(body: &str) -> usize {
    body.char_indices()
        .filter(|(_, c)| c.is_whitespace())
        .map(|(at, _)| at)
        .find(|&at| body[at..].trim_start().starts_with("--"))
        .unwrap_or(body.len())
}

/// Applies every option in `args` through `sink` and returns how many failed.
///
/// `sink` receives the key and value of each option in order. Failures are
/// logged at `warn` and counted; all remaining options are still attempted.
///
/// # Example
///
/// ```
/// use mpv_mirror::options::apply_options;
///
/// let mut attempted = Vec::new();
/// let failed = apply_options("--a=1 --b --c=2", |key, _value| {
///     attempted.push(key.to_string());
///     if key == "b" { Err("rejected") } else { Ok(()) }
/// });
///
/// assert_eq!(failed, 1);
/// assert_eq!(attempted, ["a", "b", "c"]);
/// ```
pub fn apply_options<F, E>(args: &str, mut sink: F) -> usize
where
    F: FnMut(&str, &str) -> Result<(), E>,
    E: Display,
{
    let mut failed = 0;

    for (key, value) in split_options(args) {
        tracing::debug!(option = %key, value = %value, "Applying option");

        if let Err(e) = sink(&key, &value) {
            failed += 1;
            tracing::warn!(option = %key, value = %value, error = %e, "Failed to apply option");
        }
    }

    failed
}
