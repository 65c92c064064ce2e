/*!
String-level helpers for working with paths and masks.

Nothing in here touches the file system. Paths are treated as opaque strings and both `/` and `\`
are understood as separators regardless of the platform.
*/

use crate::config::{BACKWARD_SEPARATOR, FORWARD_SEPARATOR};

/**
Get the last non-empty segment of `path`.

The path is trimmed of surrounding whitespace first. The separator is detected from the path
itself: `\` is used if present but `/` wins if the path contains both styles. A path without any
separator is returned whole (trimmed).

Segments that are empty after trimming are skipped, so trailing separators are ignored. The
segment that is returned is not itself trimmed.

# Examples

```
use minfs::path_ops::leaf_name;

assert_eq!(leaf_name("/var/log/app.log"), "app.log");
assert_eq!(leaf_name("C:\\Users\\me\\"), "me");
assert_eq!(leaf_name("plainname"), "plainname");
assert_eq!(leaf_name(""), "");
```
*/
pub fn leaf_name(path: &str) -> &str {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return "";
    }

    let separator = if trimmed.contains(FORWARD_SEPARATOR) {
        FORWARD_SEPARATOR
    } else if trimmed.contains(BACKWARD_SEPARATOR) {
        BACKWARD_SEPARATOR
    } else {
        return trimmed;
    };

    trimmed
        .split(separator)
        .rev()
        .find(|segment| !segment.trim().is_empty())
        .unwrap_or("")
}

/// Returns true if `text` begins with `prefix`. An empty prefix always matches.
pub fn starts_with(text: &str, prefix: &str) -> bool {
    prefix.is_empty() || text.starts_with(prefix)
}

/**
Returns true if `text` ends with `suffix`.

An empty suffix always matches. A non-empty suffix longer than `text` never does.
*/
pub fn ends_with(text: &str, suffix: &str) -> bool {
    if suffix.is_empty() {
        return true;
    }

    if text.len() < suffix.len() {
        return false;
    }

    text.ends_with(suffix)
}

/// Remove `prefix` from the start of `text`. `text` is returned unchanged if it lacks the prefix.
pub fn strip_prefix<'a>(text: &'a str, prefix: &str) -> &'a str {
    text.strip_prefix(prefix).unwrap_or(text)
}

/// Remove `suffix` from the end of `text`. `text` is returned unchanged if it lacks the suffix.
pub fn strip_suffix<'a>(text: &'a str, suffix: &str) -> &'a str {
    text.strip_suffix(suffix).unwrap_or(text)
}
