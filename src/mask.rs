/*!
Single-wildcard file name masks.

A mask is matched against the leaf name of a path. There are three kinds of masks:

- `*suffix`: matches names ending with `suffix`. `*` alone matches everything.
- `prefix*`: matches names starting with `prefix`.
- anything else: matches names that are exactly equal to the mask.

Only a leading or a trailing `*` is special. A mask like `a*b` is compared literally and so only
matches a file that is actually named `a*b`. A leading wildcard takes precedence, so `*a*` matches
names ending with `a*`.
*/

use std::fmt;

use crate::config::WILDCARD;
use crate::path_ops::{ends_with, leaf_name, starts_with, strip_prefix, strip_suffix};

/// A parsed file name mask.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Mask {
    /// Matches leaf names that end with the contained suffix.
    EndsWith(String),

    /// Matches leaf names that start with the contained prefix.
    StartsWith(String),

    /// Matches leaf names equal to the contained string.
    Exact(String),
}

impl Mask {
    /// Parse a mask string. Parsing never fails; see the [module docs](self) for the rules.
    pub fn parse(mask: &str) -> Self {
        let wildcard = WILDCARD.to_string();

        if starts_with(mask, &wildcard) {
            return Mask::EndsWith(strip_prefix(mask, &wildcard).to_string());
        }

        if ends_with(mask, &wildcard) {
            return Mask::StartsWith(strip_suffix(mask, &wildcard).to_string());
        }

        Mask::Exact(mask.to_string())
    }

    /// Check whether a leaf name matches this mask.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Mask::EndsWith(suffix) => ends_with(name, suffix),
            Mask::StartsWith(prefix) => starts_with(name, prefix),
            Mask::Exact(exact) => name == exact,
        }
    }

    /**
    Keep the entries whose leaf name matches this mask.

    The result is an order-preserving subsequence of `entries`.
    */
    pub fn filter(&self, entries: Vec<String>) -> Vec<String> {
        entries
            .into_iter()
            .filter(|entry| self.matches(leaf_name(entry)))
            .collect()
    }
}

impl fmt::Display for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mask::EndsWith(suffix) => write!(f, "{}{}", WILDCARD, suffix),
            Mask::StartsWith(prefix) => write!(f, "{}{}", prefix, WILDCARD),
            Mask::Exact(exact) => write!(f, "{}", exact),
        }
    }
}

impl From<&str> for Mask {
    fn from(mask: &str) -> Self {
        Mask::parse(mask)
    }
}
