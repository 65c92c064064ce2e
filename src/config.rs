/*!
This module contains global constants for minfs.

None of these are configurable at runtime.
*/

/// The only wildcard character understood by [masks](crate::Mask).
pub(crate) const WILDCARD: char = '*';

/// The pseudo-entry that some platforms report for the directory itself.
pub(crate) const SELF_ENTRY: &str = ".";

/// The pseudo-entry that some platforms report for the parent directory.
pub(crate) const PARENT_ENTRY: &str = "..";

/// Forward-style path separator. Preferred when a path contains both styles.
pub(crate) const FORWARD_SEPARATOR: char = '/';

/// Backward-style path separator.
pub(crate) const BACKWARD_SEPARATOR: char = '\\';

/// Returns true if `name` is one of the `.` or `..` pseudo-entries.
pub(crate) fn is_pseudo_entry(name: &str) -> bool {
    name == SELF_ENTRY || name == PARENT_ENTRY
}
