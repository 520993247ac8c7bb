//! Filesystem-safe filename derivation from bibliographic metadata.
//!
//! Turns an (author, year, publication, title) tuple into a deterministic
//! underscore-joined token containing only ASCII letters, digits and `_`.

use regex::Regex;
use std::sync::LazyLock;

/// Regex for runs of characters that separate tokens.
static NON_ALNUM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]+").unwrap());

/// Resolve a filename token from a document's metadata fields.
///
/// # Rules Applied
/// 1. Concatenate author, year, publication, title (in that order),
///    separated by single spaces
/// 2. Drop apostrophes so possessives and names like `O'Brien` stay one
///    token (`OBrien`, not `O_Brien`)
/// 3. Split on runs of non-alphanumeric characters
/// 4. Rejoin the non-empty tokens with underscores
///
/// The result contains only `[A-Za-z0-9_]`, has no leading, trailing or
/// doubled underscores, and is deterministic for identical inputs. Input
/// with no alphanumeric characters at all resolves to the empty string.
///
/// # Examples
///
/// ```
/// use shelfmark_core::naming::resolve_name;
///
/// assert_eq!(
///     resolve_name("O'Brien", "2020", "ACM SIGCOMM", "A Study: Part 2"),
///     "OBrien_2020_ACM_SIGCOMM_A_Study_Part_2"
/// );
/// ```
pub fn resolve_name(contributor: &str, year: &str, publication: &str, title: &str) -> String {
    let combined = format!("{} {} {} {}", contributor, year, publication, title);
    let combined = combined.replace('\'', "");

    NON_ALNUM
        .split(&combined)
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}
