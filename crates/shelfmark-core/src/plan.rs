//! Pure relocation planning: from a stored location URI, a resolved name and
//! a folder, compute where a file should live and the URI to store for it.
//!
//! No I/O happens here; the relocator executes plans against the filesystem.

use crate::error::{Result, ShelfmarkError};
use std::path::{Path, PathBuf};

const FILE_SCHEME: &str = "file://";

/// The computed old/new path and URI pair for one file.
///
/// Ephemeral: produced per file record during a single pass and discarded
/// after execution, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocationPlan {
    pub old_path: PathBuf,
    pub old_location_uri: String,
    pub new_directory: PathBuf,
    pub new_path: PathBuf,
    pub new_location_uri: String,
}

/// Decode a stored `file://` location URI into an on-disk path.
pub fn decode_location_uri(uri: &str) -> Result<PathBuf> {
    let encoded = uri
        .strip_prefix(FILE_SCHEME)
        .ok_or_else(|| ShelfmarkError::InvalidLocationUri {
            uri: uri.to_string(),
            reason: "missing file:// scheme".to_string(),
        })?;

    let decoded = urlencoding::decode(encoded).map_err(|e| ShelfmarkError::InvalidLocationUri {
        uri: uri.to_string(),
        reason: format!("invalid percent-encoding: {}", e),
    })?;

    let path = ascii_lossy(&decoded);
    if path.is_empty() {
        return Err(ShelfmarkError::InvalidLocationUri {
            uri: uri.to_string(),
            reason: "empty path".to_string(),
        });
    }

    Ok(PathBuf::from(path))
}

/// Encode an on-disk path as a `file://` location URI.
///
/// Each path segment is percent-encoded individually so separators survive.
pub fn encode_location_uri(path: &Path) -> String {
    let path = ascii_lossy(&path.to_string_lossy());
    let encoded = path
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/");

    format!("{}{}", FILE_SCHEME, encoded)
}

/// Reduce a string to its ASCII characters, dropping the rest.
///
/// Lossy on purpose: the stored URIs and target paths are kept ASCII-safe,
/// matching the manager's own handling of its library tree.
fn ascii_lossy(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii()).collect()
}

/// Compute the relocation plan for one file.
///
/// Identical inputs always produce an identical plan, which is what makes
/// re-running the organizer converge. The failure modes are an undecodable
/// stored URI and, when absolutizing relative paths, an unreadable working
/// directory.
pub fn plan(
    old_location_uri: &str,
    resolved_name: &str,
    folder_name: &str,
    library_root: &Path,
) -> Result<RelocationPlan> {
    let old_path = decode_location_uri(old_location_uri)?;
    let old_path = std::path::absolute(&old_path)
        .map_err(|e| ShelfmarkError::io_with_path(e, old_path.clone()))?;

    let new_directory = library_root.join(ascii_lossy(folder_name));
    let new_directory = std::path::absolute(&new_directory)
        .map_err(|e| ShelfmarkError::io_with_path(e, new_directory.clone()))?;

    let new_path = new_directory.join(format!("{}.pdf", resolved_name));
    let new_location_uri = encode_location_uri(&new_path);

    Ok(RelocationPlan {
        old_path,
        old_location_uri: old_location_uri.to_string(),
        new_directory,
        new_path,
        new_location_uri,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_location_uri() {
        let path = decode_location_uri("file:///home/user/papers/My%20Paper.pdf").unwrap();
        assert_eq!(path, PathBuf::from("/home/user/papers/My Paper.pdf"));
    }

    #[test]
    fn test_decode_rejects_other_schemes() {
        assert!(matches!(
            decode_location_uri("http://example.com/x.pdf"),
            Err(ShelfmarkError::InvalidLocationUri { .. })
        ));
        assert!(matches!(
            decode_location_uri("/home/user/x.pdf"),
            Err(ShelfmarkError::InvalidLocationUri { .. })
        ));
    }

    #[test]
    fn test_decode_rejects_empty_path() {
        assert!(matches!(
            decode_location_uri("file://"),
            Err(ShelfmarkError::InvalidLocationUri { .. })
        ));
    }

    #[test]
    fn test_encode_location_uri() {
        let uri = encode_location_uri(Path::new("/library/ACM SIGCOMM/Paper_1.pdf"));
        assert_eq!(uri, "file:///library/ACM%20SIGCOMM/Paper_1.pdf");
    }

    #[test]
    fn test_uri_round_trip() {
        let original = "file:///home/user/Unsorted/OBrien_2020_ACM_SIGCOMM_A_Study_Part_2.pdf";
        let path = decode_location_uri(original).unwrap();
        assert_eq!(encode_location_uri(&path), original);

        let spaced = "file:///home/user/My%20Papers/some%20file.pdf";
        let path = decode_location_uri(spaced).unwrap();
        assert_eq!(encode_location_uri(&path), spaced);
    }

    #[test]
    fn test_encode_drops_non_ascii() {
        let uri = encode_location_uri(Path::new("/library/Caff\u{e8}/paper.pdf"));
        assert_eq!(uri, "file:///library/Caff/paper.pdf");
    }

    #[test]
    fn test_plan_layout() {
        let plan = plan(
            "file:///downloads/old%20name.pdf",
            "Smith_2019_Nature_On_Things",
            "Networking",
            Path::new("/library"),
        )
        .unwrap();

        assert_eq!(plan.old_path, PathBuf::from("/downloads/old name.pdf"));
        assert_eq!(plan.new_directory, PathBuf::from("/library/Networking"));
        assert_eq!(
            plan.new_path,
            PathBuf::from("/library/Networking/Smith_2019_Nature_On_Things.pdf")
        );
        assert_eq!(
            plan.new_location_uri,
            "file:///library/Networking/Smith_2019_Nature_On_Things.pdf"
        );
        assert_eq!(plan.old_location_uri, "file:///downloads/old%20name.pdf");
    }

    #[test]
    fn test_plan_is_deterministic() {
        let a = plan(
            "file:///downloads/x.pdf",
            "Name_Year_PUB_Title",
            "Unsorted",
            Path::new("/library"),
        )
        .unwrap();
        let b = plan(
            "file:///downloads/x.pdf",
            "Name_Year_PUB_Title",
            "Unsorted",
            Path::new("/library"),
        )
        .unwrap();
        assert_eq!(a, b);
    }
}
