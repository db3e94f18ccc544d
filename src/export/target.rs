//! Mapping keys onto the export directory tree
//!
//! `/a/b/c` becomes `<root>/a/b/c.<ext>`. The mapping is a pure function of
//! the key and never maps two keys to the same file: keys whose segments the
//! filesystem would normalise away (`//`, `.`, `..`) and keys that are not
//! UTF-8 are rejected rather than folded onto another key's file.
//!
//! `/a/b` and `/a/b.<ext>/c` still want a file and a directory at the same
//! path; whichever record is exported second fails for that record only.

use std::path::{Component, Path, PathBuf};

use super::errors::{ExportError, ExportResult};

/// Where a single record is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTarget {
    file_path: PathBuf,
    directory: PathBuf,
}

impl ExportTarget {
    /// Derive the target for `key` under `root`.
    ///
    /// Keys that would resolve outside `root`, or onto the same file as a
    /// different key, are rejected.
    pub fn derive(root: &Path, key: &[u8], extension: &str) -> ExportResult<Self> {
        let invalid = |reason| ExportError::InvalidKey {
            key: String::from_utf8_lossy(key).into_owned(),
            reason,
        };

        let key = std::str::from_utf8(key).map_err(|_| invalid("key is not valid UTF-8"))?;

        let relative = key.strip_prefix('/').unwrap_or(key);
        if relative.is_empty() {
            return Err(invalid("key has no path below the root"));
        }

        for segment in relative.split('/') {
            match segment {
                "" => return Err(invalid("key contains an empty path segment")),
                "." => return Err(invalid("key contains a `.` path segment")),
                ".." => return Err(invalid("path escapes the export root")),
                _ => {}
            }
        }

        let file_name = format!("{}.{}", relative, extension);
        let relative_path = Path::new(&file_name);

        for component in relative_path.components() {
            if !matches!(component, Component::Normal(_)) {
                return Err(invalid("path escapes the export root"));
            }
        }

        let file_path = root.join(relative_path);
        let directory = file_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| root.to_path_buf());

        Ok(Self {
            file_path,
            directory,
        })
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Parent directory of the file; created before the file is opened.
    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_leading_separator_and_appends_extension() {
        let target = ExportTarget::derive(Path::new("out"), b"/ns/config", "yaml").unwrap();
        assert_eq!(target.file_path(), Path::new("out/ns/config.yaml"));
        assert_eq!(target.directory(), Path::new("out/ns"));
    }

    #[test]
    fn test_key_without_leading_separator() {
        let target = ExportTarget::derive(Path::new("out"), b"top", "yaml").unwrap();
        assert_eq!(target.file_path(), Path::new("out/top.yaml"));
        assert_eq!(target.directory(), Path::new("out"));
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let a = ExportTarget::derive(Path::new("."), b"/kubernetes.io/pods/ns/web", "yaml").unwrap();
        let b = ExportTarget::derive(Path::new("."), b"/kubernetes.io/pods/ns/web", "yaml").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_parent_components() {
        let err = ExportTarget::derive(Path::new("out"), b"/../../etc/passwd", "yaml").unwrap_err();
        assert!(matches!(err, ExportError::InvalidKey { .. }));
    }

    #[test]
    fn test_rejects_absolute_remainder() {
        let err = ExportTarget::derive(Path::new("out"), b"//etc/passwd", "yaml").unwrap_err();
        assert!(matches!(err, ExportError::InvalidKey { .. }));
    }

    #[test]
    fn test_rejects_bare_separator() {
        assert!(ExportTarget::derive(Path::new("out"), b"/", "yaml").is_err());
    }

    #[test]
    fn test_extension_append_keeps_keys_apart() {
        let plain = ExportTarget::derive(Path::new("out"), b"/a/b.yaml", "yaml").unwrap();
        let doubled = ExportTarget::derive(Path::new("out"), b"/a/b", "yaml").unwrap();
        assert_ne!(plain, doubled);
        assert_eq!(plain.file_path(), Path::new("out/a/b.yaml.yaml"));
    }

    #[test]
    fn test_rejects_empty_segments() {
        for key in [&b"/a//b"[..], b"/a/b/", b"a//b"] {
            let err = ExportTarget::derive(Path::new("out"), key, "yaml").unwrap_err();
            assert!(matches!(err, ExportError::InvalidKey { .. }), "accepted {:?}", key);
        }
    }

    #[test]
    fn test_rejects_current_directory_segments() {
        for key in [&b"/a/./b"[..], b"/./a", b"/a/."] {
            let err = ExportTarget::derive(Path::new("out"), key, "yaml").unwrap_err();
            assert!(matches!(err, ExportError::InvalidKey { .. }), "accepted {:?}", key);
        }
    }

    #[test]
    fn test_rejects_non_utf8_keys() {
        let err = ExportTarget::derive(Path::new("out"), b"/x\xff", "yaml").unwrap_err();
        match err {
            ExportError::InvalidKey { key, reason } => {
                assert_eq!(key, "/x\u{fffd}");
                assert!(reason.contains("UTF-8"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_dot_inside_a_segment_is_kept() {
        let target = ExportTarget::derive(Path::new("out"), b"/kubernetes.io/..data", "yaml").unwrap();
        assert_eq!(target.file_path(), Path::new("out/kubernetes.io/..data.yaml"));
    }
}
