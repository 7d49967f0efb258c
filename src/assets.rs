//! Static asset mirroring.
//!
//! Copies the assets tree byte-for-byte into the output tree, preserving
//! relative paths and directory structure. Runs independently of the
//! content pipeline.

use crate::error::BuildError;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Recursively mirror `src` into `dst`. A missing `src` is a no-op.
///
/// Returns the number of files copied.
pub fn copy_assets(src: &Path, dst: &Path) -> Result<usize, BuildError> {
    if !src.is_dir() {
        return Ok(0);
    }

    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry.map_err(|err| BuildError::Io(src.to_path_buf(), err.into()))?;
        let relative = entry.path().strip_prefix(src).map_err(|_| {
            BuildError::Io(
                entry.path().to_path_buf(),
                std::io::Error::other("file is not in the assets directory"),
            )
        })?;
        let dest = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest).map_err(|err| BuildError::Io(dest.clone(), err))?;
        } else {
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)
                    .map_err(|err| BuildError::Io(parent.to_path_buf(), err))?;
            }
            fs::copy(entry.path(), &dest).map_err(|err| BuildError::Io(dest.clone(), err))?;
            copied += 1;
        }
    }

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_assets_mirrors_nested_tree() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("assets");
        let dst = dir.path().join("public/assets");

        fs::create_dir_all(src.join("css")).unwrap();
        fs::create_dir_all(src.join("img/icons")).unwrap();
        fs::write(src.join("css/style.css"), "body {}").unwrap();
        fs::write(src.join("img/icons/logo.svg"), "<svg/>").unwrap();

        let copied = copy_assets(&src, &dst).unwrap();
        assert_eq!(copied, 2);
        assert_eq!(
            fs::read_to_string(dst.join("css/style.css")).unwrap(),
            "body {}"
        );
        assert_eq!(
            fs::read_to_string(dst.join("img/icons/logo.svg")).unwrap(),
            "<svg/>"
        );
    }

    #[test]
    fn test_copy_assets_missing_source_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let copied = copy_assets(&dir.path().join("nope"), &dir.path().join("out")).unwrap();
        assert_eq!(copied, 0);
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_copy_assets_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("assets");
        let dst = dir.path().join("out");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("a.txt"), "x").unwrap();

        assert_eq!(copy_assets(&src, &dst).unwrap(), 1);
        assert_eq!(copy_assets(&src, &dst).unwrap(), 1);
        assert_eq!(fs::read_to_string(dst.join("a.txt")).unwrap(), "x");
    }
}
