use crate::traits::ProjectFs;
use std::fs;
use std::io;
use std::path::Path;

/// `ProjectFs` backed by the real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl ProjectFs for OsFs {
    fn exists(&self, path: &Path) -> bool {
        // symlink_metadata so a dangling symlink still counts and can be cleaned
        path.symlink_metadata().is_ok()
    }

    fn read_text(&self, path: &Path) -> String {
        fs::read(path)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .unwrap_or_default()
    }

    fn remove_recursive(&self, path: &Path) -> io::Result<()> {
        let meta = path.symlink_metadata()?;
        if meta.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_text_of_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(OsFs.read_text(&dir.path().join("pyproject.toml")), "");
    }

    #[test]
    fn removes_files_and_directory_trees() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("uv.lock");
        let tree = dir.path().join(".venv");
        fs::write(&file, "version = 1").unwrap();
        fs::create_dir_all(tree.join("lib/python3.12")).unwrap();
        fs::write(tree.join("pyvenv.cfg"), "home = /usr/bin").unwrap();

        OsFs.remove_recursive(&file).unwrap();
        OsFs.remove_recursive(&tree).unwrap();

        assert!(!OsFs.exists(&file));
        assert!(!OsFs.exists(&tree));
    }

    #[test]
    fn removing_missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(OsFs.remove_recursive(&dir.path().join("nope")).is_err());
    }
}
