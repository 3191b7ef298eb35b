//! OS-backed filesystem adapter.

use std::fs;
use std::path::{Path, PathBuf};

use super::{is_drive_letter, FileSystem};

/// Adapter over `std::fs`.
///
/// Enumeration failures (access denied, a directory vanishing mid-walk,
/// descending into a path that turned out to be a file) are logged and
/// reported as an empty listing, so one unreadable subtree cannot abort an
/// otherwise successful resolution.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }

    fn read_children(&self, path: &str, directories_only: bool) -> Vec<String> {
        // A bare drive designator enumerates the drive's own parent unless
        // the separator is appended first.
        let root = if is_drive_letter(path) {
            let mut fixed = path.to_string();
            fixed.push(std::path::MAIN_SEPARATOR);
            fixed
        } else {
            path.to_string()
        };

        let reader = match fs::read_dir(&root) {
            Ok(reader) => reader,
            Err(error) => {
                log::debug!("cannot enumerate {root}: {error}");
                return Vec::new();
            }
        };

        reader
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                if !directories_only {
                    return true;
                }
                entry
                    .file_type()
                    .map(|file_type| file_type.is_dir())
                    .unwrap_or(false)
            })
            .map(|entry| entry.path().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
    }
}

impl FileSystem for RealFileSystem {
    fn subdirectories(&self, path: &str) -> Vec<String> {
        self.read_children(path, true)
    }

    fn entries(&self, path: &str) -> Vec<String> {
        self.read_children(path, false)
    }

    fn parent(&self, path: &str) -> Option<String> {
        Path::new(path)
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(|parent| parent.to_string_lossy().into_owned())
    }

    fn leaf_name(&self, path: &str) -> Option<String> {
        if is_drive_letter(path) {
            return Some(path.to_string());
        }
        Path::new(path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
    }

    fn join(&self, parts: &[&str]) -> String {
        let mut joined = PathBuf::new();
        for part in parts {
            joined.push(part);
        }
        joined.to_string_lossy().into_owned()
    }

    fn file_exists(&self, path: &str) -> bool {
        Path::new(path).is_file()
    }

    fn directory_exists(&self, path: &str) -> bool {
        Path::new(path).is_dir()
    }

    fn separator(&self) -> char {
        std::path::MAIN_SEPARATOR
    }

    fn current_directory(&self) -> String {
        std::env::current_dir()
            .map(|path| path.to_string_lossy().into_owned())
            .unwrap_or_else(|_| ".".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::TempDir;

    #[test]
    fn subdirectories_skips_files() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        File::create(temp.path().join("file.txt")).unwrap();

        let real = RealFileSystem::new();
        let root = temp.path().to_string_lossy().into_owned();

        let subdirectories = real.subdirectories(&root);
        assert_eq!(subdirectories.len(), 1);
        assert!(subdirectories[0].ends_with("sub"));

        let entries = real.entries(&root);
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn missing_directory_enumerates_empty() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("gone").to_string_lossy().into_owned();

        let real = RealFileSystem::new();
        assert!(real.subdirectories(&missing).is_empty());
        assert!(real.entries(&missing).is_empty());
    }

    #[test]
    fn parent_and_leaf_round_trip() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();

        let real = RealFileSystem::new();
        let child = temp.path().join("sub").to_string_lossy().into_owned();

        assert_eq!(real.leaf_name(&child).unwrap(), "sub");
        assert_eq!(
            real.parent(&child).unwrap(),
            temp.path().to_string_lossy().into_owned()
        );
    }

    #[test]
    fn existence_checks() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        File::create(temp.path().join("file.txt")).unwrap();

        let real = RealFileSystem::new();
        let root = temp.path().to_string_lossy().into_owned();

        let file = real.join(&[&root, "file.txt"]);
        let sub = real.join(&[&root, "sub"]);

        assert!(real.file_exists(&file));
        assert!(!real.directory_exists(&file));
        assert!(real.directory_exists(&sub));
        assert!(real.entry_exists(&file));
        assert!(real.entry_exists(&sub));
        assert!(!real.entry_exists(&real.join(&[&root, "nope"])));
    }
}
