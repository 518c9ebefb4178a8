//! Resolution of the input argument into a document source.

use std::path::{Path, PathBuf};

use console::style;
use tracing::warn;

/// Where documents are read from.
#[derive(Debug, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
    Directory(PathBuf),
}

/// Resolve `input`.
///
/// A missing file whose parent directory exists resolves to that directory
/// when `fallback_to_parent` is set.
pub fn resolve(input: &Path, fallback_to_parent: bool) -> anyhow::Result<Source> {
    if input == Path::new("-") {
        return Ok(Source::Stdin);
    }
    if input.is_dir() {
        return Ok(Source::Directory(input.to_path_buf()));
    }
    if input.exists() {
        return Ok(Source::File(input.to_path_buf()));
    }

    let parent = input.parent().filter(|p| !p.as_os_str().is_empty());
    match parent {
        Some(dir) if fallback_to_parent && dir.is_dir() => {
            warn!("{} not found, processing directory {}", input.display(), dir.display());
            eprintln!(
                "{} File {} not found. Processing all documents in {}",
                style("!").yellow(),
                input.display(),
                dir.display()
            );
            Ok(Source::Directory(dir.to_path_buf()))
        }
        _ => anyhow::bail!("Path {} does not exist", input.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dash_is_stdin() {
        assert_eq!(resolve(Path::new("-"), true).unwrap(), Source::Stdin);
    }

    #[test]
    fn existing_file_and_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("letter.txt");
        std::fs::write(&file, "Maybank").unwrap();

        assert_eq!(resolve(&file, true).unwrap(), Source::File(file.clone()));
        assert_eq!(
            resolve(dir.path(), true).unwrap(),
            Source::Directory(dir.path().to_path_buf())
        );
    }

    #[test]
    fn missing_file_falls_back_to_parent() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("typo.txt");

        assert_eq!(
            resolve(&missing, true).unwrap(),
            Source::Directory(dir.path().to_path_buf())
        );
        assert!(resolve(&missing, false).is_err());
    }

    #[test]
    fn missing_file_without_parent_is_an_error() {
        assert!(resolve(Path::new("no-such-file.txt"), true).is_err());
        assert!(resolve(Path::new("/no/such/dir/file.txt"), true).is_err());
    }
}
