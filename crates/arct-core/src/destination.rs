//! Destination path-shape resolution.
//!
//! A destination hint can name an existing directory, a directory that does not
//! exist yet (spelled with a trailing separator), or a file. Classification is
//! pure: the caller probes the filesystem once and passes the answer in.

use std::path::{Path, PathBuf};

/// How a destination hint is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestinationShape {
    /// The hint is a directory that already exists.
    ExistingDir(PathBuf),
    /// The hint ends with a separator but is not an existing directory.
    DirToCreate(PathBuf),
    /// The hint is a file path; its parent may need creating.
    FilePath(PathBuf),
}

impl DestinationShape {
    /// Classifies `hint`. `hint_is_dir` must say whether `hint` is an existing directory.
    ///
    /// The directory check wins: a hint with a trailing separator that exists as a
    /// regular file is not a directory, so it becomes `DirToCreate` and fails later
    /// when the directory cannot be created.
    pub fn classify(hint: &Path, hint_is_dir: bool) -> Self {
        if hint_is_dir {
            DestinationShape::ExistingDir(hint.to_path_buf())
        } else if ends_with_separator(hint) {
            DestinationShape::DirToCreate(hint.to_path_buf())
        } else {
            DestinationShape::FilePath(hint.to_path_buf())
        }
    }

    /// True when the final path is built from the source's base name.
    pub fn needs_file_name(&self) -> bool {
        !matches!(self, DestinationShape::FilePath(_))
    }

    /// Concrete file path the resource is written to.
    pub fn final_path(&self, file_name: &str) -> PathBuf {
        match self {
            DestinationShape::ExistingDir(dir) | DestinationShape::DirToCreate(dir) => {
                dir.join(file_name)
            }
            DestinationShape::FilePath(path) => path.clone(),
        }
    }

    /// Directory to create (with ancestors) before writing, if any.
    pub fn dir_to_create(&self) -> Option<&Path> {
        match self {
            DestinationShape::ExistingDir(_) => None,
            DestinationShape::DirToCreate(dir) => Some(dir),
            DestinationShape::FilePath(path) => {
                path.parent().filter(|p| !p.as_os_str().is_empty())
            }
        }
    }
}

/// Whether the hint text ends in `/` or the platform separator.
pub fn ends_with_separator(hint: &Path) -> bool {
    let text = hint.as_os_str().to_string_lossy();
    text.ends_with('/') || text.ends_with(std::path::MAIN_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn existing_dir_joins_base_name() {
        let shape = DestinationShape::classify(Path::new("/tmp"), true);
        assert_eq!(shape, DestinationShape::ExistingDir(PathBuf::from("/tmp")));
        assert_eq!(shape.final_path("pants"), PathBuf::from("/tmp/pants"));
        assert_eq!(shape.dir_to_create(), None);
        assert!(shape.needs_file_name());
    }

    #[test]
    fn existing_dir_with_trailing_separator_is_still_existing() {
        let shape = DestinationShape::classify(Path::new("/tmp/"), true);
        assert!(matches!(shape, DestinationShape::ExistingDir(_)));
        assert_eq!(shape.final_path("pants"), PathBuf::from("/tmp/pants"));
    }

    #[test]
    fn trailing_separator_is_dir_to_create() {
        let shape = DestinationShape::classify(Path::new("/srv/static/vendor/"), false);
        assert!(matches!(shape, DestinationShape::DirToCreate(_)));
        assert_eq!(
            shape.final_path("require.js"),
            PathBuf::from("/srv/static/vendor/require.js")
        );
        assert_eq!(shape.dir_to_create(), Some(Path::new("/srv/static/vendor/")));
    }

    #[test]
    fn plain_path_is_file_with_parent_to_create() {
        let shape = DestinationShape::classify(Path::new("/tmp/out/file.bin"), false);
        assert_eq!(
            shape,
            DestinationShape::FilePath(PathBuf::from("/tmp/out/file.bin"))
        );
        assert_eq!(shape.final_path("ignored"), PathBuf::from("/tmp/out/file.bin"));
        assert_eq!(shape.dir_to_create(), Some(Path::new("/tmp/out")));
        assert!(!shape.needs_file_name());
    }

    #[test]
    fn bare_file_name_has_no_parent_to_create() {
        let shape = DestinationShape::classify(Path::new("file.bin"), false);
        assert_eq!(shape.dir_to_create(), None);
    }

    #[test]
    fn existing_file_with_trailing_separator_classifies_as_dir_to_create() {
        // Probing "a/file/" reports "not a directory" for a regular file.
        let shape = DestinationShape::classify(Path::new("/data/file/"), false);
        assert!(matches!(shape, DestinationShape::DirToCreate(_)));
    }

    #[test]
    fn separator_detection() {
        assert!(ends_with_separator(Path::new("out/")));
        assert!(!ends_with_separator(Path::new("out")));
        assert!(!ends_with_separator(Path::new("")));
    }
}
