//! Custom templates directories.
//!
//! A custom directory mirrors the layout of the built-in templates of a style
//! (`layout.html`, `partial/info.html`, ...). Templates found there replace the
//! built-in ones with the same name; the others keep their built-in version.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// A validated directory of custom templates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatesDir {
    root_dir: PathBuf,
}

impl TemplatesDir {
    /// Validates that `dir` exists and is a directory
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.exists() {
            return Err(Error::InvalidTemplatesDir(format!(
                "the templates directory {} does not exist",
                dir.display()
            )));
        }
        if !dir.is_dir() {
            return Err(Error::InvalidTemplatesDir(format!(
                "the templates path {} is not a directory",
                dir.display()
            )));
        }
        Ok(Self {
            root_dir: dir.to_path_buf(),
        })
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Lists the template files, each with its name relative to the root
    /// directory (always with `/` separators).
    pub fn templates(&self) -> Result<Vec<(PathBuf, String)>> {
        let mut found = Vec::new();
        collect_files(&self.root_dir, &self.root_dir, &mut found)?;
        found.sort_by(|a, b| a.1.cmp(&b.1));
        Ok(found)
    }
}

fn collect_files(root: &Path, dir: &Path, found: &mut Vec<(PathBuf, String)>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_files(root, &path, found)?;
            continue;
        }
        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        found.push((path, name));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_missing_directory() {
        let dir = tempdir().unwrap();
        let error = TemplatesDir::new(dir.path().join("nope")).unwrap_err();
        assert!(matches!(error, Error::InvalidTemplatesDir(_)));
        assert!(error.to_string().contains("does not exist"));
    }

    #[test]
    fn test_file_is_not_a_directory() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("layout.html");
        fs::write(&file, "").unwrap();
        let error = TemplatesDir::new(&file).unwrap_err();
        assert!(error.to_string().contains("is not a directory"));
    }

    #[test]
    fn test_templates_are_listed_with_relative_names() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("partial")).unwrap();
        fs::write(dir.path().join("layout.html"), "layout").unwrap();
        fs::write(dir.path().join("partial").join("info.html"), "info").unwrap();

        let templates = TemplatesDir::new(dir.path()).unwrap().templates().unwrap();
        let names: Vec<&str> = templates.iter().map(|(_, name)| name.as_str()).collect();
        assert_eq!(names, vec!["layout.html", "partial/info.html"]);
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempdir().unwrap();
        let templates = TemplatesDir::new(dir.path()).unwrap().templates().unwrap();
        assert!(templates.is_empty());
    }
}
