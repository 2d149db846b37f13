//! Document discovery by filesystem walking.
//!
//! This module separates the discovery phase (finding files) from the
//! reconciliation phase (matching against the declaration). The Scanner
//! only identifies markdown documents and derives their slugs; no file
//! content is read at this stage.

use std::fs;
use std::path::{Path, PathBuf};

use crate::generator::GenerateError;

/// Reference to one discovered markdown document.
///
/// Slugs are derived from the on-disk layout: the parent directory name is
/// the category slug and the file stem is the article slug, both
/// case-folded to lowercase.
#[derive(Debug, Clone)]
pub(crate) struct DocumentRef {
    /// Category slug (lowercased directory name).
    pub category_slug: String,
    /// Article slug (lowercased file stem).
    pub article_slug: String,
    /// Absolute path for reading.
    pub path: PathBuf,
    /// Path relative to the content root, for diagnostics and artifacts.
    pub rel_path: PathBuf,
}

/// Discovers document references by walking the content root.
///
/// The corpus layout is one directory level per category; files directly
/// at the content root or in deeper directories are outside the indexed
/// corpus and are skipped with a debug log.
pub(crate) struct Scanner {
    content_root: PathBuf,
}

impl Scanner {
    pub(crate) fn new(content_root: PathBuf) -> Self {
        Self { content_root }
    }

    /// Scan the content root and return document references.
    ///
    /// Results are sorted by `(category_slug, article_slug)` so generation
    /// order (and therefore diagnostics) is deterministic regardless of
    /// directory iteration order.
    pub(crate) fn scan(&self) -> Result<Vec<DocumentRef>, GenerateError> {
        if !self.content_root.is_dir() {
            return Err(GenerateError::ContentRootNotFound(self.content_root.clone()));
        }

        let mut refs = Vec::new();
        for entry in read_dir_entries(&self.content_root)? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }

            let path = entry.path();
            if path.is_dir() {
                self.scan_category(&path, &name.to_lowercase(), &mut refs)?;
            } else {
                tracing::debug!(path = %path.display(), "Ignoring file outside category directories");
            }
        }

        refs.sort_by(|a, b| {
            (a.category_slug.as_str(), a.article_slug.as_str())
                .cmp(&(b.category_slug.as_str(), b.article_slug.as_str()))
        });
        Ok(refs)
    }

    /// Collect the markdown documents of one category directory.
    fn scan_category(
        &self,
        dir: &Path,
        category_slug: &str,
        refs: &mut Vec<DocumentRef>,
    ) -> Result<(), GenerateError> {
        for entry in read_dir_entries(dir)? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }

            let path = entry.path();
            if path.is_dir() {
                tracing::debug!(path = %path.display(), "Ignoring nested directory");
                continue;
            }
            if !path
                .extension()
                .is_some_and(|e| e.eq_ignore_ascii_case("md"))
            {
                continue;
            }

            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_lowercase())
                .unwrap_or_default();
            let rel_path = path
                .strip_prefix(&self.content_root)
                .unwrap_or(&path)
                .to_path_buf();

            refs.push(DocumentRef {
                category_slug: category_slug.to_owned(),
                article_slug: stem,
                path,
                rel_path,
            });
        }
        Ok(())
    }
}

/// Read a directory, mapping I/O failures to [`GenerateError::Io`].
fn read_dir_entries(dir: &Path) -> Result<Vec<fs::DirEntry>, GenerateError> {
    let entries = fs::read_dir(dir).map_err(|source| GenerateError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    entries
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| GenerateError::Io {
            path: dir.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    #[test]
    fn test_scan_finds_documents() {
        let temp_dir = create_test_dir();
        let guides = temp_dir.path().join("guides");
        fs::create_dir(&guides).unwrap();
        fs::write(guides.join("install.md"), "---\ntitle: Install\n---\n").unwrap();
        fs::write(guides.join("setup.md"), "---\ntitle: Setup\n---\n").unwrap();

        let refs = Scanner::new(temp_dir.path().to_path_buf()).scan().unwrap();

        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].category_slug, "guides");
        assert_eq!(refs[0].article_slug, "install");
        assert_eq!(refs[0].rel_path, PathBuf::from("guides/install.md"));
    }

    #[test]
    fn test_scan_case_folds_slugs() {
        let temp_dir = create_test_dir();
        let guides = temp_dir.path().join("Guides");
        fs::create_dir(&guides).unwrap();
        fs::write(guides.join("Install.MD"), "").unwrap();

        let refs = Scanner::new(temp_dir.path().to_path_buf()).scan().unwrap();

        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].category_slug, "guides");
        assert_eq!(refs[0].article_slug, "install");
    }

    #[test]
    fn test_scan_sorted_output() {
        let temp_dir = create_test_dir();
        for (dir, file) in [("zeta", "b"), ("zeta", "a"), ("alpha", "z")] {
            let dir_path = temp_dir.path().join(dir);
            fs::create_dir_all(&dir_path).unwrap();
            fs::write(dir_path.join(format!("{file}.md")), "").unwrap();
        }

        let refs = Scanner::new(temp_dir.path().to_path_buf()).scan().unwrap();

        let slugs: Vec<_> = refs
            .iter()
            .map(|r| format!("{}/{}", r.category_slug, r.article_slug))
            .collect();
        assert_eq!(slugs, ["alpha/z", "zeta/a", "zeta/b"]);
    }

    #[test]
    fn test_scan_skips_hidden_entries() {
        let temp_dir = create_test_dir();
        let hidden_dir = temp_dir.path().join(".git");
        fs::create_dir(&hidden_dir).unwrap();
        fs::write(hidden_dir.join("config.md"), "").unwrap();
        let guides = temp_dir.path().join("guides");
        fs::create_dir(&guides).unwrap();
        fs::write(guides.join(".draft.md"), "").unwrap();
        fs::write(guides.join("visible.md"), "").unwrap();

        let refs = Scanner::new(temp_dir.path().to_path_buf()).scan().unwrap();

        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].article_slug, "visible");
    }

    #[test]
    fn test_scan_skips_non_markdown_and_root_files() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("README.md"), "").unwrap();
        let guides = temp_dir.path().join("guides");
        fs::create_dir(&guides).unwrap();
        fs::write(guides.join("diagram.svg"), "").unwrap();
        fs::write(guides.join("install.md"), "").unwrap();

        let refs = Scanner::new(temp_dir.path().to_path_buf()).scan().unwrap();

        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].article_slug, "install");
    }

    #[test]
    fn test_scan_ignores_nested_directories() {
        let temp_dir = create_test_dir();
        let nested = temp_dir.path().join("guides/advanced");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("deep.md"), "").unwrap();
        fs::write(temp_dir.path().join("guides/install.md"), "").unwrap();

        let refs = Scanner::new(temp_dir.path().to_path_buf()).scan().unwrap();

        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].article_slug, "install");
    }

    #[test]
    fn test_scan_missing_root_errors() {
        let temp_dir = create_test_dir();

        let err = Scanner::new(temp_dir.path().join("missing"))
            .scan()
            .unwrap_err();

        assert!(matches!(err, GenerateError::ContentRootNotFound(_)));
    }

    #[test]
    fn test_scan_empty_root() {
        let temp_dir = create_test_dir();

        let refs = Scanner::new(temp_dir.path().to_path_buf()).scan().unwrap();

        assert!(refs.is_empty());
    }
}
