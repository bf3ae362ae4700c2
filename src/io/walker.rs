use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

pub const DEFAULT_EXTENSIONS: &[&str] = &["py"];

/// Environment and build-artifact directory markers.
pub const DEFAULT_SKIP_DIR_KEYWORDS: &[&str] = &[
    "venv",
    ".venv",
    "__pycache__",
    ".tox",
    "site-packages",
    "dist-packages",
];

/// Base-name markers of test modules.
pub const DEFAULT_SKIP_FILE_KEYWORDS: &[&str] = &["test", "tests"];

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// Recursive source discovery with coarse substring exclusion.
///
/// Files come back in lexicographic order of their path components, so two
/// scans of the same tree always see files in the same order.
pub struct FileWalker {
    root: PathBuf,
    extensions: Vec<String>,
    skip_dir_keywords: Vec<String>,
    skip_file_keywords: Vec<String>,
}

impl FileWalker {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            extensions: owned(DEFAULT_EXTENSIONS),
            skip_dir_keywords: owned(DEFAULT_SKIP_DIR_KEYWORDS),
            skip_file_keywords: owned(DEFAULT_SKIP_FILE_KEYWORDS),
        }
    }

    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.trim_start_matches('.').to_string())
            .collect();
        self
    }

    pub fn with_skip_dir_keywords(mut self, keywords: Vec<String>) -> Self {
        self.skip_dir_keywords = keywords.into_iter().map(|k| k.to_lowercase()).collect();
        self
    }

    pub fn with_skip_file_keywords(mut self, keywords: Vec<String>) -> Self {
        self.skip_file_keywords = keywords.into_iter().map(|k| k.to_lowercase()).collect();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn walk(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();
        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Skipping unreadable entry under {}: {}", self.root.display(), e);
                    continue;
                }
            };
            let path = entry.path();

            if entry.file_type().is_file() && self.should_process(path) {
                files.push(path.to_path_buf());
            }
        }

        files
    }

    fn should_process(&self, path: &Path) -> bool {
        let has_extension = path
            .extension()
            .map(|ext| ext.to_string_lossy())
            .is_some_and(|ext| self.extensions.iter().any(|e| *e == ext));
        has_extension && !self.is_excluded(path)
    }

    /// Substring exclusion on the root-relative path and the base name.
    /// Directories above the root never take part, so a checkout living
    /// under e.g. `~/venv/` is still scanned.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let rel = relative_slash_path(&self.root, path).to_lowercase();
        if self.skip_dir_keywords.iter().any(|k| rel.contains(k.as_str())) {
            return true;
        }
        let base = path
            .file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        self.skip_file_keywords
            .iter()
            .any(|k| base.contains(k.as_str()))
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

/// `path` relative to `root`, with `/` separators.
pub fn relative_slash_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

pub fn find_source_files(root: &Path) -> Vec<PathBuf> {
    FileWalker::new(root.to_path_buf()).walk()
}
