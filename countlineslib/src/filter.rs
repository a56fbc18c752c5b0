//! Path exclusion and file-type filtering.
//!
//! Exclusion patterns are plain substrings, not globs: a path is skipped when
//! its full string form contains any pattern anywhere. Matching is
//! case-sensitive and separators are compared as the platform reports them.

use std::ffi::OsStr;
use std::path::Path;

/// Directory names excluded by the CLI and the HTTP API unless asked otherwise.
///
/// The walker itself applies no defaults; callers seed an [`ExclusionSet`]
/// with these through [`ExclusionSet::with_defaults`].
pub const DEFAULT_EXCLUDES: &[&str] = &[
    ".git",
    ".svn",
    ".hg",
    "node_modules",
    "__pycache__",
    ".vs",
    ".vscode",
];

/// File-name suffixes counted as source or text.
pub const TEXT_EXTENSIONS: &[&str] = &[
    ".c", ".cpp", ".cc", ".cxx", ".c++", ".h", ".hpp", ".hh", ".hxx", ".h++", ".java", ".js",
    ".ts", ".jsx", ".tsx", ".py", ".rb", ".php", ".go", ".rs", ".cs", ".vb", ".fs", ".swift",
    ".kt", ".scala", ".clj", ".hs", ".ml", ".r", ".sql", ".html", ".htm", ".xml", ".css",
    ".scss", ".sass", ".less", ".json", ".yaml", ".yml", ".toml", ".ini", ".cfg", ".conf",
    ".txt", ".md", ".rst", ".tex", ".sh", ".bash", ".zsh", ".fish", ".ps1", ".bat", ".cmd",
    ".vim", ".el", ".lua", ".perl", ".pl", ".tcl", ".awk", ".sed", ".m", ".mm", ".f", ".f90",
    ".f95", ".pas", ".ada", ".d", ".dart", ".elm", ".ex", ".exs", ".erl", ".hrl", ".jl", ".nim",
    ".v", ".vhd", ".vhdl", ".sv", ".svh",
];

/// An ordered list of substring exclusion patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    /// Patterns in insertion order
    pub patterns: Vec<String>,
}

impl ExclusionSet {
    /// Create an empty set (nothing is excluded).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set seeded with [`DEFAULT_EXCLUDES`].
    pub fn with_defaults() -> Self {
        Self::new().exclude_many(DEFAULT_EXCLUDES)
    }

    /// Add a pattern.
    ///
    /// Empty patterns are dropped since they would match every path.
    /// Duplicates are kept and are harmless.
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.push(pattern);
        self
    }

    /// Add multiple patterns.
    pub fn exclude_many<S: AsRef<str>>(mut self, patterns: &[S]) -> Self {
        for pattern in patterns {
            self.push(pattern.as_ref());
        }
        self
    }

    /// Add a pattern in place.
    pub fn push(&mut self, pattern: impl Into<String>) {
        let pattern = pattern.into();
        if !pattern.is_empty() {
            self.patterns.push(pattern);
        }
    }

    /// Number of patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the set holds no patterns.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Iterate over the patterns in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(String::as_str)
    }

    /// Check whether a path contains any pattern.
    pub fn is_excluded(&self, path: &Path) -> bool {
        is_excluded(path, &self.patterns)
    }
}

/// Check whether `path` contains any of `patterns` as a substring.
pub fn is_excluded<S: AsRef<str>>(path: &Path, patterns: &[S]) -> bool {
    let path_str = path.to_string_lossy();
    patterns
        .iter()
        .any(|pattern| path_str.contains(pattern.as_ref()))
}

/// Check whether a file name ends in a recognized text extension.
///
/// The extension is everything from the last `.` of the name, compared
/// exactly. Names without a dot never match.
pub fn is_text_file(file_name: &OsStr) -> bool {
    let name = file_name.to_string_lossy();
    match name.rfind('.') {
        Some(idx) => TEXT_EXTENSIONS.contains(&&name[idx..]),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_match() {
        let set = ExclusionSet::new().exclude("build");

        assert!(set.is_excluded(Path::new("project/build/out.c")));
        assert!(set.is_excluded(Path::new("project/prebuild.c")));
        assert!(set.is_excluded(Path::new("project/src/build")));
        assert!(!set.is_excluded(Path::new("project/src/main.c")));
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let set = ExclusionSet::new().exclude("Vendor");

        assert!(set.is_excluded(Path::new("a/Vendor/x.c")));
        assert!(!set.is_excluded(Path::new("a/vendor/x.c")));
    }

    #[test]
    fn test_match_is_not_glob() {
        let set = ExclusionSet::new().exclude("*.c");

        assert!(!set.is_excluded(Path::new("src/main.c")));
        assert!(set.is_excluded(Path::new("src/weird*.c")));
    }

    #[test]
    fn test_any_pattern_matches() {
        let set = ExclusionSet::new().exclude_many(&["node_modules", "dist"]);

        assert!(set.is_excluded(Path::new("web/node_modules/a.js")));
        assert!(set.is_excluded(Path::new("web/dist/a.js")));
        assert!(!set.is_excluded(Path::new("web/src/a.js")));
    }

    #[test]
    fn test_empty_set_excludes_nothing() {
        let set = ExclusionSet::new();
        assert!(set.is_empty());
        assert!(!set.is_excluded(Path::new("anything/.git/config")));
    }

    #[test]
    fn test_empty_pattern_is_dropped() {
        let set = ExclusionSet::new().exclude("");
        assert!(set.is_empty());
        assert!(!set.is_excluded(Path::new("src/main.c")));
    }

    #[test]
    fn test_duplicates_are_harmless() {
        let set = ExclusionSet::new().exclude("tmp").exclude("tmp");
        assert_eq!(set.len(), 2);
        assert!(set.is_excluded(Path::new("a/tmp/b.c")));
    }

    #[test]
    fn test_defaults() {
        let set = ExclusionSet::with_defaults();
        assert_eq!(set.iter().collect::<Vec<_>>(), DEFAULT_EXCLUDES);
        assert!(set.is_excluded(Path::new("repo/.git/config")));
        assert!(set.is_excluded(Path::new("repo/web/node_modules/x.js")));
        assert!(set.is_excluded(Path::new("repo/.vscode/settings.json")));
        assert!(!set.is_excluded(Path::new("repo/src/main.rs")));
    }

    #[test]
    fn test_free_function() {
        assert!(is_excluded(Path::new("a/b/c"), &["b/"]));
        assert!(!is_excluded::<&str>(Path::new("a/b/c"), &[]));
    }

    #[test]
    fn test_text_extensions() {
        for name in ["main.c", "lib.rs", "App.tsx", "notes.md", "Cargo.toml", "x.c++"] {
            assert!(is_text_file(OsStr::new(name)), "{name} should count");
        }
        for name in ["Makefile", "config", "image.png", "main.C", "archive.tar.gz"] {
            assert!(!is_text_file(OsStr::new(name)), "{name} should not count");
        }
    }

    #[test]
    fn test_last_dot_wins() {
        assert!(is_text_file(OsStr::new("bundle.min.js")));
        assert!(!is_text_file(OsStr::new("main.c.bak")));
        assert!(is_text_file(OsStr::new(".md")));
    }

    #[test]
    fn test_extension_set_size() {
        assert_eq!(TEXT_EXTENSIONS.len(), 85);
    }
}
