use camino::{Utf8Path, Utf8PathBuf};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum MatcherError {
    #[error("invalid pattern at {path}:{line}: {source}")]
    Pattern {
        path: Utf8PathBuf,
        line: usize,
        #[source]
        source: ignore::Error,
    },
    #[error("failed to compile {path}: {source}")]
    Build {
        path: Utf8PathBuf,
        #[source]
        source: ignore::Error,
    },
}

#[derive(Debug, Clone)]
pub struct PatternMatcher {
    inner: Gitignore,
}

impl PatternMatcher {
    pub fn parse(origin: &Utf8Path, contents: &str) -> Result<Self, MatcherError> {
        // "." disables root stripping, every query is already relative.
        let mut builder = GitignoreBuilder::new(".");
        let contents = contents.strip_prefix('\u{feff}').unwrap_or(contents);
        for (idx, line) in contents.lines().enumerate() {
            builder
                .add_line(Some(origin.as_std_path().to_path_buf()), line)
                .map_err(|source| MatcherError::Pattern {
                    path: origin.to_path_buf(),
                    line: idx + 1,
                    source,
                })?;
        }
        let inner = builder.build().map_err(|source| MatcherError::Build {
            path: origin.to_path_buf(),
            source,
        })?;
        Ok(Self { inner })
    }

    /// A path whose parent directory is excluded stays excluded, even when a
    /// later `!pattern` names it.
    pub fn is_ignored(&self, suffix: &str, is_dir: bool) -> bool {
        if suffix.is_empty() {
            return false;
        }
        let parent_ignored = suffix
            .match_indices('/')
            .any(|(idx, _)| self.inner.matched(&suffix[..idx], true).is_ignore());
        parent_ignored || self.inner.matched(suffix, is_dir).is_ignore()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(contents: &str) -> PatternMatcher {
        PatternMatcher::parse(Utf8Path::new(".gitignore"), contents).unwrap()
    }

    #[test]
    fn skips_blank_lines_and_comments() {
        let m = matcher("\n# build output\n\n*.o\n");
        assert_eq!(m.len(), 1);
        assert!(m.is_ignored("main.o", false));
        assert!(!m.is_ignored("# build output", false));
    }

    #[test]
    fn unanchored_pattern_matches_at_any_depth() {
        let m = matcher("root.sh\n");
        assert!(m.is_ignored("root.sh", false));
        assert!(m.is_ignored("a/b/root.sh", false));
        assert!(!m.is_ignored("root.shx", false));
    }

    #[test]
    fn slash_anchors_pattern() {
        let m = matcher("/top.txt\nsub/deep.txt\n");
        assert!(m.is_ignored("top.txt", false));
        assert!(!m.is_ignored("x/top.txt", false));
        assert!(m.is_ignored("sub/deep.txt", false));
        assert!(!m.is_ignored("x/sub/deep.txt", false));
    }

    #[test]
    fn trailing_slash_only_matches_directories() {
        let m = matcher("root/\n");
        assert!(m.is_ignored("root", true));
        assert!(!m.is_ignored("root", false));
        assert!(m.is_ignored("root/foo", false));
        assert!(m.is_ignored("x/root/foo", false));
    }

    #[test]
    fn negation_within_file() {
        let m = matcher("*.log\n!keep.log\n");
        assert!(m.is_ignored("debug.log", false));
        assert!(!m.is_ignored("keep.log", false));
    }

    #[test]
    fn later_rule_wins() {
        let m = matcher("!keep.log\n*.log\n");
        assert!(m.is_ignored("keep.log", false));
    }

    #[test]
    fn negation_cannot_reinclude_inside_ignored_directory() {
        let m = matcher("build/\n!build/keep\n");
        assert!(m.is_ignored("build", true));
        assert!(m.is_ignored("build/keep", false));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let m = matcher("Makefile\n");
        assert!(m.is_ignored("Makefile", false));
        assert!(!m.is_ignored("makefile", false));
    }

    #[test]
    fn empty_suffix_is_never_ignored() {
        assert!(!matcher("*\n").is_ignored("", true));
    }

    #[test]
    fn byte_order_mark_is_stripped() {
        let m = matcher("\u{feff}secret\n");
        assert!(m.is_ignored("secret", false));
    }

    #[test]
    fn malformed_pattern_reports_line() {
        let err = PatternMatcher::parse(Utf8Path::new("a/.gitignore"), "ok\n[z-a]\n").unwrap_err();
        match err {
            MatcherError::Pattern { path, line, .. } => {
                assert_eq!(path, Utf8PathBuf::from("a/.gitignore"));
                assert_eq!(line, 2);
            }
            MatcherError::Build { .. } => panic!("expected pattern error"),
        }
    }
}
