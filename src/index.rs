use crate::fsutils::join_key;
use crate::loader::load_ignore_file;
use crate::matcher::{MatcherError, PatternMatcher};
use camino::Utf8Path;
use log::debug;
use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct IgnoreIndex {
    files: HashMap<String, Vec<PatternMatcher>>,
}

impl IgnoreIndex {
    pub fn register(&mut self, key: &str, path: &Utf8Path) -> Result<bool, MatcherError> {
        let Some(matcher) = load_ignore_file(path)? else {
            return Ok(false);
        };
        debug!("registered {path} at {key} ({} rules)", matcher.len());
        self.push(key, matcher);
        Ok(true)
    }

    pub fn push(&mut self, key: &str, matcher: PatternMatcher) {
        self.files.entry(key.to_string()).or_default().push(matcher);
    }

    pub fn matchers(&self, key: &str) -> &[PatternMatcher] {
        self.files.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.files.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Directories are consulted shallowest first, each seeing only the part
    /// of the path below it. The first one whose rules ignore that remainder
    /// decides, so a `!pattern` in a nested file never re-includes what an
    /// ancestor ignored.
    pub fn matches(&self, parts: &[&str], is_dir: bool) -> bool {
        (0..=parts.len()).any(|i| {
            let Some(matchers) = self.files.get(&join_key(&parts[..i])) else {
                return false;
            };
            let suffix = parts[i..].join("/");
            matchers.iter().any(|m| m.is_ignored(&suffix, is_dir))
        })
    }
}
