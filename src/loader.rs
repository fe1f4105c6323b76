use crate::matcher::{MatcherError, PatternMatcher};
use camino::Utf8Path;
use log::trace;
use std::fs;

pub fn load_ignore_file(path: &Utf8Path) -> Result<Option<PatternMatcher>, MatcherError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            trace!("no ignore file at {path}: {e}");
            return Ok(None);
        }
    };
    let contents = String::from_utf8_lossy(&bytes);
    PatternMatcher::parse(path, &contents).map(Some)
}
