use crate::config::ViewOptions;
use crate::fsutils::{ROOT_KEY, ancestor_keys, components, key_to_path, normalize};
use crate::ignorelist::IgnoreList;
use crate::index::IgnoreIndex;
use crate::matcher::{MatcherError, PatternMatcher};
use crate::repo::Repo;
use crate::walk::discover_ignore_files;
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ViewError {
    #[error("cannot read {path}: {source}")]
    Target {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("path is not valid UTF-8: {0}")]
    NotUtf8(String),
    #[error("failed to locate repository root: {0}")]
    Discover(#[source] io::Error),
    #[error(transparent)]
    Matcher(#[from] MatcherError),
}

#[derive(Debug, Clone)]
pub struct View {
    root: Utf8PathBuf,
    target: Utf8PathBuf,
    ignore_file: String,
    index: IgnoreIndex,
}

impl View {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, ViewError> {
        Self::with_options(path, &ViewOptions::default())
    }

    pub fn with_options(path: impl AsRef<Path>, options: &ViewOptions) -> Result<Self, ViewError> {
        let path = path.as_ref();
        let path = Utf8Path::from_path(path)
            .ok_or_else(|| ViewError::NotUtf8(path.display().to_string()))?;
        let abspath = camino::absolute_utf8(path)
            .map(|abspath| normalize(&abspath))
            .map_err(|source| ViewError::Target {
                path: path.to_path_buf(),
                source,
            })?;
        fs::read_dir(&abspath).map_err(|source| ViewError::Target {
            path: abspath.clone(),
            source,
        })?;

        let (repo, target) =
            Repo::discover(&abspath, &options.marker_dir).map_err(ViewError::Discover)?;

        let mut index = IgnoreIndex::default();
        index.register(ROOT_KEY, &repo.exclude_file(&options.exclude_file))?;
        for key in ancestor_keys(&target) {
            let file = key_to_path(&repo.root, &key).join(&options.ignore_file);
            index.register(&key, &file)?;
        }
        let index = discover_ignore_files(index, &repo.root, &abspath, options)?;
        debug!(
            "view of {} at {target}: rules in {} directories",
            repo.root,
            index.keys().len()
        );

        Ok(Self {
            root: repo.root,
            target,
            ignore_file: options.ignore_file.clone(),
            index,
        })
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn target(&self) -> &Utf8Path {
        &self.target
    }

    pub fn rule_dirs(&self) -> Vec<&str> {
        self.index.keys()
    }

    pub fn matchers(&self, dir: &str) -> &[PatternMatcher] {
        self.index.matchers(dir)
    }

    /// # Panics
    ///
    /// If `path` is absolute; it must be relative to [`View::target`].
    pub fn ignore(&self, path: impl AsRef<Utf8Path>) -> bool {
        self.ignore_file(path)
    }

    pub fn ignore_file(&self, path: impl AsRef<Utf8Path>) -> bool {
        self.matches(path.as_ref(), false)
    }

    pub fn ignore_directory(&self, path: impl AsRef<Utf8Path>) -> bool {
        self.matches(path.as_ref(), true)
    }

    fn matches(&self, path: &Utf8Path, is_dir: bool) -> bool {
        assert!(
            !path.is_absolute() && !path.has_root(),
            "expected a path relative to {}, got {path}",
            self.target
        );
        let relpath = self.target.join(path);
        self.index.matches(&components(&relpath), is_dir)
    }

    pub fn ensure_ignored(&self, entry: impl AsRef<Utf8Path>) -> io::Result<bool> {
        let entry = entry.as_ref();
        let parts = components(entry);
        if parts.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("nothing to ignore in {entry:?}"),
            ));
        }
        if self.ignore_file(entry) || self.ignore_directory(entry) {
            return Ok(false);
        }
        let pattern = format!("/{}", parts.join("/"));
        let file = self.root.join(&self.target).join(&self.ignore_file);
        debug!("adding {pattern} to {file}");
        IgnoreList {
            ignore: vec![pattern],
        }
        .write(file.as_std_path())
    }
}
