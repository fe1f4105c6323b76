use crate::config::ViewOptions;
use crate::fsutils::{child_key, to_slash};
use crate::index::IgnoreIndex;
use crate::matcher::MatcherError;
use camino::{Utf8Path, Utf8PathBuf};
use jwalk::{Parallelism, WalkDir};
use log::{debug, trace, warn};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct WalkState {
    index: IgnoreIndex,
    error: Option<MatcherError>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn discover_ignore_files(
    index: IgnoreIndex,
    root: &Utf8Path,
    target: &Utf8Path,
    options: &ViewOptions,
) -> Result<IgnoreIndex, MatcherError> {
    let state = Arc::new(Mutex::new(WalkState { index, error: None }));

    let walk_state = Arc::clone(&state);
    let walk_root: Utf8PathBuf = root.to_path_buf();
    let walk_target: Utf8PathBuf = target.to_path_buf();
    let ignore_file = options.ignore_file.clone();
    let skip_dir = options
        .skip_marker_dir
        .then(|| options.marker_dir.clone());

    let walker = WalkDir::new(target)
        .follow_links(false)
        .skip_hidden(false)
        .sort(true)
        .parallelism(Parallelism::Serial)
        .process_read_dir(move |depth, dir, (), children| {
            if depth.is_none() {
                return;
            }
            let mut state = lock(&walk_state);
            let located = Utf8Path::from_path(dir)
                .and_then(|dir| Some((dir, dir.strip_prefix(&walk_root).ok()?)));
            let Some((dir, rel)) = located else {
                warn!("skipping directory outside the repository or not UTF-8: {}", dir.display());
                for entry in children.iter_mut().flatten() {
                    entry.read_children_path = None;
                }
                return;
            };
            let key = to_slash(rel);

            let has_ignore_file = children
                .iter()
                .flatten()
                .any(|entry| entry.file_name() == ignore_file.as_str());
            if has_ignore_file && state.error.is_none() && dir != walk_target.as_path() {
                if let Err(e) = state.index.register(&key, &dir.join(&ignore_file)) {
                    state.error = Some(e);
                }
            }

            for entry in children.iter_mut().flatten() {
                if !entry.file_type().is_dir() {
                    continue;
                }
                if state.error.is_some() {
                    entry.read_children_path = None;
                    continue;
                }
                let Some(name) = entry.file_name().to_str() else {
                    warn!("skipping non UTF-8 entry in {key}");
                    entry.read_children_path = None;
                    continue;
                };
                let child = child_key(&key, name);
                if skip_dir.as_deref() == Some(name) {
                    trace!("not descending into {child}");
                    entry.read_children_path = None;
                    continue;
                }
                let parts: Vec<&str> = child.split('/').collect();
                if state.index.matches(&parts, true) {
                    debug!("pruning ignored directory {child}");
                    entry.read_children_path = None;
                }
            }
        });

    for entry in walker {
        if let Err(e) = entry {
            warn!("skipping unreadable entry: {e}");
        }
    }

    let WalkState { index, error } = std::mem::take(&mut *lock(&state));
    match error {
        Some(e) => Err(e),
        None => Ok(index),
    }
}
