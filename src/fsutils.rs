use camino::{Utf8Component, Utf8Path, Utf8PathBuf};

pub const ROOT_KEY: &str = ".";

pub fn components(path: &Utf8Path) -> Vec<&str> {
    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Utf8Component::Normal(part) => parts.push(part),
            Utf8Component::ParentDir => {
                parts.pop();
            }
            Utf8Component::CurDir | Utf8Component::RootDir | Utf8Component::Prefix(_) => {}
        }
    }
    parts
}

// `..` only climbs over normal components, so `/a/../..` stays `/`.
pub fn normalize(path: &Utf8Path) -> Utf8PathBuf {
    let mut out = Utf8PathBuf::new();
    for component in path.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Utf8Component::Normal(_))) {
                    out.pop();
                }
            }
            other => out.push(other.as_str()),
        }
    }
    if out.as_str().is_empty() {
        out.push(".");
    }
    out
}

pub fn join_key(parts: &[&str]) -> String {
    if parts.is_empty() {
        ROOT_KEY.to_string()
    } else {
        parts.join("/")
    }
}

pub fn to_slash(path: &Utf8Path) -> String {
    join_key(&components(path))
}

pub fn ancestor_keys(target: &Utf8Path) -> Vec<String> {
    let parts = components(target);
    (0..=parts.len()).map(|i| join_key(&parts[..i])).collect()
}

pub fn key_to_path(root: &Utf8Path, key: &str) -> Utf8PathBuf {
    let mut path = root.to_path_buf();
    for part in key.split('/').filter(|part| *part != ROOT_KEY) {
        path.push(part);
    }
    path
}

pub fn child_key(parent: &str, child: &str) -> String {
    if parent == ROOT_KEY {
        child.to_string()
    } else {
        format!("{parent}/{child}")
    }
}
