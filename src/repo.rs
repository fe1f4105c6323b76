use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use std::fs;
use std::io;

pub const MARKER_DIR: &str = ".git";
pub const EXCLUDE_FILE: &str = "info/exclude";

pub struct Repo {
    pub root: Utf8PathBuf,
    pub marker: String,
}

impl Repo {
    pub fn discover(start: &Utf8Path, marker: &str) -> io::Result<(Self, Utf8PathBuf)> {
        for dir in start.ancestors() {
            match fs::symlink_metadata(dir.join(marker)) {
                Ok(_) => {
                    let target = match start.strip_prefix(dir) {
                        Ok(rel) if !rel.as_str().is_empty() => rel.to_path_buf(),
                        _ => Utf8PathBuf::from("."),
                    };
                    debug!("found {marker} at {dir}, target {target}");
                    let repo = Self {
                        root: dir.to_path_buf(),
                        marker: marker.to_string(),
                    };
                    return Ok((repo, target));
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e),
            }
        }
        debug!("no {marker} above {start}, using it as root");
        let repo = Self {
            root: start.to_path_buf(),
            marker: marker.to_string(),
        };
        Ok((repo, Utf8PathBuf::from(".")))
    }

    pub fn control_dir(&self) -> Utf8PathBuf {
        self.root.join(&self.marker)
    }

    pub fn exclude_file(&self, exclude: &str) -> Utf8PathBuf {
        self.control_dir().join(exclude)
    }
}
