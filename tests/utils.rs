#![allow(dead_code)]

use camino::{Utf8Path, Utf8PathBuf};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tempfile::{TempDir, tempdir};

#[macro_export]
macro_rules! t {
    ($e:expr) => {
        match $e {
            Ok(n) => n,
            Err(e) => panic!("error: {}", e),
        }
    };
}

pub fn write_to_temp_file<P: AsRef<Path>>(dir: &Path, file_path: P, content: &str) -> File {
    let file_path = dir.join(file_path);
    if let Some(parent) = file_path.parent() {
        t!(fs::create_dir_all(parent));
    }
    let mut file = t!(File::create(file_path));
    t!(writeln!(file, "{}", content));
    file
}

pub fn utf8_tempdir() -> (TempDir, Utf8PathBuf) {
    let dir = t!(tempdir());
    let path = t!(Utf8PathBuf::try_from(dir.path().to_path_buf()));
    (dir, path)
}

/// Repository with a root `.gitignore` ignoring `root.sh` and `root/`, and
/// nested ignore files in `a` and `a/b`.
pub fn fixture() -> (TempDir, Utf8PathBuf) {
    let (dir, root) = utf8_tempdir();
    let path = root.as_std_path();
    t!(fs::create_dir_all(path.join(".git").join("info")));
    write_to_temp_file(path, ".git/info/exclude", "*.log");
    write_to_temp_file(path, ".gitignore", "root.sh\nroot/");
    write_to_temp_file(path, "root/.gitignore", "!keep");
    write_to_temp_file(path, "root/keep", "keep");
    write_to_temp_file(path, "a/.gitignore", "a.sh");
    write_to_temp_file(path, "a/b/.gitignore", "b.sh");
    t!(fs::create_dir_all(path.join("c")));
    (dir, root)
}

pub fn join(root: &Utf8Path, rel: &str) -> Utf8PathBuf {
    rel.split('/').fold(root.to_path_buf(), |acc, part| acc.join(part))
}
