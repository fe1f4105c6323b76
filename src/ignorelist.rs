use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

pub struct IgnoreList {
    pub ignore: Vec<String>,
}

impl IgnoreList {
    fn missing(&self, existing: &str) -> String {
        let mut out = String::new();
        for item in &self.ignore {
            let listed = existing.lines().any(|line| line.trim_end() == item.as_str())
                || out.lines().any(|line| line == item.as_str());
            if listed {
                continue;
            }
            out.push_str(item);
            out.push('\n');
        }
        if !out.is_empty() && !existing.is_empty() && !existing.ends_with('\n') {
            out.insert(0, '\n');
        }
        out
    }

    pub fn write(&self, path: &Path) -> io::Result<bool> {
        let existing = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e),
        };
        let contents = self.missing(&existing);
        if contents.is_empty() {
            return Ok(false);
        }

        let mut file = OpenOptions::new().append(true).create(true).open(path)?;
        file.write_all(contents.as_bytes())?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn list(items: &[&str]) -> IgnoreList {
        IgnoreList {
            ignore: items.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn creates_new_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".gitignore");
        assert!(list(&["/.cache", "*.tmp"]).write(&path).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "/.cache\n*.tmp\n");
    }

    #[test]
    fn appends_only_missing_entries() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".gitignore");
        fs::write(&path, "*.tmp").unwrap();
        assert!(list(&["*.tmp", "/.cache"]).write(&path).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "*.tmp\n/.cache\n");
    }

    #[test]
    fn unchanged_when_everything_is_listed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".gitignore");
        fs::write(&path, "/.cache\n").unwrap();
        assert!(!list(&["/.cache", "/.cache"]).write(&path).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "/.cache\n");
    }
}
