use crate::repo::{EXCLUDE_FILE, MARKER_DIR};
use config::FileFormat;
use config::{Config as Conf, ConfigError, File};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

fn default_ignore_file() -> String {
    ".gitignore".to_string()
}

fn default_marker_dir() -> String {
    MARKER_DIR.to_string()
}

fn default_exclude_file() -> String {
    EXCLUDE_FILE.to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ViewOptions {
    #[serde(default = "default_ignore_file")]
    pub ignore_file: String,
    #[serde(default = "default_marker_dir")]
    pub marker_dir: String,
    #[serde(default = "default_exclude_file")]
    pub exclude_file: String,
    #[serde(default = "default_true")]
    pub skip_marker_dir: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            ignore_file: default_ignore_file(),
            marker_dir: default_marker_dir(),
            exclude_file: default_exclude_file(),
            skip_marker_dir: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub view: ViewOptions,
}

pub fn user_config_file() -> Option<PathBuf> {
    ProjectDirs::from("", "", "git-view").map(|dirs| dirs.config_dir().join("config"))
}

impl Config {
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Conf::builder();
        if let Some(user) = user_config_file() {
            builder = builder.add_source(File::from(user).required(false).format(FileFormat::Ini));
        }
        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true).format(FileFormat::Ini));
        }
        builder.build()?.try_deserialize()
    }
}
