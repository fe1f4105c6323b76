pub mod config;
pub mod fsutils;
pub mod ignorelist;
pub mod index;
pub mod loader;
pub mod matcher;
pub mod repo;
pub mod view;
mod walk;

pub use config::{Config, ViewOptions};
pub use index::IgnoreIndex;
pub use loader::load_ignore_file;
pub use matcher::{MatcherError, PatternMatcher};
pub use repo::Repo;
pub use view::{View, ViewError};
