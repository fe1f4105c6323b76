use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use console::style;
use git_view::{Config, View, ViewOptions};
use jwalk::WalkDir;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "git-view")]
#[command(about = "Resolve .gitignore rules without git", long_about = None)]
struct Cli {
    /// Extra INI config file layered over the user config.
    #[arg(long, global = true, value_parser)]
    config: Option<PathBuf>,
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Report whether each path is ignored
    Check {
        #[arg(long, default_value = ".")]
        anchor: PathBuf,
        /// Treat the paths as directories
        #[arg(long)]
        dir: bool,
        #[arg(required = true)]
        paths: Vec<Utf8PathBuf>,
    },
    /// List every file that is not ignored
    Ls {
        #[arg(default_value = ".")]
        path: PathBuf,
    },
    /// List directories carrying ignore rules
    Rules {
        #[arg(default_value = ".")]
        path: PathBuf,
    },
    /// Add an entry to the anchor's ignore file unless already ignored
    Ensure {
        #[arg(long, default_value = ".")]
        anchor: PathBuf,
        #[arg(required = true)]
        entry: Utf8PathBuf,
    },
}

fn list_files(view: View, path: &Path, options: &ViewOptions) -> Result<(), Box<dyn Error>> {
    let view = Arc::new(view);
    let walk_view = Arc::clone(&view);
    let marker = options.skip_marker_dir.then(|| options.marker_dir.clone());

    let walker = WalkDir::new(path)
        .skip_hidden(false)
        .sort(true)
        .process_read_dir(move |_, _, (), children| {
            for dir_entry in children.iter_mut().flatten() {
                if !dir_entry.file_type().is_dir() {
                    continue;
                }
                let is_marker = marker
                    .as_deref()
                    .is_some_and(|m| dir_entry.file_name() == m);
                let ignored = relative_to(&dir_entry.path(), &walk_view)
                    .is_some_and(|rel| walk_view.ignore_directory(rel));
                if is_marker || ignored {
                    dir_entry.read_children_path = None;
                }
            }
        });

    let anchor = view.root().join(view.target());
    let mut count = 0usize;
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = Utf8PathBuf::try_from(entry.path())?;
        let rel = path.strip_prefix(&anchor)?;
        if !view.ignore(rel) {
            println!("{rel}");
            count += 1;
        }
    }
    eprintln!("    {} {count} files", style("Listed").green().bold());
    Ok(())
}

fn relative_to(path: &Path, view: &View) -> Option<Utf8PathBuf> {
    let anchor = view.root().join(view.target());
    let path = Utf8Path::from_path(path)?;
    let rel = path.strip_prefix(&anchor).ok()?;
    (!rel.as_str().is_empty()).then(|| rel.to_path_buf())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::parse();
    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = Config::load(args.config.as_deref())?;
    let options = config.view;

    match args.command {
        Commands::Check { anchor, dir, paths } => {
            let view = View::with_options(&anchor, &options)?;
            for path in paths {
                let ignored = if dir {
                    view.ignore_directory(&path)
                } else {
                    view.ignore_file(&path)
                };
                let label = if ignored {
                    style("ignored").yellow()
                } else {
                    style("included").green()
                };
                println!("{label} {path}");
            }
            Ok(())
        }
        Commands::Ls { path } => {
            let abspath = std::path::absolute(&path)?;
            let view = View::with_options(&abspath, &options)?;
            eprintln!(
                "    {} {} (root {})",
                style("Scanning").green().bold(),
                view.target(),
                view.root()
            );
            list_files(view, &abspath, &options)
        }
        Commands::Rules { path } => {
            let view = View::with_options(&path, &options)?;
            for dir in view.rule_dirs() {
                println!("{dir}");
            }
            Ok(())
        }
        Commands::Ensure { anchor, entry } => {
            let view = View::with_options(&anchor, &options)?;
            if view.ensure_ignored(&entry)? {
                eprintln!(
                    "    {} {entry} to {}",
                    style("Added").green().bold(),
                    view.root().join(view.target()).join(&options.ignore_file)
                );
            } else {
                eprintln!("    {} {entry}", style("Already ignored").green().bold());
            }
            Ok(())
        }
    }
}
