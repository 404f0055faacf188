//! fpick: a line-oriented host for the picker core.
//!
//! Prints the current listing, reads one command per line from stdin and
//! prints the chosen path on exit.

mod input;
mod render;

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use fpick_core::config::settings::Config;
use fpick_core::controller::{PickerController, SelectionListener};
use fpick_core::error::PickerError;
use fpick_core::event::Outcome;
use fpick_core::fs::{Entry, FileSystem, LocalFileSystem};
use fpick_core::nav::lister::SelectionMode;
use fpick_core::storage::ConfiguredStorage;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::input::{parse_line, InputAction, HELP};
use crate::render::render;

/// Logs transitions and surfaces errors on stderr.
struct ConsoleListener;

impl SelectionListener for ConsoleListener {
    fn on_file_selected(&self, entry: &Entry) {
        tracing::info!("file selected: {}", entry.path().display());
    }

    fn on_directory_selected(&self, entry: &Entry) {
        tracing::info!("entered {}", entry.path().display());
    }

    fn on_error(&self, error: &PickerError) {
        eprintln!("fpick: {error}");
    }
}

fn config_dir() -> PathBuf {
    if std::path::Path::new("config").exists() {
        PathBuf::from("config")
    } else {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/"))
            .join(".config")
            .join("fpick")
    }
}

/// Loads the config, using the home directory as device storage when no
/// storage is configured.
fn load_config() -> Config {
    let path = config_dir().join("default.toml");
    let mut config = match Config::load(&path) {
        Ok(config) => config,
        Err(PickerError::NotFound(_)) => Config::default(),
        Err(e) => {
            tracing::warn!("ignoring {}: {e}", path.display());
            Config::default()
        }
    };

    if config.storage.device_root.is_none() && config.storage.mounts.is_empty() {
        config.storage.device_root = std::env::var("HOME").ok().map(PathBuf::from);
    }
    config
}

fn init_logging() -> anyhow::Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(std::env::temp_dir().join("fpick.log"))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = init_logging() {
        eprintln!("fpick: logging disabled: {e}");
    }

    let config = load_config();
    let fs: Arc<dyn FileSystem> = Arc::new(LocalFileSystem::new());
    let provider = Arc::new(ConfiguredStorage::new(config.storage.clone()));
    let controller = PickerController::open(Arc::clone(&fs), provider, &config).await;

    let listener = Arc::new(ConsoleListener);
    controller.set_listener(&listener).await;

    if let Some(start) = std::env::args().nth(1) {
        let dir = controller.probe(start).await;
        if dir.is_dir() {
            controller.select_directory(Some(dir)).await;
        } else {
            eprintln!("fpick: not a directory: {}", dir.path().display());
        }
    }

    match run(&controller, fs.as_ref()).await? {
        Some(path) => {
            println!("{}", path.display());
            Ok(())
        }
        None => std::process::exit(1),
    }
}

/// Runs the prompt loop until something is chosen or the user quits.
async fn run(
    controller: &PickerController,
    fs: &dyn FileSystem,
) -> anyhow::Result<Option<PathBuf>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let view = controller.view().await;
        for entry in view.entries.iter().filter(|e| e.is_dir()) {
            entry.load_size_label(fs).await;
        }
        print!("{}", render(&view));
        eprint!("> ");

        let Some(line) = lines.next_line().await? else {
            return Ok(None);
        };

        match parse_line(&line) {
            InputAction::Quit => return Ok(None),
            InputAction::Help => println!("{HELP}"),
            InputAction::None => println!("? (type ? for help)"),
            InputAction::Commit => match (view.selection_mode, view.current) {
                (SelectionMode::Directory, Some(dir)) => {
                    return Ok(Some(dir.path().to_path_buf()));
                }
                (SelectionMode::Directory, None) => println!("open a directory first"),
                (SelectionMode::File, _) => println!("switch to `mode dir` to choose a directory"),
            },
            InputAction::Command(command) => match controller.execute(command).await {
                Outcome::FileSelected(entry) => return Ok(Some(entry.path().to_path_buf())),
                Outcome::Exit => return Ok(None),
                Outcome::Ignored => println!("no such entry"),
                Outcome::Navigated | Outcome::Superseded | Outcome::Updated => {}
            },
        }
    }
}
