use std::{
    num::NonZeroUsize,
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use fontshelf::{CacheConfig, FileLoader, FontCache, FontSystem};

use crate::report;

#[derive(Parser)]
#[command(version = crate::version::APP_VERSION, about)]
pub struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Read cache settings from a TOML file"
    )]
    config: Option<PathBuf>,
    #[arg(
        long,
        value_name = "N",
        help = "Keep at most N fonts resident, evicting the least recently used"
    )]
    capacity: Option<NonZeroUsize>,
    #[arg(
        long = "search-dir",
        value_name = "DIR",
        help = "Look up relative font paths in DIR (repeatable, searched before config dirs)"
    )]
    search_dirs: Vec<PathBuf>,
    #[arg(
        long,
        help = "Do not resolve bare file names through installed system fonts",
        default_value_t = false
    )]
    no_system_fonts: bool,
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        help = "Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence"
    )]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load a font at one or more point sizes and print its metrics
    Load {
        path: PathBuf,
        #[arg(required = true)]
        sizes: Vec<u16>,
    },
    /// Load every font listed under [[preload]] in the config file
    Preload,
}

impl Cli {
    /// Reads the config file, if any, and applies command line overrides.
    pub fn cache_config(&self) -> Result<CacheConfig> {
        let mut config = match &self.config {
            Some(path) => CacheConfig::from_path(path)?,
            None => CacheConfig::default(),
        };

        if let Some(capacity) = self.capacity {
            config.capacity = Some(capacity);
        }
        if !self.search_dirs.is_empty() {
            let mut dirs = self.search_dirs.clone();
            dirs.append(&mut config.search_dirs);
            config.search_dirs = dirs;
        }
        if self.no_system_fonts {
            config.system_fonts = false;
        }
        Ok(config)
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .init();
}

pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.cache_config()?;
    let cache = FontSystem::init().cache(&config);

    let ok = match &cli.command {
        Command::Load { path, sizes } => load(&cache, path, sizes),
        Command::Preload => preload(&cache, &config),
    };

    println!("{}", report::stats(&cache.stats(), cache.len()));
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn load(cache: &FontCache<FileLoader>, path: &Path, sizes: &[u16]) -> bool {
    let mut ok = true;
    for &size in sizes {
        match cache.get(path, size) {
            Ok(font) => println!("{}", report::font(&font)),
            Err(err) => {
                tracing::error!("{err}");
                ok = false;
            }
        }
    }
    ok
}

fn preload(cache: &FontCache<FileLoader>, config: &CacheConfig) -> bool {
    if config.preload.is_empty() {
        tracing::warn!("no [[preload]] entries configured");
    }

    let failures = cache.preload(&config.preload);
    for (key, err) in &failures {
        tracing::error!(%key, "{err}");
    }
    for key in cache.keys() {
        if let Some(font) = cache.peek(&key.path, key.point_size) {
            println!("{}", report::font(&font));
        }
    }
    failures.is_empty()
}
