mod app;
mod renderer;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tidemap_core::config::AppConfig;
use tidemap_core::content::{default_levels, load_levels};
use tracing_subscriber::EnvFilter;

use crate::app::App;

const DEFAULT_CONFIG: &str = "tidemap.toml";

struct Args {
    levels: Option<PathBuf>,
    config: PathBuf,
}

fn parse_args() -> Result<Args> {
    let mut levels = None;
    let mut config = PathBuf::from(DEFAULT_CONFIG);
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                config = args
                    .next()
                    .map(PathBuf::from)
                    .context("--config needs a path")?;
            }
            "-h" | "--help" => {
                eprintln!("Usage: tidemap [levels.json] [--config tidemap.toml]");
                std::process::exit(0);
            }
            _ if levels.is_none() => levels = Some(PathBuf::from(arg)),
            _ => bail!("unexpected argument: {arg}"),
        }
    }
    Ok(Args { levels, config })
}

/// Logs go to the file named by `TIDEMAP_LOG`; the alternate screen owns
/// the terminal, so without it nothing is logged.
fn init_tracing() -> Result<()> {
    let Some(path) = std::env::var_os("TIDEMAP_LOG") else {
        return Ok(());
    };
    let file = std::fs::File::create(Path::new(&path))
        .with_context(|| format!("cannot create log file {}", path.to_string_lossy()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .compact()
        .try_init()
        .map_err(anyhow::Error::msg)?;
    Ok(())
}

fn main() -> Result<()> {
    init_tracing()?;
    let args = parse_args()?;

    let config = AppConfig::load_or_default(&args.config)?;
    let levels = match args.levels.as_deref().or(config.levels.as_deref()) {
        Some(path) => load_levels(path)?,
        None => default_levels(),
    };
    tracing::info!(levels = levels.len(), theme = ?config.theme, "starting tidemap");

    let mut app = App::new(levels, config.layout, config.theme);
    renderer::run(&mut app)
}
