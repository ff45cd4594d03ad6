mod viewer;

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, ValueEnum};
use markstream_config::{Config, OutputFormat};
use markstream_engine::{Node, Parser, outline, to_html};
use std::{
    io::{self, Read},
    path::PathBuf,
};

#[derive(ClapParser, Debug)]
#[command(name = "markstream")]
#[command(version, about = "Parse markup the way a streaming reply arrives")]
struct Args {
    /// File to parse; `-` or nothing reads stdin
    file: Option<PathBuf>,

    /// Output format (defaults to the configured one)
    #[arg(long, value_enum)]
    format: Option<Format>,

    /// Replay the input in a terminal viewer instead of printing it
    #[arg(long)]
    watch: bool,

    /// Characters revealed per tick in the viewer
    #[arg(long)]
    chunk: Option<usize>,

    /// Milliseconds between viewer ticks
    #[arg(long)]
    tick: Option<u64>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Outline,
    Html,
    Yaml,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Outline => OutputFormat::Outline,
            Format::Html => OutputFormat::Html,
            Format::Yaml => OutputFormat::Yaml,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    let mut config = load_config(args.config.as_ref())?;
    if let Some(format) = args.format {
        config.format = format.into();
    }
    if let Some(chunk) = args.chunk {
        config.stream.chunk_chars = chunk;
    }
    if let Some(tick) = args.tick {
        config.stream.tick_ms = tick;
    }
    for name in config.unknown_handlers() {
        log::warn!("Ignoring unknown handler in disabled_handlers: {name}");
    }

    let input = read_input(args.file.as_ref())?;

    if args.watch {
        return viewer::run(input, &config);
    }

    let mut parser = Parser::new(config.registry());
    parser.parse(&input);
    print!("{}", render(parser.finish(), config.format)?);
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    let loaded = match path {
        Some(path) => Config::load_from_path(path)?,
        None => {
            log::debug!("Config path: {}", Config::config_path().display());
            Config::load()?
        }
    };
    Ok(loaded.unwrap_or_default())
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

/// Prints a tree in the requested format, newline terminated.
pub(crate) fn render(root: &Node, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Outline => outline(root),
        OutputFormat::Html => {
            let mut html = to_html(root);
            if !html.ends_with('\n') {
                html.push('\n');
            }
            html
        }
        OutputFormat::Yaml => serde_yaml::to_string(root).context("Failed to serialize tree")?,
    })
}
