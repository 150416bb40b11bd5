use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use webcells_core::*;

mod board;
mod play;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a summary of a level
    Info {
        /// Level file, `-` for stdin
        level: PathBuf,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Rewrite a level, legacy or not, in the canonical format
    Convert {
        /// Level file, `-` for stdin
        level: PathBuf,
    },
    /// Draw a level
    Show {
        /// Level file, `-` for stdin
        level: PathBuf,
        /// Draw clue labels on uncovered cells
        #[arg(short, long)]
        labels: bool,
    },
    /// Play a level, commands are read from stdin
    Play {
        /// Level file
        level: PathBuf,
    },
    /// Print a random level in the canonical format
    Random {
        /// Force a seed instead of random
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

#[derive(Serialize, Debug)]
struct Summary<'a> {
    title: &'a str,
    author: &'a str,
    flavor: Option<&'a str>,
    width: Coord,
    height: Coord,
    mistakes: u32,
    cells: usize,
    hidden: usize,
    remaining_full: usize,
    finished: bool,
}

impl<'a> Summary<'a> {
    fn new(level: &'a Level) -> Self {
        Self {
            title: level.title(),
            author: level.author(),
            flavor: level.flavor(),
            width: level.width(),
            height: level.height(),
            mistakes: level.mistakes(),
            cells: level.iter_cells().count(),
            hidden: level.iter_cells().filter(|cell| cell.is_hidden()).count(),
            remaining_full: level.remaining_full_count(),
            finished: level.is_finished(),
        }
    }
}

fn read_level(path: &Path) -> Result<Level> {
    let text = if path == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("reading level from stdin")?;
        text
    } else {
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
    };
    let level = parse(&text).with_context(|| format!("parsing {}", path.display()))?;
    log::info!(
        "Loaded {:?} by {:?}, {}x{}",
        level.title(),
        level.author(),
        level.width(),
        level.height()
    );
    Ok(level)
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    match args.command {
        Command::Info { level, json } => {
            let level = read_level(&level)?;
            let summary = Summary::new(&level);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{} by {}", summary.title, summary.author);
                if let Some(flavor) = summary.flavor {
                    println!("{flavor}");
                }
                println!("{}x{}, {} cells", summary.width, summary.height, summary.cells);
                println!(
                    "{} hidden, {} full left, {} mistakes",
                    summary.hidden, summary.remaining_full, summary.mistakes
                );
            }
        }
        Command::Convert { level } => {
            let level = read_level(&level)?;
            println!("{}", serialize(&level)?);
        }
        Command::Show { level, labels } => {
            let level = read_level(&level)?;
            print!("{}", board::render(&level, labels));
        }
        Command::Play { level } => {
            if level == Path::new("-") {
                bail!("play reads commands from stdin, give the level as a file");
            }
            let mut level = read_level(&level)?;
            play::play(&mut level, io::stdin().lock(), io::stdout().lock())?;
        }
        Command::Random { seed } => {
            let seed = seed.unwrap_or_else(rand::random);
            log::info!("seed: {seed}");
            let mut rng = StdRng::seed_from_u64(seed);
            let level = RandomLevelGenerator::default()
                .generate(&mut rng)
                .context("generating level")?;
            println!("{}", serialize(&level)?);
        }
    }

    Ok(())
}
