//! Terminal A* demo.
//!
//! Loads a map, searches from `S` to `E` and prints the map with the path
//! drawn in. Set `RUST_LOG=debug` to follow every relaxation.
//!
//! Run: cargo run --bin tilestar -- demos/maps/maze.txt --animate
//!      cargo run --bin tilestar -- demos/maps/ring.txt -aa --delay 200
//!      cargo run --bin tilestar -- demos/maps/wall.txt -c demos/config.json

mod render;

use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser, ValueEnum};
use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use tilestar_paths::{Event, GridSearch, Outcome, SearchConfig, Terrain, Termination};

use render::Palette;

/// Find a path across a character map with A*.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Map file: a ROWSxCOLS header, a blank line, then the grid
    map: PathBuf,

    /// JSON search configuration; the flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Cost of an orthogonal step; the diagonal cost is derived from it
    #[arg(long)]
    scale: Option<i32>,

    /// When to stop searching
    #[arg(short, long, value_enum)]
    termination: Option<TerminationArg>,

    /// Redraw the map after every expansion; twice (-aa) also after every
    /// improved neighbor
    #[arg(short, long, action = ArgAction::Count)]
    animate: u8,

    /// Pause between animation frames, in milliseconds
    #[arg(long, default_value_t = 50)]
    delay: u64,

    /// Print without colours
    #[arg(long)]
    plain: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum TerminationArg {
    /// Stop when the goal is the cheapest open cell (optimal)
    GoalPopped,
    /// Stop as soon as the goal is discovered
    FirstTouch,
}

impl From<TerminationArg> for Termination {
    fn from(t: TerminationArg) -> Self {
        match t {
            TerminationArg::GoalPopped => Termination::GoalPopped,
            TerminationArg::FirstTouch => Termination::FirstTouch,
        }
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(2),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Returns whether a path was found.
fn run(args: &Args) -> Result<bool, Box<dyn Error>> {
    let config = search_config(args)?;
    let terrain = Terrain::load(&args.map)?;
    let mut search = GridSearch::new(&terrain, &config)?;
    let palette = if args.plain {
        Palette::Plain
    } else {
        Palette::Ansi
    };
    let mut out = io::stdout();

    let outcome = if args.animate > 0 {
        execute!(out, Clear(ClearType::All))?;
        let delay = Duration::from_millis(args.delay);
        let per_relaxation = args.animate > 1;
        let mut drawn: io::Result<()> = Ok(());
        let outcome = search.run_traced(|event| {
            let due = match event {
                Event::Expanded(_) => true,
                Event::Relaxed(_) => per_relaxation,
            };
            if due && drawn.is_ok() {
                drawn = render::frame(&mut out, &terrain, event.search(), palette, delay);
            }
        });
        drawn?;
        outcome
    } else {
        search.run()
    };

    render::draw(&mut out, &terrain, &search, outcome.path(), palette)?;
    match outcome {
        Outcome::Found(path) => {
            println!(
                "Found! {} cells, cost {}, {} expansions.",
                path.len(),
                path.cost,
                search.expansions()
            );
            Ok(true)
        }
        Outcome::Unreachable => {
            println!("No path found after {} expansions.", search.expansions());
            Ok(false)
        }
    }
}

fn search_config(args: &Args) -> Result<SearchConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => SearchConfig::default(),
    };
    if let Some(scale) = args.scale {
        config = SearchConfig::with_scale(scale)
            .termination(config.termination)
            .heap_capacity(config.heap_capacity);
    }
    if let Some(t) = args.termination {
        config.termination = t.into();
    }
    log::debug!("{config:?}");
    Ok(config)
}
