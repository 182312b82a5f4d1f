//! Command-line driver: search for a magic hexagon and print what was found.

use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use magic_hexagon::{
    Config, InnerTileSolver, Layout, RingEnumerator, Search, SearchError, SearchOptions,
};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Stop after this many ring advances instead of searching the whole space.
    #[arg(long, value_name = "COUNT")]
    max_iterations: Option<u64>,

    /// Log the current ring every COUNT iterations.
    #[arg(long, value_name = "COUNT")]
    progress_every: Option<u64>,

    /// Fixed leading ring values to start from, comma separated.
    #[arg(long, value_name = "VALUES", value_delimiter = ',')]
    prefix: Vec<u8>,

    /// Keep searching after the first solution and print every one found.
    #[arg(long)]
    all: bool,

    /// Also require the lines running down and to the right to be magic.
    #[arg(long)]
    all_lines: bool,
}

fn build_search(args: &Args) -> Result<Search, SearchError> {
    let options = SearchOptions {
        max_iterations: args.max_iterations,
        progress_every: args.progress_every,
    };
    let layout = if args.all_lines {
        Layout::ORDER_3_ALL_LINES
    } else {
        Layout::ORDER_3
    };
    let enumerator = RingEnumerator::with_prefix(Config::ORDER_3, &args.prefix)?;
    let solver = InnerTileSolver::new(Config::ORDER_3, layout)?;
    Search::from_parts(enumerator, solver, options)
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let mut search = match build_search(&args) {
        Ok(search) => search,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let mut found = 0;
    while let Ok(solution) = search.next_solution() {
        found += 1;
        let stats = search.stats();
        println!("Solution found after {} iterations.", stats.iterations());
        println!("Outer ring: {:?}", solution.ring());
        println!("Inner tiles: {:?}", solution.inner().values());
        println!("{solution}");
        if !args.all {
            break;
        }
    }

    let stats = search.stats();
    info!(
        "{} iterations, {} edge-valid rings, {} interior arrangements tried",
        stats.iterations(),
        stats.edge_valid_rings(),
        stats.permutations()
    );

    match search.finished() {
        Some(SearchError::IterationLimit { limit }) if found == 0 => {
            println!("No solution found within {limit} iterations.");
            ExitCode::FAILURE
        }
        Some(SearchError::Exhausted { .. }) if found == 0 => {
            println!("Search space exhausted; no solution exists.");
            ExitCode::FAILURE
        }
        Some(err) => {
            println!("Found {found} solution(s); {err}.");
            ExitCode::SUCCESS
        }
        None => ExitCode::SUCCESS,
    }
}
