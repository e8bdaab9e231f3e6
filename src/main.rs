use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use log::warn;
use rand::{rngs::StdRng, SeedableRng};

use eight_puzzle::{
    random_walk, render, score, solve, tiles_correct, Board, Outcome, SearchConfig,
};

#[derive(Debug, Parser)]
#[command(name = "eight-puzzle", about = "Sliding-tile puzzle search with a random-walk baseline")]
struct Args {
    /// Board width and height
    #[arg(long, default_value_t = 3)]
    size: usize,

    /// RNG seed for a reproducible start board and walk
    #[arg(long)]
    seed: Option<u64>,

    /// Only draw start boards that can reach the goal
    #[arg(long)]
    solvable: bool,

    /// Disable the lookahead double enqueue
    #[arg(long)]
    no_boost: bool,

    /// Stop searching after this many distinct boards
    #[arg(long)]
    node_limit: Option<usize>,

    /// Stop searching after this many milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Stop the random walk after this many moves
    #[arg(long, default_value_t = 5_000_000)]
    walk_limit: u64,

    /// Skip the random-walk baseline
    #[arg(long)]
    no_walk: bool,

    /// Print boards without colour
    #[arg(long)]
    plain: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let puzzle = if args.solvable {
        Board::random_solvable(args.size, &mut rng)?
    } else {
        Board::random(args.size, &mut rng)?
    };
    if !puzzle.is_solvable() {
        warn!("Start board has the wrong parity; the search will exhaust its frontier");
    }

    let show = |board: &Board| {
        if args.plain {
            board.to_string()
        } else {
            render::colored(board)
        }
    };

    println!("======");
    println!("PUZZLE");
    println!("======");
    println!("Lookahead search:");
    println!("{}", show(&puzzle));

    let config = SearchConfig {
        boost: !args.no_boost,
        node_limit: args.node_limit,
        deadline: args.timeout_ms.map(Duration::from_millis),
    };

    match solve(&puzzle, &config) {
        Outcome::Solved(solution) => {
            println!("Path to solve the puzzle:");
            let path = &solution.path;
            for (i, board) in path.boards.iter().enumerate() {
                println!();
                match i.checked_sub(1).map(|m| path.moves[m]) {
                    Some(movement) => println!("Move {} ({}):", i, movement),
                    None => println!("Move {}:", i),
                }
                println!("{}", show(board));
            }
            let goal = path.goal();
            println!("Prefix score: {}", score(goal));
            println!("No of tiles placed correctly: {}", tiles_correct(goal));
            println!("Solution found in {} moves", solution.move_count());
            println!("Stats: {}", solution.stats);
        }
        Outcome::Exhausted(exhausted) => {
            println!("No solution found ({})", exhausted.reason);
            println!("Stats: {}", exhausted.stats);
        }
    }

    if args.no_walk {
        return Ok(());
    }

    println!();
    println!();
    println!("Random walk:");
    println!("Starting state:");
    println!("{}", show(&puzzle));
    let report = random_walk(&puzzle, &mut rng, Some(args.walk_limit));
    println!("No of tiles placed correctly: {}", report.tiles_correct);
    if report.solved {
        println!("Solution found by random walk in {} moves", report.moves);
    } else {
        println!("Random walk gave up after {} moves", report.moves);
    }

    Ok(())
}
