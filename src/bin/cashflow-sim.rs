//! cashflow-sim - autoplay a seeded standard game
//!
//! ```bash
//! cashflow-sim --players 4 --seed 7 --max-turns 200
//! RUST_LOG=debug cashflow-sim --config my_game.json
//! ```

use std::fs::File;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::info;

use cashflow_engine::games::standard::StandardGameBuilder;
use cashflow_engine::{run_game, CautiousAgent, GameConfig, GameState, PlayerAgent, PlayerMap, PlayerSetup};

/// Autoplay a cashflow game with cautious players and print the outcome
#[derive(Parser)]
#[command(name = "cashflow-sim")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Autoplay a seeded cashflow game", long_about = None)]
struct Cli {
    /// Number of players
    #[arg(short, long, default_value_t = 2)]
    players: usize,

    /// Seed for dice, costs and shuffles
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Stop with a draw after this many turns
    #[arg(short, long, default_value_t = 500)]
    max_turns: u32,

    /// Cash each player keeps back from purchases
    #[arg(long, default_value_t = 1_000)]
    reserve: i64,

    /// JSON game configuration (defaults to the standard game)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the full event log as JSON
    #[arg(long)]
    events: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = build_game(cli)?;
    let mut agents = PlayerMap::new(cli.players, |_| {
        Box::new(CautiousAgent::new(cli.reserve)) as Box<dyn PlayerAgent>
    });

    let result = run_game(&mut state, &mut agents, cli.max_turns)?;
    info!("finished after {} turns", state.turn_number() - 1);

    println!("result: {result:?}");
    println!("turns: {}  rounds: {}", state.turn_number() - 1, state.round());
    for (player, account) in state.accounts().iter() {
        let seat = state.seat(player);
        println!(
            "{:<10} {:<9} cash {:>8}  passive {:>6}  expenses {:>6}  net worth {:>9}",
            seat.name,
            seat.profession,
            account.cash(),
            account.passive_income(),
            account.total_expense(),
            account.net_worth(),
        );
    }

    if cli.events {
        let events: Vec<_> = state.events().iter().collect();
        println!("{}", serde_json::to_string_pretty(&events)?);
    }
    Ok(())
}

fn build_game(cli: &Cli) -> Result<GameState, Box<dyn std::error::Error>> {
    let Some(path) = &cli.config else {
        return Ok(StandardGameBuilder::new().player_count(cli.players).build(cli.seed)?);
    };

    let config = GameConfig::from_reader(File::open(path)?)?;
    let professions = &config.professions;
    let seats: Vec<_> = (0..cli.players)
        .map(|i| PlayerSetup::new(format!("Player {}", i + 1), professions[i % professions.len()].name.clone()))
        .collect();

    let mut state = GameState::new(&config, &seats, cli.seed)?;
    state.start()?;
    Ok(state)
}
