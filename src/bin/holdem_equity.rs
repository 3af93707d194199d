use clap::Parser;
use holdem_equity::core::{Card, Deck, EquityError, parse_cards};
use holdem_equity::holdem::{
    EquitySimulator, Position, Recommendation, SimulationConfig, SimulationResult, TableContext,
    recommend,
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Fewest trials the command line will run.
const MIN_ITERATIONS: usize = 500;

#[derive(Parser, Debug)]
#[command(
    name = "holdem-equity",
    about = "Estimate Texas Hold'em equity and suggest an action",
    long_about = "Deal out the unknown cards many times to estimate how often the hero's \
                  hole cards win against random opponent hands, then suggest an action \
                  from the equity, seat, and pot odds."
)]
struct Args {
    /// Hero hole cards (e.g. "AsKh")
    #[arg(long, required_unless_present = "list_cards")]
    hero: Option<String>,

    /// Known board cards, 0, 3, 4, or 5 of them (e.g. "Kd7c2s")
    #[arg(long, default_value = "")]
    board: String,

    /// Opponents holding unknown cards
    #[arg(short, long, default_value_t = 1)]
    opponents: usize,

    /// Number of hands to deal out
    #[arg(short = 'n', long, default_value_t = 3_000)]
    iterations: usize,

    #[arg(long, value_enum, default_value_t = Position::Middle)]
    position: Position,

    /// Chips already in the pot
    #[arg(long, default_value_t = 100.0)]
    pot: f64,

    /// Chips needed to call, 0 when not facing a bet
    #[arg(long, default_value_t = 20.0)]
    to_call: f64,

    /// Effective stack in big blinds
    #[arg(long, default_value_t = 100.0)]
    stack_bb: f64,

    /// Seed the rng so runs can be repeated
    #[arg(long)]
    seed: Option<u64>,

    /// Print the result and recommendation as json
    #[arg(long)]
    json: bool,

    /// Log simulation progress at debug level
    #[arg(short, long)]
    verbose: bool,

    /// Print every card code the tool accepts and exit
    #[arg(long)]
    list_cards: bool,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Equity(#[from] EquityError),
    #[error("Hero needs exactly two cards, got {0}")]
    HeroCards(usize),
    #[error("Use at least 500 simulation iterations, got {0}")]
    TooFewIterations(usize),
    #[error("Unable to write json: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct Report<'a> {
    config: &'a SimulationConfig,
    table: &'a TableContext,
    result: &'a SimulationResult,
    recommendation: &'a Recommendation,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn list_cards() {
    for card in Deck::picker_order() {
        println!("{card}\t{}", card.label());
    }
}

/// Check the command line inputs in the order the card picker form
/// does: board size, hero cards, duplicates, opponents, iterations,
/// then the table amounts.
fn checked_inputs(args: &Args, hero: &str) -> Result<(SimulationConfig, TableContext), CliError> {
    let hero = parse_cards(hero)?;
    let hero: [Card; 2] = hero
        .as_slice()
        .try_into()
        .map_err(|_| CliError::HeroCards(hero.len()))?;
    let board = parse_cards(&args.board)?;

    let config = SimulationConfig::new(hero, board, args.opponents, args.iterations)?;
    if config.iterations() < MIN_ITERATIONS {
        return Err(CliError::TooFewIterations(config.iterations()));
    }
    let table = TableContext::new(args.pot, args.to_call, args.stack_bb)?;
    Ok((config, table))
}

fn report<R: Rng>(
    args: &Args,
    mut sim: EquitySimulator<R>,
    table: &TableContext,
) -> Result<(), CliError> {
    let result = sim.estimate_equity();
    let config = sim.config();
    let rec = recommend(
        result.equity_pct(),
        config.opponents(),
        args.position,
        table,
        config.board().len(),
    );

    if args.json {
        let report = Report {
            config,
            table,
            result: &result,
            recommendation: &rec,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Iterations: {}", result.iterations());
        println!("Win:    {:.1}%", result.win_pct());
        println!("Tie:    {:.1}%", result.tie_pct());
        println!("Loss:   {:.1}%", result.loss_pct());
        println!("Equity: {:.1}%", result.equity_pct());
        println!();
        println!(
            "Pot: {} To call: {} Stack: {} bb",
            table.pot(),
            table.to_call(),
            table.stack_bb()
        );
        println!("Street: {}", rec.street());
        println!("Action: {}", rec.action());
        println!("Reason: {}", rec.reason());
    }
    Ok(())
}

fn run(args: &Args, hero: &str) -> Result<(), CliError> {
    let (config, table) = checked_inputs(args, hero)?;
    match args.seed {
        Some(seed) => report(
            args,
            EquitySimulator::with_rng(config, StdRng::seed_from_u64(seed)),
            &table,
        ),
        None => report(args, EquitySimulator::new(config), &table),
    }
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.list_cards {
        list_cards();
        return;
    }

    let hero = args.hero.as_deref().unwrap_or_default();
    if let Err(e) = run(&args, hero) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
