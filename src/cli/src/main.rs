use std::{fs, io, path::PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::{WrapErr, eyre};
use env_logger::TimestampPrecision;
use log::{LevelFilter, info};
use twophase::{SolverConfig, TwoPhaseSolver, host::solve_timed_with, scramble::random_scramble};

/// Solves 3x3 Rubik's cube scrambles with Kociemba's two-phase algorithm
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The scramble to solve, e.g. "R U R' U'". Read from stdin when neither
    /// this nor --random is given.
    #[arg(long, short, conflicts_with = "random")]
    scramble: Option<String>,

    /// Solve a freshly generated random scramble
    #[arg(long)]
    random: bool,

    /// Search limits, in TOML format. Missing keys keep their defaults.
    #[arg(long, short, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Also report the time taken and the solution length
    #[arg(long)]
    timed: bool,

    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the default search limits as TOML
    Config,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    if let Some(Commands::Config) = cli.command {
        print!("{}", toml::to_string(&SolverConfig::default())?);
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => toml::from_str::<SolverConfig>(
            &fs::read_to_string(path)
                .wrap_err_with(|| format!("Failed to read configuration file {path:?}"))?,
        )
        .wrap_err_with(|| format!("Failed to parse configuration file {path:?}"))?,
        None => SolverConfig::default(),
    };

    let scramble = if cli.random {
        let scramble = random_scramble(&mut fastrand::Rng::new());
        println!("Scramble: {scramble}");
        scramble
    } else if let Some(scramble) = cli.scramble {
        scramble
    } else {
        io::read_to_string(io::stdin()).wrap_err("Failed to read the scramble from stdin")?
    };

    let solver = TwoPhaseSolver::new(twophase::tables()).with_config(config);
    info!("Solving {:?}", scramble.trim());

    if cli.timed {
        let timed = solve_timed_with(&solver, &scramble).map_err(|err| eyre!(err))?;
        println!("{}", timed.solution);
        println!(
            "{} moves in {:.3}s",
            timed.move_count,
            timed.elapsed.as_secs_f64()
        );
        return Ok(());
    }

    let solution = solver
        .solve(&scramble)
        .wrap_err_with(|| format!("Failed to solve {:?}", scramble.trim()))?;
    println!("{solution}");

    Ok(())
}
