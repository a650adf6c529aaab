use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use touchdown_tracker::config::DEFAULT_CONFIG_PATH;
use touchdown_tracker::records::load_roster;
use touchdown_tracker::{
    output, CsvTournamentRepository, Roster, TournamentService, TrackerConfig, TrackerError,
};

#[derive(Parser)]
#[command(name = "touchdown_tracker")]
#[command(about = "Swiss tournament standings and pairings", long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record standings for the finished round and pair the next one
    Next,

    /// Print the current standings
    Standings {
        /// Print JSON instead of a table
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Report pairs that met more than once
    Audit,

    /// Fill blank results of the latest round with random scores
    Simulate {
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn init_tracing(level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("touchdown_tracker={level}").into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load(config: &TrackerConfig, service: &TournamentService) -> Result<Roster> {
    let roster = load_roster(&config.players_file)
        .with_context(|| format!("Failed to load roster {}", config.players_file.display()))?;
    Ok(service.prepare_roster(roster)?)
}

fn run(cli: Cli) -> Result<()> {
    let config = TrackerConfig::load(&cli.config)
        .with_context(|| format!("Failed to load config {}", cli.config.display()))?;
    let repository = Arc::new(CsvTournamentRepository::from_config(&config));
    let service = TournamentService::builder(repository)
        .with_config(config.clone())
        .build();
    let roster = load(&config, &service)?;

    match cli.command {
        Commands::Next => match service.advance(&roster) {
            Ok(summary) => {
                info!(round = summary.round, "Next round ready");
                for game in &summary.matches {
                    println!("{} vs {}", game.side_a, game.side_b);
                }
            }
            Err(e @ TrackerError::Pairing(_)) => {
                error!("Standings were saved but no round was generated");
                return Err(e.into());
            }
            Err(e) => return Err(e.into()),
        },
        Commands::Standings { json } => {
            let standings = service.standings(&roster)?;
            let statistics = service.aggregator().statistics();
            if json {
                println!("{}", output::to_json(&standings, statistics)?);
            } else {
                print!("{}", output::render_table(&standings.players, "Player", statistics));
                if let Some(teams) = &standings.teams {
                    println!();
                    print!("{}", output::render_table(teams, "Team", statistics));
                }
            }
        }
        Commands::Audit => {
            let rematches = service.audit(&roster)?;
            if rematches.is_empty() {
                println!("No rematches found");
            }
            for rematch in rematches {
                println!(
                    "{} vs {} in rounds {:?}",
                    rematch.side_a, rematch.side_b, rematch.rounds
                );
            }
        }
        Commands::Simulate { seed } => match service.simulate(seed)? {
            Some(simulated) => println!(
                "Filled {} cells in round {}",
                simulated.filled, simulated.round
            ),
            None => println!("No round to simulate"),
        },
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
