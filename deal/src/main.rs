mod board;
mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ranshuffle::Engine;
use tracing::{debug, info};

use board::Board;
use config::Config;

#[derive(Parser)]
#[command(name = "deal")]
#[command(about = "Reproducible shuffled boards from a hex seed", long_about = None)]
struct Cli {
    /// Board configuration file (TOML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shuffle and print a board
    Board {
        /// Seed in hex; a fresh one is drawn when omitted
        #[arg(long, value_name = "HEX", value_parser = parse_seed)]
        seed: Option<i64>,
    },

    /// Print the first uniform draws for a seed
    Draws {
        /// Seed in hex
        #[arg(long, value_name = "HEX", value_parser = parse_seed)]
        seed: i64,

        /// Number of draws to print
        #[arg(long, default_value_t = 10)]
        count: usize,
    },

    /// Write the default board configuration to a file
    InitConfig {
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
}

/// Parse a hex seed, with or without a leading `0x` or `#`.
fn parse_seed(s: &str) -> Result<i64, String> {
    let digits = s
        .trim()
        .trim_start_matches('#')
        .trim_start_matches("0x")
        .trim_start_matches("0X");
    u32::from_str_radix(digits, 16)
        .map(i64::from)
        .map_err(|e| format!("invalid hex seed '{s}': {e}"))
}

fn setup_logging(verbose: bool) {
    let log_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            Config::from_file(path)
        }
        None => {
            debug!("Using default board configuration");
            Ok(Config::default())
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Board { seed } => {
            let config = load_config(cli.config.as_ref())?;
            let seed = seed.unwrap_or_else(Engine::new_seed);
            let mut engine = Engine::new(seed);
            info!(seed = %format!("{seed:x}"), "dealing board");

            let board = Board::deal(&mut engine, &config)?;
            println!("seed: {seed:x}");
            println!("first: {}", board.first);
            print!("{}", board.render(config.columns));
        }

        Commands::Draws { seed, count } => {
            let mut engine = Engine::new(seed);
            for _ in 0..count {
                println!("{}", engine.draw());
            }
        }

        Commands::InitConfig { path } => {
            Config::default()
                .to_file(&path)
                .with_context(|| format!("writing {}", path.display()))?;
            info!("Wrote default configuration to {}", path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seed() {
        assert_eq!(parse_seed("2a"), Ok(42));
        assert_eq!(parse_seed("#2A"), Ok(42));
        assert_eq!(parse_seed("0xdeadbeef"), Ok(0xdead_beef));
        assert!(parse_seed("xyz").is_err());
        assert!(parse_seed("100000000").is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["deal", "board", "--seed", "2a"]).unwrap();
        assert!(matches!(cli.command, Commands::Board { seed: Some(42) }));

        let cli = Cli::try_parse_from(["deal", "-v", "draws", "--seed", "1"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Draws { seed: 1, count: 10 }));
    }
}
