//! Tonecraft CLI - procedural tone suggestions from the command line
//!
//! This binary renders clips to WAV files, answers single suggestion
//! requests, and runs the WebSocket suggestion server.

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::time::Duration;

use tonecraft_cli::commands;
use tonecraft_cli::commands::generate::GenerateArgs;
use tonecraft_cli::service::{ServiceConfig, DEFAULT_TIMEOUT};
use tonecraft_spec::{SynthBudget, MAX_BARS};

/// Tonecraft - procedural tone suggestion generator
#[derive(Parser)]
#[command(name = "tonecraft")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a clip and write it as a WAV file
    Generate {
        /// Instrument (piano, guitar, synth, bass, drums, strings)
        #[arg(short, long, default_value = "piano")]
        instrument: String,

        /// Style (pop, rock, jazz, lofi, edm)
        #[arg(short, long, default_value = "pop")]
        style: String,

        /// Mode (melody, chord, beat, continue)
        #[arg(short, long, default_value = "melody")]
        mode: String,

        /// Number of bars (2 seconds each)
        #[arg(short, long, default_value_t = 4, allow_hyphen_values = true)]
        bars: i64,

        /// RNG seed (random when omitted)
        #[arg(long)]
        seed: Option<u32>,

        /// Output WAV path (default: <style>_<mode>_<instrument>.wav)
        #[arg(short, long)]
        output: Option<String>,

        /// Budget profile to validate against
        #[arg(long, value_parser = ["default", "strict"])]
        budget: Option<String>,

        /// Override the budget's bar limit (1-64)
        #[arg(long, value_parser = max_bars_parser())]
        max_bars: Option<u32>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Answer one suggestion request read from a file or stdin
    Suggest {
        /// Path to the request JSON (default: stdin)
        #[arg(short, long)]
        input: Option<String>,

        /// Override the default bar limit (1-64)
        #[arg(long, value_parser = max_bars_parser())]
        max_bars: Option<u32>,

        /// Pretty-print the response JSON
        #[arg(short, long)]
        pretty: bool,
    },

    /// Start the WebSocket suggestion server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = commands::serve::DEFAULT_PORT)]
        port: u16,

        /// Override the default bar limit (1-64)
        #[arg(long, value_parser = max_bars_parser())]
        max_bars: Option<u32>,

        /// Per-request synthesis deadline in milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Maximum clips rendered at once; further requests queue
        #[arg(long, default_value_t = commands::serve::DEFAULT_MAX_CONCURRENT, value_parser = clap::value_parser!(u32).range(1..))]
        max_concurrent: u32,
    },
}

fn max_bars_parser() -> clap::builder::RangedI64ValueParser<u32> {
    clap::value_parser!(u32).range(1..=MAX_BARS as i64)
}

fn service_config(max_bars: Option<u32>, timeout_ms: Option<u64>) -> ServiceConfig {
    ServiceConfig {
        budget: max_bars.map(SynthBudget::with_max_bars).unwrap_or_default(),
        timeout: timeout_ms.map(Duration::from_millis).unwrap_or(DEFAULT_TIMEOUT),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            instrument,
            style,
            mode,
            bars,
            seed,
            output,
            budget,
            max_bars,
            json,
        } => commands::generate::run(&GenerateArgs {
            instrument,
            style,
            mode,
            bars,
            seed,
            output,
            budget,
            max_bars,
            json,
        }),
        Commands::Suggest {
            input,
            max_bars,
            pretty,
        } => commands::suggest::run(input.as_deref(), &service_config(max_bars, None), pretty),
        Commands::Serve {
            port,
            max_bars,
            timeout_ms,
            max_concurrent,
        } => commands::serve::run(
            port,
            service_config(max_bars, timeout_ms),
            max_concurrent as usize,
        ),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_negative_bars() {
        let cli = Cli::try_parse_from(["tonecraft", "generate", "--bars", "-2"]).unwrap();
        match cli.command {
            Commands::Generate { bars, mode, .. } => {
                assert_eq!(bars, -2);
                assert_eq!(mode, "melody");
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_budget() {
        assert!(Cli::try_parse_from(["tonecraft", "generate", "--budget", "huge"]).is_err());
    }

    #[test]
    fn test_max_bars_flag_is_range_checked() {
        for subcommand in ["generate", "suggest", "serve"] {
            for bad in ["0", "65", "100"] {
                let parsed = Cli::try_parse_from(["tonecraft", subcommand, "--max-bars", bad]);
                assert!(parsed.is_err(), "{} --max-bars {} should be rejected", subcommand, bad);
            }
            assert!(Cli::try_parse_from(["tonecraft", subcommand, "--max-bars", "64"]).is_ok());
        }
    }

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::try_parse_from(["tonecraft", "serve"]).unwrap();
        match cli.command {
            Commands::Serve {
                port,
                timeout_ms,
                max_concurrent,
                ..
            } => {
                assert_eq!(port, commands::serve::DEFAULT_PORT);
                assert_eq!(timeout_ms, None);
                assert_eq!(max_concurrent, commands::serve::DEFAULT_MAX_CONCURRENT);
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_service_config_overrides() {
        let config = service_config(Some(8), Some(250));
        assert_eq!(config.budget.max_bars, 8);
        assert_eq!(config.timeout, Duration::from_millis(250));

        let config = service_config(None, None);
        assert_eq!(config.budget, SynthBudget::default());
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }
}
