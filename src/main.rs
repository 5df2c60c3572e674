use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

const EXIT_SUCCESS: i32 = 0;
const EXIT_SCORING: i32 = 1;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the favoritism score (default if no subcommand)
    Score,
    /// Print the score followed by a per-term breakdown
    Explain,
    /// Write the default inputs to the config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
enum OutputFormat {
    /// A single "Favoritism Score: ..." line
    #[default]
    Plain,
    /// Score, intermediate values and terms as JSON
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "favoritism")]
#[command(about = "Sibling favoritism score calculator", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/favoritism/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Seed for the random factor, for reproducible scores
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let command = cli.command.unwrap_or(Commands::Score);
    let config_path = cli.config.map(PathBuf::from);

    if let Commands::Init { force } = command {
        let path = match config_path {
            Some(p) => Ok(p),
            None => favoritism::config::get_config_path(),
        };
        let path = match path {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Config error: {}", e);
                std::process::exit(EXIT_CONFIG);
            }
        };
        if let Err(e) = favoritism::config::write_default_config(&path, force) {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        println!("Wrote default config to {}", path.display());
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config = match favoritism::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate inputs at startup
    if let Err(errors) = favoritism::scoring::validate_inputs(&config.inputs) {
        eprintln!("Input errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let mut rng = favoritism::scoring::make_rng(cli.seed);
    let result = match favoritism::scoring::calculate_score_with_rng(&config.inputs, &mut rng) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Scoring error: {:#}", e);
            std::process::exit(EXIT_SCORING);
        }
    };
    log::debug!(
        "numerator {} / denominator {} (R = {})",
        result.numerator,
        result.denominator,
        result.random_factor
    );

    let output = match (command, cli.format) {
        (_, OutputFormat::Json) => match favoritism::output::format_json(&result) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("Output error: {:#}", e);
                std::process::exit(EXIT_SCORING);
            }
        },
        (Commands::Explain, OutputFormat::Plain) => {
            let use_colors = favoritism::output::should_use_colors();
            favoritism::output::format_breakdown(&result, use_colors)
        }
        _ => favoritism::output::format_score_line(result.score),
    };
    println!("{}", output);

    std::process::exit(EXIT_SUCCESS);
}
