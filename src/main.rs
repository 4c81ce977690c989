use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::process;
use std::sync::Arc;
use tracing::{error, info, Level};
use weightforge::config::Config;
use weightforge::landscape::FitnessLandscape;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// CSV dataset; the built-in Iris set when omitted
    #[arg(global = true, short, long)]
    data: Option<String>,

    #[arg(global = true, long, default_value_t = 0.2)]
    test_size: f64,

    #[arg(global = true, long, default_value_t = 42)]
    split_seed: u64,

    #[arg(global = true, short = 'S', long)]
    seed: Option<u64>,

    #[arg(global = true, short, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Run(cmd::run::RunArgs),
    Compare(cmd::compare::CompareArgs),
}

fn resolve_config(path: Option<&str>, cli_config: &Config, sub_matches: &ArgMatches) -> Config {
    let config = match path {
        Some(p) => {
            info!("Loading config from: {}", p);
            let mut file_config = Config::load_from_file(p).unwrap_or_else(|e| {
                error!("{}", e);
                process::exit(1);
            });
            file_config.merge_from_cli(cli_config, sub_matches);
            file_config
        }
        None => cli_config.clone(),
    };

    if let Err(e) = config.validate() {
        error!("{}", e);
        process::exit(1);
    }
    config
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    info!("Initializing WeightForge...");

    let (cli_config, sub_name) = match &cli.command {
        Commands::Run(args) => (&args.config, "run"),
        Commands::Compare(args) => (&args.config, "compare"),
    };
    let sub_matches = matches
        .subcommand_matches(sub_name)
        .unwrap_or_else(|| {
            error!("missing arguments for '{}'", sub_name);
            process::exit(2);
        });
    let config = resolve_config(cli.config.as_deref(), cli_config, sub_matches);

    let hidden_size = config.network.hidden_size;
    let built = match &cli.data {
        Some(path) => FitnessLandscape::from_csv(path, cli.test_size, cli.split_seed, hidden_size),
        None => FitnessLandscape::iris(cli.test_size, cli.split_seed, hidden_size),
    };
    let landscape = match built {
        Ok(l) => Arc::new(l),
        Err(e) => {
            error!(
                "Failed to build fitness landscape from '{}':",
                cli.data.as_deref().unwrap_or("built-in iris")
            );
            error!("   {}", e);
            process::exit(1);
        }
    };

    let outcome = match cli.command {
        Commands::Run(args) => cmd::run::run(args, landscape, config, cli.seed),
        Commands::Compare(args) => cmd::compare::run(args, landscape, config, cli.seed),
    };

    if let Err(e) = outcome {
        error!("{}", e);
        process::exit(1);
    }
}
