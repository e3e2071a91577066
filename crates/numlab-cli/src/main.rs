use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;
use std::str::FromStr;

use numlab_cli::commands::compare::{run_compare, CompareConfig};
use numlab_cli::commands::markov::run_markov;
use numlab_cli::commands::project::{run_project, ProjectConfig};
use numlab_cli::util::{load_json_config, write_json};
use numlab_core::config::SimulationConfig;
use numlab_core::linalg::GramSchmidt;

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("NUMLAB_LOG", "error,numlab=info"))
        .init();

    let config_arg = |help: &'static str| {
        Arg::new("config")
            .help(help)
            .required(false)
            .value_parser(clap::value_parser!(PathBuf))
            .value_hint(ValueHint::FilePath)
    };
    let output_arg = Arg::new("output_file")
        .short('o')
        .long("output")
        .help("Path to write the JSON report. Defaults to stdout.")
        .value_parser(clap::value_parser!(PathBuf))
        .value_hint(ValueHint::FilePath);
    let simulation_args = [
        Arg::new("n")
            .short('n')
            .long("steps")
            .help("Length of each simulated sequence. Overrides the config file.")
            .value_parser(clap::value_parser!(usize)),
        Arg::new("h_h")
            .long("hh")
            .help("Probability of staying in state 1. Overrides the config file.")
            .value_parser(clap::value_parser!(f64)),
        Arg::new("l_l")
            .long("ll")
            .help("Probability of staying in state 0. Overrides the config file.")
            .value_parser(clap::value_parser!(f64)),
        Arg::new("seed")
            .long("seed")
            .help("Seed of the random stream. Overrides the config file.")
            .value_parser(clap::value_parser!(u64)),
    ];

    let matches = Command::new("numlab")
        .version(clap::crate_version!())
        .about("Two-state Markov chains and Gram-Schmidt projections")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("markov")
                .about("Simulate a two-state Markov chain and summarize it")
                .arg(config_arg("Path to a JSON simulation config"))
                .args(simulation_args.clone())
                .arg(
                    Arg::new("states")
                        .long("states")
                        .help("Include the full state sequence in the report.")
                        .action(ArgAction::SetTrue),
                )
                .arg(output_arg.clone()),
        )
        .subcommand(
            Command::new("compare")
                .about("Time the naive, vectorized and parallel simulation kernels")
                .arg(config_arg("Path to a JSON comparison config"))
                .args(simulation_args)
                .arg(
                    Arg::new("chains")
                        .long("chains")
                        .help("Number of independent chains per batch.")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("repeats")
                        .long("repeats")
                        .help("Number of timed runs per kernel.")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(output_arg.clone()),
        )
        .subcommand(
            Command::new("project")
                .about("Orthonormalize the columns of X and project y onto their span")
                .arg(
                    Arg::new("config")
                        .help("Path to a JSON file with `x` (rows) and `y`")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("method")
                        .long("method")
                        .help("Orthogonalization algorithm. Overrides the config file.")
                        .value_parser(["modified", "classical", "projection_matrix"]),
                )
                .arg(output_arg),
        )
        .get_matches();

    let outcome = match matches.subcommand() {
        Some(("markov", sub_m)) => handle_markov(sub_m),
        Some(("compare", sub_m)) => handle_compare(sub_m),
        Some(("project", sub_m)) => handle_project(sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    };

    if let Err(e) = outcome {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn apply_simulation_overrides(config: &mut SimulationConfig, matches: &ArgMatches) {
    if let Some(&n) = matches.get_one::<usize>("n") {
        config.n = n;
    }
    if let Some(&h_h) = matches.get_one::<f64>("h_h") {
        config.h_h = h_h;
    }
    if let Some(&l_l) = matches.get_one::<f64>("l_l") {
        config.l_l = l_l;
    }
    if let Some(&seed) = matches.get_one::<u64>("seed") {
        config.seed = seed;
    }
}

fn handle_markov(matches: &ArgMatches) -> Result<()> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => {
            log::info!("[numlab::markov] Using config: {:?}", path);
            load_json_config::<SimulationConfig, _>(path)?
        }
        None => SimulationConfig::default(),
    };
    apply_simulation_overrides(&mut config, matches);
    if matches.get_one::<PathBuf>("config").is_none() {
        eprintln!(
            "[numlab::markov] No config provided; using:\n{}",
            serde_json::to_string_pretty(&config).unwrap_or_default()
        );
    }

    let summary = run_markov(&config, matches.get_flag("states"))?;
    write_json(&summary, matches.get_one::<PathBuf>("output_file").map(PathBuf::as_path))
}

fn handle_compare(matches: &ArgMatches) -> Result<()> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => {
            log::info!("[numlab::compare] Using config: {:?}", path);
            load_json_config::<CompareConfig, _>(path)?
        }
        None => CompareConfig::default(),
    };
    let mut simulation = config.simulation();
    apply_simulation_overrides(&mut simulation, matches);
    config.set_simulation(&simulation);
    if let Some(&chains) = matches.get_one::<usize>("chains") {
        config.chains = chains;
    }
    if let Some(&repeats) = matches.get_one::<usize>("repeats") {
        config.repeats = repeats;
    }

    let timings = run_compare(&config)?;
    write_json(&timings, matches.get_one::<PathBuf>("output_file").map(PathBuf::as_path))
}

fn handle_project(matches: &ArgMatches) -> Result<()> {
    let config_path = matches
        .get_one::<PathBuf>("config")
        .ok_or_else(|| anyhow::anyhow!("missing config path"))?;
    let mut config: ProjectConfig = load_json_config(config_path)?;
    if let Some(method) = matches.get_one::<String>("method") {
        config.method = GramSchmidt::from_str(method).map_err(anyhow::Error::msg)?;
    }

    let report = run_project(&config)?;
    write_json(&report, matches.get_one::<PathBuf>("output_file").map(PathBuf::as_path))
}
