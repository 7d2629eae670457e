/***************************************/
/*        3rd party libraries          */
/***************************************/
use clap::{Parser, Subcommand};
use log::{error, info};
use std::fs;
use std::path::PathBuf;

/***************************************/
/*             Local crate             */
/***************************************/
use elevator_dispatch::config::load_config;
use elevator_dispatch::hr::{HRSampler, HrStorage};
use elevator_dispatch::request::{RawRequest, Request};
use elevator_dispatch::system::ElevatorSystem;

/***************************************/
/*                 CLI                 */
/***************************************/
#[derive(Parser)]
#[command(name = "elevator-dispatch")]
struct Cli {
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a JSON array of requests through the dispatcher, printing
    /// `render()` after each one.
    Dispatch {
        #[arg(long)]
        requests: PathBuf,
    },
    /// Sample a fresh HR dataset and print the two analytical queries.
    SampleHr,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Dispatch { requests } => run_dispatch(&config, &requests),
        Command::SampleHr => run_sample_hr(&config),
    };

    if let Err(e) = result {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run_dispatch(config: &elevator_dispatch::config::Config, requests_path: &PathBuf) -> Result<(), String> {
    let mut system = ElevatorSystem::new(
        config.dispatch.n_elevators,
        config.dispatch.n_floors,
        chrono::Duration::seconds(config.dispatch.wait_secs),
    );

    let contents = fs::read_to_string(requests_path).map_err(|e| e.to_string())?;
    let raw_requests: Vec<RawRequest> = serde_json::from_str(&contents).map_err(|e| e.to_string())?;

    for raw in raw_requests {
        let request: Request = raw.try_into().map_err(|e| format!("{e}"))?;
        system.take_request(request).map_err(|e| format!("{e}"))?;
        print!("{}", system.render());
    }
    Ok(())
}

fn run_sample_hr(config: &elevator_dispatch::config::Config) -> Result<(), String> {
    let min_date = config.sampler.min_date.parse().map_err(|e| format!("{e}"))?;
    let max_date = config.sampler.max_date.parse().map_err(|e| format!("{e}"))?;

    let mut sampler = HRSampler::new(config.sampler.seed, min_date, max_date, config.sampler.max_rejection_attempts);
    let dataset = sampler
        .sample_all(config.sampler.n_personas, config.sampler.n_conyuges, config.sampler.n_hijos)
        .map_err(|e| e.to_string())?;

    info!(
        "sampled {} personas, {} conyuges, {} hijo edges",
        dataset.personas.len(),
        dataset.conyuges.len(),
        dataset.hijos.len()
    );

    let mut storage = HrStorage::open_in_memory().map_err(|e| e.to_string())?;
    storage.populate(&dataset).map_err(|e| e.to_string())?;

    println!("avg_children_per_marriage = {}", storage.avg_children_per_marriage().map_err(|e| e.to_string())?);
    let winner = storage.person_with_max_grandchildren().map_err(|e| e.to_string())?;
    println!("person_with_max_grandchildren.id = {}", winner.id);

    Ok(())
}
