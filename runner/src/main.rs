use std::path::Path;
use std::process;

use anyhow::{bail, Context, Result};
use clap::{App, Arg, ArgMatches};
use log::{info, warn};

use cpu_scheduler::{simulate, Algorithm};

mod loader;
mod logger;
mod report;

use loader::load_workload;
use report::{format_gantt, format_report};

fn build_cli() -> App<'static, 'static> {
    App::new("sched-sim")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Simulates CPU scheduling algorithms over a JSON workload")
        .arg(Arg::with_name("input")
            .required(true)
            .index(1)
            .help("JSON file with the processes, a list or {\"processes\": [...], \"quantum\": n}"))
        .arg(Arg::with_name("algorithm")
            .short("a")
            .long("algorithm")
            .takes_value(true)
            .default_value("fcfs")
            .validator(valid_algorithm)
            .help("fcfs, fcfs-io, sjf, rr, rr:<quantum>, priority or priority-preemptive"))
        .arg(Arg::with_name("quantum")
            .short("q")
            .long("quantum")
            .takes_value(true)
            .validator(valid_quantum)
            .help("Round Robin quantum, overrides the one in the algorithm or the file"))
        .arg(Arg::with_name("json")
            .long("json")
            .help("Print the whole result as JSON instead of a report"))
        .arg(Arg::with_name("gantt")
            .short("g")
            .long("gantt")
            .conflicts_with("json")
            .help("Append a text Gantt chart to the report"))
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .help("Log to stderr, repeat for more detail"))
}

fn valid_algorithm(value: String) -> Result<(), String> {
    value
        .parse::<Algorithm>()
        .map(|_| ())
        .map_err(|err| err.to_string())
}

fn valid_quantum(value: String) -> Result<(), String> {
    match value.parse::<usize>() {
        Ok(quantum) if quantum > 0 => Ok(()),
        _ => Err(format!("invalid quantum {}: must be a positive integer", value)),
    }
}

/// Picks the algorithm, the command line quantum wins over the file's
fn resolve_algorithm(matches: &ArgMatches, file_quantum: Option<usize>) -> Result<Algorithm> {
    let spec = matches.value_of("algorithm").unwrap_or("fcfs");
    let mut algorithm: Algorithm = spec.parse()?;

    let quantum = match matches.value_of("quantum") {
        Some(value) => Some(value.parse::<usize>().context("reading --quantum")?),
        None => file_quantum,
    };

    if let Some(quantum) = quantum {
        match algorithm {
            Algorithm::RoundRobin { .. } => algorithm = Algorithm::round_robin(quantum)?,
            _ if matches.is_present("quantum") => {
                warn!("--quantum is only used by Round Robin, ignoring it for {}", algorithm)
            }
            _ => {}
        }
    }

    Ok(algorithm)
}

fn run(matches: &ArgMatches) -> Result<()> {
    let path = match matches.value_of("input") {
        Some(path) => Path::new(path),
        None => bail!("no input file given"),
    };

    let workload = load_workload(path)?;
    let algorithm = resolve_algorithm(matches, workload.quantum)?;

    info!("loaded {} processes from {}", workload.processes.len(), path.display());

    let result = simulate(algorithm, &workload.processes)
        .with_context(|| format!("{} failed on {}", algorithm, path.display()))?;

    if matches.is_present("json") {
        let json = serde_json::to_string_pretty(&result).context("serializing the result")?;
        println!("{}", json);
        return Ok(());
    }

    println!("{}", format_report(&result, &algorithm.describe()).context("formatting the report")?);

    if matches.is_present("gantt") {
        println!("{}", format_gantt(&result).context("drawing the gantt chart")?);
    }

    Ok(())
}

fn main() {
    let matches = build_cli().get_matches();

    logger::init(matches.occurrences_of("verbose"));

    if let Err(err) = run(&matches) {
        eprintln!("error: {:#}", err);
        process::exit(1);
    }
}
