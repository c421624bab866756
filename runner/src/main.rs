use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use scheduler::{QuantumValue, Simulation, SimulationRequest, Step, Summary};

mod output;
use output::{emit, Message, OutputFormat};

/// Streams a CPU scheduling simulation as JSON messages, one per line
#[derive(Parser, Debug)]
#[command(name = "runner", version)]
struct Args {
    /// Simulation request (JSON); reads stdin when missing or `-`
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Overrides the request's algorithm (fcfs, sjf_preemptive, round_robin, multi_level)
    #[arg(short, long)]
    algorithm: Option<String>,

    /// Overrides the request's round robin quantum
    #[arg(short, long)]
    quantum: Option<String>,

    /// Milliseconds to wait after every progress step
    #[arg(long, default_value_t = 0)]
    pace_ms: u64,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

/// How the step stream is delivered
struct StreamOptions {
    pace: Duration,
    format: OutputFormat,
}

fn read_request(input: Option<&PathBuf>) -> Result<SimulationRequest> {
    let text = match input {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("reading request from {}", path.display()))?,
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("reading request from stdin")?;
            text
        }
    };

    Ok(SimulationRequest::from_json(&text)?)
}

fn apply_overrides(request: &mut SimulationRequest, args: &Args) {
    if let Some(algorithm) = &args.algorithm {
        request.algorithm = algorithm.clone();
    }
    if let Some(quantum) = &args.quantum {
        request.quantum = Some(QuantumValue::Text(quantum.clone()));
    }
}

/// Runs `request` and writes every message to `out`
fn stream(request: &SimulationRequest, options: &StreamOptions, out: &mut dyn Write) -> Result<()> {
    let simulation = Simulation::from_request(request)?;
    log::info!(
        "streaming {} steps for {} processes",
        simulation.discipline().algorithm(),
        request.processes.len()
    );

    for step in simulation {
        match &step {
            Step::FinalStats { final_stats } => {
                let summary = Summary::from_final_stats(final_stats);
                log::info!(
                    "average waiting {:.2}, average turnaround {:.2}",
                    summary.avg_wait,
                    summary.avg_turnaround
                );
                emit(out, options.format, &Message::SimulationEnd(summary))?;
            }
            _ => {
                emit(out, options.format, &Message::SimulationUpdate(&step))?;
                if step.is_progress() && !options.pace.is_zero() {
                    out.flush()?;
                    thread::sleep(options.pace);
                }
            }
        }
    }

    out.flush()?;
    Ok(())
}

fn run(args: &Args, out: &mut dyn Write) -> Result<()> {
    let mut request = read_request(args.input.as_ref())?;
    apply_overrides(&mut request, args);

    let options = StreamOptions {
        pace: Duration::from_millis(args.pace_ms),
        format: args.format,
    };

    stream(&request, &options, out)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match run(&args, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("simulation failed: {:#}", err);
            if let Err(emit_err) = emit(&mut out, args.format, &Message::Error(format!("{:#}", err))) {
                log::error!("could not report the error: {}", emit_err);
            }
            ExitCode::FAILURE
        }
    }
}
