//! Trace simulator CLI.
//!
//! This binary runs one simulation. It performs:
//! 1. **Input loading:** Reads the trace, vector table, delay table and program catalog.
//! 2. **Simulation:** Boots the init process and interprets the trace, following EXEC into
//!    `<program>.txt` traces in the program directory.
//! 3. **Output:** Writes `execution.txt` and `system_status.txt` and optionally prints statistics.
//!
//! Any failure prints a fatal message and exits with status 1 before outputs are written.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use trapsim_core::config::Config;
use trapsim_core::sim::{self, DirectorySource, InputPaths, Inputs, Simulation};
use trapsim_core::SimResult;

#[derive(Parser, Debug)]
#[command(
    name = "trapsim",
    author,
    version,
    about = "Interrupt-driven process executor simulator",
    long_about = "Replay a trace of CPU bursts, system calls, I/O completions, forks and execs, and \
                  log the kernel events they cause.\n\nExamples:\n  \
                  trapsim trace.txt vector_table.txt device_table.txt external_files.txt\n  \
                  trapsim trace.txt vectors.txt delays.txt programs.txt --output-dir out --stats"
)]
struct Cli {
    /// Top-level trace file.
    trace: PathBuf,

    /// Interrupt vector table, one ISR address per line.
    vectors: PathBuf,

    /// Device delay table, one ISR duration per line.
    delays: PathBuf,

    /// External program catalog of `name, size` lines.
    programs: PathBuf,

    /// Directory that receives execution.txt and system_status.txt.
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Directory holding the `<program>.txt` traces loaded by EXEC.
    #[arg(short, long, default_value = ".")]
    program_dir: PathBuf,

    /// JSON configuration overriding the built-in defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the EXEC micro-step generator (overrides the configuration).
    #[arg(long)]
    seed: Option<u64>,

    /// Print run statistics after the simulation.
    #[arg(long)]
    stats: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[!] FATAL: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Loads configuration and inputs, runs the simulation and writes both logs.
fn run(cli: &Cli) -> SimResult<()> {
    let mut config = match &cli.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };
    if let Some(seed) = cli.seed {
        config.exec.seed = seed;
    }
    config.validate()?;

    let inputs = Inputs::load(&InputPaths {
        trace: cli.trace.clone(),
        vectors: cli.vectors.clone(),
        delays: cli.delays.clone(),
        programs: cli.programs.clone(),
    })?;
    let (trace, tables) = inputs.into_parts();
    if trace.is_empty() {
        info!(trace = %cli.trace.display(), "trace is empty");
    }

    let source = DirectorySource::new(&cli.program_dir);
    debug!(program_dir = %source.dir().display(), "program traces");
    let mut simulation = Simulation::new(config, tables, Box::new(source));
    let outcome = simulation.run(&trace)?;

    let (execution_path, status_path) =
        sim::write_outputs(&cli.output_dir, &outcome.execution, &outcome.status)?;
    info!(
        time = outcome.time,
        execution = %execution_path.display(),
        status = %status_path.display(),
        "simulation complete"
    );

    if cli.stats {
        simulation.stats().print();
    }
    Ok(())
}
