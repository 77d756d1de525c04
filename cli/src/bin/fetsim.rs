//! The simulator's command-line front-end.
//!
//! With no arguments, runs the built-in CMOS inverter demo. Given a
//! netlist path and a vector path, simulates every row of the vector
//! against the netlist (no iteration cap) and prints the input grid
//! followed by the output grid.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Switch-level circuit simulator.
#[derive(Parser)]
struct Args {
    /// Netlist file. Omit both paths to run the built-in inverter demo.
    netlist: Option<PathBuf>,
    /// Test-vector file giving one row of input states per time step.
    vector: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match (args.netlist, args.vector) {
        (None, None) => {
            cli::run_inverter_demo();
            ExitCode::SUCCESS
        }
        (Some(netlist_path), Some(vector_path)) => {
            match run_from_files(&netlist_path, &vector_path) {
                Ok(()) => ExitCode::SUCCESS,
                Err(message) => {
                    log::error!("{message}");
                    ExitCode::FAILURE
                }
            }
        }
        _ => {
            log::error!("both a netlist path and a vector path are required together");
            ExitCode::FAILURE
        }
    }
}

fn run_from_files(netlist_path: &PathBuf, vector_path: &PathBuf) -> Result<(), String> {
    let netlist = netfmt::read_netlist_file(netlist_path).map_err(|e| e.to_string())?;
    let inputs = netfmt::read_vector_file(vector_path).map_err(|e| e.to_string())?;

    let run = cli::simulate_vector(&netlist, &inputs, 0).map_err(|e| e.to_string())?;

    print!("{}", netfmt::write_vector(&inputs));
    println!();
    print!("{}", netfmt::write_vector(&run.outputs));
    Ok(())
}
