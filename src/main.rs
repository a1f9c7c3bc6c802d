//! SP Pipeline Simulator CLI.
//!
//! Loads a hexadecimal program image into both SRAMs, runs the clock
//! until HLT retires, and leaves behind the cycle trace and the two
//! SRAM dumps. Configuration comes from an optional TOML file; every
//! setting has a default.

use clap::Parser;
use std::path::Path;
use std::{fs, process};

use sp_emulator::config::Config;
use sp_emulator::sim::{loader, RunOutcome, Simulator};

/// Command-line arguments for the SP simulator.
#[derive(Parser, Debug)]
#[command(author, version, about = "SP Cycle-Accurate Pipeline Simulator")]
struct Args {
    /// Program image: one 8-digit hex word per line, up to 65536 lines.
    program: String,

    #[arg(short, long)]
    config: Option<String>,

    #[arg(long)]
    stats_json: Option<String>,
}

fn main() {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("[!] FATAL: could not read config '{}': {}", path, e);
                process::exit(1);
            });
            toml::from_str(&text).unwrap_or_else(|e| {
                eprintln!("[!] FATAL: could not parse config '{}': {}", path, e);
                process::exit(1);
            })
        }
        None => Config::default(),
    };

    println!("SP Simulator Configuration");
    println!("--------------------------");
    println!("  Program:      {}", args.program);
    println!("  Cycle Trace:  {}", if config.trace_enabled() {
        config.files.cycle_trace.as_str()
    } else {
        "(disabled)"
    });
    println!("  SRAMI Dump:   {}", config.files.srami_dump);
    println!("  SRAMD Dump:   {}", config.files.sramd_dump);
    if config.general.max_cycles > 0 {
        println!("  Cycle Limit:  {}", config.general.max_cycles);
    }
    println!("--------------------------");

    let image = loader::load_image(Path::new(&args.program)).unwrap_or_else(|e| {
        eprintln!("[!] FATAL: {}", e);
        process::exit(1);
    });
    println!("[Loader] program image: {} words", image.len());

    let mut sim = Simulator::new(&config, &image).unwrap_or_else(|e| {
        eprintln!("[!] FATAL: {}", e);
        process::exit(1);
    });

    match sim.run() {
        Ok(RunOutcome::Halted) => {
            println!("[Sim] HLT retired after {} cycles", sim.cpu.stats.cycles);
        }
        Ok(RunOutcome::CycleLimit) => {
            println!(
                "[Sim] cycle limit reached after {} cycles without HLT",
                sim.cpu.stats.cycles
            );
        }
        Err(e) => {
            eprintln!("[!] FATAL: {}", e);
            process::exit(1);
        }
    }

    sim.cpu.stats.print();

    if let Some(path) = &args.stats_json {
        let json = serde_json::to_string_pretty(&sim.cpu.stats)
            .expect("stats serialization cannot fail");
        if let Err(e) = fs::write(path, json) {
            eprintln!("[!] FATAL: could not write '{}': {}", path, e);
            process::exit(1);
        }
        println!("[Sim] statistics written to {}", path);
    }
}
