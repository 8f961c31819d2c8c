//! Balance simulator CLI.
//!
//! Runs Monte Carlo event simulations against the real engine to check how
//! long the prize stock survives and how the rigging shapes outcomes.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                      # default: 100 events x 300 rounds
//!   cargo run --bin simulate -- -n 20 -r 500      # 20 events, 500 rounds each
//!   cargo run --bin simulate -- --seed 42         # reproducible batch
//!   cargo run --bin simulate -- --greedy          # crowd chasing the top tiers

use moonshot::build_info::{BUILD_COMMIT, BUILD_DATE};
use moonshot::simulator::{run_simulation, SimConfig};
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              MOONSHOT BALANCE SIMULATOR                       ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!("  build {} ({})", BUILD_COMMIT, BUILD_DATE);
    println!();
    println!("Configuration:");
    println!("  Events:         {}", config.num_runs);
    println!("  Rounds/event:   {}", config.rounds_per_run);
    println!(
        "  Target window:  {:.2}x - {:.2}x",
        config.target_min, config.target_max
    );
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);

    println!("{}", report.to_text());

    if args.iter().any(|a| a == "--json") {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, report.to_json()) {
            Ok(()) => println!("Report written to {}", filename),
            Err(e) => eprintln!("Could not write {}: {}", filename, e),
        }
    }
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = if args.iter().any(|a| a == "--greedy") {
        SimConfig::greedy_crowd()
    } else {
        SimConfig::default()
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if let Some(v) = args.get(i + 1).and_then(|s| s.parse().ok()) {
                    config.num_runs = v;
                    i += 1;
                }
            }
            "-r" | "--rounds" => {
                if let Some(v) = args.get(i + 1).and_then(|s| s.parse().ok()) {
                    config.rounds_per_run = v;
                    i += 1;
                }
            }
            "--seed" => {
                if let Some(v) = args.get(i + 1).and_then(|s| s.parse().ok()) {
                    config.seed = Some(v);
                    i += 1;
                }
            }
            "-q" | "--quiet" => config.verbosity = 0,
            _ => {}
        }
        i += 1;
    }
    config
}
