// Reliability sweep driver - run sweeps, optionally from YAML scenarios
//
// Usage:
//   cargo run --bin reliability_sweep
//   cargo run --bin reliability_sweep scenarios/default.yaml
//   cargo run --bin reliability_sweep scenarios/default.yaml --seed 0x1234...
//   cargo run --bin reliability_sweep -- --csv curves.csv

use ec_stripe::{SweepConfig, SweepRunner};
use log::info;
use simple_logger::SimpleLogger;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

fn main() {
    SimpleLogger::new().init().unwrap();

    let args: Vec<String> = env::args().collect();

    let mut scenario: Option<PathBuf> = None;
    let mut seed: Option<[u8; 32]> = None;
    let mut csv: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                match args.get(i) {
                    Some(hex) => seed = Some(parse_seed_hex(hex)),
                    None => usage(&args[0]),
                }
            }
            "--csv" => {
                i += 1;
                match args.get(i) {
                    Some(path) => csv = Some(PathBuf::from(path)),
                    None => usage(&args[0]),
                }
            }
            arg if arg.starts_with("--") => usage(&args[0]),
            arg => scenario = Some(PathBuf::from(arg)),
        }
        i += 1;
    }

    // Build configuration
    let mut config = match &scenario {
        Some(path) => {
            info!("loading scenario from {}", path.display());

            let yaml_content = fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("Failed to read {}: {}", path.display(), e);
                process::exit(1);
            });

            serde_yaml::from_str::<SweepConfig>(&yaml_content).unwrap_or_else(|e| {
                eprintln!("Failed to parse {}: {}", path.display(), e);
                process::exit(1);
            })
        }
        None => SweepConfig::default(),
    };

    if seed.is_some() {
        config.seed = seed;
    }

    info!("Configuration:");
    info!("  Nodes: {}", config.nodes);
    info!("  Rounds per k: {}", config.rounds);
    info!("  k range: {}..={}", config.k_min, config.k_max);
    info!("  Thresholds: {:?}", config.thresholds);
    info!("  Drift prefix: {}", config.drift_nodes);
    info!("  Drift limit: {}", config.drift_limit);

    let runner = SweepRunner::new(config).unwrap_or_else(|e| {
        eprintln!("Invalid configuration: {}", e);
        process::exit(1);
    });

    info!("Starting sweep...");
    let report = runner.run_all();

    report.print_summary();

    if let Some(path) = csv {
        report.write_csv(&path).unwrap_or_else(|e| {
            eprintln!("Failed to write {}: {}", path.display(), e);
            process::exit(1);
        });
        info!("curves written to {}", path.display());
    }

    info!("✓ Sweep complete!");
}

fn usage(program: &str) -> ! {
    eprintln!(
        "Usage: {} [scenario.yaml] [--seed SEED_HEX] [--csv OUT.csv]",
        program
    );
    eprintln!("\nExamples:");
    eprintln!("  {} scenarios/default.yaml", program);
    eprintln!("  {} --seed 0x123456... --csv curves.csv", program);
    process::exit(1);
}

fn parse_seed_hex(hex: &str) -> [u8; 32] {
    let hex = hex.strip_prefix("0x").unwrap_or(hex);
    let mut seed = [0u8; 32];

    for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
        if i >= 32 {
            break;
        }
        let byte_str = std::str::from_utf8(chunk).unwrap_or_else(|e| {
            eprintln!("Invalid hex seed: {}", e);
            process::exit(1);
        });
        seed[i] = u8::from_str_radix(byte_str, 16).unwrap_or_else(|e| {
            eprintln!("Invalid hex seed: {}", e);
            process::exit(1);
        });
    }

    seed
}
