//! Dataset generator binary: renders terrain samples and their material masks.
//!
//! Usage: cargo run --release --bin generate_dataset -- [OPTIONS]
//!
//! Options:
//!   --config <FILE>    JSON batch configuration; flags below override it
//!   --samples <N>      Number of samples, 1..=10000 (default: 1000)
//!   --top-view         Also render an orthographic top-down view per sample
//!   --output <DIR>     Output root (default: "TerrainLayerImages")
//!   --seed <SEED>      Batch seed (default: 12345)
//!   --jobs <N>         Samples generated in parallel (default: 1)
//!   --assets <DIR>     Material texture directory (default: flat colors)
//!   --prefix <NAME>    File name prefix (default: "MarsTerrain")
//!
//! Output structure:
//!   <output>/
//!     Images/     MarsTerrain_00000.png ...
//!     Labels/     MarsTerrain_MASK_00000.png ...
//!     Topviews/   TopViewMarsTerrain_00000.png ...   (with --top-view)

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use regolith::core::logging;
use regolith::generation::{BatchConfig, BatchOrchestrator};

fn main() -> ExitCode {
    logging::init();

    let args: Vec<String> = std::env::args().collect();

    let config_path = match parse_str_arg(&args, "--config") {
        Ok(path) => path,
        Err(e) => {
            log::error!("Invalid arguments: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let mut config = match config_path {
        Some(path) => match BatchConfig::from_json_file(Path::new(&path)) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load config {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => BatchConfig::default(),
    };

    if let Err(e) = apply_args(&args, &mut config) {
        log::error!("Invalid arguments: {}", e);
        return ExitCode::FAILURE;
    }

    println!("=== Regolith Dataset Generator ===");
    println!("Samples:  {}", config.sample_count);
    println!("Seed:     {}", config.seed);
    println!("Jobs:     {}", config.jobs);
    println!("Top view: {}", if config.enable_top_view { "on" } else { "off" });
    println!("Output:   {}", config.output_dir.display());
    println!();

    let report = match BatchOrchestrator::new().run(&config) {
        Ok(report) => report,
        Err(e) => {
            log::error!("Generation aborted: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!();
    println!("=== Done ===");
    println!(
        "{}/{} samples in {:.1}s",
        report.succeeded(),
        report.requested,
        report.elapsed.as_secs_f64()
    );
    for failure in &report.failures {
        println!("  failed: sample {} (seed {}): {}", failure.index, failure.seed, failure.error);
    }

    if report.is_complete() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Apply command-line overrides on top of the loaded configuration.
fn apply_args(args: &[String], config: &mut BatchConfig) -> Result<(), String> {
    if let Some(samples) = parse_u32_arg(args, "--samples")? {
        config.sample_count = samples;
    }
    if args.iter().any(|a| a == "--top-view") {
        config.enable_top_view = true;
    }
    if let Some(output) = parse_str_arg(args, "--output")? {
        config.output_dir = PathBuf::from(output);
    }
    if let Some(seed) = parse_u64_arg(args, "--seed")? {
        config.seed = seed;
    }
    if let Some(jobs) = parse_usize_arg(args, "--jobs")? {
        config.jobs = jobs;
    }
    if let Some(assets) = parse_str_arg(args, "--assets")? {
        config.assets_dir = Some(PathBuf::from(assets));
    }
    if let Some(prefix) = parse_str_arg(args, "--prefix")? {
        config.prefix = prefix;
    }
    Ok(())
}

fn parse_u32_arg(args: &[String], flag: &str) -> Result<Option<u32>, String> {
    parse_number_arg(args, flag)
}

fn parse_u64_arg(args: &[String], flag: &str) -> Result<Option<u64>, String> {
    parse_number_arg(args, flag)
}

fn parse_usize_arg(args: &[String], flag: &str) -> Result<Option<usize>, String> {
    parse_number_arg(args, flag)
}

fn parse_number_arg<T>(args: &[String], flag: &str) -> Result<Option<T>, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    parse_str_arg(args, flag)?
        .map(|s| s.parse().map_err(|e| format!("{} {:?}: {}", flag, s, e)))
        .transpose()
}

/// Value following `flag`. A flag given without a value is an error.
fn parse_str_arg(args: &[String], flag: &str) -> Result<Option<String>, String> {
    let Some(i) = args.iter().position(|a| a == flag) else {
        return Ok(None);
    };
    match args.get(i + 1) {
        Some(value) if !value.starts_with("--") => Ok(Some(value.clone())),
        _ => Err(format!("{} requires a value", flag)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("generate_dataset")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_absent_flag_keeps_default() {
        assert_eq!(parse_u32_arg(&args(&["--top-view"]), "--samples"), Ok(None));
        let mut config = BatchConfig::default();
        apply_args(&args(&[]), &mut config).expect("no flags should apply cleanly");
        assert_eq!(config, BatchConfig::default());
    }

    #[test]
    fn test_well_formed_flags_apply() {
        let mut config = BatchConfig::default();
        apply_args(
            &args(&["--samples", "25", "--seed", "7", "--jobs", "4", "--top-view", "--prefix", "Run"]),
            &mut config,
        )
        .expect("flags should parse");
        assert_eq!(config.sample_count, 25);
        assert_eq!(config.seed, 7);
        assert_eq!(config.jobs, 4);
        assert!(config.enable_top_view);
        assert_eq!(config.prefix, "Run");
    }

    #[test]
    fn test_malformed_numbers_are_rejected() {
        for bad in ["-5", "1e3", "abc", ""] {
            assert!(parse_u32_arg(&args(&["--samples", bad]), "--samples").is_err(), "{:?}", bad);
        }
        assert!(parse_u64_arg(&args(&["--seed", "abc"]), "--seed").is_err());
        assert!(parse_usize_arg(&args(&["--jobs", "two"]), "--jobs").is_err());
    }

    #[test]
    fn test_overflowing_numbers_are_rejected() {
        assert!(parse_u32_arg(&args(&["--samples", "99999999999"]), "--samples").is_err());
        assert!(parse_u64_arg(&args(&["--seed", "18446744073709551616"]), "--seed").is_err());
    }

    #[test]
    fn test_missing_value_is_rejected() {
        assert!(parse_u32_arg(&args(&["--samples"]), "--samples").is_err());
        assert!(parse_str_arg(&args(&["--output", "--top-view"]), "--output").is_err());
    }

    #[test]
    fn test_bad_flag_leaves_config_unrun() {
        let mut config = BatchConfig::default();
        let err = apply_args(&args(&["--samples", "-5"]), &mut config).expect_err("should be rejected");
        assert!(err.contains("--samples"));
    }
}
