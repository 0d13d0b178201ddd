//! `xorlock`: lock bench netlists with XOR key gates and check the result.

mod cli;
mod report;

use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rand_chacha::ChaCha20Rng;
use rand_chacha::rand_core::SeedableRng;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use xorlock_lock::harness::{self, HarnessConfig};
use xorlock_lock::{KeyBits, fault_log, insert, select, wrong_key_suite};
use xorlock_netlist::{Netlist, bench};

use crate::cli::{Cli, Command, LockCommand, VerifyCommand};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Lock(cmd) => lock(&cmd),
        Command::Verify(cmd) => verify(&cmd),
        Command::Info(cmd) => {
            let netlist = read_netlist(&cmd.file)?;
            report::print_netlist_summary(&netlist);
            Ok(())
        }
    }
}

fn read_netlist(path: &Path) -> Result<Netlist> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read netlist {}", path.display()))?;
    let netlist =
        bench::parse(&text).with_context(|| format!("failed to parse {}", path.display()))?;
    info!(path = %path.display(), gates = netlist.num_gates(), "loaded netlist");
    Ok(netlist)
}

fn default_title(bench_path: &Path, key_gates: usize) -> String {
    let name = bench_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "netlist".to_owned());
    format!("Locked {name} with {key_gates} key-gates")
}

fn spinner(msg: &'static str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner} {msg} [{elapsed_precise}]")?);
    pb.set_message(msg);
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

fn lock(cmd: &LockCommand) -> Result<()> {
    println!(
        "Locking {} -> {}",
        cmd.bench.display(),
        cmd.output.display()
    );
    let start = Instant::now();

    let original = read_netlist(&cmd.bench)?;

    // Lossy: logs may carry stray non-UTF-8 bytes.
    let log_bytes = fs::read(&cmd.log)
        .with_context(|| format!("failed to read fault log {}", cmd.log.display()))?;
    let log = String::from_utf8_lossy(&log_bytes);
    let counts = fault_log::parse_for(&original, &log);
    info!(
        signals = counts.len(),
        detections = counts.total(),
        "read fault log"
    );

    let plan = select(&original, &counts, cmd.keys);
    if plan.len() < cmd.keys {
        warn!(
            requested = cmd.keys,
            available = plan.len(),
            "fewer internal nodes than requested key gates"
        );
    }

    let locked = insert(&original, &plan).context("failed to insert key gates")?;
    let title = cmd
        .title
        .clone()
        .unwrap_or_else(|| default_title(&cmd.bench, plan.len()));

    let file = File::create(&cmd.output)
        .with_context(|| format!("failed to create {}", cmd.output.display()))?;
    bench::write(locked.netlist(), &title, BufWriter::new(file))
        .with_context(|| format!("failed to write {}", cmd.output.display()))?;

    report::print_lock_summary(&plan, &locked);
    println!("  Processing time: {:.2?}", start.elapsed());
    Ok(())
}

fn verify(cmd: &VerifyCommand) -> Result<()> {
    let config = HarnessConfig {
        equivalence_samples: cmd.equivalence_patterns,
        corruption_samples: cmd.patterns,
    };

    let original = read_netlist(&cmd.original)?;
    let locked = read_netlist(&cmd.locked)?;
    let key_names = harness::split_key_inputs(&original, &locked);
    report::print_verify_header(&original, &locked, &key_names);

    let wrong_keys: Vec<KeyBits> = if cmd.keys.is_empty() {
        wrong_key_suite(key_names.len())
    } else {
        cmd.keys.clone()
    };

    let mut rng = ChaCha20Rng::seed_from_u64(cmd.seed);

    let pb = spinner("Checking equivalence under the correct key...")?;
    let equivalent = harness::check_equivalence(
        &original,
        &locked,
        &key_names,
        config.equivalence_samples,
        &mut rng,
    )
    .context("equivalence check failed")?;
    pb.finish_and_clear();
    report::print_equivalence(equivalent, config.equivalence_samples);

    let pb = ProgressBar::new(wrong_keys.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.cyan/blue} {pos:>3}/{len:3} [{elapsed_precise}] {msg}")?,
    );
    pb.set_message("Measuring wrong keys...");
    let mut reports = Vec::with_capacity(wrong_keys.len());
    for key in &wrong_keys {
        let corruption = harness::measure_corruption(
            &original,
            &locked,
            &key_names,
            key,
            config.corruption_samples,
            &mut rng,
        )
        .with_context(|| format!("corruption measurement failed for key {key}"))?;
        reports.push(corruption);
        pb.inc(1);
    }
    pb.finish_and_clear();

    for (key, corruption) in wrong_keys.iter().zip(&reports) {
        report::print_corruption(key, corruption);
    }

    if !equivalent {
        bail!(
            "{} is not equivalent to {} under the all-zero key",
            cmd.locked.display(),
            cmd.original.display()
        );
    }
    Ok(())
}
