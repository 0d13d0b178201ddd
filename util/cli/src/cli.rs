use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use xorlock_lock::KeyBits;
use xorlock_lock::harness::{DEFAULT_CORRUPTION_SAMPLES, DEFAULT_EQUIVALENCE_SAMPLES};

/// XOR key-gate logic locking for bench netlists
#[derive(Parser, Debug)]
#[command(name = "xorlock")]
#[command(author, version, about, long_about = None)]
pub(crate) struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub(crate) verbose: u8,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Lock a netlist with XOR key gates on its most observable nodes
    Lock(LockCommand),
    /// Compare a locked netlist against the original by random simulation
    Verify(VerifyCommand),
    /// Print a summary of a bench netlist
    Info(InfoCommand),
}

#[derive(Parser, Debug)]
pub(crate) struct LockCommand {
    /// Netlist to lock
    #[arg(short, long, value_name = "BENCH", default_value = "c432.bench")]
    pub(crate) bench: PathBuf,

    /// Fault simulator detection log for the netlist
    #[arg(short, long, value_name = "LOG", default_value = "c432_log")]
    pub(crate) log: PathBuf,

    /// Number of key gates to insert
    #[arg(short, long, value_name = "N")]
    pub(crate) keys: usize,

    /// Where to write the locked netlist
    #[arg(
        short,
        long,
        value_name = "OUTPUT",
        default_value = "c432_locked.bench"
    )]
    pub(crate) output: PathBuf,

    /// Header comment of the written netlist
    #[arg(
        short,
        long,
        help = "Header comment (default: \"Locked <bench name> with N key-gates\")"
    )]
    pub(crate) title: Option<String>,
}

#[derive(Parser, Debug)]
pub(crate) struct VerifyCommand {
    /// The unlocked netlist
    #[arg(long, value_name = "BENCH", default_value = "c432.bench")]
    pub(crate) original: PathBuf,

    /// The locked netlist
    #[arg(long, value_name = "BENCH", default_value = "c432_locked.bench")]
    pub(crate) locked: PathBuf,

    /// Random patterns for the equivalence check
    #[arg(
        short = 'e',
        long = "equivalence-patterns",
        default_value_t = DEFAULT_EQUIVALENCE_SAMPLES,
        value_name = "N"
    )]
    pub(crate) equivalence_patterns: usize,

    /// Random patterns per wrong key
    #[arg(
        short = 'p',
        long = "patterns",
        default_value_t = DEFAULT_CORRUPTION_SAMPLES,
        value_name = "N"
    )]
    pub(crate) patterns: usize,

    /// Seed for the pattern generator
    #[arg(short, long, default_value_t = 0)]
    pub(crate) seed: u64,

    /// Wrong key to measure, as a 0/1 string in key input order (repeatable)
    #[arg(
        short,
        long = "key",
        value_name = "BITS",
        help = "Wrong key to measure (repeatable; default: all ones, alternating, single bit)"
    )]
    pub(crate) keys: Vec<KeyBits>,
}

#[derive(Parser, Debug)]
pub(crate) struct InfoCommand {
    /// Bench netlist to summarise
    #[arg(value_name = "FILE")]
    pub(crate) file: PathBuf,
}
