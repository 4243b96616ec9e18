//! GasNet - command-line interface
//! Evaluates gas diffusion and transfer-function modulation for a network snapshot

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use gasnet_core::{
    config, diffusion, DiffusionInput, EmissionRecord, GasConstants, GasNetwork, Modulation,
    TRANSFER_TABLE,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "gasnet")]
#[command(author = "SIL Contributors")]
#[command(version = "2026.1.16")]
#[command(about = "GasNet - gas diffusion and transfer modulation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ConstantArgs {
    /// Diffusion scale (defaults to GASNET_GLOBAL_C or 1.0)
    #[arg(short = 'c', long)]
    global_c: Option<f64>,

    /// Modulation gain (defaults to GASNET_GLOBAL_K or 1.0)
    #[arg(short = 'k', long)]
    global_k: Option<f64>,
}

impl ConstantArgs {
    fn resolve(&self) -> Result<GasConstants> {
        let global_c = match self.global_c {
            Some(c) => c,
            None => config::global_c().context("failed to read GASNET_GLOBAL_C")?,
        };
        let global_k = match self.global_k {
            Some(k) => k,
            None => config::global_k().context("failed to read GASNET_GLOBAL_K")?,
        };
        Ok(GasConstants::new(global_c, global_k)?)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Gas concentration contributed by one source node
    Diffuse {
        /// Source node is currently emitting
        #[arg(long)]
        emitting: bool,

        /// Time step the last emission started
        #[arg(long, default_value_t = 0)]
        start: u64,

        /// Time step the last emission stopped
        #[arg(long)]
        stop: Option<u64>,

        /// Decay rate s of the source node
        #[arg(short, long)]
        decay_rate: f64,

        /// Gas radius of the source node
        #[arg(short, long)]
        radius: f64,

        /// Distance from the source node
        #[arg(long)]
        distance: f64,

        /// Current time step
        #[arg(short, long)]
        t: u64,

        #[command(flatten)]
        constants: ConstantArgs,
    },

    /// Transfer modulation for nodes of a JSON network snapshot
    Modulate {
        /// Snapshot file (phenotypes, emissions, distances)
        #[arg(value_name = "SNAPSHOT")]
        input: PathBuf,

        /// Current time step
        #[arg(short, long)]
        t: u64,

        /// Only this node (default: every node)
        #[arg(short, long)]
        node: Option<usize>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        constants: ConstantArgs,
    },

    /// Show the transfer-parameter table
    Table,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gasnet=info,gasnet_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Diffuse {
            emitting,
            start,
            stop,
            decay_rate,
            radius,
            distance,
            t,
            constants,
        } => {
            let emission = EmissionRecord {
                is_emitting: emitting,
                start,
                stop,
            };
            diffuse_command(emission, decay_rate, radius, distance, t, &constants)
        }

        Commands::Modulate {
            input,
            t,
            node,
            json,
            constants,
        } => modulate_command(&input, t, node, json, &constants),

        Commands::Table => {
            print_table();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

// ============================================================================
// Commands
// ============================================================================

fn diffuse_command(
    emission: EmissionRecord,
    decay_rate: f64,
    gas_radius: f64,
    distance: f64,
    t: u64,
    constants: &ConstantArgs,
) -> Result<()> {
    let constants = constants.resolve()?;
    let input = DiffusionInput {
        emission,
        decay_rate,
        t,
        global_c: constants.global_c,
        distance,
        gas_radius,
    };

    let concentration = diffusion(&input)?;
    println!("{} {:.6}", "concentration:".green().bold(), concentration);
    Ok(())
}

fn modulate_command(
    input: &Path,
    t: u64,
    node: Option<usize>,
    json: bool,
    constants: &ConstantArgs,
) -> Result<()> {
    let constants = constants.resolve()?;
    let source = fs::read_to_string(input)
        .with_context(|| format!("failed to read snapshot {}", input.display()))?;
    let network = GasNetwork::from_json(&source)
        .with_context(|| format!("invalid snapshot {}", input.display()))?;

    tracing::info!(nodes = network.len(), t, "loaded snapshot");

    let results: Vec<(usize, Modulation)> = match node {
        Some(a) => vec![(a, network.modulate_node(a, t, &constants)?)],
        None => network
            .modulate_all(t, &constants)?
            .into_iter()
            .enumerate()
            .collect(),
    };

    if json {
        let out: Vec<_> = results
            .iter()
            .map(|(a, m)| serde_json::json!({ "node": a, "modulation": m }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!(
        "{} t={} c={} k={}",
        "Modulation".green().bold(),
        t,
        constants.global_c,
        constants.global_k
    );
    for (a, m) in &results {
        let current = network.phenotypes[*a].transfer_index;
        let marker = if m.transfer_index == current {
            "=".normal()
        } else if m.transfer_index > current {
            "↑".green()
        } else {
            "↓".red()
        };
        println!(
            "  node {:>3}: P[{:>2}] = {:>6} {} gas1={:.6} gas2={:.6}",
            a,
            m.transfer_index,
            m.transfer_param,
            marker,
            m.gas1,
            m.gas2
        );
    }
    Ok(())
}

fn print_table() {
    println!("{}", "Transfer-parameter table".bold());
    for (i, p) in TRANSFER_TABLE.iter().enumerate() {
        println!("  P[{:>2}] = {:>6}", (i + 1).to_string().cyan(), p);
    }
}
