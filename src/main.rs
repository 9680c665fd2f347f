use clap::Parser;
use pnbert_rs::bert::{BertStats, Checker, CheckerConfig, Generator};
use pnbert_rs::bits::shift_left;
use pnbert_rs::channel::Channel;
use pnbert_rs::pn::PnPattern;
use pnbert_rs::ui::{self, progress::ProgressManager, progress::templates};
use pnbert_rs::utils::consts::*;
use pnbert_rs::utils::logging::init_logging;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

/// Runs a PN generator and checker back to back over fixed-size buffers
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, value_enum, default_value_t = PnPattern::Pn15)]
    pattern: PnPattern,
    /// Register order, overrides --pattern
    #[arg(long)]
    order: Option<u32>,
    #[arg(short, long, default_value_t = DEFAULT_BUFFER_SIZE)]
    buffer_size: usize,
    #[arg(short, long, default_value_t = DEFAULT_CYCLES)]
    cycles: usize,
    /// Random bit error ratio injected into every buffer
    #[arg(long, default_value_t = 0.0)]
    ber: f64,
    /// Replace every Nth buffer with random bytes
    #[arg(long)]
    burst_every: Option<usize>,
    /// Drop this many bits once, halfway through the run
    #[arg(long, default_value_t = 0)]
    slip_bits: usize,
    /// Seed of the impairment RNG
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Checker policy as JSON
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print the final report as JSON
    #[arg(long)]
    json: bool,
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Serialize)]
struct RunReport {
    buffer_size: usize,
    cycles: usize,
    bits_tx: u64,
    injected_flips: u64,
    seconds: f64,
    mbps: f64,
    stats: BertStats,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let cli = Cli::parse();

    let order = cli.order.unwrap_or(cli.pattern.order());
    let config = match &cli.config {
        Some(path) => CheckerConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => CheckerConfig::default(),
    };

    let mut tx = Generator::new(order)?;
    let mut rx = Checker::with_config(order, config)?;
    let mut channel = Channel::with_ber(cli.seed, cli.ber)?;

    if !cli.json {
        ui::print_banner();
        println!("BERT generator and checker using PN{}", order);
        println!("Buffer Size = {}", cli.buffer_size);
    }
    tracing::info!(
        "PN{} run: {} cycles of {} bytes, ber {}, policy {:?}",
        order,
        cli.cycles,
        cli.buffer_size,
        cli.ber,
        rx.config()
    );

    let progress = ProgressManager::new();
    let show_progress = !cli.quiet && !cli.json;
    if show_progress {
        progress.create_bar("run", cli.cycles as u64, templates::CHECK, "acquiring")?;
    }

    let mut buffer = vec![0u8; cli.buffer_size];
    let start = Instant::now();

    for cycle in 0..cli.cycles {
        tx.fill(&mut buffer);
        channel.apply_noise(&mut buffer);

        if let Some(every) = cli.burst_every {
            if every > 0 && cycle > 0 && cycle % every == 0 {
                tracing::debug!("cycle {}: burst over the whole buffer", cycle);
                channel.burst(&mut buffer);
            }
        }

        if cli.slip_bits > 0 && cycle == cli.cycles / 2 {
            tracing::debug!("cycle {}: slipping {} bits", cycle, cli.slip_bits);
            rx.check(&shift_left(&buffer, cli.slip_bits));
        } else {
            rx.check(&buffer);
        }

        if show_progress {
            progress.inc("run", 1)?;
            let state = if rx.synced() { "synced" } else { "acquiring" };
            progress.set_message("run", state)?;
        }
    }

    let seconds = start.elapsed().as_secs_f64();
    if show_progress {
        progress.finish("run", "done")?;
    }

    let stats = rx.stats();
    let mbps = if seconds > 0.0 {
        stats.bits_rx as f64 / seconds / 1e6
    } else {
        0.0
    };
    let report = RunReport {
        buffer_size: cli.buffer_size,
        cycles: cli.cycles,
        bits_tx: tx.bits_tx(),
        injected_flips: channel.flipped(),
        seconds,
        mbps,
        stats,
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!();
        println!("Run Time: {:.6} seconds", report.seconds);
        println!("bitrate: {:.2} Mbps", report.mbps);
        if report.injected_flips > 0 {
            println!("Injected bit flips : {}", report.injected_flips);
        }
        ui::print_results(&report.stats);
    }

    if stats.sync_loss_count > 0 {
        tracing::warn!("{} sync loss event(s) during the run", stats.sync_loss_count);
    }
    Ok(())
}
