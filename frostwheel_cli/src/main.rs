use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use frostwheel_core::geometry::SliceLayout;
use frostwheel_core::{
    Catalog, Engine, PrizeDraw, RandomDraw, SeededDraw, SpinObserver, VirtualTimeline,
    WheelConfig, WheelFile,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod terminal;

use terminal::{live_spin, TerminalFeedback};

#[derive(Parser)]
#[command(name = "frostwheel", about = "Spin the Frost Wheel from a terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Wheel file (TOML) with an optional [wheel] table and [[prizes]] list
    #[arg(long, global = true, env = "FROSTWHEEL_CONFIG")]
    config: Option<PathBuf>,
    /// Use a reproducible seeded draw instead of the OS generator
    #[arg(long, global = true)]
    seed: Option<String>,
    #[arg(long, global = true)]
    min_rotations: Option<u32>,
    #[arg(long, global = true)]
    duration_ms: Option<u32>,
    /// Debug-level logging (RUST_LOG still wins when set)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Spin in real time and print the session history
    Spin {
        #[arg(long, default_value_t = 1)]
        count: u32,
        #[arg(long, default_value_t = 16)]
        frame_ms: u64,
        /// Ring the terminal bell on every slice crossing
        #[arg(long)]
        bell: bool,
        /// Print the history as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run many spins on a virtual clock and report the outcome spread
    Simulate {
        #[arg(long, default_value_t = 10_000)]
        spins: u32,
    },
    /// List the prizes and their slice angles
    Prizes,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_wheel(cli: &Cli) -> anyhow::Result<(WheelConfig, Catalog)> {
    let mut file = match &cli.config {
        Some(path) => WheelFile::from_path(path)?,
        None => WheelFile::default(),
    };
    if let Some(rotations) = cli.min_rotations {
        file.wheel.min_rotations = rotations;
    }
    if let Some(duration) = cli.duration_ms {
        file.wheel.spin_duration_ms = duration;
    }
    Ok(file.into_parts()?)
}

async fn run_spins<D: PrizeDraw>(
    mut engine: Engine<D>,
    count: u32,
    frame_ms: u64,
    bell: bool,
    json: bool,
) -> anyhow::Result<()> {
    let mut feedback = TerminalFeedback::new(engine.catalog().clone(), bell);
    let frame_interval = Duration::from_millis(frame_ms.max(1));
    for _ in 0..count {
        live_spin(&mut engine, frame_interval, &mut feedback).await;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(engine.history())?);
    } else {
        println!("Recent wins:");
        for record in engine.history().recent() {
            println!(
                "  {}  {} {:<16} {}",
                record.clock_label(),
                record.prize.icon,
                record.prize.label,
                record.prize.color
            );
        }
    }
    Ok(())
}

#[derive(Default)]
struct TickCounter {
    ticks: usize,
}

impl SpinObserver for TickCounter {
    fn on_tick(&mut self, _segment: usize) {
        self.ticks += 1;
    }
}

fn simulate<D: PrizeDraw>(mut engine: Engine<D>, spins: u32) {
    let mut timeline = VirtualTimeline::new(16.0);
    let mut counter = TickCounter::default();
    for _ in 0..spins {
        timeline.run_spin(&mut engine, &mut counter);
    }

    let total = engine.history().len().max(1);
    let tally = engine.history().tally();
    println!("{:<4} {:<16} {:>8} {:>8}", "#", "prize", "wins", "share");
    for (index, prize) in engine.catalog().prizes().iter().enumerate() {
        let wins = tally
            .iter()
            .find(|(id, _)| *id == prize.id)
            .map(|(_, n)| *n)
            .unwrap_or(0);
        println!(
            "{:<4} {:<16} {:>8} {:>7.2}%",
            index,
            prize.label,
            wins,
            wins as f64 * 100.0 / total as f64
        );
    }
    println!(
        "spins={} mean_ticks={:.1} final_rotation={:.1}",
        engine.history().len(),
        counter.ticks as f64 / total as f64,
        engine.state().cumulative_rotation
    );
}

fn print_prizes(catalog: &Catalog) {
    for (index, prize) in catalog.prizes().iter().enumerate() {
        let slice = SliceLayout::new(index, catalog.len());
        println!(
            "{:>2} {} {:<16} value={:<8} color={} arc={:.1}..{:.1} centre={:.1}",
            index,
            prize.icon,
            prize.label,
            prize.value,
            prize.color,
            slice.start_angle,
            slice.end_angle,
            slice.center_angle
        );
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let (config, catalog) = load_wheel(&cli)?;
    info!(
        prizes = catalog.len(),
        min_rotations = config.min_rotations,
        duration_ms = config.spin_duration_ms,
        "wheel loaded"
    );

    match cli.command {
        Commands::Spin {
            count,
            frame_ms,
            bell,
            json,
        } => match &cli.seed {
            Some(seed) => {
                let engine = Engine::new(catalog, config, SeededDraw::new(seed.as_str()));
                run_spins(engine, count, frame_ms, bell, json).await?;
            }
            None => {
                let engine = Engine::new(catalog, config, RandomDraw);
                run_spins(engine, count, frame_ms, bell, json).await?;
            }
        },
        Commands::Simulate { spins } => {
            let draw = SeededDraw::new(cli.seed.as_deref().unwrap_or("simulate"));
            info!(seed_hash = %draw.seed_hash_hex(), "seeded simulation");
            simulate(Engine::new(catalog, config, draw), spins);
        }
        Commands::Prizes => print_prizes(&catalog),
    }

    Ok(())
}
