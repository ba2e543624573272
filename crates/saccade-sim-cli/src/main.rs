use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use saccade_sim_core::{Scene, SimConfig, TickRecord, collect_run_stats};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

const WARMUP_TICKS: usize = 1_000;
const BENCHMARK_TICKS: usize = 200_000;

#[derive(Parser)]
#[command(name = "saccade-sim")]
#[command(about = "Object-tracking saccade sequence generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate tick records and write them as TSV
    Run {
        /// Path to config file (JSON); built-in defaults when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Number of ticks per episode
        #[arg(long, default_value_t = 512)]
        ticks: usize,

        /// Number of independent episodes, each on its own RNG stream
        #[arg(long, default_value_t = 1)]
        episodes: usize,

        /// Output TSV path (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Override the config seed
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Measure generator throughput
    Benchmark,
    /// Dump the default configuration to stdout
    DumpDefaultConfig,
}

fn load_config(path: Option<&PathBuf>) -> Result<SimConfig> {
    let config: SimConfig = match path {
        Some(p) => {
            let file = File::open(p)
                .with_context(|| format!("failed to open config file {}", p.display()))?;
            serde_json::from_reader(BufReader::new(file)).context("failed to parse config")?
        }
        None => SimConfig::default(),
    };
    config.validate().context("config validation error")?;
    Ok(config)
}

const TSV_HEADER: &str = "Episode\tTick\tFixTick\tObjPosX\tObjPosY\tObjViewPosX\tObjViewPosY\t\
ObjVelX\tObjVelY\tObjPosNextX\tObjPosNextY\tEyePosX\tEyePosY\tSacPlanX\tSacPlanY\t\
SaccadeX\tSaccadeY\tNewTraj\tNewSac";

fn write_tsv_row<W: Write>(w: &mut W, episode: usize, rec: &TickRecord) -> io::Result<()> {
    write!(w, "{episode}\t{}\t{}", rec.tick, rec.fix_tick)?;
    for pair in [
        rec.obj_pos,
        rec.obj_view_pos,
        rec.obj_vel,
        rec.obj_pos_next,
        rec.eye_pos,
        rec.sac_plan,
        rec.saccade,
    ] {
        write!(w, "\t{:.6}\t{:.6}", pair[0], pair[1])?;
    }
    writeln!(w, "\t{}\t{}", rec.new_traj as u8, rec.new_sac as u8)
}

fn run(
    config_path: Option<PathBuf>,
    ticks: usize,
    episodes: usize,
    out: Option<PathBuf>,
    seed: Option<u64>,
) -> Result<()> {
    let mut config = load_config(config_path.as_ref())?;
    if let Some(seed) = seed {
        config.seed = seed;
    }

    let mut writer: Box<dyn Write> = match &out {
        Some(p) => {
            let file = File::create(p)
                .with_context(|| format!("failed to create output file {}", p.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };
    writeln!(writer, "{TSV_HEADER}")?;

    for episode in 0..episodes {
        let mut scene = Scene::for_episode(config.clone(), episode)?;
        let records = scene.run_ticks(ticks);
        for rec in &records {
            write_tsv_row(&mut writer, episode, rec)?;
        }
        let stats = collect_run_stats(&records);
        eprintln!(
            "episode {episode}: {} ticks, {} trajectories, {} saccades, \
             max |eye| = ({:.3}, {:.3}), mean saccade = {:.3}",
            stats.ticks,
            stats.trajectories,
            stats.saccades,
            stats.max_abs_eye[0],
            stats.max_abs_eye[1],
            stats.mean_saccade_mag,
        );
    }
    writer.flush()?;
    Ok(())
}

fn benchmark() -> Result<()> {
    if cfg!(debug_assertions) {
        eprintln!("WARNING: running in debug mode. Results are not representative.");
        eprintln!("         Use: cargo run -p saccade-sim-cli --release -- benchmark");
        eprintln!();
    }
    let config = SimConfig::default();
    let mut scene = Scene::new(config)?;

    for _ in 0..WARMUP_TICKS {
        scene.step();
    }

    let start = Instant::now();
    let mut traj_count = 0usize;
    for _ in 0..BENCHMARK_TICKS {
        if scene.step().new_traj {
            traj_count += 1;
        }
    }
    let elapsed = start.elapsed();

    let ticks_per_sec = BENCHMARK_TICKS as f64 / elapsed.as_secs_f64();
    println!("=== Saccade generator benchmark ===");
    println!("Warmup: {WARMUP_TICKS} ticks, Benchmark: {BENCHMARK_TICKS} ticks");
    println!(
        "  Elapsed:     {:.1} ms ({ticks_per_sec:.0} ticks/sec)",
        elapsed.as_secs_f64() * 1e3
    );
    println!("  Trajectories: {traj_count}");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::DumpDefaultConfig => {
            let config = SimConfig::default();
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Benchmark => benchmark()?,
        Commands::Run {
            config,
            ticks,
            episodes,
            out,
            seed,
        } => run(config, ticks, episodes, out, seed)?,
    }

    Ok(())
}
