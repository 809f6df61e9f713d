use std::io::BufRead;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use lot_occupancy::logger::{self, error, info};
use lot_occupancy::occupancy::{
    CalibrationSession, ClassifierConfig, LotMonitor, MapConfig, MonitorConfig, OccupancyError,
    TiffCompression,
};

#[derive(Parser)]
#[command(name = "lot_occupancy")]
#[command(about = "Estimate parking stall occupancy from periodic lot photos")]
#[command(version)]
struct Cli {
    /// Log filter used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare captures against the calibration image until stopped.
    Monitor(MonitorArgs),

    /// Record stall centers, one `row col` pair per stdin line, into a points file.
    Calibrate {
        /// Points file to create.
        #[arg(long)]
        points: PathBuf,
    },
}

#[derive(Debug, Clone, Args)]
struct MonitorArgs {
    /// Photo of the empty lot.
    #[arg(long)]
    calibration: PathBuf,

    /// Path the camera overwrites with every new capture.
    #[arg(long)]
    current: PathBuf,

    /// Stall points file.
    #[arg(long)]
    points: PathBuf,

    /// Write the occupancy map (TIFF) here after every cycle.
    #[arg(long)]
    map: Option<PathBuf>,

    /// Milliseconds between captures.
    #[arg(long, default_value_t = 2000)]
    interval_ms: u64,

    /// Number of cycles before the session ends.
    #[arg(long, default_value_t = 600)]
    iterations: usize,

    /// Compression of the written map.
    #[arg(long, value_enum, default_value_t = TiffCompression::DeflateFast)]
    compression: TiffCompression,

    /// Mean brightness tolerance of the day profile.
    #[arg(long, default_value_t = 60)]
    day_tolerance: u32,

    /// Mean brightness tolerance of the night profile.
    #[arg(long, default_value_t = 100)]
    night_tolerance: u32,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(&cli.log_level);

    let result = match cli.command {
        Commands::Monitor(args) => monitor(args),
        Commands::Calibrate { points } => calibrate(points),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            let code = err
                .downcast_ref::<OccupancyError>()
                .map(OccupancyError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

fn monitor(args: MonitorArgs) -> Result<()> {
    let config = MonitorConfig::builder()
        .interval(Duration::from_millis(args.interval_ms))
        .max_iterations(args.iterations)
        .classifier(
            ClassifierConfig::builder()
                .day_intensity_tolerance(args.day_tolerance)
                .night_intensity_tolerance(args.night_tolerance)
                .build(),
        )
        .map(MapConfig::builder().compression(args.compression).build())
        .map_output(args.map)
        .build();

    let mut monitor = LotMonitor::start(&args.calibration, &args.current, &args.points, config)?;

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = stop.clone();
        std::thread::spawn(move || {
            let mut line = String::new();
            if matches!(std::io::stdin().read_line(&mut line), Ok(n) if n > 0) {
                stop.store(true, Ordering::Relaxed);
            }
        });
    }
    info!("Press Enter to stop");

    let completed = monitor.run(&stop)?;
    info!(completed, "Session finished");
    Ok(())
}

fn calibrate(points: PathBuf) -> Result<()> {
    let mut session = CalibrationSession::create(&points)?;

    for (index, line) in std::io::stdin().lock().lines().enumerate() {
        let line = line.context("reading stall centers from stdin")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (row, col): (usize, usize) = line
            .split_once(char::is_whitespace)
            .and_then(|(r, c)| Some((r.trim().parse().ok()?, c.trim().parse().ok()?)))
            .with_context(|| format!("line {}: expected `row col`, got {:?}", index + 1, line))?;
        session.record_click(row, col)?;
    }

    let recorded = session.finish()?;
    info!(stalls = recorded.len(), path = %points.display(), "Points file written");
    Ok(())
}
