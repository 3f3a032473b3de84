// src/main.rs

use std::error::Error;
use std::io;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use config::ControlConstants;
use simulation::csv::CsvReporter;
use simulation::framework::run_simulation;
use simulation::load_parameters::{load_control_constants, load_simulation_config};
use simulation::pacing::{NoPacing, Pacer, RealTimePacer};
use simulation::report::{ConsoleReporter, ReportCadence, ReportSink};

mod config;
mod math;
mod models;
mod simulation;

/// シナリオが指定されなかったときに探すファイル
const DEFAULT_SCENARIO: &str = "config/scenario.yaml";

#[derive(Parser)]
#[command(name = "elevsim")]
#[command(about = "Elevator cabin/counterweight simulation under PID position control", long_about = None)]
struct Cli {
    /// Directory containing motor_other.csv and elevator_params.csv
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
    /// Scenario YAML overriding control constants (defaults to config/scenario.yaml if present)
    #[arg(long)]
    scenario: Option<PathBuf>,
    /// Target height in meters
    #[arg(long)]
    target_height: Option<f64>,
    /// Maximum simulated time in seconds
    #[arg(long)]
    max_time: Option<f64>,
    /// Time step in seconds
    #[arg(long)]
    dt: Option<f64>,
    /// Reporting interval in simulated seconds (0 reports every step)
    #[arg(long, default_value_t = 1.0)]
    report_interval: f64,
    /// Write reported steps to a CSV file
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Pace the simulation against the wall clock
    #[arg(long)]
    realtime: bool,
    /// Wall-clock speedup factor used with --realtime
    #[arg(long, default_value_t = 1.0)]
    speedup: f64,
    /// Suppress the console step report
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    // 制御定数の読み込みとコマンドラインによる上書き
    let scenario = cli.scenario.clone().or_else(|| {
        let default = PathBuf::from(DEFAULT_SCENARIO);
        default.exists().then_some(default)
    });
    let mut constants = match scenario {
        Some(path) => load_control_constants(&path)?,
        None => ControlConstants::default(),
    };
    if let Some(target_height) = cli.target_height {
        constants.target_height = target_height;
    }
    if let Some(max_time) = cli.max_time {
        constants.max_time = max_time;
    }
    if let Some(dt) = cli.dt {
        constants.dt = dt;
    }

    // パラメータ表の読み込みと検証
    let config = load_simulation_config(&cli.data_dir, constants)?;

    // 報告先の設定
    let mut sinks: Vec<Box<dyn ReportSink>> = Vec::new();
    if !cli.quiet {
        sinks.push(Box::new(ConsoleReporter::new(io::stdout().lock())));
    }
    if let Some(path) = &cli.csv {
        sinks.push(Box::new(CsvReporter::create(path)?));
    }

    let mut pacer: Box<dyn Pacer> = if cli.realtime {
        Box::new(RealTimePacer::new(cli.speedup))
    } else {
        Box::new(NoPacing)
    };

    // シミュレーションのメインループ
    run_simulation(
        &config,
        ReportCadence::every(cli.report_interval),
        &mut sinks,
        pacer.as_mut(),
    )?;

    Ok(())
}
