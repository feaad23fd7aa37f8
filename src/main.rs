use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use navhud::DisplayMode;
use navhud::core::config::{self, CliOverrides, LogSettings};
use navhud::core::format::UnitType;
use navhud::{feed, headless, tui};

#[derive(Parser)]
#[command(name = "navhud", about = "Turn-by-turn navigation HUD driven by a recorded trace")]
struct Args {
    /// Trace file (newline-delimited JSON)
    trace: PathBuf,

    /// Display orientation
    #[arg(short, long, value_enum)]
    mode: Option<DisplayMode>,

    /// Distance units
    #[arg(short, long, value_enum)]
    units: Option<UnitType>,

    /// Replay speed multiplier
    #[arg(short, long)]
    speed: Option<f64>,

    /// Print directives as JSON lines instead of drawing the HUD
    #[arg(long)]
    headless: bool,

    /// Config file to use instead of ~/.navhud/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn init_logging(settings: &LogSettings) {
    let level = match config::parse_log_level(&settings.level) {
        Some(level) => level,
        None => {
            eprintln!("navhud: ignoring invalid log_level {:?}, using debug", settings.level);
            LevelFilter::Debug
        }
    };
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    match File::create(&settings.file) {
        Ok(log_file) => {
            let _ = WriteLogger::init(level, log_config, log_file);
        }
        Err(e) => eprintln!("navhud: cannot open log file {}: {}", settings.file, e),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let file_config = match &args.config {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    };
    let (file_config, source) = match file_config {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("navhud: {e}");
            return ExitCode::FAILURE;
        }
    };

    // The file layer names the log file, so the logger comes up before
    // anything else resolves and logs
    init_logging(&file_config.log_settings());
    source.log(&file_config);

    let overrides = CliOverrides {
        display_mode: args.mode,
        unit_type: args.units,
        speed: args.speed,
    };
    let resolved = config::resolve(&file_config, &overrides);
    info!(
        "navhud starting: mode={:?}, units={}, speed={}x, headless={}",
        resolved.display_mode,
        resolved.unit_type.label(),
        resolved.replay_speed,
        args.headless
    );

    let records = match feed::load_trace(&args.trace) {
        Ok(records) => records,
        Err(e) => {
            error!("Failed to load trace {}: {}", args.trace.display(), e);
            eprintln!("navhud: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = if args.headless {
        headless::run(resolved, records).await
    } else {
        tui::run(resolved, records)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("navhud exited with error: {}", e);
            eprintln!("navhud: {e}");
            ExitCode::FAILURE
        }
    }
}
