//! Blink and head-turn detection demo, replaying recorded detection traces.

use anyhow::Result;
use clap::Parser;
use eye_blink_detection::app::BlinkApp;
use eye_blink_detection::config::{Config, EXAMPLE_CONFIG};
use eye_blink_detection::trace::{load_trace, EXAMPLE_TRACE};
use log::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Detection trace file to replay (YAML)
    #[arg(short, long)]
    trace: Option<String>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Focus mode override (prominent, multi)
    #[arg(short, long)]
    mode: Option<String>,

    /// Angle filter override (none, moving_average, exponential, median)
    #[arg(short, long)]
    filter: Option<String>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,

    /// Print an example configuration file and exit
    #[arg(long)]
    print_example_config: bool,

    /// Print an example trace file and exit
    #[arg(long)]
    print_example_trace: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    if args.print_example_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }
    if args.print_example_trace {
        print!("{EXAMPLE_TRACE}");
        return Ok(());
    }

    info!("Eye Blink Detection");

    // Load configuration if provided
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    // Apply command line overrides
    if let Some(mode) = args.mode {
        config.processor.mode = mode;
    }
    if let Some(filter) = args.filter {
        config.filter.default_filter = filter;
    }

    let trace_path = args
        .trace
        .ok_or_else(|| anyhow::anyhow!("--trace is required (try --print-example-trace)"))?;

    info!("Loading trace from: {trace_path}");
    let frames = load_trace(&trace_path)?;

    // Create and run application
    let mut app = BlinkApp::new(&config)?;
    let summary = app.run(&frames)?;

    println!(
        "frames: {}  blinks: {}  left turns: {}  right turns: {}  captures: {}",
        summary.frames, summary.blinks, summary.left_turns, summary.right_turns, summary.captures
    );

    Ok(())
}
