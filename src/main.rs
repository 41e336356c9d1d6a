use clap::{Parser, Subcommand};
use detectors::DetectorParams;
use engine::{DataInput, DetectRequest};
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// The main entry point for the Vigil anomaly detection tool.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    match cli.command {
        Commands::Detect(args) => handle_detect(args),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Statistical anomaly detection for time-indexed numeric data.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect anomalies in a JSON array of records.
    Detect(DetectArgs),
}

#[derive(Parser)]
struct DetectArgs {
    /// Path to a JSON file holding an array of records, or "-" for stdin.
    #[arg(long)]
    input: PathBuf,

    /// Name of the field holding each record's timestamp.
    #[arg(long)]
    time_field: String,

    /// Numeric field to analyze. Auto-detected when omitted.
    #[arg(long)]
    value_field: Option<String>,

    /// Field to partition records by before detection.
    #[arg(long)]
    group_field: Option<String>,

    /// Comma-separated detection methods: moving_average, standard_deviation, iqr.
    #[arg(
        long,
        value_delimiter = ',',
        default_values_t = ["moving_average".to_string(), "standard_deviation".to_string()]
    )]
    methods: Vec<String>,

    /// Trailing window size for the moving-average method.
    #[arg(long, default_value_t = 7)]
    window: usize,

    /// Z-score threshold for the moving-average and standard-deviation methods.
    #[arg(long, default_value_t = 2.0)]
    threshold: f64,

    /// Fence multiplier for the IQR method.
    #[arg(long, default_value_t = 1.5)]
    iqr_multiplier: f64,

    /// Pretty-print the report JSON.
    #[arg(long)]
    pretty: bool,
}

// ==============================================================================
// Detect Command Logic
// ==============================================================================

/// Reads the input, runs the engine, and prints the serialized report.
fn handle_detect(args: DetectArgs) -> anyhow::Result<()> {
    let raw = if args.input.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(&args.input)?
    };

    let request = DetectRequest {
        data: DataInput::Text(raw),
        time_field: args.time_field,
        value_field: args.value_field,
        group_field: args.group_field,
        methods: args.methods,
        params: DetectorParams {
            window: args.window,
            threshold: args.threshold,
            iqr_multiplier: args.iqr_multiplier,
        },
    };

    let report = engine::detect(&request)?;
    tracing::info!(
        total_records = report.total_records,
        combined_anomalies = report.combined.total_anomalies,
        "detection complete"
    );

    let output = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{output}");
    Ok(())
}
