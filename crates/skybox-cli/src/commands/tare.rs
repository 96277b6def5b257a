//! Tare calibration command.

use clap::Args;
use skybox_core::{tare, tare_all};
use skybox_io::{write_dataset_csv, write_json};
use std::path::PathBuf;

use super::common::{dataset, load_group, load_rig};

#[derive(Args)]
pub struct TareArgs {
    /// Recording file (JSON record group)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Data block to calibrate
    #[arg(long, default_value = "Data")]
    block: String,

    /// Start of the quiet window in seconds
    #[arg(long)]
    start: f64,

    /// End of the quiet window in seconds
    #[arg(long)]
    end: f64,

    /// Channel to tare (repeatable; all channels if omitted)
    #[arg(short, long = "channel")]
    channels: Vec<String>,

    /// Rig name or rig TOML path (defaults to the factory rig)
    #[arg(long)]
    rig: Option<String>,

    /// Output file: .csv writes the table, anything else JSON with metadata
    #[arg(short, long)]
    output: PathBuf,
}

pub fn run(args: TareArgs) -> anyhow::Result<()> {
    let rig = load_rig(args.rig.as_deref())?;
    let loaded = load_group(&args.input, &rig)?;
    let ds = dataset(&loaded, &args.block)?;

    let tared = if args.channels.is_empty() {
        tare_all(ds, args.start, args.end)?
    } else {
        tare(ds, &args.channels, args.start, args.end)?
    };

    println!(
        "Tare window {:.4} s .. {:.4} s on {}",
        args.start, args.end, args.block
    );
    println!("  {:>14}  {:>14}", "Channel", "Offset");
    for (channel, offset) in tared.tare_values() {
        println!("  {channel:>14}  {offset:>14.6}");
    }

    if args.output.extension().is_some_and(|ext| ext == "csv") {
        write_dataset_csv(&args.output, &tared)?;
    } else {
        write_json(&args.output, &tared)?;
    }
    println!("\nWrote calibrated data to {}", args.output.display());

    Ok(())
}
