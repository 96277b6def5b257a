//! Time synchronization command.

use clap::Args;
use skybox_analysis::{ResamplePolicy, Signal, estimate_shift};
use skybox_io::write_json;
use std::path::PathBuf;

use super::common::{dataset, load_group, load_rig, parse_block_channel, sample_rate};

#[derive(Args)]
pub struct SyncArgs {
    /// Recording file holding the reference channel (JSON record group)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Reference channel as BLOCK:CHANNEL
    #[arg(long, value_parser = parse_block_channel)]
    reference: (String, String),

    /// Channel to align as BLOCK:CHANNEL
    #[arg(long, value_parser = parse_block_channel)]
    target: (String, String),

    /// Recording file holding the target channel (defaults to INPUT)
    #[arg(long)]
    target_file: Option<PathBuf>,

    /// How to bring differing rates together: downsample or upsample
    #[arg(long, default_value = "downsample")]
    policy: ResamplePolicy,

    /// Reference sample rate in Hz (derived from Time if omitted)
    #[arg(long)]
    reference_rate: Option<f64>,

    /// Target sample rate in Hz (derived from Time if omitted)
    #[arg(long)]
    target_rate: Option<f64>,

    /// Rig name or rig TOML path (defaults to the factory rig)
    #[arg(long)]
    rig: Option<String>,

    /// Output JSON file for the estimate (optional)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: SyncArgs) -> anyhow::Result<()> {
    let rig = load_rig(args.rig.as_deref())?;
    let reference_group = load_group(&args.input, &rig)?;
    let target_group = match &args.target_file {
        Some(path) => load_group(path, &rig)?,
        None => reference_group.clone(),
    };

    let (ref_block, ref_channel) = &args.reference;
    let (target_block, target_channel) = &args.target;
    let ref_ds = dataset(&reference_group, ref_block)?;
    let target_ds = dataset(&target_group, target_block)?;

    let sig1 = Signal::from_dataset(
        ref_ds,
        ref_channel,
        Some(sample_rate(ref_ds, args.reference_rate)?),
    )?;
    let sig2 = Signal::from_dataset(
        target_ds,
        target_channel,
        Some(sample_rate(target_ds, args.target_rate)?),
    )?;

    let estimate = estimate_shift(&sig1, &sig2, args.policy)?;

    println!(
        "Reference: {ref_block}:{ref_channel} at {:.3} Hz",
        sig1.sample_rate
    );
    println!(
        "Target:    {target_block}:{target_channel} at {:.3} Hz",
        sig2.sample_rate
    );
    println!(
        "Policy:    {:?} -> {:.3} Hz, {} samples",
        args.policy, estimate.sample_rate, estimate.common_len
    );
    println!();
    println!(
        "Best shift: {:+.6} s ({:+} samples, correlation {:.4})",
        estimate.best_shift,
        estimate.best_lag(),
        estimate.peak_correlation
    );
    if estimate.all_peak_shifts.len() > 1 {
        println!("Ambiguous alignment, peaks within 90% of the best:");
        for shift in &estimate.all_peak_shifts {
            println!("  {shift:+.6} s");
        }
    }

    if let Some(output_path) = args.output {
        write_json(&output_path, &estimate)?;
        println!("\nWrote estimate to {}", output_path.display());
    }

    Ok(())
}
