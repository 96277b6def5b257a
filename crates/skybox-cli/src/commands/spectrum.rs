//! Spectrum command.

use clap::Args;
use skybox_analysis::spectrum;
use skybox_io::write_spectrum_csv;
use std::path::PathBuf;

use super::common::{dataset, load_group, load_rig, sample_rate};

#[derive(Args)]
pub struct SpectrumArgs {
    /// Recording file (JSON record group)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Data block holding the channel
    #[arg(long, default_value = "Data")]
    block: String,

    /// Channel to analyse
    #[arg(short, long)]
    channel: String,

    /// Sample rate in Hz (derived from Time if omitted)
    #[arg(long)]
    rate: Option<f64>,

    /// Rig name or rig TOML path (defaults to the factory rig)
    #[arg(long)]
    rig: Option<String>,

    /// Output CSV file (optional)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Show top N bins by amplitude
    #[arg(long, default_value = "5")]
    peaks: usize,
}

pub fn run(args: SpectrumArgs) -> anyhow::Result<()> {
    let rig = load_rig(args.rig.as_deref())?;
    let loaded = load_group(&args.input, &rig)?;
    let ds = dataset(&loaded, &args.block)?;
    let rate = sample_rate(ds, args.rate)?;
    let values = ds.require_channel(&args.channel)?;

    let result = spectrum(values, rate)?;

    println!("Spectrum of {}:{}", args.block, args.channel);
    println!(
        "  {} samples, {:.3} Hz, resolution {:.5} Hz, {} bins",
        values.len(),
        rate,
        result.resolution(),
        result.len()
    );

    if let Some((freq, amp)) = result.dominant() {
        println!("  dominant {freq:.5} Hz, amplitude {amp:.6}");
    }

    let mut ranked: Vec<(usize, f64)> =
        result.amplitude.iter().copied().enumerate().skip(1).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    println!("\nTop {} bins:", args.peaks);
    println!("  {:>12}  {:>12}  {:>12}", "Freq (Hz)", "Amplitude", "PSD");
    for &(k, amp) in ranked.iter().take(args.peaks) {
        println!(
            "  {:>12.5}  {:>12.6}  {:>12.6e}",
            result.frequencies[k], amp, result.psd[k]
        );
    }

    if let Some(output_path) = args.output {
        write_spectrum_csv(&output_path, &result)?;
        println!("\nWrote spectrum to {}", output_path.display());
    }

    Ok(())
}
