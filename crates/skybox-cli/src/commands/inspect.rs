//! Recording inspection command.

use clap::Args;
use skybox_core::{LoadedEntry, describe_group, describe_test_properties, detect_timing_reference};
use std::path::PathBuf;

use super::common::{load_group, load_rig};

/// Name of the block holding test properties in a recording file.
const TEST_PROPERTIES: &str = "TestProperties";

#[derive(Args)]
pub struct InspectArgs {
    /// Recording file (JSON record group)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Rig name or rig TOML path (defaults to the factory rig)
    #[arg(long)]
    rig: Option<String>,
}

pub fn run(args: InspectArgs) -> anyhow::Result<()> {
    let rig = load_rig(args.rig.as_deref())?;
    let mut loaded = load_group(&args.input, &rig)?;

    println!("Recording: {}", args.input.display());
    println!("Rig: {} ({} channels)", rig.name, rig.len());
    println!();
    print!("{}", describe_group(&loaded));

    if let Some(LoadedEntry::Record(props)) = loaded.get(TEST_PROPERTIES) {
        println!("\nTest properties:");
        print!("{}", describe_test_properties(props));
    }

    if let Some(timing) = rig.timing_channel.as_deref() {
        println!("\nTiming reference ({timing}):");
        for (name, entry) in &mut loaded {
            let LoadedEntry::Dataset(ds) = entry else {
                continue;
            };
            if ds.channel(timing).is_none() {
                continue;
            }
            let reference = detect_timing_reference(ds, timing)?;
            if reference.degenerate {
                println!("  {name}: no LED pulse found");
            } else {
                println!(
                    "  {name}: rise #{} at {:.4} s, fall #{} at {:.4} s",
                    reference.rise_index,
                    reference.rise_time,
                    reference.fall_index,
                    reference.fall_time
                );
            }
        }
    }

    Ok(())
}
