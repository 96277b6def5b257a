//! Rig catalog command.

use clap::Args;
use skybox_config::{
    FACTORY_RIG_NAMES, install_rig, list_user_rigs, rig_name_from_path, user_rigs_dir,
};
use std::path::PathBuf;

use super::common::load_rig;

#[derive(Args)]
pub struct CatalogArgs {
    /// Rig name or rig TOML path (defaults to the factory rig)
    #[arg(long)]
    rig: Option<String>,

    /// Write the rig as TOML to this path instead of printing it
    #[arg(long, value_name = "PATH")]
    export: Option<PathBuf>,

    /// Save the rig into the user rigs directory so it resolves by name
    #[arg(long, conflicts_with = "export")]
    install: bool,

    /// List factory and user rigs
    #[arg(long)]
    list: bool,
}

pub fn run(args: CatalogArgs) -> anyhow::Result<()> {
    if args.list {
        return list_rigs();
    }

    let rig = load_rig(args.rig.as_deref())?;

    if let Some(path) = args.export {
        rig.save(&path)?;
        println!("Wrote rig '{}' to {}", rig.name, path.display());
        return Ok(());
    }

    if args.install {
        let path = install_rig(&rig)?;
        println!("Installed rig '{}' as {}", rig.name, path.display());
        return Ok(());
    }

    println!("Rig: {}", rig.name);
    if let Some(desc) = &rig.description {
        println!("  {desc}");
    }
    println!("Primary block:    {}", rig.primary_block);
    println!("Secondary marker: {}", rig.secondary_marker);
    println!(
        "Timing channel:   {}",
        rig.timing_channel.as_deref().unwrap_or("(none)")
    );
    println!("\nChannels ({}):", rig.len());
    for channel in &rig.channels {
        println!("  {channel}");
    }

    Ok(())
}

fn list_rigs() -> anyhow::Result<()> {
    println!("Factory Rigs:");
    println!("=============");
    for name in FACTORY_RIG_NAMES {
        println!("  {name}");
    }

    println!("\nUser Rigs ({}):", user_rigs_dir().display());
    println!("==========");
    let user_rigs = list_user_rigs();
    if user_rigs.is_empty() {
        println!("  (none)");
    }
    for path in user_rigs {
        let name = rig_name_from_path(&path).unwrap_or_else(|| "unknown".to_string());
        println!("  {name}");
    }

    Ok(())
}
