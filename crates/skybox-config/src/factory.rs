//! Factory rig catalogs bundled with the library.
//!
//! These are always available without external files and describe the
//! standard SkyBox wave basin instrumentation.

use crate::RigConfig;

/// Factory rig names for external access.
pub static FACTORY_RIG_NAMES: &[&str] = &["skybox"];

/// Name of the LED timing channel on the standard rig.
pub const FACTORY_TIMING_CHANNEL: &str = "LED-chan100";

const MOTION_PROBES: &[&str] = &[
    "MP-Surge", "MP-Sway", "MP-Heave", "MP-Roll", "MP-Pitch", "MP-Yaw",
];

fn numbered(prefix: &str, count: usize) -> impl Iterator<Item = String> + '_ {
    (1..=count).map(move |i| format!("{prefix}{i:02}"))
}

/// The standard SkyBox rig.
///
/// Wave gauges `WG01`..`WG16`, six motion-probe axes, load cells
/// `LC01`..`LC04`, position sensors `Pos01`/`Pos02`, the wave-maker `Wand`,
/// pressure sensors `PS01`..`PS08` and the LED timing channel.
///
/// ```rust
/// use skybox_config::factory_rig;
///
/// let rig = factory_rig();
/// assert_eq!(rig.timing_channel.as_deref(), Some("LED-chan100"));
/// assert!(rig.catalog().contains("MP-Heave"));
/// ```
pub fn factory_rig() -> RigConfig {
    let channels = numbered("WG", 16)
        .chain(MOTION_PROBES.iter().map(|s| (*s).to_string()))
        .chain(numbered("LC", 4))
        .chain(numbered("Pos", 2))
        .chain(std::iter::once("Wand".to_string()))
        .chain(numbered("PS", 8))
        .chain(std::iter::once(FACTORY_TIMING_CHANNEL.to_string()));

    RigConfig::new("skybox")
        .with_description("SkyBox wave basin: gauges, motion probes, load cells, pressure sensors")
        .with_channels(channels)
        .with_timing_channel(FACTORY_TIMING_CHANNEL)
}

/// Get a factory rig by name (case-insensitive).
pub fn get_factory_rig(name: &str) -> Option<RigConfig> {
    FACTORY_RIG_NAMES
        .iter()
        .any(|n| n.eq_ignore_ascii_case(name))
        .then(factory_rig)
}

/// Returns true if `name` names a factory rig.
pub fn is_factory_rig(name: &str) -> bool {
    FACTORY_RIG_NAMES.iter().any(|n| n.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate_rig;

    #[test]
    fn test_factory_rig_is_valid() {
        let rig = factory_rig();
        assert_eq!(validate_rig(&rig), Ok(()));
        assert_eq!(rig.len(), 16 + 6 + 4 + 2 + 1 + 8 + 1);
    }

    #[test]
    fn test_factory_channel_names() {
        let rig = factory_rig();
        let catalog = rig.catalog();
        for name in ["WG01", "WG16", "MP-Yaw", "LC04", "Pos02", "Wand", "PS08", "LED-chan100"] {
            assert!(catalog.contains(name), "missing {name}");
        }
        assert!(!catalog.contains("WG17"));
        assert!(!catalog.contains("Time"));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert!(get_factory_rig("SkyBox").is_some());
        assert!(is_factory_rig("SKYBOX"));
        assert!(get_factory_rig("flume").is_none());
    }

    #[test]
    fn test_factory_rig_toml_round_trip() {
        let rig = factory_rig();
        let parsed = RigConfig::from_toml(&rig.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, rig);
    }
}
