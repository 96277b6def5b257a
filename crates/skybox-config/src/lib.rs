//! Rig configuration for SkyBox recordings.
//!
//! A rig config names the sensor channels of a test rig and the layout of
//! its recording files. The core never reads these files itself; it is
//! handed the [`ChannelCatalog`](skybox_core::ChannelCatalog) and
//! [`GroupLayout`](skybox_core::GroupLayout) built from a [`RigConfig`].
//!
//! # Features
//!
//! - **Rig files**: load and save rigs as TOML
//! - **Validation**: duplicate, blank and unknown timing channels
//! - **Paths**: platform-specific user rig directory
//! - **Factory rig**: the standard SkyBox basin catalog
//!
//! # Example
//!
//! ```rust,no_run
//! use skybox_config::{RigConfig, resolve_rig, user_rigs_dir};
//!
//! let rig = resolve_rig("skybox").unwrap();
//! let catalog = rig.catalog();
//! let layout = rig.layout();
//!
//! let custom = RigConfig::new("flume").with_channels(["WG01", "WG02"]);
//! custom.save(user_rigs_dir().join("flume.toml")).unwrap();
//! ```

mod error;
mod rig;

/// Platform-specific paths for rig files.
pub mod paths;

/// Rig validation.
pub mod validation;

/// Factory rigs bundled with the library.
pub mod factory;

pub use error::ConfigError;
pub use factory::{FACTORY_RIG_NAMES, FACTORY_TIMING_CHANNEL, factory_rig, get_factory_rig, is_factory_rig};
pub use paths::{
    ensure_user_rigs_dir, find_rig, install_rig, list_user_rigs, resolve_rig, rig_name_from_path,
    user_config_dir, user_rigs_dir,
};
pub use rig::RigConfig;
pub use validation::{ValidationError, ValidationResult, validate_rig};
