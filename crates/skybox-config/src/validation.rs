//! Rig configuration validation.
//!
//! ```rust
//! use skybox_config::{RigConfig, validate_rig, ValidationError};
//!
//! let rig = RigConfig::new("flume").with_channels(["WG01", "WG01"]);
//! assert_eq!(
//!     validate_rig(&rig),
//!     Err(ValidationError::DuplicateChannel("WG01".to_string()))
//! );
//! ```

use std::collections::HashSet;
use thiserror::Error;

use crate::rig::RigConfig;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// The channel list is empty.
    #[error("rig has no channels")]
    EmptyCatalog,

    /// A channel name appears more than once.
    #[error("channel '{0}' is listed more than once")]
    DuplicateChannel(String),

    /// A channel name is blank.
    #[error("channel names must not be blank")]
    BlankChannel,

    /// The timing channel is not one of the rig's channels.
    #[error("timing channel '{0}' is not in the channel list")]
    UnknownTimingChannel(String),

    /// The primary data block name is empty.
    #[error("primary block name must not be empty")]
    EmptyPrimaryBlock,

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Check a rig for structural problems.
///
/// Every problem is collected; a single one is returned as is, several
/// are wrapped in [`ValidationError::Multiple`].
pub fn validate_rig(rig: &RigConfig) -> ValidationResult<()> {
    let mut errors = Vec::new();

    if rig.primary_block.trim().is_empty() {
        errors.push(ValidationError::EmptyPrimaryBlock);
    }

    if rig.channels.is_empty() {
        errors.push(ValidationError::EmptyCatalog);
    }

    let mut seen = HashSet::new();
    for channel in &rig.channels {
        if channel.trim().is_empty() {
            errors.push(ValidationError::BlankChannel);
        } else if !seen.insert(channel.as_str()) {
            errors.push(ValidationError::DuplicateChannel(channel.clone()));
        }
    }

    if let Some(timing) = &rig.timing_channel
        && !seen.contains(timing.as_str())
    {
        errors.push(ValidationError::UnknownTimingChannel(timing.clone()));
    }

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rig(channels: &[&str]) -> RigConfig {
        RigConfig::new("test").with_channels(channels.iter().copied())
    }

    #[test]
    fn test_valid_rig() {
        let rig = rig(&["WG01", "LED-chan100"]).with_timing_channel("LED-chan100");
        assert_eq!(validate_rig(&rig), Ok(()));
    }

    #[test]
    fn test_empty_catalog() {
        assert_eq!(validate_rig(&rig(&[])), Err(ValidationError::EmptyCatalog));
    }

    #[test]
    fn test_blank_channel() {
        assert_eq!(
            validate_rig(&rig(&["WG01", "  "])),
            Err(ValidationError::BlankChannel)
        );
    }

    #[test]
    fn test_unknown_timing_channel() {
        let rig = rig(&["WG01"]).with_timing_channel("LED-chan100");
        assert_eq!(
            validate_rig(&rig),
            Err(ValidationError::UnknownTimingChannel("LED-chan100".to_string()))
        );
    }

    #[test]
    fn test_multiple_errors_are_collected() {
        let mut rig = rig(&["WG01", "WG01"]);
        rig.primary_block = String::new();

        let Err(ValidationError::Multiple(errors)) = validate_rig(&rig) else {
            panic!("expected multiple errors");
        };
        assert_eq!(
            errors,
            vec![
                ValidationError::EmptyPrimaryBlock,
                ValidationError::DuplicateChannel("WG01".to_string()),
            ]
        );
        assert!(
            ValidationError::Multiple(errors)
                .to_string()
                .contains("; channel 'WG01' is listed more than once")
        );
    }
}
