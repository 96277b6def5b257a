//! CLI command implementations.

pub mod catalog;
pub mod common;
pub mod inspect;
pub mod spectrum;
pub mod sync;
pub mod tare;
