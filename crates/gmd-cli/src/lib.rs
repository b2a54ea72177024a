//! Command line library components for the gender mismatch detector.

pub mod config;
pub mod input;
pub mod logging;
pub mod workflow;
