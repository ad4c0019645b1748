//! CLI library components for the MCD rules toolchain.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod types;
