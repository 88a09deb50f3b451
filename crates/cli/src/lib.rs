//! CLI tool for exercising the routing core against a grid description.
//!
//! Provides commands for:
//! - Resolving an object path to a hierarchy + dispatch decision
//! - Inspecting the resource topology

pub mod commands;
pub mod config;

pub use commands::Cli;
pub use config::GridConfig;
