//! CLI library components for the effects dataset tools.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod report;
