//! CLI argument definitions for the effects dataset tools.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{Args, ColorChoice, Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use effects_ingest::DEFAULT_DOCUMENT_PATH;
use effects_validate::{Profile, RuleSet, RulesError};
use tracing::level_filters::LevelFilter;

use crate::logging::{LogConfig, LogFormat};

#[derive(Parser)]
#[command(
    name = "validate-effects",
    version,
    about = "Validate the effects dataset against its authoring rules",
    long_about = "Validate the effects dataset against its authoring rules.\n\n\
                  Runs five passes (ordering, duplicate names, fields, markup,\n\
                  consistency) and stops at the first violation unless\n\
                  --collect-all is given."
)]
pub struct ValidateCli {
    #[command(flatten)]
    pub document: DocumentArgs,

    /// Run every pass and report all issues instead of stopping at the first.
    #[arg(long = "collect-all")]
    pub collect_all: bool,

    /// Report format.
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: ReportFormatArg,

    #[command(flatten)]
    pub logging: LogArgs,
}

#[derive(Parser)]
#[command(
    name = "sort-effects",
    version,
    about = "Rewrite the effects dataset in canonical order"
)]
pub struct SortCli {
    #[command(flatten)]
    pub document: DocumentArgs,

    /// Only check ordering; exit 1 and print the first difference if unsorted.
    #[arg(long = "check")]
    pub check: bool,

    #[command(flatten)]
    pub logging: LogArgs,
}

/// Where the document lives and which rules apply to it.
#[derive(Debug, Args)]
pub struct DocumentArgs {
    /// Path to the effects document.
    #[arg(
        long = "path",
        value_name = "PATH",
        env = "EFFECTS_PATH",
        default_value = DEFAULT_DOCUMENT_PATH
    )]
    pub path: PathBuf,

    /// TOML file overriding individual rules.
    #[arg(long = "rules", value_name = "PATH")]
    pub rules: Option<PathBuf>,

    /// Base rule profile (a rules file may override it).
    #[arg(long = "profile", value_enum, default_value = "strict")]
    pub profile: ProfileArg,
}

impl DocumentArgs {
    /// Resolve the effective rule set from `--profile` and `--rules`.
    pub fn rule_set(&self) -> Result<RuleSet, RulesError> {
        let profile = self.profile.into();
        match &self.rules {
            Some(path) => RuleSet::load(path, profile),
            None => Ok(RuleSet::for_profile(profile)),
        }
    }
}

/// Logging flags shared by both tools.
#[derive(Debug, Args)]
pub struct LogArgs {
    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl LogArgs {
    /// Build logging configuration from CLI flags with consistent precedence.
    pub fn log_config(&self) -> LogConfig {
        let mut config = LogConfig {
            level_filter: self.verbosity.tracing_level_filter(),
            use_env_filter: !(self.verbosity.is_present() || self.log_level.is_some()),
            ..LogConfig::default()
        };
        if let Some(level) = self.log_level {
            config.level_filter = level.into();
        }
        config.format = match self.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        };
        config.log_file = self.log_file.clone();
        config.with_ansi = match self.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.log_file.is_none() && io::stderr().is_terminal(),
        };
        config
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProfileArg {
    /// Global duplicates, exact scaling tag, no length cap.
    Strict,
    /// Scaling tag only required when scaling, 125-character descriptions.
    Legacy,
}

impl From<ProfileArg> for Profile {
    fn from(value: ProfileArg) -> Self {
        match value {
            ProfileArg::Strict => Profile::Strict,
            ProfileArg::Legacy => Profile::Legacy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormatArg {
    Text,
    Json,
}

/// CLI log level choices.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(value: LogLevelArg) -> Self {
        match value {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
