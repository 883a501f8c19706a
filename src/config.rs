//! Command-line parsing and logger setup

use crate::constants::{DEFAULT_OVERRUN_DELAY_MS, DEFAULT_POLL_MS};
use crate::memory::{EngineConfig, SizeUnit};
use clap::{Parser, ValueEnum};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// CLI options for the allocation visualizer
#[derive(Debug, Clone, Parser)]
#[command(
    name = "allocviz",
    about = "Grow, shrink, zero-fill and overrun one large allocation interactively",
    version
)]
pub struct Args {
    /// Size of one allocation step
    #[arg(long, value_enum, default_value_t = SizeUnit::Gib)]
    pub unit: SizeUnit,

    /// Input poll timeout in milliseconds (also the spinner frame rate)
    #[arg(
        long = "poll-ms",
        default_value_t = DEFAULT_POLL_MS,
        value_parser = clap::value_parser!(u64).range(1..=1000)
    )]
    pub poll_ms: u64,

    /// Pause after each byte written past the end, in milliseconds
    #[arg(long = "overrun-delay-ms", default_value_t = DEFAULT_OVERRUN_DELAY_MS)]
    pub overrun_delay_ms: u64,

    /// Log file location
    #[arg(long, default_value = "allocviz.log")]
    pub log_file: PathBuf,

    /// Minimum level written to the log file
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Do not write a log file
    #[arg(long)]
    pub no_log: bool,
}

impl Args {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::for_unit(self.unit)
            .with_overrun_delay(Duration::from_millis(self.overrun_delay_ms))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_ms)
    }

    /// Install the file logger. The terminal belongs to the UI, so nothing is
    /// logged to stdout or stderr.
    pub fn init_logging(&self) -> io::Result<()> {
        if self.no_log {
            return Ok(());
        }
        let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
        let log_file = File::create(&self.log_file)?;
        // A logger may already be installed (tests); keep the existing one.
        let _ = WriteLogger::init(self.log_level.filter(), log_config, log_file);
        Ok(())
    }
}
