//! Configuration and CLI argument handling

use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "countdown")]
#[command(about = "A countdown timer engine driven over HTTP")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Preset value for the hours field
    #[arg(long)]
    pub hours: Option<u64>,

    /// Preset value for the minutes field
    #[arg(long)]
    pub minutes: Option<u64>,

    /// Preset value for the seconds field
    #[arg(long)]
    pub seconds: Option<u64>,

    /// Press play once the preset is applied
    #[arg(long)]
    pub autostart: bool,

    /// Shell command to run whenever the countdown finishes
    #[arg(long, value_name = "CMD")]
    pub on_finish: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Whether any field preset was given
    pub fn has_preset(&self) -> bool {
        self.hours.is_some() || self.minutes.is_some() || self.seconds.is_some()
    }
}
