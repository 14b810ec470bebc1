//! Server configuration.
//!
//! Every option can be given as a command line flag or an environment variable.

use chrono::FixedOffset;
use clap::{Parser, builder::RangedU64ValueParser};
use kaiwa_shared::time::offset_from_hours;

use crate::usecase::{DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT};

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "kaiwa-server")]
#[command(about = "Real-time chat session hub over WebSocket", long_about = None)]
pub struct ServerConfig {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "KAIWA_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "KAIWA_PORT", default_value_t = 10000)]
    pub port: u16,

    /// Number of recent messages replayed to a newly connected session (at most 50)
    #[arg(
        long,
        env = "KAIWA_HISTORY_LIMIT",
        default_value_t = DEFAULT_HISTORY_LIMIT,
        value_parser = RangedU64ValueParser::<usize>::new().range(0..=MAX_HISTORY_LIMIT as u64)
    )]
    pub history_limit: usize,

    /// Offset from UTC (hours) used to render message times
    #[arg(
        long,
        env = "KAIWA_UTC_OFFSET_HOURS",
        default_value_t = 9,
        allow_negative_numbers = true
    )]
    pub utc_offset_hours: i32,

    /// Origins allowed by CORS (repeatable, `*` allows any)
    #[arg(
        long = "allowed-origin",
        env = "KAIWA_ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn offset(&self) -> FixedOffset {
        offset_from_hours(self.utc_offset_hours)
    }
}
