// SpaceTraders system scanner library
// Pages through systems, expands waypoints, summarizes markets and deposits

pub mod models;
pub mod client;
pub mod operations;
pub mod storage;
pub mod config;
pub mod cli;
pub mod verbosity;

// Re-export commonly used types
pub use models::{
    system::System,
    waypoint::{Waypoint, Trait},
    market::{Market, TradeGood},
    responses::*,
};

pub use client::{SpaceTradersClient, GalaxyApi, ApiError};
pub use operations::{SystemScanner, ScanSettings, ScanReport};
pub use storage::{ReportWriter, SystemSummaryRow};
pub use config::ScannerConfig;

// Constants
pub const API_BASE_URL: &str = "https://api.spacetraders.io/v2";
pub const AGENT_TOKEN_FILE: &str = "AGENT_TOKEN";
pub const CONFIG_FILE: &str = "scanner.toml";
pub const RESULTS_FILE: &str = "systems.csv";
pub const API_LOG_FILE: &str = "api_debug.log";
