use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::operations::DEFAULT_RESOURCE;
use crate::{v_info, API_BASE_URL, AGENT_TOKEN_FILE, RESULTS_FILE};

/// Largest page size the systems and waypoint listings accept.
pub const MAX_PAGE_LIMIT: u32 = 20;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    pub api: ApiConfig,
    pub scan: ScanConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Root of the REST API, without a trailing slash
    pub base_url: String,
    /// Bearer token; falls back to the environment and the token file when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    /// Pause after every API call in milliseconds
    pub request_delay_ms: u64,
    /// Append every call and response to the API debug log
    pub api_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Systems pages to read per run (0 = until the listing is exhausted)
    pub max_pages: u32,
    /// Page size for systems and waypoint listings (1..=20)
    pub page_limit: u32,
    /// Trade good tallied as exports minus imports per system
    pub resource: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// CSV file truncated at the start of every run
    pub results_file: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: API_BASE_URL.to_string(),
            api_token: None,
            request_delay_ms: 500,
            api_logging: false,
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_pages: 5,
            page_limit: MAX_PAGE_LIMIT,
            resource: DEFAULT_RESOURCE.to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_file: RESULTS_FILE.to_string(),
        }
    }
}

impl ScannerConfig {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load_or_create(config_path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        if Path::new(config_path).exists() {
            v_info!("📋 Loading configuration from {}", config_path);
            let config_str = fs::read_to_string(config_path)?;
            let config: ScannerConfig = toml::from_str(&config_str)
                .map_err(|e| format!("Invalid configuration in {}: {}", config_path, e))?;
            Ok(config)
        } else {
            v_info!("📋 Creating default configuration at {}", config_path);
            let config = ScannerConfig::default();
            config.save(config_path)?;
            v_info!("💡 Edit {} to customize the scan", config_path);
            Ok(config)
        }
    }

    pub fn save(&self, config_path: &str) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = Path::new(config_path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let config_str = toml::to_string_pretty(self)?;
        fs::write(config_path, config_str)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.api.base_url.trim().is_empty() {
            return Err("base_url must not be empty".to_string());
        }
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            return Err(format!("base_url must be an http(s) URL, got {}", self.api.base_url));
        }
        if self.scan.page_limit == 0 || self.scan.page_limit > MAX_PAGE_LIMIT {
            return Err(format!("page_limit must be between 1 and {}", MAX_PAGE_LIMIT));
        }
        if self.scan.resource.trim().is_empty() {
            return Err("resource must not be empty".to_string());
        }
        if self.output.results_file.trim().is_empty() {
            return Err("results_file must not be empty".to_string());
        }

        v_info!("✅ Configuration validation passed");
        Ok(())
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.api.request_delay_ms)
    }

    pub fn print_summary(&self) {
        v_info!("📋 Configuration Summary:");
        v_info!("   🌐 API: {}", self.api.base_url);
        v_info!("   ⏱️  Delay between calls: {}ms", self.api.request_delay_ms);
        if self.scan.max_pages == 0 {
            v_info!("   📄 Pages: all ({} systems per page)", self.scan.page_limit);
        } else {
            v_info!("   📄 Pages: {} ({} systems per page)", self.scan.max_pages, self.scan.page_limit);
        }
        v_info!("   ⛽ Tallied resource: {}", self.scan.resource);
        v_info!("   💾 Results: {}", self.output.results_file);
    }
}

/// Resolve the API token: explicit value, then configuration, then the
/// `API_TOKEN` / `API_KEY` environment variables, then the token file.
pub fn resolve_api_token(explicit: Option<&str>, config: &ScannerConfig) -> Result<String, Box<dyn std::error::Error>> {
    let candidates = [
        explicit.map(str::to_string),
        config.api.api_token.clone(),
        std::env::var("API_TOKEN").ok(),
        std::env::var("API_KEY").ok(),
    ];

    if let Some(token) = candidates
        .into_iter()
        .flatten()
        .map(|token| token.trim().to_string())
        .find(|token| !token.is_empty())
    {
        return Ok(token);
    }

    load_agent_token()
}

pub fn load_agent_token() -> Result<String, Box<dyn std::error::Error>> {
    let token = fs::read_to_string(AGENT_TOKEN_FILE)
        .map_err(|e| format!("No API token configured and failed to read {}: {}", AGENT_TOKEN_FILE, e))?
        .trim()
        .to_string();
    if token.is_empty() {
        return Err(format!("{} is empty", AGENT_TOKEN_FILE).into());
    }
    Ok(token)
}
