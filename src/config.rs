use serde::{Deserialize, Serialize};

/// Metadata endpoint serving one JSON document per asset id.
pub const BASE_URL: &str = "https://www.gstatic.com/prettyearth/assets/data/v3";

/// Known boundaries of the asset identifier space, lower inclusive,
/// upper exclusive.
pub const KNOWN_ID_LOWER: u32 = 1000;
pub const KNOWN_ID_UPPER: u32 = 15000;

pub const DEFAULT_BATCH_SIZE: usize = 20;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub base_url: String,
    pub lower_bound: u32,
    pub upper_bound: u32,
    /// Number of parallel calls per batch. A high value may result in
    /// wrong failures from the remote endpoint.
    pub batch_size: usize,
    /// Extra attempts after a non-200, non-404 response.
    pub max_retries: u32,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            lower_bound: KNOWN_ID_LOWER,
            upper_bound: KNOWN_ID_UPPER,
            batch_size: DEFAULT_BATCH_SIZE,
            max_retries: DEFAULT_MAX_RETRIES,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl Config {
    pub fn total_ids(&self) -> usize {
        self.upper_bound.saturating_sub(self.lower_bound) as usize
    }
}
