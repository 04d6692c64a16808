use serde::{Deserialize, Serialize};

/// Tunables for the conversation pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Max cached translations before FIFO eviction.
    pub cache_capacity: usize,
    /// Cache entry lifetime in seconds; expired entries miss on read.
    pub cache_ttl_secs: u64,
    /// Leading chars of the input that participate in the cache key.
    pub cache_key_prefix_chars: usize,
    /// Leading chars scanned by the script heuristic.
    pub detection_scan_chars: usize,
    /// Excerpt length sent to the model-backed detector.
    pub detection_excerpt_chars: usize,
    /// Primary-tier confidence gate; below this the fallback model runs.
    pub primary_accept_threshold: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            cache_capacity: 1000,
            cache_ttl_secs: 3600,
            cache_key_prefix_chars: 120,
            detection_scan_chars: 64,
            detection_excerpt_chars: 200,
            primary_accept_threshold: 0.85,
        }
    }
}
