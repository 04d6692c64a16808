use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::translate::TranslationTier;

/// Process-lifetime counters for the pipeline.
///
/// Created once at startup, mutated in place for the process lifetime,
/// reset only by explicit operator action. Relaxed ordering is enough:
/// these are statistics, not synchronization.
pub struct MetricsRegistry {
    started_at: DateTime<Utc>,
    total_requests: AtomicU64,
    primary_success: AtomicU64,
    fallback_count: AtomicU64,
    cache_hits: AtomicU64,
    error_passthroughs: AtomicU64,
    total_latency_ms: AtomicU64,
}

/// Point-in-time view of the registry plus derived rates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub started_at: DateTime<Utc>,
    pub total_requests: u64,
    pub primary_success: u64,
    pub fallback_count: u64,
    pub cache_hits: u64,
    pub error_passthroughs: u64,
    pub avg_latency_ms: f64,
    /// Share of model-tier translations the primary handled alone.
    pub primary_success_rate: f64,
    /// Share of model-tier translations that escalated past the primary.
    pub fallback_rate: f64,
    /// Share of all resolved translations served from the cache.
    pub cache_hit_rate: f64,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            total_requests: AtomicU64::new(0),
            primary_success: AtomicU64::new(0),
            fallback_count: AtomicU64::new(0),
            cache_hits: AtomicU64::new(0),
            error_passthroughs: AtomicU64::new(0),
            total_latency_ms: AtomicU64::new(0),
        }
    }

    pub fn record_request(&self, latency_ms: u64) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.total_latency_ms.fetch_add(latency_ms, Ordering::Relaxed);
    }

    pub fn record_translation(&self, tier: TranslationTier) {
        match tier {
            TranslationTier::Primary => {
                self.primary_success.fetch_add(1, Ordering::Relaxed);
            }
            TranslationTier::Fallback => {
                self.fallback_count.fetch_add(1, Ordering::Relaxed);
            }
            TranslationTier::Error => {
                self.fallback_count.fetch_add(1, Ordering::Relaxed);
                self.error_passthroughs.fetch_add(1, Ordering::Relaxed);
            }
            TranslationTier::Cache => {
                self.cache_hits.fetch_add(1, Ordering::Relaxed);
            }
            // Same-language requests say nothing about model health
            TranslationTier::Passthrough => {}
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let total_requests = self.total_requests.load(Ordering::Relaxed);
        let primary_success = self.primary_success.load(Ordering::Relaxed);
        let fallback_count = self.fallback_count.load(Ordering::Relaxed);
        let cache_hits = self.cache_hits.load(Ordering::Relaxed);
        let total_latency_ms = self.total_latency_ms.load(Ordering::Relaxed);

        let attempts = primary_success + fallback_count;
        let resolved = attempts + cache_hits;

        MetricsSnapshot {
            started_at: self.started_at,
            total_requests,
            primary_success,
            fallback_count,
            cache_hits,
            error_passthroughs: self.error_passthroughs.load(Ordering::Relaxed),
            avg_latency_ms: if total_requests == 0 {
                0.0
            } else {
                total_latency_ms as f64 / total_requests as f64
            },
            primary_success_rate: rate(primary_success, attempts),
            fallback_rate: rate(fallback_count, attempts),
            cache_hit_rate: rate(cache_hits, resolved),
        }
    }

    /// Operator action; the start timestamp is kept so uptime stays honest.
    pub fn reset(&self) {
        self.total_requests.store(0, Ordering::Relaxed);
        self.primary_success.store(0, Ordering::Relaxed);
        self.fallback_count.store(0, Ordering::Relaxed);
        self.cache_hits.store(0, Ordering::Relaxed);
        self.error_passthroughs.store(0, Ordering::Relaxed);
        self.total_latency_ms.store(0, Ordering::Relaxed);
    }
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn rate(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
