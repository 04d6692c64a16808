use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::LanguageCode;

/// Cache key: language pair plus a bounded prefix of the source text.
/// The prefix bound caps key cardinality and tolerates trailing variation
/// in otherwise-identical inputs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    source: LanguageCode,
    target: LanguageCode,
    prefix: String,
}

impl CacheKey {
    pub fn new(
        source: LanguageCode,
        target: LanguageCode,
        text: &str,
        prefix_chars: usize,
    ) -> Self {
        Self {
            source,
            target,
            prefix: text.chars().take(prefix_chars).collect(),
        }
    }
}

struct CacheEntry {
    text: String,
    inserted_at: Instant,
}

struct CacheInner {
    entries: HashMap<CacheKey, CacheEntry>,
    insertion_order: VecDeque<CacheKey>,
}

/// Bounded memo of primary-tier translations.
///
/// Eviction is FIFO by insertion order once `capacity` is exceeded, and
/// the TTL is checked on read. Every operation completes synchronously
/// under one lock, nothing awaits while holding it, so concurrent
/// requests always observe atomic read-modify-write.
pub struct TranslationCache {
    inner: Mutex<CacheInner>,
    capacity: usize,
    ttl: Duration,
}

impl TranslationCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                entries: HashMap::new(),
                insertion_order: VecDeque::new(),
            }),
            capacity,
            ttl,
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<String> {
        let mut inner = self.inner.lock();
        match inner.entries.get(key) {
            Some(entry) if entry.inserted_at.elapsed() < self.ttl => Some(entry.text.clone()),
            Some(_) => {
                // Expired: drop it so eviction bookkeeping stays accurate
                inner.entries.remove(key);
                inner.insertion_order.retain(|k| k != key);
                None
            }
            None => None,
        }
    }

    pub fn set(&self, key: CacheKey, text: String) {
        let mut inner = self.inner.lock();
        let entry = CacheEntry {
            text,
            inserted_at: Instant::now(),
        };
        if inner.entries.insert(key.clone(), entry).is_none() {
            inner.insertion_order.push_back(key);
        }
        while inner.entries.len() > self.capacity {
            let Some(oldest) = inner.insertion_order.pop_front() else {
                break;
            };
            inner.entries.remove(&oldest);
        }
    }

    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
        inner.insertion_order.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
