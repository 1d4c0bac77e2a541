//! Bounded cache of token/lemma analyses keyed by the submitted text.
//!
//! Re-submitting the same text (the usual case when a user switches between
//! operations on one input) skips re-tokenization. Oldest entries are evicted
//! first once the capacity is reached.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use nlp_examples_shared::{CacheStats, TokenLemma};
use parking_lot::Mutex;

#[derive(Default)]
struct Entries {
    map: HashMap<String, Arc<Vec<TokenLemma>>>,
    order: VecDeque<String>,
}

pub struct LemmaCache {
    capacity: usize,
    entries: Mutex<Entries>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl LemmaCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Mutex::new(Entries::default()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn get(&self, text: &str) -> Option<Arc<Vec<TokenLemma>>> {
        let found = self.entries.lock().map.get(text).cloned();
        match found {
            Some(_) => self.hits.fetch_add(1, Ordering::Relaxed),
            None => self.misses.fetch_add(1, Ordering::Relaxed),
        };
        found
    }

    pub fn insert(&self, text: &str, tokens: Arc<Vec<TokenLemma>>) {
        let mut entries = self.entries.lock();

        if entries.map.contains_key(text) {
            entries.map.insert(text.to_string(), tokens);
            return;
        }

        while entries.map.len() >= self.capacity {
            match entries.order.pop_front() {
                Some(oldest) => {
                    entries.map.remove(&oldest);
                }
                None => break,
            }
        }

        entries.order.push_back(text.to_string());
        entries.map.insert(text.to_string(), tokens);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            capacity: self.capacity,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
