// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Gida Search contributors

//! Short-TTL in-memory cache for repeated identical searches.
//!
//! Eviction removes the oldest-inserted key once the capacity is exceeded —
//! an approximation of LRU by insertion order, not access order, carried
//! over from the original behavior.  Stale entries are treated as misses
//! but stay in place until evicted.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

pub struct TtlCache<T> {
    capacity: usize,
    ttl: Duration,
    entries: HashMap<String, (T, Instant)>,
    /// Keys in insertion order; each key appears exactly once.
    order: VecDeque<String>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            capacity,
            ttl,
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    /// A clone of the cached value, if present and within TTL.
    pub fn get(&self, key: &str) -> Option<T> {
        let (value, inserted_at) = self.entries.get(key)?;
        (inserted_at.elapsed() < self.ttl).then(|| value.clone())
    }

    /// Store `value` under `key` with the current timestamp.  Re-inserting an
    /// existing key replaces the value but keeps its insertion position.
    /// Overflow evicts oldest-inserted keys down to capacity.
    pub fn insert(&mut self, key: String, value: T) {
        if self.entries.insert(key.clone(), (value, Instant::now())).is_none() {
            self.order.push_back(key);
        }
        while self.entries.len() > self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
