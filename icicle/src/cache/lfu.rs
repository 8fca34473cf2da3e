// Icicle: A Discrete-Event Simulator for In-Network Caching
// Copyright (C) 2026  The Icicle Developers
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! Least-frequently-used cache

use super::{Cache, CacheError};
use crate::ContentId;

use std::collections::{BTreeMap, HashMap};

/// # Least Frequently Used (LFU) cache
///
/// Every resident content carries an access counter and the sequence number of its insertion.
/// Eviction removes the content with the smallest counter; ties are broken towards the oldest
/// insertion. The `order` map is indexed by `(count, sequence)` so the victim is always its
/// first entry.
#[derive(Debug, Clone)]
pub struct LfuCache {
    capacity: usize,
    entries: HashMap<ContentId, (u64, u64)>,
    order: BTreeMap<(u64, u64), ContentId>,
    seq: u64,
}

impl LfuCache {
    /// Create an empty LFU cache with the given capacity.
    pub fn new(capacity: usize) -> Result<Self, CacheError> {
        if capacity == 0 {
            return Err(CacheError::ZeroCapacity);
        }
        Ok(Self { capacity, entries: HashMap::new(), order: BTreeMap::new(), seq: 0 })
    }

    fn bump(&mut self, content: ContentId, count: u64, seq: u64) {
        self.order.remove(&(count, seq));
        self.order.insert((count + 1, seq), content);
        self.entries.insert(content, (count + 1, seq));
    }
}

impl Cache for LfuCache {
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn has(&self, content: ContentId) -> bool {
        self.entries.contains_key(&content)
    }

    fn get(&mut self, content: ContentId) -> bool {
        match self.entries.get(&content) {
            Some(&(count, seq)) => {
                self.bump(content, count, seq);
                true
            }
            None => false,
        }
    }

    fn put(&mut self, content: ContentId) -> Option<ContentId> {
        if let Some(&(count, seq)) = self.entries.get(&content) {
            self.bump(content, count, seq);
            return None;
        }
        let evicted = if self.entries.len() >= self.capacity {
            let victim = self.order.iter().next().map(|(k, c)| (*k, *c));
            victim.map(|(key, victim)| {
                self.order.remove(&key);
                self.entries.remove(&victim);
                victim
            })
        } else {
            None
        };
        self.seq += 1;
        self.entries.insert(content, (1, self.seq));
        self.order.insert((1, self.seq), content);
        evicted
    }

    fn dump(&self) -> Vec<ContentId> {
        // most frequently used first
        self.order.values().rev().cloned().collect()
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}
