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

//! Least-recently-used cache

use super::{Cache, CacheError};
use crate::ContentId;

use std::collections::{BTreeMap, HashMap};

/// # Least Recently Used (LRU) cache
///
/// Eviction removes the content whose last access lies furthest in the past. Accesses are
/// tracked with a monotonic counter: `entries` maps each resident content to the tick of its
/// last access, and `order` is the inverse map, so the least recently used content is always
/// the first entry of `order`. Both a hit (`get`) and a re-insertion (`put` of a resident
/// content) refresh the tick.
#[derive(Debug, Clone)]
pub struct LruCache {
    capacity: usize,
    entries: HashMap<ContentId, u64>,
    order: BTreeMap<u64, ContentId>,
    tick: u64,
}

impl LruCache {
    /// Create an empty LRU cache with the given capacity.
    pub fn new(capacity: usize) -> Result<Self, CacheError> {
        if capacity == 0 {
            return Err(CacheError::ZeroCapacity);
        }
        Ok(Self { capacity, entries: HashMap::new(), order: BTreeMap::new(), tick: 0 })
    }

    fn touch(&mut self, content: ContentId, old_tick: u64) {
        self.order.remove(&old_tick);
        self.tick += 1;
        self.order.insert(self.tick, content);
        self.entries.insert(content, self.tick);
    }
}

impl Cache for LruCache {
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
            Some(&tick) => {
                self.touch(content, tick);
                true
            }
            None => false,
        }
    }

    fn put(&mut self, content: ContentId) -> Option<ContentId> {
        if let Some(&tick) = self.entries.get(&content) {
            self.touch(content, tick);
            return None;
        }
        let evicted = if self.entries.len() >= self.capacity {
            // the first entry of the order map is the least recently used
            let victim = self.order.iter().next().map(|(t, c)| (*t, *c));
            victim.map(|(tick, victim)| {
                self.order.remove(&tick);
                self.entries.remove(&victim);
                victim
            })
        } else {
            None
        };
        self.tick += 1;
        self.order.insert(self.tick, content);
        self.entries.insert(content, self.tick);
        evicted
    }

    fn dump(&self) -> Vec<ContentId> {
        self.order.values().rev().cloned().collect()
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}
