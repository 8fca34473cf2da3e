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

//! Random-eviction cache

use super::{Cache, CacheError};
use crate::ContentId;

use rand::prelude::*;
use std::collections::HashMap;

/// # Random-eviction (RAND) cache
///
/// Eviction removes a content chosen uniformly at random among the residents, drawn from an own
/// seeded generator so that runs are reproducible. No per-access bookkeeping is kept: `get` is a
/// membership test.
///
/// Residents are stored in a vector with a content-to-slot index, which gives constant-time
/// membership tests and constant-time removal by swapping with the last slot.
#[derive(Debug)]
pub struct RandCache {
    capacity: usize,
    slots: Vec<ContentId>,
    index: HashMap<ContentId, usize>,
    rng: StdRng,
}

impl RandCache {
    /// Create an empty RAND cache with the given capacity and eviction seed.
    pub fn new(capacity: usize, seed: u64) -> Result<Self, CacheError> {
        if capacity == 0 {
            return Err(CacheError::ZeroCapacity);
        }
        Ok(Self {
            capacity,
            slots: Vec::with_capacity(capacity),
            index: HashMap::new(),
            rng: StdRng::seed_from_u64(seed),
        })
    }

    fn remove_slot(&mut self, slot: usize) -> ContentId {
        let victim = self.slots.swap_remove(slot);
        self.index.remove(&victim);
        if let Some(moved) = self.slots.get(slot) {
            self.index.insert(*moved, slot);
        }
        victim
    }
}

impl Cache for RandCache {
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn len(&self) -> usize {
        self.slots.len()
    }

    fn has(&self, content: ContentId) -> bool {
        self.index.contains_key(&content)
    }

    fn get(&mut self, content: ContentId) -> bool {
        self.index.contains_key(&content)
    }

    fn put(&mut self, content: ContentId) -> Option<ContentId> {
        if self.index.contains_key(&content) {
            return None;
        }
        let evicted = if self.slots.len() >= self.capacity {
            let slot = self.rng.gen_range(0, self.slots.len());
            Some(self.remove_slot(slot))
        } else {
            None
        };
        self.index.insert(content, self.slots.len());
        self.slots.push(content);
        evicted
    }

    fn dump(&self) -> Vec<ContentId> {
        self.slots.clone()
    }

    fn clear(&mut self) {
        self.slots.clear();
        self.index.clear();
    }
}
