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

//! First-in-first-out cache

use super::{Cache, CacheError};
use crate::ContentId;

use std::collections::{HashSet, VecDeque};

/// # First In First Out (FIFO) cache
///
/// Eviction removes the content that was inserted first. Accesses do not change the eviction
/// order, so `get` is a pure membership test with hit accounting left to the caller.
#[derive(Debug, Clone)]
pub struct FifoCache {
    capacity: usize,
    resident: HashSet<ContentId>,
    queue: VecDeque<ContentId>,
}

impl FifoCache {
    /// Create an empty FIFO cache with the given capacity.
    pub fn new(capacity: usize) -> Result<Self, CacheError> {
        if capacity == 0 {
            return Err(CacheError::ZeroCapacity);
        }
        Ok(Self { capacity, resident: HashSet::new(), queue: VecDeque::new() })
    }
}

impl Cache for FifoCache {
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn has(&self, content: ContentId) -> bool {
        self.resident.contains(&content)
    }

    fn get(&mut self, content: ContentId) -> bool {
        self.resident.contains(&content)
    }

    fn put(&mut self, content: ContentId) -> Option<ContentId> {
        if self.resident.contains(&content) {
            return None;
        }
        let evicted = if self.queue.len() >= self.capacity {
            let victim = self.queue.pop_front();
            if let Some(victim) = victim {
                self.resident.remove(&victim);
            }
            victim
        } else {
            None
        };
        self.queue.push_back(content);
        self.resident.insert(content);
        evicted
    }

    fn dump(&self) -> Vec<ContentId> {
        self.queue.iter().rev().cloned().collect()
    }

    fn clear(&mut self) {
        self.resident.clear();
        self.queue.clear();
    }
}
