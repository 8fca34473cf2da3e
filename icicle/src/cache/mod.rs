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

//! # Caches
//!
//! Fixed-capacity content stores with pluggable replacement policies. Every cache exposes the
//! same five operations ([`has`](Cache::has), [`get`](Cache::get), [`put`](Cache::put),
//! [`dump`](Cache::dump) and [`clear`](Cache::clear)); the replacement policy is consulted only
//! when an insertion overflows the capacity.
//!
//! The two lookup operations differ in one important way: `has` answers a pure membership
//! question, while `get` is the hit path of a running simulation and updates the recency or
//! frequency bookkeeping of the policy. A `get` miss never mutates the cache; whether a missed
//! content is inserted is the caller's decision, made through `put`.
//!
//! ```rust
//! use icicle::cache::{build_cache, PolicyName};
//! use icicle::ContentId;
//!
//! let mut cache = build_cache(PolicyName::Lru, 2, 0).unwrap();
//! assert_eq!(cache.put(ContentId(1)), None);
//! assert_eq!(cache.put(ContentId(2)), None);
//! // capacity reached, the least recently used content is evicted
//! assert_eq!(cache.put(ContentId(3)), Some(ContentId(1)));
//! ```

use crate::ContentId;

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

mod fifo;
mod lfu;
mod lru;
mod random;

pub use fifo::FifoCache;
pub use lfu::LfuCache;
pub use lru::LruCache;
pub use random::RandCache;

/// Cache errors
#[derive(Error, Debug, PartialEq)]
pub enum CacheError {
    /// Caches cannot be built with a capacity of zero
    #[error("Cache capacity must be positive")]
    ZeroCapacity,
    /// The replacement policy name is not known
    #[error("Unknown cache replacement policy: {0}")]
    UnknownPolicy(String),
}

/// Name of a cache replacement policy, as carried by a
/// [`Topology`](crate::topology::Topology).
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub enum PolicyName {
    /// Evict the least recently used content
    Lru,
    /// Evict the oldest inserted content, ignoring accesses
    Fifo,
    /// Evict the least frequently used content, breaking ties towards the oldest
    Lfu,
    /// Evict a content chosen uniformly at random
    Rand,
}

impl FromStr for PolicyName {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LRU" => Ok(Self::Lru),
            "FIFO" => Ok(Self::Fifo),
            "LFU" => Ok(Self::Lfu),
            "RAND" => Ok(Self::Rand),
            _ => Err(CacheError::UnknownPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for PolicyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lru => write!(f, "LRU"),
            Self::Fifo => write!(f, "FIFO"),
            Self::Lfu => write!(f, "LFU"),
            Self::Rand => write!(f, "RAND"),
        }
    }
}

/// Interface shared by all cache implementations.
///
/// Apart from construction, every operation is total: lookups and insertions never fail, they
/// only report whether the content was resident or which content was evicted.
pub trait Cache: fmt::Debug {
    /// The maximum number of contents this cache can hold.
    fn capacity(&self) -> usize;

    /// The number of contents currently resident.
    fn len(&self) -> usize;

    /// Returns true if and only if no content is resident.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Non-mutating membership test. Does not affect the replacement order.
    fn has(&self, content: ContentId) -> bool;

    /// Retrieve a content. On a hit, the policy bookkeeping is updated as if the content had just
    /// been accessed, and `true` is returned. A miss returns `false` and leaves the cache
    /// untouched.
    fn get(&mut self, content: ContentId) -> bool;

    /// Insert a content. If the content is already resident, only the policy bookkeeping is
    /// updated and nothing is evicted. Otherwise, if the cache is full, a victim is selected
    /// according to the policy, removed, and returned.
    fn put(&mut self, content: ContentId) -> Option<ContentId>;

    /// Ordered snapshot of the resident contents. The order is policy-specific (e.g. most
    /// recently used first for LRU) and is meant for inspection and tests.
    fn dump(&self) -> Vec<ContentId>;

    /// Remove all resident contents.
    fn clear(&mut self);
}

/// Build a cache of the given policy and capacity.
///
/// The `seed` is only consulted by the [`RandCache`] policy, which draws its eviction victims
/// from an own seeded generator; the deterministic policies ignore it.
pub fn build_cache(
    policy: PolicyName,
    capacity: usize,
    seed: u64,
) -> Result<Box<dyn Cache>, CacheError> {
    Ok(match policy {
        PolicyName::Lru => Box::new(LruCache::new(capacity)?),
        PolicyName::Fifo => Box::new(FifoCache::new(capacity)?),
        PolicyName::Lfu => Box::new(LfuCache::new(capacity)?),
        PolicyName::Rand => Box::new(RandCache::new(capacity, seed)?),
    })
}
