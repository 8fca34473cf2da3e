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

#![deny(missing_docs)]

//! # Icicle: A Discrete-Event Simulator for In-Network Caching
//!
//! This is a library for simulating content delivery over arbitrary network topologies with
//! in-network caches, in the style of information-centric networking: contents are addressed by
//! name and can be served by any node holding a copy, be it a cache along the path or the
//! persistent origin.
//!
//! ## Structure
//!
//! - **[`Topology`](topology::Topology)**: The attributed graph a simulation runs on. Every node
//!   carries a stack describing its role (source, receiver, or router with an optional cache),
//!   and every link carries a delay and a kind (internal to the caching network, or external
//!   towards an origin).
//!
//! - **[`Caches`](cache)**: Fixed-capacity content stores with pluggable replacement policies
//!   (LRU, FIFO, LFU and RAND), all exposing the same five operations.
//!
//! - **[`Net`](net)**: The mutable state of a running simulation and its two handles. The
//!   [`NetworkModel`](net::NetworkModel) owns topology, shortest paths, caches and the
//!   content-to-origin map; the [`NetworkView`](net::NetworkView) is the read-only projection
//!   handed to collectors and strategies; and the [`NetworkController`](net::NetworkController)
//!   is the single mutating handle, driving one session at a time and emitting observable
//!   events.
//!
//! - **[`Collectors`](collectors)**: Passive observers accumulating metrics (cache hit ratio,
//!   latency, path stretch, link load) from the events of logged sessions, behind a fan-out
//!   proxy that dispatches each event kind only to the collectors subscribed to it.
//!
//! - **[`Workloads`](workload)**: Lazy, seeded generators of `(timestamp, event)` streams. The
//!   stationary workload implements the independent reference model with Poisson arrivals and
//!   Zipf-distributed content popularity; trace-driven and YCSB variants share the same
//!   contract.
//!
//! - **[`Strategies`](strategies)**: The routing and caching policies driving each session
//!   against the controller. The crate ships leave-copy-everywhere as the canonical strategy.
//!
//! - **[`Engine`](engine)**: The top-level loop binding workload, strategy, controller and
//!   collectors into one closed cycle.
//!
//! - **[`Scenarios`](scenarios)**: Prepared topologies and the cache and content placement
//!   functions that equip them.
//!
//! Reproducibility is a hard requirement throughout: every source of randomness is an instance
//! seeded at construction, and two runs with the same seeds, topology and parameters produce
//! identical event streams and identical results.
//!
//! ## Usage
//!
//! ```rust
//! use icicle::cache::PolicyName;
//! use icicle::collectors::{CacheHitRatioCollector, DataCollector, LatencyCollector};
//! use icicle::engine::exec_experiment;
//! use icicle::net::NetworkModel;
//! use icicle::scenarios::path_topology;
//! use icicle::strategies::LeaveCopyEverywhere;
//! use icicle::workload::StationaryWorkload;
//! use icicle::Error;
//!
//! fn main() -> Result<(), Error> {
//!     let topology = path_topology(0.4, 10, 5, PolicyName::Lru, 42)?;
//!     let workload = StationaryWorkload::new(&topology, 10, 0.8, 0.0, 1.0, 50, 200, 42)?;
//!     let model = NetworkModel::new(topology, 42)?;
//!     let collectors: Vec<Box<dyn DataCollector>> = vec![
//!         Box::new(CacheHitRatioCollector::new(false)),
//!         Box::new(LatencyCollector::new(false)),
//!     ];
//!     let results = exec_experiment(model, workload, &mut LeaveCopyEverywhere, collectors)?;
//!     println!("{:#?}", results["CACHE_HIT_RATIO"]);
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod collectors;
pub mod engine;
mod error;
pub mod net;
pub mod scenarios;
pub mod stats;
pub mod strategies;
pub mod topology;
pub mod workload;

mod types;

// test modules
mod test;

pub use error::Error;
pub use types::{ContentId, LinkKind, NodeId};
