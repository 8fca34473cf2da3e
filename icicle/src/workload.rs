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

//! # Workloads
//!
//! Generators of the event streams driving a simulation. A workload is a finite lazy sequence of
//! `(timestamp, event)` pairs: events are generated on the fly instead of materializing a full
//! schedule, so long runs have a small memory footprint.
//!
//! Every workload draws from its own seeded generator, so two instances built with the same
//! seed, topology and parameters emit identical event streams. The first `n_warmup` events of a
//! run carry `log = false` and serve only to populate the caches; the following `n_measured`
//! events are reported to the collectors.

use crate::stats::{StatsError, TruncatedZipfDist};
use crate::topology::Topology;
use crate::{ContentId, NodeId};

use rand::prelude::*;
use std::fmt;
use thiserror::Error;

/// Workload errors
#[derive(Error, Debug, PartialEq)]
pub enum WorkloadError {
    /// The Zipf exponent of the content popularity must be positive
    #[error("The content popularity exponent must be positive, but it is {0}")]
    NonPositiveAlpha(f64),
    /// The Zipf exponent of the receiver skew must not be negative
    #[error("The receiver skew exponent must not be negative, but it is {0}")]
    NegativeBeta(f64),
    /// The request rate must be positive
    #[error("The request rate must be positive, but it is {0}")]
    NonPositiveRate(f64),
    /// The content population must not be empty
    #[error("The content population must not be empty")]
    NoContents,
    /// The topology has no receiver nodes to issue requests from
    #[error("The topology contains no receiver nodes")]
    NoReceivers,
    /// The trace is too short to cover the warm-up and measured phases
    #[error("The trace holds {available} requests, but {required} are needed")]
    TraceExhausted {
        /// Number of requests in the trace
        available: usize,
        /// Number of requests the run needs
        required: usize,
    },
    /// The requested YCSB workload is not implemented
    #[error("YCSB workload {0} is not yet implemented")]
    YcsbNotImplemented(YcsbVariant),
    /// Error while building a popularity distribution
    #[error("{0}")]
    Stats(#[from] StatsError),
}

/// A single content request produced by a workload.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestEvent {
    /// Node issuing the request
    pub receiver: NodeId,
    /// The requested content
    pub content: ContentId,
    /// Whether the session belongs to the measured phase
    pub log: bool,
}

/// Interface of all request workloads.
///
/// A workload is consumed by iteration and yields `(timestamp, event)` pairs in ascending
/// timestamp order. It additionally exposes the content population, which content placement and
/// origin validation rely on.
pub trait Workload: Iterator<Item = (f64, RequestEvent)> {
    /// The identifiers of all contents this workload can request.
    fn contents(&self) -> &[ContentId];
}

/// Draw an exponentially distributed inter-arrival time with the given rate.
fn expovariate<R: Rng>(rng: &mut R, rate: f64) -> f64 {
    let u: f64 = rng.gen();
    -(1.0 - u).ln() / rate
}

/// Collect the receivers of a topology, ordered for the given skew.
///
/// With `beta` zero the receivers stay in ascending node order and are picked uniformly. With a
/// positive `beta`, receivers are sorted by descending degree of their attached point of
/// presence and picked from a truncated Zipf distribution over that ranking, so receivers behind
/// better-connected nodes issue more requests.
fn ranked_receivers(topology: &Topology, beta: f64) -> Result<Vec<NodeId>, WorkloadError> {
    let mut receivers = topology.receivers();
    if receivers.is_empty() {
        return Err(WorkloadError::NoReceivers);
    }
    if beta > 0.0 {
        let pop_degree = |v: NodeId| {
            topology.neighbors(v).first().map(|&pop| topology.degree(pop)).unwrap_or(0)
        };
        receivers.sort_by(|&a, &b| pop_degree(b).cmp(&pop_degree(a)));
    }
    Ok(receivers)
}

/// # Stationary workload
///
/// The independent reference model: request inter-arrival times are exponentially distributed
/// with the given rate, and the requested contents are drawn from a truncated Zipf distribution
/// of exponent `alpha` over the population `{1, ..., n_contents}`, independently for every
/// request.
#[derive(Debug, Clone)]
pub struct StationaryWorkload {
    receivers: Vec<NodeId>,
    contents: Vec<ContentId>,
    zipf: TruncatedZipfDist,
    receiver_dist: Option<TruncatedZipfDist>,
    rate: f64,
    n_warmup: u64,
    n_measured: u64,
    rng: StdRng,
    counter: u64,
    time: f64,
}

impl StationaryWorkload {
    /// Create the workload.
    ///
    /// `alpha` is the content popularity exponent, `beta` the receiver skew (zero selects
    /// receivers uniformly), `rate` the mean number of requests per second, and `seed`
    /// determines the full event stream.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        topology: &Topology,
        n_contents: u32,
        alpha: f64,
        beta: f64,
        rate: f64,
        n_warmup: u64,
        n_measured: u64,
        seed: u64,
    ) -> Result<Self, WorkloadError> {
        if alpha <= 0.0 {
            return Err(WorkloadError::NonPositiveAlpha(alpha));
        }
        if beta < 0.0 {
            return Err(WorkloadError::NegativeBeta(beta));
        }
        if rate <= 0.0 {
            return Err(WorkloadError::NonPositiveRate(rate));
        }
        if n_contents == 0 {
            return Err(WorkloadError::NoContents);
        }
        let receivers = ranked_receivers(topology, beta)?;
        let receiver_dist = if beta > 0.0 {
            Some(TruncatedZipfDist::new(beta, receivers.len(), Some(seed.wrapping_add(2)))?)
        } else {
            None
        };
        Ok(Self {
            receivers,
            contents: (1..=n_contents).map(ContentId).collect(),
            zipf: TruncatedZipfDist::new(alpha, n_contents as usize, Some(seed.wrapping_add(1)))?,
            receiver_dist,
            rate,
            n_warmup,
            n_measured,
            rng: StdRng::seed_from_u64(seed),
            counter: 0,
            time: 0.0,
        })
    }
}

impl Iterator for StationaryWorkload {
    type Item = (f64, RequestEvent);

    fn next(&mut self) -> Option<Self::Item> {
        if self.counter >= self.n_warmup + self.n_measured {
            return None;
        }
        self.time += expovariate(&mut self.rng, self.rate);
        let receiver = match self.receiver_dist.as_mut() {
            Some(dist) => self.receivers[dist.rv() - 1],
            None => self.receivers[self.rng.gen_range(0, self.receivers.len())],
        };
        let content = ContentId(self.zipf.rv() as u32);
        let log = self.counter >= self.n_warmup;
        self.counter += 1;
        Some((self.time, RequestEvent { receiver, content, log }))
    }
}

impl Workload for StationaryWorkload {
    fn contents(&self) -> &[ContentId] {
        &self.contents
    }
}

/// # Trace-driven workload
///
/// Replays a recorded request sequence. The trace provides no timestamps, so requests are
/// scheduled by the same Poisson process as the stationary workload, and receivers are picked
/// the same way. The trace must hold at least `n_warmup + n_measured` requests; shorter traces
/// are rejected at construction.
#[derive(Debug, Clone)]
pub struct TraceDrivenWorkload {
    trace: Vec<ContentId>,
    contents: Vec<ContentId>,
    receivers: Vec<NodeId>,
    receiver_dist: Option<TruncatedZipfDist>,
    rate: f64,
    n_warmup: u64,
    n_measured: u64,
    rng: StdRng,
    counter: u64,
    time: f64,
}

impl TraceDrivenWorkload {
    /// Create the workload from a request trace and the set of contents appearing in it.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        topology: &Topology,
        trace: Vec<ContentId>,
        contents: Vec<ContentId>,
        n_warmup: u64,
        n_measured: u64,
        rate: f64,
        beta: f64,
        seed: u64,
    ) -> Result<Self, WorkloadError> {
        if beta < 0.0 {
            return Err(WorkloadError::NegativeBeta(beta));
        }
        if rate <= 0.0 {
            return Err(WorkloadError::NonPositiveRate(rate));
        }
        let required = (n_warmup + n_measured) as usize;
        if trace.len() < required {
            return Err(WorkloadError::TraceExhausted { available: trace.len(), required });
        }
        let receivers = ranked_receivers(topology, beta)?;
        let receiver_dist = if beta > 0.0 {
            Some(TruncatedZipfDist::new(beta, receivers.len(), Some(seed.wrapping_add(2)))?)
        } else {
            None
        };
        Ok(Self {
            trace,
            contents,
            receivers,
            receiver_dist,
            rate,
            n_warmup,
            n_measured,
            rng: StdRng::seed_from_u64(seed),
            counter: 0,
            time: 0.0,
        })
    }
}

impl Iterator for TraceDrivenWorkload {
    type Item = (f64, RequestEvent);

    fn next(&mut self) -> Option<Self::Item> {
        if self.counter >= self.n_warmup + self.n_measured {
            return None;
        }
        self.time += expovariate(&mut self.rng, self.rate);
        let receiver = match self.receiver_dist.as_mut() {
            Some(dist) => self.receivers[dist.rv() - 1],
            None => self.receivers[self.rng.gen_range(0, self.receivers.len())],
        };
        let content = self.trace[self.counter as usize];
        let log = self.counter >= self.n_warmup;
        self.counter += 1;
        Some((self.time, RequestEvent { receiver, content, log }))
    }
}

impl Workload for TraceDrivenWorkload {
    fn contents(&self) -> &[ContentId] {
        &self.contents
    }
}

/// The five reference workloads of the Yahoo! Cloud Serving Benchmark.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub enum YcsbVariant {
    /// Update heavy: 50% reads, 50% updates
    A,
    /// Read heavy: 95% reads, 5% updates
    B,
    /// Read only
    C,
    /// Read latest (not implemented)
    D,
    /// Short ranges (not implemented)
    E,
}

impl fmt::Display for YcsbVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
            Self::C => write!(f, "C"),
            Self::D => write!(f, "D"),
            Self::E => write!(f, "E"),
        }
    }
}

/// Operation of a YCSB request.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub enum YcsbOp {
    /// Read an item
    Read,
    /// Update an item
    Update,
}

/// A single operation produced by the YCSB workload.
#[derive(Debug, Clone, PartialEq)]
pub struct YcsbEvent {
    /// The requested operation
    pub op: YcsbOp,
    /// The item operated on
    pub item: ContentId,
    /// Whether the operation belongs to the measured phase
    pub log: bool,
}

/// # YCSB workload
///
/// The Yahoo! Cloud Serving Benchmark reference workloads, used to exercise caches outside of a
/// network context. Item popularity follows a truncated Zipf distribution, and the operation mix
/// depends on the chosen [`YcsbVariant`]. Variants D and E are not implemented and are rejected
/// at construction. Operations share the `(timestamp, event)` pacing of the request workloads.
#[derive(Debug, Clone)]
pub struct YcsbWorkload {
    variant: YcsbVariant,
    zipf: TruncatedZipfDist,
    rate: f64,
    n_warmup: u64,
    n_measured: u64,
    rng: StdRng,
    counter: u64,
    time: f64,
}

impl YcsbWorkload {
    /// Create the workload. The customary item-popularity exponent of the benchmark is `0.99`.
    pub fn new(
        variant: YcsbVariant,
        n_contents: u32,
        n_warmup: u64,
        n_measured: u64,
        alpha: f64,
        rate: f64,
        seed: u64,
    ) -> Result<Self, WorkloadError> {
        if let YcsbVariant::D | YcsbVariant::E = variant {
            return Err(WorkloadError::YcsbNotImplemented(variant));
        }
        if alpha <= 0.0 {
            return Err(WorkloadError::NonPositiveAlpha(alpha));
        }
        if rate <= 0.0 {
            return Err(WorkloadError::NonPositiveRate(rate));
        }
        if n_contents == 0 {
            return Err(WorkloadError::NoContents);
        }
        Ok(Self {
            variant,
            zipf: TruncatedZipfDist::new(alpha, n_contents as usize, Some(seed.wrapping_add(1)))?,
            rate,
            n_warmup,
            n_measured,
            rng: StdRng::seed_from_u64(seed),
            counter: 0,
            time: 0.0,
        })
    }
}

impl Iterator for YcsbWorkload {
    type Item = (f64, YcsbEvent);

    fn next(&mut self) -> Option<Self::Item> {
        if self.counter >= self.n_warmup + self.n_measured {
            return None;
        }
        self.time += expovariate(&mut self.rng, self.rate);
        let draw: f64 = self.rng.gen();
        let op = match self.variant {
            YcsbVariant::A if draw < 0.5 => YcsbOp::Read,
            YcsbVariant::A => YcsbOp::Update,
            YcsbVariant::B if draw < 0.95 => YcsbOp::Read,
            YcsbVariant::B => YcsbOp::Update,
            _ => YcsbOp::Read,
        };
        let item = ContentId(self.zipf.rv() as u32);
        let log = self.counter >= self.n_warmup;
        self.counter += 1;
        Some((self.time, YcsbEvent { op, item, log }))
    }
}
