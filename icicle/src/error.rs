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

//! Module containing the top-level error type

use crate::cache::CacheError;
use crate::collectors::CollectorError;
use crate::net::NetworkError;
use crate::scenarios::ScenarioError;
use crate::stats::StatsError;
use crate::workload::WorkloadError;

use thiserror::Error;

/// Main error type
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// Error propagated from a cache
    #[error("Cache Error: {0}")]
    Cache(#[from] CacheError),
    /// Error propagated from the network core
    #[error("Network Error: {0}")]
    Network(#[from] NetworkError),
    /// Error propagated from a workload
    #[error("Workload Error: {0}")]
    Workload(#[from] WorkloadError),
    /// Error propagated from the statistical utilities
    #[error("Stats Error: {0}")]
    Stats(#[from] StatsError),
    /// Error propagated from a collector
    #[error("Collector Error: {0}")]
    Collector(#[from] CollectorError),
    /// Error propagated from a scenario factory
    #[error("Scenario Error: {0}")]
    Scenario(#[from] ScenarioError),
}
