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

//! # Scenarios
//!
//! Prepared topologies and the placement functions that equip them. A scenario factory builds a
//! [`Topology`](crate::topology::Topology) with its stacks assigned, contents placed on the
//! sources, and the cache budget spread over the caching nodes, ready to be turned into a
//! [`NetworkModel`](crate::net::NetworkModel).

use crate::NodeId;

use thiserror::Error;

mod cacheplacement;
mod contentplacement;
mod topologies;

pub use cacheplacement::{degree_centrality_cache_placement, uniform_cache_placement};
pub use contentplacement::{uniform_content_placement, weighted_content_placement};
pub use topologies::{
    binary_tree_topology, path_topology, EXTERNAL_LINK_DELAY, INTERNAL_LINK_DELAY,
};

/// Scenario errors
#[derive(Error, Debug, PartialEq)]
pub enum ScenarioError {
    /// The requested topology is too small to carry all roles
    #[error("The topology needs at least {required} nodes, but {given} were requested")]
    TooFewNodes {
        /// Minimum number of nodes the factory can work with
        required: usize,
        /// Number of nodes requested
        given: usize,
    },
    /// Cache placement needs at least one candidate node
    #[error("There are no nodes to deploy caches on")]
    NoCacheNodes,
    /// Content placement needs at least one source node
    #[error("The topology contains no source nodes")]
    NoSources,
}

/// Check that a node list is a usable cache-placement target.
fn ensure_cache_nodes(cache_nodes: &[NodeId]) -> Result<(), ScenarioError> {
    if cache_nodes.is_empty() {
        Err(ScenarioError::NoCacheNodes)
    } else {
        Ok(())
    }
}
