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

//! Cache placement strategies
//!
//! These functions decide how a cumulative cache budget is spread over the candidate nodes of a
//! topology. They only compute the assignment; writing it into the node stacks is the factory's
//! job.

use super::{ensure_cache_nodes, ScenarioError};
use crate::topology::Topology;
use crate::NodeId;

use std::collections::BTreeMap;

/// Spread the cache budget uniformly over the candidate nodes.
///
/// The assigned capacities sum up to the budget exactly: every node receives the floored share,
/// and the remainder goes to the first nodes one slot each.
pub fn uniform_cache_placement(
    _topology: &Topology,
    cache_budget: usize,
    cache_nodes: &[NodeId],
) -> Result<BTreeMap<NodeId, usize>, ScenarioError> {
    ensure_cache_nodes(cache_nodes)?;
    let share = cache_budget / cache_nodes.len();
    let remainder = cache_budget % cache_nodes.len();
    Ok(cache_nodes
        .iter()
        .enumerate()
        .map(|(i, &v)| (v, if i < remainder { share + 1 } else { share }))
        .collect())
}

/// Spread the cache budget proportionally to the degree of each candidate node.
///
/// Capacities are floored, so the assigned sum may fall short of the budget by at most the
/// number of candidate nodes.
pub fn degree_centrality_cache_placement(
    topology: &Topology,
    cache_budget: usize,
    cache_nodes: &[NodeId],
) -> Result<BTreeMap<NodeId, usize>, ScenarioError> {
    ensure_cache_nodes(cache_nodes)?;
    let total_degree: usize = cache_nodes.iter().map(|&v| topology.degree(v)).sum();
    if total_degree == 0 {
        return Err(ScenarioError::NoCacheNodes);
    }
    Ok(cache_nodes
        .iter()
        .map(|&v| (v, cache_budget * topology.degree(v) / total_degree))
        .collect())
}
