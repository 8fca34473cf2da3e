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

//! Topology factories
//!
//! Each factory builds a complete scenario: the graph, the node stacks, the link attributes,
//! a random content placement over the sources, and a uniform cache placement over the caching
//! candidates. The cumulative cache budget is `network_cache * n_contents`, the network cache
//! size normalized by the content population.

use super::{uniform_cache_placement, uniform_content_placement, ScenarioError};
use crate::cache::PolicyName;
use crate::topology::{Stack, Topology};
use crate::{ContentId, LinkKind, NodeId};

use log::*;
use std::collections::BTreeMap;

/// Delay of a link inside the caching network, in milliseconds.
pub const INTERNAL_LINK_DELAY: f64 = 2.0;

/// Delay of a link crossing the network edge towards an origin, in milliseconds. Measurements
/// place the delay towards an origin at roughly three times an average internet round trip of
/// 34 ms.
pub const EXTERNAL_LINK_DELAY: f64 = 3.0 * 34.0;

fn apply_cache_placement(topology: &mut Topology, placement: BTreeMap<NodeId, usize>) {
    for (v, size) in placement {
        if size == 0 {
            warn!("Discarding zero-sized cache assigned to {:?}", v);
            continue;
        }
        topology.set_stack(v, Stack::Router { cache_size: Some(size) });
    }
}

/// Build a line scenario of `n` nodes: the receiver at one end, the source at the other, and
/// caching routers in between. The link towards the source is external, all others are internal.
pub fn path_topology(
    network_cache: f64,
    n_contents: u32,
    n: usize,
    policy: PolicyName,
    seed: u64,
) -> Result<Topology, ScenarioError> {
    if n < 3 {
        return Err(ScenarioError::TooFewNodes { required: 3, given: n });
    }
    let mut topology = Topology::new(policy);
    let mut nodes = Vec::with_capacity(n);
    nodes.push(topology.add_node(Stack::Receiver));
    for _ in 1..n - 1 {
        nodes.push(topology.add_node(Stack::Router { cache_size: None }));
    }
    nodes.push(topology.add_node(Stack::Source { contents: Vec::new() }));
    for i in 1..n {
        let (delay, kind) = if i == n - 1 {
            (EXTERNAL_LINK_DELAY, LinkKind::External)
        } else {
            (INTERNAL_LINK_DELAY, LinkKind::Internal)
        };
        topology.add_link(nodes[i - 1], nodes[i], delay, kind);
    }

    let contents: Vec<ContentId> = (1..=n_contents).map(ContentId).collect();
    uniform_content_placement(&mut topology, &contents, seed)?;

    let cache_nodes: Vec<NodeId> = nodes[1..n - 1].to_vec();
    let budget = (network_cache * n_contents as f64) as usize;
    let placement = uniform_cache_placement(&topology, budget, &cache_nodes)?;
    apply_cache_placement(&mut topology, placement);
    Ok(topology)
}

/// Build a binary-tree scenario of depth `h`: the root is the source, the leaves are receivers,
/// and every inner node is a caching router. The links towards the root are external, all others
/// are internal.
pub fn binary_tree_topology(
    network_cache: f64,
    n_contents: u32,
    h: usize,
    policy: PolicyName,
    seed: u64,
) -> Result<Topology, ScenarioError> {
    if h < 2 {
        return Err(ScenarioError::TooFewNodes { required: 7, given: (1 << (h + 1)) - 1 });
    }
    let mut topology = Topology::new(policy);
    let mut levels: Vec<Vec<NodeId>> = Vec::with_capacity(h + 1);
    for depth in 0..=h {
        let mut level = Vec::with_capacity(1 << depth);
        for _ in 0..1usize << depth {
            let stack = match depth {
                0 => Stack::Source { contents: Vec::new() },
                d if d == h => Stack::Receiver,
                _ => Stack::Router { cache_size: None },
            };
            level.push(topology.add_node(stack));
        }
        levels.push(level);
    }
    for depth in 1..=h {
        let (delay, kind) = if depth == 1 {
            (EXTERNAL_LINK_DELAY, LinkKind::External)
        } else {
            (INTERNAL_LINK_DELAY, LinkKind::Internal)
        };
        for (i, &child) in levels[depth].iter().enumerate() {
            topology.add_link(levels[depth - 1][i / 2], child, delay, kind);
        }
    }

    let contents: Vec<ContentId> = (1..=n_contents).map(ContentId).collect();
    uniform_content_placement(&mut topology, &contents, seed)?;

    let cache_nodes: Vec<NodeId> =
        levels[1..h].iter().flat_map(|level| level.iter().cloned()).collect();
    let budget = (network_cache * n_contents as f64) as usize;
    let placement = uniform_cache_placement(&topology, budget, &cache_nodes)?;
    apply_cache_placement(&mut topology, placement);
    Ok(topology)
}
