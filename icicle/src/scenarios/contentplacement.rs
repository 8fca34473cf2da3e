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

//! Content placement strategies
//!
//! These functions allocate the content population to the source nodes of a topology. The
//! resulting per-source content sets are pairwise disjoint and their union is the full
//! population, so every content ends up with exactly one origin. A fixed seed makes the
//! placement reproducible.

use super::ScenarioError;
use crate::topology::{Stack, Topology};
use crate::{ContentId, NodeId};

use log::*;
use rand::prelude::*;
use std::collections::BTreeMap;

fn apply_placement(topology: &mut Topology, placement: BTreeMap<NodeId, Vec<ContentId>>) {
    for (v, contents) in placement {
        topology.set_stack(v, Stack::Source { contents });
    }
}

/// Place every content on a source node drawn uniformly at random.
pub fn uniform_content_placement(
    topology: &mut Topology,
    contents: &[ContentId],
    seed: u64,
) -> Result<(), ScenarioError> {
    let sources = topology.sources();
    if sources.is_empty() {
        return Err(ScenarioError::NoSources);
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let mut placement: BTreeMap<NodeId, Vec<ContentId>> =
        sources.iter().map(|&v| (v, Vec::new())).collect();
    for &content in contents {
        let source = sources[rng.gen_range(0, sources.len())];
        if let Some(assigned) = placement.get_mut(&source) {
            assigned.push(content);
        }
    }
    apply_placement(topology, placement);
    Ok(())
}

/// Place every content on a source node drawn with probability proportional to its weight.
///
/// Nodes carrying a weight but no source stack are skipped.
pub fn weighted_content_placement(
    topology: &mut Topology,
    contents: &[ContentId],
    source_weights: &BTreeMap<NodeId, f64>,
    seed: u64,
) -> Result<(), ScenarioError> {
    let weights: Vec<(NodeId, f64)> = source_weights
        .iter()
        .filter(|(&v, _)| {
            let is_source = topology.stack(v).map(Stack::is_source).unwrap_or(false);
            if !is_source {
                warn!("Skipping weighted node {:?}: it is not a source", v);
            }
            is_source
        })
        .map(|(&v, &w)| (v, w))
        .collect();
    let norm: f64 = weights.iter().map(|(_, w)| w).sum();
    if weights.is_empty() || norm <= 0.0 {
        return Err(ScenarioError::NoSources);
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let mut placement: BTreeMap<NodeId, Vec<ContentId>> =
        weights.iter().map(|&(v, _)| (v, Vec::new())).collect();
    for &content in contents {
        let draw: f64 = rng.gen::<f64>() * norm;
        let mut acc = 0.0;
        let mut chosen = weights[weights.len() - 1].0;
        for &(v, w) in weights.iter() {
            acc += w;
            if draw < acc {
                chosen = v;
                break;
            }
        }
        if let Some(assigned) = placement.get_mut(&chosen) {
            assigned.push(content);
        }
    }
    apply_placement(topology, placement);
    Ok(())
}
