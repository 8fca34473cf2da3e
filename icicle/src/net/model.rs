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

//! The internal state of the network and its read-only view.

use crate::cache::{build_cache, Cache};
use crate::net::NetworkError;
use crate::topology::{Link, Topology};
use crate::{ContentId, LinkKind, NodeId};

use log::*;
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

/// All-pairs shortest-path table. Paths include both endpoints; the entry for `(v, v)` is the
/// single-node path `[v]`. Pairs without a connecting path carry no entry.
pub type PathTable = HashMap<(NodeId, NodeId), Vec<NodeId>>;

/// Compute the all-pairs shortest paths of a topology by hop count.
///
/// Ties are broken deterministically by expanding neighbors in ascending node order, so the same
/// topology always yields the same table.
pub fn all_pairs_shortest_paths(topology: &Topology) -> PathTable {
    let nodes = topology.nodes();
    let mut paths = PathTable::new();
    for &src in nodes.iter() {
        // breadth-first search with a predecessor map
        let mut pred: HashMap<NodeId, NodeId> = HashMap::new();
        let mut seen: BTreeSet<NodeId> = BTreeSet::new();
        let mut queue: VecDeque<NodeId> = VecDeque::new();
        seen.insert(src);
        queue.push_back(src);
        while let Some(u) = queue.pop_front() {
            for v in topology.neighbors(u) {
                if seen.insert(v) {
                    pred.insert(v, u);
                    queue.push_back(v);
                }
            }
        }
        for &dst in seen.iter() {
            let mut path = vec![dst];
            let mut cur = dst;
            while let Some(&p) = pred.get(&cur) {
                path.push(p);
                cur = p;
            }
            path.reverse();
            paths.insert((src, dst), path);
        }
    }
    paths
}

/// Force `path(s, t)` to be the reverse of `path(t, s)` for every ordered pair.
///
/// Shortest paths between a pair of nodes are in general not unique, and a shortest-path
/// algorithm may break the tie differently for the two directions. This function eliminates the
/// asymmetry by overwriting the path of the larger-to-smaller direction with the reverse of the
/// smaller-to-larger one, which makes latency accounting independent of the traversal direction.
pub fn symmetrify_paths(paths: &mut PathTable) {
    let mut pairs: Vec<(NodeId, NodeId)> = paths.keys().filter(|(s, t)| s < t).cloned().collect();
    pairs.sort();
    for (s, t) in pairs {
        if let Some(path) = paths.get(&(s, t)) {
            let mut rev = path.clone();
            rev.reverse();
            paths.insert((t, s), rev);
        }
    }
}

/// # Network model
///
/// The internal state of the network: the topology, the shortest-path table, one cache per
/// cache-enabled node, the content-to-origin map, and the per-direction link attributes. The
/// model exclusively owns its caches; the only parties allowed to touch it are the
/// [`NetworkController`](crate::net::NetworkController) (mutably) and the [`NetworkView`]
/// (read-only).
#[derive(Debug)]
pub struct NetworkModel {
    pub(crate) topology: Topology,
    pub(crate) shortest_path: PathTable,
    pub(crate) caches: BTreeMap<NodeId, Box<dyn Cache>>,
    pub(crate) cache_size: BTreeMap<NodeId, usize>,
    pub(crate) content_source: HashMap<ContentId, NodeId>,
    pub(crate) link_delay: HashMap<(NodeId, NodeId), f64>,
    pub(crate) link_kind: HashMap<(NodeId, NodeId), LinkKind>,
    // state stashed away by the removal primitives, keyed for exact restoration
    pub(crate) removed_links: HashMap<(NodeId, NodeId), Link>,
    pub(crate) removed_nodes: HashMap<NodeId, Vec<(NodeId, Link)>>,
    pub(crate) suspended_caches: BTreeMap<NodeId, (Box<dyn Cache>, usize)>,
}

impl NetworkModel {
    /// Build the model from a topology, computing and symmetrifying the shortest-path table.
    ///
    /// The `seed` feeds the eviction generators of RAND caches (each node derives its own
    /// stream from it); the deterministic policies ignore it.
    pub fn new(topology: Topology, seed: u64) -> Result<Self, NetworkError> {
        let mut paths = all_pairs_shortest_paths(&topology);
        symmetrify_paths(&mut paths);
        Self::with_paths(topology, paths, seed)
    }

    /// Build the model from a topology and an externally computed shortest-path table. The table
    /// is taken as is, without symmetrification.
    pub fn with_paths(
        topology: Topology,
        shortest_path: PathTable,
        seed: u64,
    ) -> Result<Self, NetworkError> {
        let policy = topology.cache_policy();
        let mut link_delay = HashMap::new();
        let mut link_kind = HashMap::new();
        for (u, v, link) in topology.links() {
            link_delay.insert((u, v), link.delay);
            link_delay.insert((v, u), link.delay);
            link_kind.insert((u, v), link.kind);
            link_kind.insert((v, u), link.kind);
        }

        let mut content_source = HashMap::new();
        let mut cache_size = BTreeMap::new();
        for v in topology.nodes() {
            let stack = match topology.stack(v) {
                Some(stack) => stack,
                None => continue,
            };
            if let Some(size) = stack.cache_size() {
                cache_size.insert(v, size);
            }
            if let Some(contents) = stack.contents() {
                for &content in contents {
                    if content_source.insert(content, v).is_some() {
                        return Err(NetworkError::DuplicateContentSource(content));
                    }
                }
            }
        }

        let mut caches = BTreeMap::new();
        for (&v, &size) in cache_size.iter() {
            caches.insert(v, build_cache(policy, size, derive_cache_seed(seed, v))?);
        }
        debug!(
            "Built network model: {} nodes, {} caches, {} contents",
            topology.num_nodes(),
            caches.len(),
            content_source.len()
        );

        Ok(Self {
            topology,
            shortest_path,
            caches,
            cache_size,
            content_source,
            link_delay,
            link_kind,
            removed_links: HashMap::new(),
            removed_nodes: HashMap::new(),
            suspended_caches: BTreeMap::new(),
        })
    }

    /// Acquire the read-only view of this model.
    pub fn view(&self) -> NetworkView<'_> {
        NetworkView { model: self }
    }
}

fn derive_cache_seed(seed: u64, node: NodeId) -> u64 {
    seed ^ (node.index() as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15)
}

/// # Network view
///
/// Read-only projection over a [`NetworkModel`]. This is the only handle collectors, workloads
/// and strategies get to inspect network state, and none of its queries affects the replacement
/// order of any cache.
#[derive(Debug, Clone, Copy)]
pub struct NetworkView<'a> {
    pub(crate) model: &'a NetworkModel,
}

impl<'a> NetworkView<'a> {
    /// The node persistently storing the given content, or `None` if the content has no origin.
    pub fn content_source(&self, content: ContentId) -> Option<NodeId> {
        self.model.content_source.get(&content).cloned()
    }

    /// All current locations of the given content: every cache currently holding a copy, plus
    /// the persistent origin if one exists.
    pub fn content_locations(&self, content: ContentId) -> BTreeSet<NodeId> {
        let mut locations: BTreeSet<NodeId> = self
            .model
            .caches
            .iter()
            .filter(|(_, cache)| cache.has(content))
            .map(|(&v, _)| v)
            .collect();
        if let Some(source) = self.content_source(content) {
            locations.insert(source);
        }
        locations
    }

    /// The shortest path from `s` to `t`, endpoints included, or `None` if no path is known.
    pub fn shortest_path(&self, s: NodeId, t: NodeId) -> Option<&'a [NodeId]> {
        self.model.shortest_path.get(&(s, t)).map(|p| p.as_slice())
    }

    /// The kind of the directed link `(u, v)`.
    pub fn link_kind(&self, u: NodeId, v: NodeId) -> Option<LinkKind> {
        self.model.link_kind.get(&(u, v)).cloned()
    }

    /// The delay of the directed link `(u, v)` in milliseconds.
    pub fn link_delay(&self, u: NodeId, v: NodeId) -> Option<f64> {
        self.model.link_delay.get(&(u, v)).cloned()
    }

    /// The network topology. The returned reference is immutable; all changes go through the
    /// [`NetworkController`](crate::net::NetworkController).
    pub fn topology(&self) -> &'a Topology {
        &self.model.topology
    }

    /// The active caching nodes with their capacities. Nodes whose cache is suspended by
    /// `remove_node` are not included until they are restored.
    pub fn cache_nodes(&self) -> &'a BTreeMap<NodeId, usize> {
        &self.model.cache_size
    }

    /// Returns true if and only if the node currently operates a cache.
    pub fn has_cache(&self, node: NodeId) -> bool {
        self.model.caches.contains_key(&node)
    }

    /// Ordered snapshot of the cache at `node`, or `None` if the node operates no cache.
    pub fn cache_dump(&self, node: NodeId) -> Option<Vec<ContentId>> {
        self.model.caches.get(&node).map(|c| c.dump())
    }
}
