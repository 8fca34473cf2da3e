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

//! # Topology
//!
//! The attributed, undirected graph the simulator runs on. Every node carries a [`Stack`]
//! describing its role (content source, receiver, or router with an optional cache), every link
//! carries a propagation delay and a [`LinkKind`], and the graph itself carries the replacement
//! policy used by all caches deployed on it.
//!
//! A `Topology` is usually built by one of the factories in [`scenarios`](crate::scenarios), but
//! it can also be assembled by hand:
//!
//! ```rust
//! use icicle::topology::{Stack, Topology};
//! use icicle::cache::PolicyName;
//! use icicle::{ContentId, LinkKind};
//!
//! let mut t = Topology::new(PolicyName::Lru);
//! let r = t.add_node(Stack::Receiver);
//! let c = t.add_node(Stack::Router { cache_size: Some(10) });
//! let s = t.add_node(Stack::Source { contents: vec![ContentId(1)] });
//! t.add_link(r, c, 2.0, LinkKind::Internal);
//! t.add_link(c, s, 102.0, LinkKind::External);
//! assert_eq!(t.receivers(), vec![r]);
//! assert_eq!(t.sources(), vec![s]);
//! ```

use crate::cache::PolicyName;
use crate::types::IndexType;
use crate::{ContentId, LinkKind, NodeId};

use petgraph::stable_graph::StableGraph;
use petgraph::Undirected;

/// The underlying attributed graph
pub type IcnGraph = StableGraph<Stack, Link, Undirected, IndexType>;

/// Attributes of a single (undirected) link
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    /// Propagation delay in milliseconds
    pub delay: f64,
    /// Link classification
    pub kind: LinkKind,
}

/// Role of a node in the content-delivery network
#[derive(Debug, Clone, PartialEq)]
pub enum Stack {
    /// Node persistently storing the given contents
    Source {
        /// The contents this node is the origin of
        contents: Vec<ContentId>,
    },
    /// Node issuing content requests
    Receiver,
    /// Forwarding node, optionally equipped with a cache of the given capacity
    Router {
        /// Capacity of the co-located cache, if any
        cache_size: Option<usize>,
    },
    /// Dedicated caching node of the given capacity
    Cache {
        /// Capacity of the cache
        size: usize,
    },
}

impl Stack {
    /// Returns the cache capacity this stack deploys, if any.
    pub fn cache_size(&self) -> Option<usize> {
        match self {
            Self::Cache { size } => Some(*size),
            Self::Router { cache_size } => *cache_size,
            _ => None,
        }
    }

    /// Returns the contents this stack is the origin of, or `None` if it is not a source.
    pub fn contents(&self) -> Option<&[ContentId]> {
        match self {
            Self::Source { contents } => Some(contents),
            _ => None,
        }
    }

    /// Returns true if and only if the stack is a source.
    pub fn is_source(&self) -> bool {
        matches!(self, Self::Source { .. })
    }

    /// Returns true if and only if the stack is a receiver.
    pub fn is_receiver(&self) -> bool {
        matches!(self, Self::Receiver)
    }
}

/// # Topology
///
/// Attributed graph of the caching network. The node and link attributes are the only channel
/// through which scenario generators talk to the simulation core: sources declare their contents,
/// cache placement declares capacities, and links declare delay and kind.
#[derive(Debug, Clone)]
pub struct Topology {
    graph: IcnGraph,
    cache_policy: PolicyName,
}

impl Topology {
    /// Generate an empty topology whose caches will use the given replacement policy.
    pub fn new(cache_policy: PolicyName) -> Self {
        Self { graph: IcnGraph::with_capacity(0, 0), cache_policy }
    }

    /// The replacement policy deployed on every cache of this topology.
    pub fn cache_policy(&self) -> PolicyName {
        self.cache_policy
    }

    /// Add a new node with the given stack. This function returns the ID of the node, which is
    /// used to reference it in every other call.
    pub fn add_node(&mut self, stack: Stack) -> NodeId {
        self.graph.add_node(stack)
    }

    /// Create an undirected link between `u` and `v` with the given delay (in milliseconds) and
    /// kind. Both directions share the same attributes.
    pub fn add_link(&mut self, u: NodeId, v: NodeId, delay: f64, kind: LinkKind) {
        self.graph.add_edge(u, v, Link { delay, kind });
    }

    /// Insert a link with already-built attributes, used to restore a previously removed link.
    pub fn insert_link(&mut self, u: NodeId, v: NodeId, link: Link) {
        self.graph.add_edge(u, v, link);
    }

    /// Remove the link between `u` and `v`, returning its attributes if it existed.
    pub fn remove_link(&mut self, u: NodeId, v: NodeId) -> Option<Link> {
        let edge = self.graph.find_edge(u, v)?;
        self.graph.remove_edge(edge)
    }

    /// Returns the attributes of the link between `u` and `v`, if it exists.
    pub fn link(&self, u: NodeId, v: NodeId) -> Option<&Link> {
        self.graph.find_edge(u, v).and_then(|e| self.graph.edge_weight(e))
    }

    /// Returns the stack of node `v`, or `None` if the node does not exist.
    pub fn stack(&self, v: NodeId) -> Option<&Stack> {
        self.graph.node_weight(v)
    }

    /// Replace the stack of node `v`. Returns the previous stack, or `None` if the node does not
    /// exist (in which case nothing is changed).
    pub fn set_stack(&mut self, v: NodeId, stack: Stack) -> Option<Stack> {
        let slot = self.graph.node_weight_mut(v)?;
        Some(std::mem::replace(slot, stack))
    }

    /// Returns true if and only if the node exists.
    pub fn contains_node(&self, v: NodeId) -> bool {
        self.graph.node_weight(v).is_some()
    }

    /// All node IDs, in ascending order.
    pub fn nodes(&self) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = self.graph.node_indices().collect();
        nodes.sort();
        nodes
    }

    /// Number of nodes in the topology.
    pub fn num_nodes(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of undirected links in the topology.
    pub fn num_links(&self) -> usize {
        self.graph.edge_count()
    }

    /// All undirected links with their attributes, ordered by endpoint pair.
    pub fn links(&self) -> Vec<(NodeId, NodeId, &Link)> {
        let mut links: Vec<(NodeId, NodeId, &Link)> = self
            .graph
            .edge_indices()
            .filter_map(|e| {
                let (u, v) = self.graph.edge_endpoints(e)?;
                let link = self.graph.edge_weight(e)?;
                Some(if u <= v { (u, v, link) } else { (v, u, link) })
            })
            .collect();
        links.sort_by_key(|(u, v, _)| (*u, *v));
        links
    }

    /// The neighbors of node `v`, in ascending order.
    pub fn neighbors(&self, v: NodeId) -> Vec<NodeId> {
        let mut n: Vec<NodeId> = self.graph.neighbors(v).collect();
        n.sort();
        n
    }

    /// The degree of node `v`.
    pub fn degree(&self, v: NodeId) -> usize {
        self.graph.neighbors(v).count()
    }

    /// All source nodes, in ascending order.
    pub fn sources(&self) -> Vec<NodeId> {
        self.nodes_where(Stack::is_source)
    }

    /// All receiver nodes, in ascending order.
    pub fn receivers(&self) -> Vec<NodeId> {
        self.nodes_where(Stack::is_receiver)
    }

    /// All nodes deploying a cache, with their capacities, in ascending node order.
    pub fn cache_nodes(&self) -> Vec<(NodeId, usize)> {
        self.nodes()
            .into_iter()
            .filter_map(|v| self.stack(v).and_then(Stack::cache_size).map(|s| (v, s)))
            .collect()
    }

    fn nodes_where(&self, pred: impl Fn(&Stack) -> bool) -> Vec<NodeId> {
        self.nodes().into_iter().filter(|v| self.stack(*v).map(&pred).unwrap_or(false)).collect()
    }
}
