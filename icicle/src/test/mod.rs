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

#[cfg(test)]
mod test_collectors;
#[cfg(test)]
mod test_network;

#[cfg(test)]
mod fixtures {
    use crate::cache::PolicyName;
    use crate::topology::{Stack, Topology};
    use crate::{ContentId, LinkKind, NodeId};

    use lazy_static::lazy_static;

    lazy_static! {
        static ref LOGGER: () = {
            let _ = pretty_env_logger::try_init();
        };
    }

    /// Initialize logging once for the whole test run.
    pub fn init() {
        lazy_static::initialize(&LOGGER);
    }

    /// A line of `n` nodes with the receiver at node 0, caches of capacity one on all
    /// intermediate nodes, and the source at the far end holding contents 1 to 3. Every link is
    /// internal with a delay of 2 ms.
    ///
    /// ```text
    /// 0 ---- 1 ---- 2 ---- ... ---- (n-1)
    /// ```
    pub fn line(n: usize, policy: PolicyName) -> (Topology, Vec<NodeId>) {
        let mut topology = Topology::new(policy);
        let mut nodes = Vec::with_capacity(n);
        nodes.push(topology.add_node(Stack::Receiver));
        for _ in 1..n - 1 {
            nodes.push(topology.add_node(Stack::Router { cache_size: Some(1) }));
        }
        nodes.push(topology.add_node(Stack::Source {
            contents: vec![ContentId(1), ContentId(2), ContentId(3)],
        }));
        for pair in nodes.windows(2) {
            topology.add_link(pair[0], pair[1], 2.0, LinkKind::Internal);
        }
        (topology, nodes)
    }

    /// The two-branch topology used by the removal and restoration tests. The source sits at
    /// node 4, the receiver at node 0, and every other node carries a cache of capacity one.
    ///
    /// ```text
    /// 0 ---- 1 ---- 2 ---- 3 ---- 4
    ///        |             |
    ///        |             |
    ///        5 -- 6 - 7 -- 8
    /// ```
    pub fn two_branch(policy: PolicyName) -> (Topology, Vec<NodeId>) {
        let mut topology = Topology::new(policy);
        let mut nodes = Vec::with_capacity(9);
        nodes.push(topology.add_node(Stack::Receiver));
        for _ in 1..4 {
            nodes.push(topology.add_node(Stack::Router { cache_size: Some(1) }));
        }
        nodes.push(topology.add_node(Stack::Source {
            contents: vec![ContentId(1), ContentId(2), ContentId(3)],
        }));
        for _ in 5..9 {
            nodes.push(topology.add_node(Stack::Router { cache_size: Some(1) }));
        }
        let links =
            [(0, 1), (1, 2), (2, 3), (3, 4), (1, 5), (5, 6), (6, 7), (7, 8), (8, 3)];
        for &(u, v) in links.iter() {
            topology.add_link(nodes[u], nodes[v], 2.0, LinkKind::Internal);
        }
        (topology, nodes)
    }
}
