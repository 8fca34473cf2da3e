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

use super::fixtures;
use crate::cache::PolicyName;
use crate::net::{
    all_pairs_shortest_paths, symmetrify_paths, NetworkController, NetworkError, NetworkModel,
};
use crate::topology::{Stack, Topology};
use crate::{ContentId, LinkKind, NodeId};

use maplit::btreemap;
use std::collections::BTreeMap;

fn path_of(ctrl: &NetworkController, s: NodeId, t: NodeId) -> Vec<NodeId> {
    ctrl.view().shortest_path(s, t).expect("path must exist").to_vec()
}

#[test]
fn symmetrified_paths_are_reverses_of_each_other() {
    fixtures::init();
    // a cycle of six nodes has equal-length alternatives between opposite nodes
    let mut topology = Topology::new(PolicyName::Fifo);
    let nodes: Vec<NodeId> =
        (0..6).map(|_| topology.add_node(Stack::Router { cache_size: None })).collect();
    for &(u, v) in [(0, 1), (1, 3), (3, 4), (4, 2), (2, 5), (5, 0)].iter() {
        topology.add_link(nodes[u], nodes[v], 2.0, LinkKind::Internal);
    }
    let mut paths = all_pairs_shortest_paths(&topology);
    symmetrify_paths(&mut paths);
    for &s in nodes.iter() {
        for &t in nodes.iter() {
            let forward = paths.get(&(s, t)).expect("path must exist").clone();
            let mut backward = paths.get(&(t, s)).expect("path must exist").clone();
            backward.reverse();
            assert_eq!(forward, backward, "asymmetric pair ({:?}, {:?})", s, t);
        }
    }
}

#[test]
fn model_construction_extracts_the_stacks() {
    fixtures::init();
    let (topology, n) = fixtures::two_branch(PolicyName::Fifo);
    let model = NetworkModel::new(topology, 0).unwrap();
    let view = model.view();

    assert_eq!(view.content_source(ContentId(1)), Some(n[4]));
    assert_eq!(view.content_source(ContentId(3)), Some(n[4]));
    assert_eq!(view.content_source(ContentId(99)), None);

    let expected: BTreeMap<NodeId, usize> = btreemap! {
        n[1] => 1, n[2] => 1, n[3] => 1, n[5] => 1, n[6] => 1, n[7] => 1, n[8] => 1,
    };
    assert_eq!(view.cache_nodes(), &expected);

    assert_eq!(view.link_delay(n[0], n[1]), Some(2.0));
    assert_eq!(view.link_delay(n[1], n[0]), Some(2.0));
    assert_eq!(view.link_kind(n[3], n[4]), Some(LinkKind::Internal));
    assert_eq!(view.link_delay(n[0], n[4]), None);
}

#[test]
fn duplicate_content_sources_are_rejected() {
    let mut topology = Topology::new(PolicyName::Lru);
    let a = topology.add_node(Stack::Source { contents: vec![ContentId(1)] });
    let b = topology.add_node(Stack::Source { contents: vec![ContentId(1)] });
    topology.add_link(a, b, 2.0, LinkKind::Internal);
    assert_eq!(
        NetworkModel::new(topology, 0).unwrap_err(),
        NetworkError::DuplicateContentSource(ContentId(1))
    );
}

#[test]
fn content_locations_track_caches_and_the_origin() {
    fixtures::init();
    let (topology, n) = fixtures::two_branch(PolicyName::Fifo);
    let model = NetworkModel::new(topology, 0).unwrap();
    let mut ctrl = NetworkController::new(model);

    let locations = ctrl.view().content_locations(ContentId(1));
    assert_eq!(locations.into_iter().collect::<Vec<_>>(), vec![n[4]]);

    ctrl.start_session(0.0, n[0], ContentId(1), false).unwrap();
    ctrl.put_content(n[2]).unwrap();
    ctrl.put_content(n[7]).unwrap();
    ctrl.put_content(n[0]).unwrap(); // the receiver has no cache, silently skipped
    ctrl.end_session(true).unwrap();

    let locations = ctrl.view().content_locations(ContentId(1));
    assert_eq!(locations.into_iter().collect::<Vec<_>>(), vec![n[2], n[4], n[7]]);
}

#[test]
fn sessions_are_exclusive_and_mandatory() {
    let (topology, n) = fixtures::two_branch(PolicyName::Fifo);
    let model = NetworkModel::new(topology, 0).unwrap();
    let mut ctrl = NetworkController::new(model);

    assert_eq!(ctrl.get_content(n[4]).unwrap_err(), NetworkError::NoActiveSession);
    assert_eq!(ctrl.put_content(n[1]).unwrap_err(), NetworkError::NoActiveSession);
    assert_eq!(ctrl.end_session(true).unwrap_err(), NetworkError::NoActiveSession);
    assert_eq!(
        ctrl.forward_request_hop(n[0], n[1]).unwrap_err(),
        NetworkError::NoActiveSession
    );

    ctrl.start_session(0.0, n[0], ContentId(1), true).unwrap();
    assert_eq!(
        ctrl.start_session(1.0, n[0], ContentId(2), true).unwrap_err(),
        NetworkError::SessionAlreadyActive
    );
    ctrl.end_session(true).unwrap();
    ctrl.start_session(1.0, n[0], ContentId(2), true).unwrap();
    ctrl.end_session(false).unwrap();
}

#[test]
fn get_content_consults_cache_then_origin() {
    let (topology, n) = fixtures::two_branch(PolicyName::Fifo);
    let model = NetworkModel::new(topology, 0).unwrap();
    let mut ctrl = NetworkController::new(model);

    ctrl.start_session(0.0, n[0], ContentId(1), false).unwrap();
    assert!(!ctrl.get_content(n[2]).unwrap(), "empty cache must miss");
    assert!(ctrl.get_content(n[4]).unwrap(), "the origin must serve its content");
    ctrl.put_content(n[2]).unwrap();
    assert!(ctrl.get_content(n[2]).unwrap(), "the filled cache must hit");
    assert!(!ctrl.get_content(n[0]).unwrap(), "a plain receiver cannot serve");
    ctrl.end_session(true).unwrap();

    // a session for a content the source does not hold
    ctrl.start_session(1.0, n[0], ContentId(9), false).unwrap();
    assert!(!ctrl.get_content(n[4]).unwrap());
    ctrl.end_session(false).unwrap();
}

#[test]
fn forwarding_requires_known_endpoints() {
    let (topology, n) = fixtures::two_branch(PolicyName::Fifo);
    let model = NetworkModel::new(topology, 0).unwrap();
    let mut ctrl = NetworkController::new(model);
    let ghost = NodeId::new(100);

    ctrl.start_session(0.0, n[0], ContentId(1), false).unwrap();
    assert_eq!(
        ctrl.forward_request_path(n[0], ghost, None).unwrap_err(),
        NetworkError::PathNotFound(n[0], ghost)
    );
    ctrl.forward_request_path(n[0], n[4], None).unwrap();
    ctrl.forward_content_path(n[4], n[0], None).unwrap();
    ctrl.end_session(true).unwrap();
}

#[test]
fn remove_and_restore_link_reroutes_and_recovers() {
    fixtures::init();
    let (topology, n) = fixtures::two_branch(PolicyName::Fifo);
    let model = NetworkModel::new(topology, 0).unwrap();
    let mut ctrl = NetworkController::new(model);

    assert_eq!(path_of(&ctrl, n[0], n[4]), vec![n[0], n[1], n[2], n[3], n[4]]);
    ctrl.remove_link(n[2], n[3], true).unwrap();
    assert_eq!(
        path_of(&ctrl, n[0], n[4]),
        vec![n[0], n[1], n[5], n[6], n[7], n[8], n[3], n[4]]
    );
    assert_eq!(ctrl.view().link_delay(n[2], n[3]), None);
    ctrl.restore_link(n[2], n[3], true).unwrap();
    assert_eq!(path_of(&ctrl, n[0], n[4]), vec![n[0], n[1], n[2], n[3], n[4]]);
    assert_eq!(ctrl.view().link_delay(n[2], n[3]), Some(2.0));
}

#[test]
fn remove_and_restore_node_suspends_its_cache() {
    fixtures::init();
    let (topology, n) = fixtures::two_branch(PolicyName::Fifo);
    let model = NetworkModel::new(topology, 0).unwrap();
    let mut ctrl = NetworkController::new(model);

    // leave a copy of content 1 in the cache at node 2
    ctrl.start_session(0.0, n[0], ContentId(1), false).unwrap();
    ctrl.put_content(n[2]).unwrap();
    ctrl.end_session(true).unwrap();

    ctrl.remove_node(n[2], true).unwrap();
    assert_eq!(
        path_of(&ctrl, n[0], n[4]),
        vec![n[0], n[1], n[5], n[6], n[7], n[8], n[3], n[4]]
    );
    assert!(!ctrl.view().cache_nodes().contains_key(&n[2]));
    assert!(!ctrl.view().has_cache(n[2]));
    assert!(!ctrl.view().content_locations(ContentId(1)).contains(&n[2]));

    ctrl.restore_node(n[2], true).unwrap();
    assert_eq!(path_of(&ctrl, n[0], n[4]), vec![n[0], n[1], n[2], n[3], n[4]]);
    assert_eq!(ctrl.view().cache_nodes().get(&n[2]), Some(&1));
    // the suspended cache kept its contents across the outage
    assert_eq!(ctrl.view().cache_dump(n[2]), Some(vec![ContentId(1)]));
}

#[test]
fn joint_remove_and_restore_of_node_and_link() {
    let (topology, n) = fixtures::two_branch(PolicyName::Fifo);
    let model = NetworkModel::new(topology, 0).unwrap();
    let mut ctrl = NetworkController::new(model);

    ctrl.remove_link(n[2], n[3], true).unwrap();
    assert_eq!(
        path_of(&ctrl, n[0], n[4]),
        vec![n[0], n[1], n[5], n[6], n[7], n[8], n[3], n[4]]
    );
    ctrl.remove_node(n[2], true).unwrap();
    assert_eq!(
        path_of(&ctrl, n[0], n[4]),
        vec![n[0], n[1], n[5], n[6], n[7], n[8], n[3], n[4]]
    );
    ctrl.restore_node(n[2], true).unwrap();
    // the separately removed link stays down until restored on its own
    assert_eq!(
        path_of(&ctrl, n[0], n[4]),
        vec![n[0], n[1], n[5], n[6], n[7], n[8], n[3], n[4]]
    );
    ctrl.restore_link(n[2], n[3], true).unwrap();
    assert_eq!(path_of(&ctrl, n[0], n[4]), vec![n[0], n[1], n[2], n[3], n[4]]);
}

#[test]
fn rewire_link_moves_the_attributes() {
    let (topology, n) = fixtures::two_branch(PolicyName::Fifo);
    let model = NetworkModel::new(topology, 0).unwrap();
    let mut ctrl = NetworkController::new(model);

    assert_eq!(path_of(&ctrl, n[0], n[4]), vec![n[0], n[1], n[2], n[3], n[4]]);
    ctrl.rewire_link(n[1], n[5], n[1], n[8], true).unwrap();
    assert_eq!(path_of(&ctrl, n[0], n[8]), vec![n[0], n[1], n[8]]);
    assert_eq!(ctrl.view().link_delay(n[1], n[8]), Some(2.0));
    assert_eq!(ctrl.view().link_delay(n[1], n[5]), None);
    ctrl.rewire_link(n[1], n[8], n[1], n[5], true).unwrap();
    assert_eq!(path_of(&ctrl, n[0], n[8]), vec![n[0], n[1], n[2], n[3], n[8]]);
    assert_eq!(ctrl.view().link_delay(n[1], n[5]), Some(2.0));
}

#[test]
fn restoration_returns_the_exact_prior_state() {
    fixtures::init();
    let (topology, n) = fixtures::two_branch(PolicyName::Fifo);
    let model = NetworkModel::new(topology, 0).unwrap();
    let mut ctrl = NetworkController::new(model);

    // populate some caches first so that suspension is observable
    ctrl.start_session(0.0, n[0], ContentId(2), false).unwrap();
    ctrl.put_content(n[2]).unwrap();
    ctrl.put_content(n[6]).unwrap();
    ctrl.end_session(true).unwrap();

    let snapshot = |ctrl: &NetworkController| {
        let view = ctrl.view();
        let nodes = view.topology().nodes();
        let mut paths = BTreeMap::new();
        let mut delays = BTreeMap::new();
        let mut kinds = BTreeMap::new();
        let mut dumps = BTreeMap::new();
        for &s in nodes.iter() {
            for &t in nodes.iter() {
                paths.insert((s, t), view.shortest_path(s, t).map(|p| p.to_vec()));
                delays.insert((s, t), view.link_delay(s, t).map(|d| d.to_bits()));
                kinds.insert((s, t), view.link_kind(s, t));
            }
            dumps.insert(s, view.cache_dump(s));
        }
        (paths, delays, kinds, dumps, view.cache_nodes().clone())
    };

    let before = snapshot(&ctrl);
    ctrl.remove_link(n[1], n[2], true).unwrap();
    ctrl.restore_link(n[1], n[2], true).unwrap();
    assert_eq!(snapshot(&ctrl), before);

    ctrl.remove_node(n[6], true).unwrap();
    ctrl.restore_node(n[6], true).unwrap();
    assert_eq!(snapshot(&ctrl), before);
}

#[test]
fn double_removal_is_rejected() {
    let (topology, n) = fixtures::two_branch(PolicyName::Fifo);
    let model = NetworkModel::new(topology, 0).unwrap();
    let mut ctrl = NetworkController::new(model);

    ctrl.remove_link(n[2], n[3], false).unwrap();
    assert_eq!(
        ctrl.remove_link(n[2], n[3], false).unwrap_err(),
        NetworkError::LinkNotFound(n[2], n[3])
    );
    assert_eq!(
        ctrl.restore_link(n[0], n[1], false).unwrap_err(),
        NetworkError::LinkNotRemoved(n[0], n[1])
    );
    ctrl.remove_node(n[6], false).unwrap();
    assert_eq!(
        ctrl.remove_node(n[6], false).unwrap_err(),
        NetworkError::NodeAlreadyRemoved(n[6])
    );
    assert_eq!(ctrl.restore_node(n[7], false).unwrap_err(), NetworkError::NodeNotRemoved(n[7]));
}
