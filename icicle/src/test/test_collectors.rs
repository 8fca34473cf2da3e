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
use crate::collectors::{
    CacheHitRatioCollector, CollectorError, CollectorProxy, DataCollector, EventKind,
    LatencyCollector, LinkLoadCollector, MetricValue, PathStretchCollector, Results,
    TestCollector,
};
use crate::net::{NetworkController, NetworkModel, NetworkView};
use crate::strategies::{LeaveCopyEverywhere, Strategy};
use crate::{ContentId, NodeId};

use assert_approx_eq::assert_approx_eq;
use itertools::Itertools;
use std::cell::RefCell;
use std::rc::Rc;

/// Collector subscribing to session ends only. Any other delivered event is recorded as a
/// violation of the dispatch table.
#[derive(Debug)]
struct CountingCollector {
    ends: Rc<RefCell<u64>>,
    violations: Rc<RefCell<u64>>,
}

impl DataCollector for CountingCollector {
    fn name(&self) -> &'static str {
        "COUNTING"
    }

    fn subscriptions(&self) -> &'static [EventKind] {
        &[EventKind::EndSession]
    }

    fn start_session(
        &mut self,
        _view: &NetworkView<'_>,
        _timestamp: f64,
        _receiver: NodeId,
        _content: ContentId,
    ) {
        *self.violations.borrow_mut() += 1;
    }

    fn request_hop(&mut self, _view: &NetworkView<'_>, _u: NodeId, _v: NodeId) {
        *self.violations.borrow_mut() += 1;
    }

    fn end_session(&mut self, _view: &NetworkView<'_>, _success: bool) {
        *self.ends.borrow_mut() += 1;
    }

    fn results(&self, _view: &NetworkView<'_>) -> Results {
        Results::new()
    }
}

#[test]
fn the_proxy_dispatches_only_subscribed_events() {
    fixtures::init();
    let (topology, n) = fixtures::line(5, PolicyName::Lru);
    let model = NetworkModel::new(topology, 0).unwrap();
    let view = model.view();

    let ends = Rc::new(RefCell::new(0));
    let violations = Rc::new(RefCell::new(0));
    let counting =
        CountingCollector { ends: Rc::clone(&ends), violations: Rc::clone(&violations) };
    let mut proxy = CollectorProxy::new(vec![Box::new(counting)]);

    proxy.start_session(&view, 0.0, n[0], ContentId(1));
    proxy.request_hop(&view, n[0], n[1]);
    proxy.cache_hit(&view, n[1]);
    proxy.content_hop(&view, n[1], n[0]);
    proxy.end_session(&view, true);
    proxy.start_session(&view, 1.0, n[0], ContentId(1));
    proxy.end_session(&view, false);

    assert_eq!(*ends.borrow(), 2);
    assert_eq!(*violations.borrow(), 0);
}

#[test]
fn unlogged_sessions_reach_no_collector() {
    fixtures::init();
    let (topology, n) = fixtures::line(5, PolicyName::Lru);
    let model = NetworkModel::new(topology, 0).unwrap();
    let mut ctrl = NetworkController::new(model);

    let test_collector = TestCollector::new();
    let sessions = test_collector.sessions();
    let chr = CacheHitRatioCollector::new(false);
    ctrl.attach_collector(CollectorProxy::new(vec![
        Box::new(test_collector),
        Box::new(chr),
    ]));

    ctrl.start_session(0.0, n[0], ContentId(1), false).unwrap();
    ctrl.forward_request_path(n[0], n[4], None).unwrap();
    assert!(ctrl.get_content(n[4]).unwrap());
    ctrl.forward_content_path(n[4], n[0], None).unwrap();
    ctrl.end_session(true).unwrap();

    assert!(sessions.borrow().is_empty());
    let proxy = ctrl.detach_collector().unwrap();
    let results = proxy.results(&ctrl.view());
    assert_eq!(results["CACHE_HIT_RATIO"]["MEAN"], MetricValue::Scalar(0.0));
}

#[test]
fn hit_ratio_over_cache_and_server_hits() {
    fixtures::init();
    let (topology, n) = fixtures::line(5, PolicyName::Lru);
    let model = NetworkModel::new(topology, 0).unwrap();
    let view = model.view();
    let mut proxy = CollectorProxy::new(vec![Box::new(CacheHitRatioCollector::new(true))]);

    // two cache hits and one server hit, the server hit for another content
    proxy.start_session(&view, 0.0, n[0], ContentId(1));
    proxy.cache_hit(&view, n[1]);
    proxy.end_session(&view, true);
    proxy.start_session(&view, 1.0, n[0], ContentId(2));
    proxy.server_hit(&view, n[4]);
    proxy.end_session(&view, true);
    proxy.start_session(&view, 2.0, n[0], ContentId(1));
    proxy.cache_hit(&view, n[2]);
    // hits count towards the ratio even if the delivery fails afterwards
    proxy.end_session(&view, false);

    let results = proxy.results(&view);
    let chr = &results["CACHE_HIT_RATIO"];
    assert_approx_eq!(chr["MEAN"].as_scalar().unwrap(), 2.0 / 3.0);
    let per_content = chr["PER_CONTENT"].as_per_content().unwrap();
    assert_eq!(per_content[&ContentId(1)], 1.0);
    assert_eq!(per_content[&ContentId(2)], 0.0);
}

#[test]
fn latency_accumulates_the_delays_of_one_path() {
    fixtures::init();
    let (topology, n) = fixtures::line(5, PolicyName::Lru);
    let model = NetworkModel::new(topology, 0).unwrap();
    let view = model.view();
    let mut proxy = CollectorProxy::new(vec![Box::new(LatencyCollector::new(true))]);

    // every session walks the full line there and back: 8 hops of 2 ms each
    for round in 0..3 {
        proxy.start_session(&view, round as f64, n[0], ContentId(1));
        for (u, v) in n.iter().cloned().tuple_windows() {
            proxy.request_hop(&view, u, v);
        }
        for (u, v) in n.iter().rev().cloned().tuple_windows() {
            proxy.content_hop(&view, u, v);
        }
        proxy.end_session(&view, true);
    }

    let results = proxy.results(&view);
    assert_approx_eq!(results["LATENCY"]["MEAN"].as_scalar().unwrap(), 16.0);
    let cdf = results["LATENCY"]["CDF"].as_cdf().unwrap();
    assert_eq!(cdf, [(16.0, 1.0)]);
}

#[test]
fn latency_excludes_failed_sessions_from_the_sum() {
    fixtures::init();
    let (topology, n) = fixtures::line(5, PolicyName::Lru);
    let model = NetworkModel::new(topology, 0).unwrap();
    let view = model.view();
    let mut proxy = CollectorProxy::new(vec![Box::new(LatencyCollector::new(false))]);

    proxy.start_session(&view, 0.0, n[0], ContentId(1));
    proxy.request_hop(&view, n[0], n[1]);
    proxy.content_hop(&view, n[1], n[0]);
    proxy.end_session(&view, true);
    proxy.start_session(&view, 1.0, n[0], ContentId(1));
    proxy.request_hop(&view, n[0], n[1]);
    proxy.end_session(&view, false);

    // the failed session contributes to the denominator but not to the sum
    let results = proxy.results(&view);
    assert_approx_eq!(results["LATENCY"]["MEAN"].as_scalar().unwrap(), 2.0);
}

#[test]
fn stretch_is_one_on_the_shortest_path() {
    fixtures::init();
    let (topology, n) = fixtures::line(6, PolicyName::Lru);
    let model = NetworkModel::new(topology, 0).unwrap();
    let mut ctrl = NetworkController::new(model);
    ctrl.attach_collector(CollectorProxy::new(vec![Box::new(PathStretchCollector::new(
        true,
    ))]));

    ctrl.start_session(0.0, n[0], ContentId(1), true).unwrap();
    let mut lce = LeaveCopyEverywhere;
    let success = lce.process_event(&mut ctrl, 0.0, n[0], ContentId(1), true).unwrap();
    ctrl.end_session(success).unwrap();

    let proxy = ctrl.detach_collector().unwrap();
    let results = proxy.results(&ctrl.view());
    let stretch = &results["PATH_STRETCH"];
    assert_approx_eq!(stretch["MEAN"].as_scalar().unwrap(), 1.0);
    assert_approx_eq!(stretch["MEAN_REQUEST"].as_scalar().unwrap(), 1.0);
    assert_approx_eq!(stretch["MEAN_CONTENT"].as_scalar().unwrap(), 1.0);
    assert_eq!(stretch["CDF"].as_cdf().unwrap(), [(1.0, 1.0)]);
}

#[test]
fn link_load_weighs_contents_by_the_size_ratio() {
    fixtures::init();
    let (topology, n) = fixtures::line(6, PolicyName::Lru);
    let model = NetworkModel::new(topology, 0).unwrap();
    let view = model.view();
    let mut proxy = CollectorProxy::new(vec![Box::new(LinkLoadCollector::new(10.0).unwrap())]);

    // one full delivery at t=0, one empty session at t=1 closing the measured window
    proxy.start_session(&view, 0.0, n[0], ContentId(1));
    for (u, v) in n.iter().cloned().tuple_windows() {
        proxy.request_hop(&view, u, v);
    }
    for (u, v) in n.iter().rev().cloned().tuple_windows() {
        proxy.content_hop(&view, u, v);
    }
    proxy.end_session(&view, true);
    proxy.start_session(&view, 1.0, n[0], ContentId(1));
    proxy.end_session(&view, true);

    let results = proxy.results(&view);
    let load = &results["LINK_LOAD"];
    assert_approx_eq!(load["MEAN_INTERNAL"].as_scalar().unwrap(), 11.0);
    let per_link = load["PER_LINK_INTERNAL"].as_per_link().unwrap();
    assert_eq!(per_link.len(), 5);
    for (u, v) in n.iter().cloned().tuple_windows() {
        assert_approx_eq!(per_link[&(u, v)], 11.0);
    }
    // the line has no external links, the empty partition reports zero
    assert_approx_eq!(load["MEAN_EXTERNAL"].as_scalar().unwrap(), 0.0);
    assert!(load["PER_LINK_EXTERNAL"].as_per_link().unwrap().is_empty());
}

#[test]
fn link_load_rejects_a_non_positive_size_ratio() {
    assert_eq!(
        LinkLoadCollector::new(0.0).unwrap_err(),
        CollectorError::NonPositiveSizeRatio(0.0)
    );
}

#[test]
fn the_test_collector_records_a_full_session() {
    fixtures::init();
    let (topology, n) = fixtures::line(5, PolicyName::Lru);
    let model = NetworkModel::new(topology, 0).unwrap();
    let mut ctrl = NetworkController::new(model);
    let collector = TestCollector::new();
    let sessions = collector.sessions();
    ctrl.attach_collector(CollectorProxy::new(vec![Box::new(collector)]));

    ctrl.start_session(0.5, n[0], ContentId(1), true).unwrap();
    let mut lce = LeaveCopyEverywhere;
    let success = lce.process_event(&mut ctrl, 0.5, n[0], ContentId(1), true).unwrap();
    ctrl.end_session(success).unwrap();

    let sessions = sessions.borrow();
    assert_eq!(sessions.len(), 1);
    let session = &sessions[0];
    assert_eq!(session.timestamp, 0.5);
    assert_eq!(session.receiver, Some(n[0]));
    assert_eq!(session.content, Some(ContentId(1)));
    assert_eq!(session.serving_node, Some(n[4]));
    assert_eq!(
        session.request_hops,
        vec![(n[0], n[1]), (n[1], n[2]), (n[2], n[3]), (n[3], n[4])]
    );
    assert_eq!(
        session.content_hops,
        vec![(n[4], n[3]), (n[3], n[2]), (n[2], n[1]), (n[1], n[0])]
    );
    assert_eq!(session.success, Some(true));
}
