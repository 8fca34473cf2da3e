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

//! # Collectors
//!
//! Performance metric loggers. Collectors are passive observers: the
//! [`NetworkController`](crate::net::NetworkController) reports every action of a logged session
//! to the attached [`CollectorProxy`], which fans the events out to the concrete collectors.
//!
//! Each collector declares the event kinds it subscribes to at construction, and the proxy
//! builds its dispatch table from these declarations. A collector that does not care about an
//! event kind therefore pays no per-event cost for it.
//!
//! Within one session, a collector observes the events in a fixed order: `start_session`, zero
//! or more `request_hop`s, at most one `cache_hit` or `server_hit`, zero or more `content_hop`s,
//! and finally `end_session`. Collectors receive a fresh [`NetworkView`] with every event, so
//! they can read network state but can never mutate it.

use crate::net::NetworkView;
use crate::stats::cdf;
use crate::{ContentId, LinkKind, NodeId};

use log::*;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// Collector errors
#[derive(Error, Debug, PartialEq)]
pub enum CollectorError {
    /// The content-to-request size ratio must be positive
    #[error("The size ratio must be positive, but it is {0}")]
    NonPositiveSizeRatio(f64),
}

/// The kinds of events a collector can subscribe to.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub enum EventKind {
    /// A new session started
    StartSession,
    /// The requested content was served by a cache
    CacheHit,
    /// The requested content was served by its origin
    ServerHit,
    /// A request traversed a link
    RequestHop,
    /// A content traversed a link
    ContentHop,
    /// The session ended
    EndSession,
}

impl EventKind {
    /// Number of distinct event kinds.
    pub const COUNT: usize = 6;

    fn index(self) -> usize {
        match self {
            Self::StartSession => 0,
            Self::CacheHit => 1,
            Self::ServerHit => 2,
            Self::RequestHop => 3,
            Self::ContentHop => 4,
            Self::EndSession => 5,
        }
    }
}

/// A single value reported by a collector.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    /// A scalar metric
    Scalar(f64),
    /// A metric reported per link
    PerLink(BTreeMap<(NodeId, NodeId), f64>),
    /// A metric reported per content
    PerContent(BTreeMap<ContentId, f64>),
    /// An empirical CDF, as (value, cumulative probability) pairs
    Cdf(Vec<(f64, f64)>),
}

impl MetricValue {
    /// The scalar value, or `None` for structured metrics.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(x) => Some(*x),
            _ => None,
        }
    }

    /// The per-link map, or `None` for other metrics.
    pub fn as_per_link(&self) -> Option<&BTreeMap<(NodeId, NodeId), f64>> {
        match self {
            Self::PerLink(m) => Some(m),
            _ => None,
        }
    }

    /// The per-content map, or `None` for other metrics.
    pub fn as_per_content(&self) -> Option<&BTreeMap<ContentId, f64>> {
        match self {
            Self::PerContent(m) => Some(m),
            _ => None,
        }
    }

    /// The CDF points, or `None` for other metrics.
    pub fn as_cdf(&self) -> Option<&[(f64, f64)]> {
        match self {
            Self::Cdf(points) => Some(points),
            _ => None,
        }
    }
}

/// Results of a single collector: metric name mapped to its value.
pub type Results = BTreeMap<&'static str, MetricValue>;

/// Results of a whole run: collector name mapped to its results.
pub type ResultSet = BTreeMap<&'static str, Results>;

/// Interface of all metric collectors.
///
/// All event handlers default to no-ops; a collector implements the handlers for the kinds it
/// declares in [`subscriptions`](Self::subscriptions). The proxy only ever calls the declared
/// handlers.
pub trait DataCollector: fmt::Debug {
    /// The name under which the results of this collector are registered.
    fn name(&self) -> &'static str;

    /// The event kinds this collector wants to observe.
    fn subscriptions(&self) -> &'static [EventKind];

    /// A new session started at `timestamp`, with `receiver` requesting `content`.
    fn start_session(
        &mut self,
        _view: &NetworkView<'_>,
        _timestamp: f64,
        _receiver: NodeId,
        _content: ContentId,
    ) {
    }

    /// The requested content was served by the cache at `node`.
    fn cache_hit(&mut self, _view: &NetworkView<'_>, _node: NodeId) {}

    /// The requested content was served by the origin server at `node`.
    fn server_hit(&mut self, _view: &NetworkView<'_>, _node: NodeId) {}

    /// A request traversed the link `(u, v)`.
    fn request_hop(&mut self, _view: &NetworkView<'_>, _u: NodeId, _v: NodeId) {}

    /// A content traversed the link `(u, v)`.
    fn content_hop(&mut self, _view: &NetworkView<'_>, _u: NodeId, _v: NodeId) {}

    /// The session was closed, successfully or not.
    fn end_session(&mut self, _view: &NetworkView<'_>, _success: bool) {}

    /// The aggregated results measured by this collector.
    fn results(&self, view: &NetworkView<'_>) -> Results;
}

/// # Collector proxy
///
/// Fan-out of session events to a set of concrete collectors. The proxy is what gets attached
/// to the [`NetworkController`](crate::net::NetworkController); it dispatches each event to
/// exactly those collectors that subscribed to its kind.
#[derive(Debug)]
pub struct CollectorProxy {
    collectors: Vec<Box<dyn DataCollector>>,
    dispatch: Vec<Vec<usize>>,
}

impl CollectorProxy {
    /// Build the proxy and its dispatch table from the collectors' declared subscriptions.
    pub fn new(collectors: Vec<Box<dyn DataCollector>>) -> Self {
        let mut dispatch = vec![Vec::new(); EventKind::COUNT];
        for (i, collector) in collectors.iter().enumerate() {
            for kind in collector.subscriptions() {
                dispatch[kind.index()].push(i);
            }
        }
        Self { collectors, dispatch }
    }

    /// Report a session start to all subscribed collectors.
    pub fn start_session(
        &mut self,
        view: &NetworkView<'_>,
        timestamp: f64,
        receiver: NodeId,
        content: ContentId,
    ) {
        for &i in self.dispatch[EventKind::StartSession.index()].iter() {
            self.collectors[i].start_session(view, timestamp, receiver, content);
        }
    }

    /// Report a cache hit to all subscribed collectors.
    pub fn cache_hit(&mut self, view: &NetworkView<'_>, node: NodeId) {
        for &i in self.dispatch[EventKind::CacheHit.index()].iter() {
            self.collectors[i].cache_hit(view, node);
        }
    }

    /// Report a server hit to all subscribed collectors.
    pub fn server_hit(&mut self, view: &NetworkView<'_>, node: NodeId) {
        for &i in self.dispatch[EventKind::ServerHit.index()].iter() {
            self.collectors[i].server_hit(view, node);
        }
    }

    /// Report a request hop to all subscribed collectors.
    pub fn request_hop(&mut self, view: &NetworkView<'_>, u: NodeId, v: NodeId) {
        for &i in self.dispatch[EventKind::RequestHop.index()].iter() {
            self.collectors[i].request_hop(view, u, v);
        }
    }

    /// Report a content hop to all subscribed collectors.
    pub fn content_hop(&mut self, view: &NetworkView<'_>, u: NodeId, v: NodeId) {
        for &i in self.dispatch[EventKind::ContentHop.index()].iter() {
            self.collectors[i].content_hop(view, u, v);
        }
    }

    /// Report a session end to all subscribed collectors.
    pub fn end_session(&mut self, view: &NetworkView<'_>, success: bool) {
        for &i in self.dispatch[EventKind::EndSession.index()].iter() {
            self.collectors[i].end_session(view, success);
        }
    }

    /// Collect the results of every collector, keyed by collector name.
    pub fn results(&self, view: &NetworkView<'_>) -> ResultSet {
        self.collectors.iter().map(|c| (c.name(), c.results(view))).collect()
    }
}

/// # Cache hit ratio collector
///
/// Measures the portion of requests served by a cache rather than by an origin server. With
/// `per_content` enabled it additionally reports one ratio per content, using the content
/// latched at session start.
#[derive(Debug)]
pub struct CacheHitRatioCollector {
    per_content: bool,
    cache_hits: u64,
    serv_hits: u64,
    curr_content: Option<ContentId>,
    cont_cache_hits: BTreeMap<ContentId, u64>,
    cont_serv_hits: BTreeMap<ContentId, u64>,
}

impl CacheHitRatioCollector {
    /// Create the collector. With `per_content`, hits are additionally recorded per content.
    pub fn new(per_content: bool) -> Self {
        Self {
            per_content,
            cache_hits: 0,
            serv_hits: 0,
            curr_content: None,
            cont_cache_hits: BTreeMap::new(),
            cont_serv_hits: BTreeMap::new(),
        }
    }
}

impl DataCollector for CacheHitRatioCollector {
    fn name(&self) -> &'static str {
        "CACHE_HIT_RATIO"
    }

    fn subscriptions(&self) -> &'static [EventKind] {
        &[EventKind::StartSession, EventKind::CacheHit, EventKind::ServerHit]
    }

    fn start_session(
        &mut self,
        _view: &NetworkView<'_>,
        _timestamp: f64,
        _receiver: NodeId,
        content: ContentId,
    ) {
        if self.per_content {
            self.curr_content = Some(content);
        }
    }

    fn cache_hit(&mut self, _view: &NetworkView<'_>, _node: NodeId) {
        self.cache_hits += 1;
        if let Some(content) = self.curr_content {
            *self.cont_cache_hits.entry(content).or_insert(0) += 1;
        }
    }

    fn server_hit(&mut self, _view: &NetworkView<'_>, _node: NodeId) {
        self.serv_hits += 1;
        if let Some(content) = self.curr_content {
            *self.cont_serv_hits.entry(content).or_insert(0) += 1;
        }
    }

    fn results(&self, _view: &NetworkView<'_>) -> Results {
        let total = self.cache_hits + self.serv_hits;
        let ratio = if total > 0 { self.cache_hits as f64 / total as f64 } else { 0.0 };
        let mut results = Results::new();
        results.insert("MEAN", MetricValue::Scalar(ratio));
        if self.per_content {
            let contents: Vec<ContentId> = self
                .cont_cache_hits
                .keys()
                .chain(self.cont_serv_hits.keys())
                .cloned()
                .collect();
            let per_content = contents
                .into_iter()
                .map(|c| {
                    let cache = *self.cont_cache_hits.get(&c).unwrap_or(&0);
                    let serv = *self.cont_serv_hits.get(&c).unwrap_or(&0);
                    (c, cache as f64 / (cache + serv) as f64)
                })
                .collect();
            results.insert("PER_CONTENT", MetricValue::PerContent(per_content));
        }
        results
    }
}

/// # Latency collector
///
/// Accumulates the link delays a session's request and content traversed, and reports the mean
/// over all successfully delivered sessions. With `cdf` enabled the full latency sequence is
/// kept and reported as an empirical CDF.
#[derive(Debug)]
pub struct LatencyCollector {
    cdf: bool,
    sess_count: u64,
    sess_latency: f64,
    latency: f64,
    latency_data: Vec<f64>,
}

impl LatencyCollector {
    /// Create the collector. With `cdf`, the latency CDF is reported as well.
    pub fn new(cdf: bool) -> Self {
        Self { cdf, sess_count: 0, sess_latency: 0.0, latency: 0.0, latency_data: Vec::new() }
    }

    fn hop(&mut self, view: &NetworkView<'_>, u: NodeId, v: NodeId) {
        match view.link_delay(u, v) {
            Some(delay) => self.sess_latency += delay,
            None => warn!("No delay is known for link {:?} -> {:?}", u, v),
        }
    }
}

impl DataCollector for LatencyCollector {
    fn name(&self) -> &'static str {
        "LATENCY"
    }

    fn subscriptions(&self) -> &'static [EventKind] {
        &[
            EventKind::StartSession,
            EventKind::RequestHop,
            EventKind::ContentHop,
            EventKind::EndSession,
        ]
    }

    fn start_session(
        &mut self,
        _view: &NetworkView<'_>,
        _timestamp: f64,
        _receiver: NodeId,
        _content: ContentId,
    ) {
        self.sess_count += 1;
        self.sess_latency = 0.0;
    }

    fn request_hop(&mut self, view: &NetworkView<'_>, u: NodeId, v: NodeId) {
        self.hop(view, u, v);
    }

    fn content_hop(&mut self, view: &NetworkView<'_>, u: NodeId, v: NodeId) {
        self.hop(view, u, v);
    }

    fn end_session(&mut self, _view: &NetworkView<'_>, success: bool) {
        if !success {
            return;
        }
        if self.cdf {
            self.latency_data.push(self.sess_latency);
        }
        self.latency += self.sess_latency;
    }

    fn results(&self, _view: &NetworkView<'_>) -> Results {
        let mean = if self.sess_count > 0 { self.latency / self.sess_count as f64 } else { 0.0 };
        let mut results = Results::new();
        results.insert("MEAN", MetricValue::Scalar(mean));
        if self.cdf {
            if let Ok(points) = cdf(&self.latency_data) {
                results.insert("CDF", MetricValue::Cdf(points));
            }
        }
        results
    }
}

/// # Path stretch collector
///
/// Measures the ratio between the number of hops a session actually traversed and the length of
/// the shortest path between receiver and origin, separately for the request and the content
/// direction and combined. Lengths are counted in hops, so a session that sticks to the
/// shortest path has a stretch of exactly one.
#[derive(Debug)]
pub struct PathStretchCollector {
    cdf: bool,
    receiver: Option<NodeId>,
    source: Option<NodeId>,
    req_path_len: u64,
    cont_path_len: u64,
    sess_count: u64,
    sum_req_stretch: f64,
    sum_cont_stretch: f64,
    sum_stretch: f64,
    req_stretch_data: Vec<f64>,
    cont_stretch_data: Vec<f64>,
    stretch_data: Vec<f64>,
}

impl PathStretchCollector {
    /// Create the collector. With `cdf`, the stretch CDFs are reported as well.
    pub fn new(cdf: bool) -> Self {
        Self {
            cdf,
            receiver: None,
            source: None,
            req_path_len: 0,
            cont_path_len: 0,
            sess_count: 0,
            sum_req_stretch: 0.0,
            sum_cont_stretch: 0.0,
            sum_stretch: 0.0,
            req_stretch_data: Vec::new(),
            cont_stretch_data: Vec::new(),
            stretch_data: Vec::new(),
        }
    }
}

impl DataCollector for PathStretchCollector {
    fn name(&self) -> &'static str {
        "PATH_STRETCH"
    }

    fn subscriptions(&self) -> &'static [EventKind] {
        &[
            EventKind::StartSession,
            EventKind::RequestHop,
            EventKind::ContentHop,
            EventKind::EndSession,
        ]
    }

    fn start_session(
        &mut self,
        view: &NetworkView<'_>,
        _timestamp: f64,
        receiver: NodeId,
        content: ContentId,
    ) {
        self.receiver = Some(receiver);
        self.source = view.content_source(content);
        self.req_path_len = 0;
        self.cont_path_len = 0;
        self.sess_count += 1;
    }

    fn request_hop(&mut self, _view: &NetworkView<'_>, _u: NodeId, _v: NodeId) {
        self.req_path_len += 1;
    }

    fn content_hop(&mut self, _view: &NetworkView<'_>, _u: NodeId, _v: NodeId) {
        self.cont_path_len += 1;
    }

    fn end_session(&mut self, view: &NetworkView<'_>, success: bool) {
        if !success {
            return;
        }
        let (receiver, source) = match (self.receiver, self.source) {
            (Some(r), Some(s)) => (r, s),
            _ => {
                warn!("Cannot compute the stretch of a session without a known origin");
                return;
            }
        };
        let req_sp_hops = match view.shortest_path(receiver, source) {
            Some(path) if path.len() > 1 => (path.len() - 1) as f64,
            _ => return,
        };
        let cont_sp_hops = match view.shortest_path(source, receiver) {
            Some(path) if path.len() > 1 => (path.len() - 1) as f64,
            _ => return,
        };
        let req_stretch = self.req_path_len as f64 / req_sp_hops;
        let cont_stretch = self.cont_path_len as f64 / cont_sp_hops;
        let stretch = (self.req_path_len + self.cont_path_len) as f64 / (req_sp_hops + cont_sp_hops);
        self.sum_req_stretch += req_stretch;
        self.sum_cont_stretch += cont_stretch;
        self.sum_stretch += stretch;
        if self.cdf {
            self.req_stretch_data.push(req_stretch);
            self.cont_stretch_data.push(cont_stretch);
            self.stretch_data.push(stretch);
        }
    }

    fn results(&self, _view: &NetworkView<'_>) -> Results {
        let n = if self.sess_count > 0 { self.sess_count as f64 } else { 1.0 };
        let mut results = Results::new();
        results.insert("MEAN", MetricValue::Scalar(self.sum_stretch / n));
        results.insert("MEAN_REQUEST", MetricValue::Scalar(self.sum_req_stretch / n));
        results.insert("MEAN_CONTENT", MetricValue::Scalar(self.sum_cont_stretch / n));
        if self.cdf {
            if let Ok(points) = cdf(&self.stretch_data) {
                results.insert("CDF", MetricValue::Cdf(points));
            }
            if let Ok(points) = cdf(&self.req_stretch_data) {
                results.insert("CDF_REQUEST", MetricValue::Cdf(points));
            }
            if let Ok(points) = cdf(&self.cont_stretch_data) {
                results.insert("CDF_CONTENT", MetricValue::Cdf(points));
            }
        }
        results
    }
}

/// # Link load collector
///
/// Counts the request and content traversals of every link and reports the resulting load,
/// normalized by the duration of the measured phase. A content traversal weighs `sr` times a
/// request traversal, where `sr` is the mean content-to-request size ratio. Request and content
/// traversals of the two directions of a link accumulate on the same record, keyed by the
/// ordered endpoint pair.
#[derive(Debug)]
pub struct LinkLoadCollector {
    sr: f64,
    req_count: BTreeMap<(NodeId, NodeId), u64>,
    cont_count: BTreeMap<(NodeId, NodeId), u64>,
    t_start: Option<f64>,
    t_end: Option<f64>,
}

impl LinkLoadCollector {
    /// Create the collector with the given content-to-request size ratio.
    pub fn new(sr: f64) -> Result<Self, CollectorError> {
        if sr <= 0.0 {
            return Err(CollectorError::NonPositiveSizeRatio(sr));
        }
        Ok(Self {
            sr,
            req_count: BTreeMap::new(),
            cont_count: BTreeMap::new(),
            t_start: None,
            t_end: None,
        })
    }
}

fn link_key(u: NodeId, v: NodeId) -> (NodeId, NodeId) {
    if u <= v {
        (u, v)
    } else {
        (v, u)
    }
}

impl DataCollector for LinkLoadCollector {
    fn name(&self) -> &'static str {
        "LINK_LOAD"
    }

    fn subscriptions(&self) -> &'static [EventKind] {
        &[EventKind::StartSession, EventKind::RequestHop, EventKind::ContentHop]
    }

    fn start_session(
        &mut self,
        _view: &NetworkView<'_>,
        timestamp: f64,
        _receiver: NodeId,
        _content: ContentId,
    ) {
        if self.t_start.is_none() {
            self.t_start = Some(timestamp);
        }
        self.t_end = Some(timestamp);
    }

    fn request_hop(&mut self, _view: &NetworkView<'_>, u: NodeId, v: NodeId) {
        *self.req_count.entry(link_key(u, v)).or_insert(0) += 1;
    }

    fn content_hop(&mut self, _view: &NetworkView<'_>, u: NodeId, v: NodeId) {
        *self.cont_count.entry(link_key(u, v)).or_insert(0) += 1;
    }

    fn results(&self, view: &NetworkView<'_>) -> Results {
        let duration = match (self.t_start, self.t_end) {
            (Some(start), Some(end)) if end > start => end - start,
            _ => {
                warn!("The measured phase has no duration, reporting zero loads");
                0.0
            }
        };
        let links: Vec<(NodeId, NodeId)> =
            self.req_count.keys().chain(self.cont_count.keys()).cloned().collect();
        let mut internal = BTreeMap::new();
        let mut external = BTreeMap::new();
        for (u, v) in links {
            let traversals = *self.req_count.get(&(u, v)).unwrap_or(&0) as f64
                + self.sr * *self.cont_count.get(&(u, v)).unwrap_or(&0) as f64;
            let load = if duration > 0.0 { traversals / duration } else { 0.0 };
            match view.link_kind(u, v) {
                Some(LinkKind::Internal) => {
                    internal.insert((u, v), load);
                }
                Some(LinkKind::External) => {
                    external.insert((u, v), load);
                }
                None => warn!("No kind is known for link {:?} -> {:?}", u, v),
            }
        }
        let mean = |loads: &BTreeMap<(NodeId, NodeId), f64>| {
            if loads.is_empty() {
                0.0
            } else {
                loads.values().sum::<f64>() / loads.len() as f64
            }
        };
        let mut results = Results::new();
        results.insert("MEAN_INTERNAL", MetricValue::Scalar(mean(&internal)));
        results.insert("MEAN_EXTERNAL", MetricValue::Scalar(mean(&external)));
        results.insert("PER_LINK_INTERNAL", MetricValue::PerLink(internal));
        results.insert("PER_LINK_EXTERNAL", MetricValue::PerLink(external));
        results
    }
}

/// Summary of one observed session, recorded by the [`TestCollector`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSummary {
    /// Time at which the session started
    pub timestamp: f64,
    /// Node that issued the request
    pub receiver: Option<NodeId>,
    /// The requested content
    pub content: Option<ContentId>,
    /// Node that served the content, from either its cache or its origin store
    pub serving_node: Option<NodeId>,
    /// Links the request traversed, in order
    pub request_hops: Vec<(NodeId, NodeId)>,
    /// Links the content traversed, in order
    pub content_hops: Vec<(NodeId, NodeId)>,
    /// Outcome reported at session end
    pub success: Option<bool>,
}

/// # Test collector
///
/// Records the full summary of every observed session. The summaries are shared through a
/// handle, so a test can keep inspecting them after the collector was moved into a proxy.
#[derive(Debug)]
pub struct TestCollector {
    sessions: Rc<RefCell<Vec<SessionSummary>>>,
}

impl Default for TestCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCollector {
    /// Create the collector with an empty session record.
    pub fn new() -> Self {
        Self { sessions: Rc::new(RefCell::new(Vec::new())) }
    }

    /// A shared handle to the recorded session summaries.
    pub fn sessions(&self) -> Rc<RefCell<Vec<SessionSummary>>> {
        Rc::clone(&self.sessions)
    }
}

impl DataCollector for TestCollector {
    fn name(&self) -> &'static str {
        "TEST"
    }

    fn subscriptions(&self) -> &'static [EventKind] {
        &[
            EventKind::StartSession,
            EventKind::CacheHit,
            EventKind::ServerHit,
            EventKind::RequestHop,
            EventKind::ContentHop,
            EventKind::EndSession,
        ]
    }

    fn start_session(
        &mut self,
        _view: &NetworkView<'_>,
        timestamp: f64,
        receiver: NodeId,
        content: ContentId,
    ) {
        self.sessions.borrow_mut().push(SessionSummary {
            timestamp,
            receiver: Some(receiver),
            content: Some(content),
            ..SessionSummary::default()
        });
    }

    fn cache_hit(&mut self, _view: &NetworkView<'_>, node: NodeId) {
        if let Some(session) = self.sessions.borrow_mut().last_mut() {
            session.serving_node = Some(node);
        }
    }

    fn server_hit(&mut self, _view: &NetworkView<'_>, node: NodeId) {
        if let Some(session) = self.sessions.borrow_mut().last_mut() {
            session.serving_node = Some(node);
        }
    }

    fn request_hop(&mut self, _view: &NetworkView<'_>, u: NodeId, v: NodeId) {
        if let Some(session) = self.sessions.borrow_mut().last_mut() {
            session.request_hops.push((u, v));
        }
    }

    fn content_hop(&mut self, _view: &NetworkView<'_>, u: NodeId, v: NodeId) {
        if let Some(session) = self.sessions.borrow_mut().last_mut() {
            session.content_hops.push((u, v));
        }
    }

    fn end_session(&mut self, _view: &NetworkView<'_>, success: bool) {
        if let Some(session) = self.sessions.borrow_mut().last_mut() {
            session.success = Some(success);
        }
    }

    fn results(&self, _view: &NetworkView<'_>) -> Results {
        let mut results = Results::new();
        results.insert(
            "SESSIONS",
            MetricValue::Scalar(self.sessions.borrow().len() as f64),
        );
        results
    }
}
