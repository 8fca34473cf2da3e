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

//! The mutating handle over the network model.

use crate::collectors::CollectorProxy;
use crate::net::model::{all_pairs_shortest_paths, symmetrify_paths, NetworkModel, NetworkView};
use crate::net::NetworkError;
use crate::{ContentId, LinkKind, NodeId};

use itertools::Itertools;
use log::*;

/// State of one request-to-delivery cycle. A session is live between
/// [`start_session`](NetworkController::start_session) and
/// [`end_session`](NetworkController::end_session), and at most one session is live per
/// controller.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Time at which the request was issued
    pub timestamp: f64,
    /// Node that issued the request
    pub receiver: NodeId,
    /// The requested content
    pub content: ContentId,
    /// Whether the session is reported to the attached collector
    pub log: bool,
}

/// # Network controller
///
/// The single mutating handle over a [`NetworkModel`]. A routing strategy drives one session at
/// a time through it: starting the session, forwarding the request and the content hop by hop,
/// consulting and filling caches, and finally closing the session. Every action of a logged
/// session is reported to the attached collector, in the order in which it happens.
///
/// The controller also exposes the topology-mutation primitives (link and node removal,
/// restoration, and rewiring). Removed state is stashed away in full, so a removal followed by
/// the matching restoration returns the model to its exact prior state.
#[derive(Debug)]
pub struct NetworkController {
    model: NetworkModel,
    session: Option<Session>,
    collector: Option<CollectorProxy>,
}

impl NetworkController {
    /// Create a controller owning the given model.
    pub fn new(model: NetworkModel) -> Self {
        Self { model, session: None, collector: None }
    }

    /// Acquire the read-only view of the controlled model.
    pub fn view(&self) -> NetworkView<'_> {
        self.model.view()
    }

    /// The live session, if any.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Give up the model, consuming the controller.
    pub fn into_model(self) -> NetworkModel {
        self.model
    }

    /// Attach the collector to which all events of logged sessions are reported. A previously
    /// attached collector is replaced.
    pub fn attach_collector(&mut self, collector: CollectorProxy) {
        self.collector = Some(collector);
    }

    /// Detach and return the currently attached collector.
    pub fn detach_collector(&mut self) -> Option<CollectorProxy> {
        self.collector.take()
    }

    /// Start a new session for the retrieval of `content` by `receiver` at time `timestamp`.
    /// Sessions with `log` set to false (the warm-up phase of a workload) are processed normally
    /// but produce no collector events.
    pub fn start_session(
        &mut self,
        timestamp: f64,
        receiver: NodeId,
        content: ContentId,
        log: bool,
    ) -> Result<(), NetworkError> {
        if self.session.is_some() {
            return Err(NetworkError::SessionAlreadyActive);
        }
        trace!("Start session at t={}: {:?} requests {}", timestamp, receiver, content);
        self.session = Some(Session { timestamp, receiver, content, log });
        if log {
            if let Some(collector) = self.collector.as_mut() {
                collector.start_session(&self.model.view(), timestamp, receiver, content);
            }
        }
        Ok(())
    }

    /// Forward a request over the link `u -> v`. Only the corresponding event is emitted; no
    /// network state changes.
    pub fn forward_request_hop(&mut self, u: NodeId, v: NodeId) -> Result<(), NetworkError> {
        let log = self.session.as_ref().ok_or(NetworkError::NoActiveSession)?.log;
        if log {
            if let Some(collector) = self.collector.as_mut() {
                collector.request_hop(&self.model.view(), u, v);
            }
        }
        Ok(())
    }

    /// Forward a content over the link `u -> v`. Only the corresponding event is emitted; no
    /// network state changes.
    pub fn forward_content_hop(&mut self, u: NodeId, v: NodeId) -> Result<(), NetworkError> {
        let log = self.session.as_ref().ok_or(NetworkError::NoActiveSession)?.log;
        if log {
            if let Some(collector) = self.collector.as_mut() {
                collector.content_hop(&self.model.view(), u, v);
            }
        }
        Ok(())
    }

    /// Forward a request from `s` to `t`, emitting one event per hop. If no path is given, the
    /// precomputed shortest path is used.
    pub fn forward_request_path(
        &mut self,
        s: NodeId,
        t: NodeId,
        path: Option<&[NodeId]>,
    ) -> Result<(), NetworkError> {
        for (u, v) in self.resolve_path(s, t, path)? {
            self.forward_request_hop(u, v)?;
        }
        Ok(())
    }

    /// Forward a content from `s` to `t`, emitting one event per hop. If no path is given, the
    /// precomputed shortest path is used.
    pub fn forward_content_path(
        &mut self,
        s: NodeId,
        t: NodeId,
        path: Option<&[NodeId]>,
    ) -> Result<(), NetworkError> {
        for (u, v) in self.resolve_path(s, t, path)? {
            self.forward_content_hop(u, v)?;
        }
        Ok(())
    }

    fn resolve_path(
        &self,
        s: NodeId,
        t: NodeId,
        path: Option<&[NodeId]>,
    ) -> Result<Vec<(NodeId, NodeId)>, NetworkError> {
        let path = match path {
            Some(path) => path,
            None => self
                .model
                .shortest_path
                .get(&(s, t))
                .map(|p| p.as_slice())
                .ok_or(NetworkError::PathNotFound(s, t))?,
        };
        Ok(path.iter().cloned().tuple_windows().collect())
    }

    /// Try to retrieve the session's content at `node`.
    ///
    /// If the node operates a cache and the cache holds the content, the access is counted by
    /// the replacement policy, a cache hit is reported, and true is returned. Otherwise, if the
    /// node is the origin of the content, a server hit is reported and true is returned. In all
    /// other cases false is returned and nothing is reported.
    pub fn get_content(&mut self, node: NodeId) -> Result<bool, NetworkError> {
        let session = self.session.as_ref().ok_or(NetworkError::NoActiveSession)?;
        let content = session.content;
        let log = session.log;
        let cache_hit = match self.model.caches.get_mut(&node) {
            Some(cache) => cache.get(content),
            None => false,
        };
        if cache_hit {
            trace!("Cache hit for {} at {:?}", content, node);
            if log {
                if let Some(collector) = self.collector.as_mut() {
                    collector.cache_hit(&self.model.view(), node);
                }
            }
            return Ok(true);
        }
        let server_hit = self
            .model
            .topology
            .stack(node)
            .and_then(|stack| stack.contents())
            .map(|contents| contents.contains(&content))
            .unwrap_or(false);
        if server_hit {
            trace!("Server hit for {} at {:?}", content, node);
            if log {
                if let Some(collector) = self.collector.as_mut() {
                    collector.server_hit(&self.model.view(), node);
                }
            }
            return Ok(true);
        }
        Ok(false)
    }

    /// Store the session's content in the cache at `node`. The insertion follows the replacement
    /// policy of the cache; nodes without a cache are silently skipped.
    pub fn put_content(&mut self, node: NodeId) -> Result<(), NetworkError> {
        let content = self.session.as_ref().ok_or(NetworkError::NoActiveSession)?.content;
        if let Some(cache) = self.model.caches.get_mut(&node) {
            if let Some(evicted) = cache.put(content) {
                trace!("Cache at {:?} stored {} and evicted {}", node, content, evicted);
            }
        }
        Ok(())
    }

    /// Close the live session. `success` tells whether the content was delivered to the
    /// receiver; collectors exclude unsuccessful sessions from their session-derived metrics.
    pub fn end_session(&mut self, success: bool) -> Result<(), NetworkError> {
        let session = self.session.take().ok_or(NetworkError::NoActiveSession)?;
        if session.log {
            if let Some(collector) = self.collector.as_mut() {
                collector.end_session(&self.model.view(), success);
            }
        }
        Ok(())
    }

    /// Remove the link between `u` and `v`. The link attributes are preserved so that
    /// [`restore_link`](Self::restore_link) is exact. With `recompute_paths`, the shortest-path
    /// table is recomputed (and symmetrified) on the reduced topology.
    pub fn remove_link(
        &mut self,
        u: NodeId,
        v: NodeId,
        recompute_paths: bool,
    ) -> Result<(), NetworkError> {
        let link =
            self.model.topology.remove_link(u, v).ok_or(NetworkError::LinkNotFound(u, v))?;
        self.forget_link_attrs(u, v);
        self.model.removed_links.insert(link_key(u, v), link);
        debug!("Removed link {:?} -- {:?}", u, v);
        if recompute_paths {
            self.recompute_paths();
        }
        Ok(())
    }

    /// Restore a previously removed link with its original attributes.
    pub fn restore_link(
        &mut self,
        u: NodeId,
        v: NodeId,
        recompute_paths: bool,
    ) -> Result<(), NetworkError> {
        let link = self
            .model
            .removed_links
            .remove(&link_key(u, v))
            .ok_or(NetworkError::LinkNotRemoved(u, v))?;
        self.record_link_attrs(u, v, link.delay, link.kind);
        self.model.topology.insert_link(u, v, link);
        debug!("Restored link {:?} -- {:?}", u, v);
        if recompute_paths {
            self.recompute_paths();
        }
        Ok(())
    }

    /// Remove node `v` from the network: all its incident links are detached and its cache is
    /// suspended, contents included, so that [`restore_node`](Self::restore_node) is exact.
    pub fn remove_node(&mut self, v: NodeId, recompute_paths: bool) -> Result<(), NetworkError> {
        if !self.model.topology.contains_node(v) {
            return Err(NetworkError::NodeNotFound(v));
        }
        if self.model.removed_nodes.contains_key(&v) {
            return Err(NetworkError::NodeAlreadyRemoved(v));
        }
        let mut detached = Vec::new();
        for w in self.model.topology.neighbors(v) {
            if let Some(link) = self.model.topology.remove_link(v, w) {
                self.forget_link_attrs(v, w);
                detached.push((w, link));
            }
        }
        self.model.removed_nodes.insert(v, detached);
        if let Some(cache) = self.model.caches.remove(&v) {
            let size = self.model.cache_size.remove(&v).unwrap_or_else(|| cache.capacity());
            self.model.suspended_caches.insert(v, (cache, size));
        }
        debug!("Removed node {:?}", v);
        if recompute_paths {
            self.recompute_paths();
        }
        Ok(())
    }

    /// Restore a previously removed node: its links come back with their original attributes and
    /// its cache resumes with the contents it held at removal time.
    pub fn restore_node(&mut self, v: NodeId, recompute_paths: bool) -> Result<(), NetworkError> {
        let detached =
            self.model.removed_nodes.remove(&v).ok_or(NetworkError::NodeNotRemoved(v))?;
        for (w, link) in detached {
            self.record_link_attrs(v, w, link.delay, link.kind);
            self.model.topology.insert_link(v, w, link);
        }
        if let Some((cache, size)) = self.model.suspended_caches.remove(&v) {
            self.model.caches.insert(v, cache);
            self.model.cache_size.insert(v, size);
        }
        debug!("Restored node {:?}", v);
        if recompute_paths {
            self.recompute_paths();
        }
        Ok(())
    }

    /// Move the link between `u` and `v` so that it connects `x` and `y` instead, keeping its
    /// attributes.
    pub fn rewire_link(
        &mut self,
        u: NodeId,
        v: NodeId,
        x: NodeId,
        y: NodeId,
        recompute_paths: bool,
    ) -> Result<(), NetworkError> {
        if !self.model.topology.contains_node(x) {
            return Err(NetworkError::NodeNotFound(x));
        }
        if !self.model.topology.contains_node(y) {
            return Err(NetworkError::NodeNotFound(y));
        }
        let link =
            self.model.topology.remove_link(u, v).ok_or(NetworkError::LinkNotFound(u, v))?;
        self.forget_link_attrs(u, v);
        self.record_link_attrs(x, y, link.delay, link.kind);
        self.model.topology.insert_link(x, y, link);
        debug!("Rewired link {:?} -- {:?} to {:?} -- {:?}", u, v, x, y);
        if recompute_paths {
            self.recompute_paths();
        }
        Ok(())
    }

    fn forget_link_attrs(&mut self, u: NodeId, v: NodeId) {
        self.model.link_delay.remove(&(u, v));
        self.model.link_delay.remove(&(v, u));
        self.model.link_kind.remove(&(u, v));
        self.model.link_kind.remove(&(v, u));
    }

    fn record_link_attrs(&mut self, u: NodeId, v: NodeId, delay: f64, kind: LinkKind) {
        self.model.link_delay.insert((u, v), delay);
        self.model.link_delay.insert((v, u), delay);
        self.model.link_kind.insert((u, v), kind);
        self.model.link_kind.insert((v, u), kind);
    }

    fn recompute_paths(&mut self) {
        let mut paths = all_pairs_shortest_paths(&self.model.topology);
        symmetrify_paths(&mut paths);
        self.model.shortest_path = paths;
    }
}

fn link_key(u: NodeId, v: NodeId) -> (NodeId, NodeId) {
    if u <= v {
        (u, v)
    } else {
        (v, u)
    }
}
