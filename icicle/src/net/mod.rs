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

//! # Network state, view and controller
//!
//! This module holds the mutable network state of a running simulation and the two handles to
//! it. The [`NetworkModel`] owns the topology, the all-pairs shortest-path table, the caches and
//! the content-to-origin map. The [`NetworkView`] is a read-only projection handed to collectors
//! and workloads, and the [`NetworkController`] is the single mutating handle, driven by a
//! routing strategy one session at a time. Since the view is a shared borrow of the model and
//! the controller owns it, the type system guarantees that no collector or strategy can mutate
//! network state behind the controller's back.

use crate::cache::CacheError;
use crate::{ContentId, NodeId};

use thiserror::Error;

mod controller;
mod model;

pub use controller::{NetworkController, Session};
pub use model::{all_pairs_shortest_paths, symmetrify_paths, NetworkModel, NetworkView, PathTable};

/// Network errors
#[derive(Error, Debug, PartialEq)]
pub enum NetworkError {
    /// Error while building a node's cache
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
    /// Node is not present in the topology
    #[error("Node was not found in the topology: {0:?}")]
    NodeNotFound(NodeId),
    /// Two nodes are not adjacent
    #[error("Network link does not exist: {0:?} -> {1:?}")]
    LinkNotFound(NodeId, NodeId),
    /// No path is known between two nodes
    #[error("No path is known from {0:?} to {1:?}")]
    PathNotFound(NodeId, NodeId),
    /// A content is attached to more than one source node
    #[error("{0} is placed on more than one source node")]
    DuplicateContentSource(ContentId),
    /// No source node holds the requested content
    #[error("No source node holds {0}")]
    NoContentSource(ContentId),
    /// A session operation was issued while no session is live
    #[error("No session is currently live")]
    NoActiveSession,
    /// A second session was started before the live one ended
    #[error("A session is already live")]
    SessionAlreadyActive,
    /// The link to restore was never removed
    #[error("Cannot restore link {0:?} -> {1:?}: it was never removed")]
    LinkNotRemoved(NodeId, NodeId),
    /// The node to restore was never removed
    #[error("Cannot restore node {0:?}: it was never removed")]
    NodeNotRemoved(NodeId),
    /// The node to remove is already removed
    #[error("Node {0:?} is already removed")]
    NodeAlreadyRemoved(NodeId),
}
