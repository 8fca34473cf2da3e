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

//! Leave-copy-everywhere strategy

use super::Strategy;
use crate::net::{NetworkController, NetworkError};
use crate::{ContentId, Error, NodeId};

use itertools::Itertools;
use log::*;

/// # Leave Copy Everywhere (LCE)
///
/// The canonical caching strategy: the request walks the shortest path towards the content's
/// origin and stops at the first node holding a copy; the content then travels the same path in
/// reverse, and every cache it passes stores a copy.
#[derive(Debug, Clone, Default)]
pub struct LeaveCopyEverywhere;

impl Strategy for LeaveCopyEverywhere {
    fn process_event(
        &mut self,
        ctrl: &mut NetworkController,
        _timestamp: f64,
        receiver: NodeId,
        content: ContentId,
        _log: bool,
    ) -> Result<bool, Error> {
        let source = ctrl
            .view()
            .content_source(content)
            .ok_or(NetworkError::NoContentSource(content))?;
        let path: Vec<NodeId> = ctrl
            .view()
            .shortest_path(receiver, source)
            .ok_or(NetworkError::PathNotFound(receiver, source))?
            .to_vec();

        // walk towards the origin until some node can serve the content
        let mut serving_node = None;
        for (u, v) in path.iter().cloned().tuple_windows() {
            ctrl.forward_request_hop(u, v)?;
            if ctrl.get_content(v)? {
                serving_node = Some(v);
                break;
            }
        }
        let serving_node = match serving_node {
            Some(node) => node,
            None => {
                warn!("Neither a cache nor the origin could serve {}", content);
                return Ok(false);
            }
        };

        // deliver the content back over the same links, leaving a copy at every cache
        let pos = path.iter().position(|&n| n == serving_node).unwrap_or(path.len() - 1);
        for (u, v) in path[..=pos].iter().rev().cloned().tuple_windows() {
            ctrl.forward_content_hop(u, v)?;
            ctrl.put_content(v)?;
        }
        Ok(true)
    }
}
