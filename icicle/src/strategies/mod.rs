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

//! # Strategies
//!
//! A strategy decides how a single content request travels through the network: where the
//! request is forwarded, which caches are consulted, and which caches store a copy of the
//! content on its way back. Strategies act exclusively through the
//! [`NetworkController`](crate::net::NetworkController); all per-session state lives in the
//! controller, so a strategy must behave as a pure function of the current network state.
//!
//! The engine calls [`process_event`](Strategy::process_event) once per session, between
//! `start_session` and `end_session`. The returned boolean tells whether the content was
//! delivered to the receiver; returning an error aborts the whole run.

mod lce;
pub use lce::LeaveCopyEverywhere;

use crate::net::NetworkController;
use crate::{ContentId, Error, NodeId};

/// Interface for all routing and caching strategies.
pub trait Strategy {
    /// Serve one content request. Forward the request and the content through the controller and
    /// return whether the delivery succeeded.
    fn process_event(
        &mut self,
        ctrl: &mut NetworkController,
        timestamp: f64,
        receiver: NodeId,
        content: ContentId,
        log: bool,
    ) -> Result<bool, Error>;
}
