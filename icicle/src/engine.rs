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

//! # Engine
//!
//! The top-level simulation loop: it binds a workload, a strategy, the network controller and
//! the collectors into one closed cycle. For every `(timestamp, event)` pair the workload
//! yields, the engine starts a session, hands control to the strategy, and closes the session
//! with the strategy's outcome. Collectors observe passively through the attached proxy.

use crate::collectors::{CollectorProxy, DataCollector, ResultSet};
use crate::net::{NetworkController, NetworkError, NetworkModel};
use crate::strategies::Strategy;
use crate::workload::Workload;
use crate::Error;

use log::*;

/// Run one experiment to completion and return the collected results.
///
/// Before the first session, every content the workload can request is checked to have an
/// origin; a missing origin is a configuration error. A strategy returning `Ok(false)` marks the
/// session as failed but the run continues; a strategy returning an error aborts the run.
pub fn exec_experiment<W, S>(
    model: NetworkModel,
    workload: W,
    strategy: &mut S,
    collectors: Vec<Box<dyn DataCollector>>,
) -> Result<ResultSet, Error>
where
    W: Workload,
    S: Strategy + ?Sized,
{
    for &content in workload.contents() {
        if model.view().content_source(content).is_none() {
            return Err(NetworkError::NoContentSource(content).into());
        }
    }

    let mut ctrl = NetworkController::new(model);
    ctrl.attach_collector(CollectorProxy::new(collectors));

    let mut sessions = 0u64;
    let mut failures = 0u64;
    for (timestamp, event) in workload {
        ctrl.start_session(timestamp, event.receiver, event.content, event.log)?;
        let success =
            strategy.process_event(&mut ctrl, timestamp, event.receiver, event.content, event.log)?;
        ctrl.end_session(success)?;
        sessions += 1;
        if !success {
            failures += 1;
        }
    }
    info!("Executed {} sessions ({} failed)", sessions, failures);

    let results = match ctrl.detach_collector() {
        Some(proxy) => proxy.results(&ctrl.view()),
        None => ResultSet::new(),
    };
    Ok(results)
}
