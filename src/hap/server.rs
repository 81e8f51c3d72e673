//! Interface to the external accessory server.
//!
//! The server owns pairing, transports, session security and event
//! delivery. This module models the two seams the application touches: the
//! request contexts the server hands to characteristic callbacks, and the
//! event-raising half the callbacks notify when a value changes.

use crate::hap::characteristic::DataReadHandler;
use log::{debug, info};
use std::sync::Arc;

/// Lifecycle states reported by the accessory server.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ServerState {
    Idle,
    Running,
    Stopping,
}

/// Event-raising half of the accessory server.
///
/// Raising an event marks the characteristic's value as changed so the
/// server pushes a notification to every subscribed controller.
pub trait EventRaiser: Send + Sync {
    fn raise_event(&self, aid: u64, service_iid: u64, characteristic_iid: u64);
}

/// A read request for a specific characteristic, as dispatched by the
/// accessory server.
pub struct ReadContext<'a> {
    pub aid: u64,
    pub service_iid: u64,
    pub characteristic_iid: u64,
    server: &'a dyn EventRaiser,
}

impl<'a> ReadContext<'a> {
    pub fn new(
        aid: u64,
        service_iid: u64,
        characteristic_iid: u64,
        server: &'a dyn EventRaiser,
    ) -> Self {
        Self {
            aid,
            service_iid,
            characteristic_iid,
            server,
        }
    }

    /// Notify the server that this characteristic's value changed.
    pub fn raise_event(&self) {
        self.server
            .raise_event(self.aid, self.service_iid, self.characteristic_iid);
    }
}

/// A write request for a specific characteristic.
pub struct WriteContext<'a> {
    pub aid: u64,
    pub service_iid: u64,
    pub characteristic_iid: u64,
    server: &'a dyn EventRaiser,
}

impl<'a> WriteContext<'a> {
    pub fn new(
        aid: u64,
        service_iid: u64,
        characteristic_iid: u64,
        server: &'a dyn EventRaiser,
    ) -> Self {
        Self {
            aid,
            service_iid,
            characteristic_iid,
            server,
        }
    }

    /// Notify the server that this characteristic's value changed.
    pub fn raise_event(&self) {
        self.server
            .raise_event(self.aid, self.service_iid, self.characteristic_iid);
    }
}

/// An identify request targeting the accessory.
#[derive(Clone, Copy, Debug)]
pub struct IdentifyRequest {
    pub aid: u64,
}

/// Generic read handler for `Service Signature` characteristics.
///
/// The signature body is assembled by the server from its own attribute
/// database; the accessory side exposes an empty payload.
pub fn service_signature_read() -> DataReadHandler {
    Arc::new(|_ctx| Ok(Vec::new()))
}

/// Log each server lifecycle transition.
pub fn handle_server_state_update(state: ServerState) {
    match state {
        ServerState::Idle => info!("accessory server state did update: idle"),
        ServerState::Running => info!("accessory server state did update: running"),
        ServerState::Stopping => info!("accessory server state did update: stopping"),
    }
}

/// Stand-in server half that logs raised events.
///
/// Used by the binary's sampling loop; a real HAP engine supplies its own
/// implementation.
pub struct LogEventRaiser;

impl EventRaiser for LogEventRaiser {
    fn raise_event(&self, aid: u64, service_iid: u64, characteristic_iid: u64) {
        debug!(
            "event raised for accessory {aid}, service {service_iid:#06x}, characteristic {characteristic_iid:#06x}"
        );
    }
}
