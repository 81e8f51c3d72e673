//! HomeKit temperature and humidity sensor accessory application.
//!
//! This crate wires a climate sensor to a HomeKit Accessory Protocol
//! stack: it declares the accessory attribute database, implements the
//! characteristic read callbacks, and persists a small state record. The
//! protocol engine itself (pairing, session security, transports, event
//! delivery) is an external collaborator reached through the traits in
//! [`hap::server`].

pub mod accessory;
pub mod config;
pub mod error;
pub mod hap;
pub mod sensor;
pub mod store;
