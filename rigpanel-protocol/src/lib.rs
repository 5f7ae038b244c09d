//! Status feed protocol
//!
//! This crate defines the JSON messages exchanged with the rig control
//! process over its websocket feed.
//!
//! # Protocol Overview
//!
//! ```text
//! panel ──► {"method":"status","id":"0"}
//! panel ◄── {"id":"0","result":{"mode":"FM","power":5,"frequency":144,"antenna":"V"}}
//! ```
//!
//! The panel sends one status request when the connection opens; the rig
//! process then pushes a status message whenever something changes.
//! Every field of the result record is optional.

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

pub mod messages;

pub use messages::{
    decode_status, FieldValue, ProtocolError, StatusRecord, StatusRequest, StatusResponse,
    STATUS_METHOD,
};
