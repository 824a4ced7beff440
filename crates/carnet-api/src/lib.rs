//! Library surface of carnet-api.
//!
//! The binary in `main.rs` wires these modules into the full server;
//! integration tests mount them individually.

pub mod viewer;
