//! Ports layer for the snapshot decoder.
//!
//! - Outbound (Driven) ports: the transaction wire-format decoder the core depends on

pub mod outbound;

pub use outbound::*;
