//! Adapters - port implementations and the transport surface.

pub mod http;
pub mod memory;
pub mod websocket;
