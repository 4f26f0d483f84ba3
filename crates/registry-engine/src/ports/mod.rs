//! # Ports Layer (Middle Hexagon)
//!
//! Trait definitions for the property registry.
//! These are the interfaces between the domain and the outside world.
//!
//! - **Driving Port (Inbound)**: `PropertyRegistryApi`
//! - **Driven Ports (Outbound)**: `FeeTransferGateway`, `RegistryStore`
//! - No concrete implementations in this module

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
