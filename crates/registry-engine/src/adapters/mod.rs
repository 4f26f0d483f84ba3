//! # Adapters Layer (Outer Hexagon)
//!
//! Implementations of the outbound ports.
//!
//! - `InMemoryRegistryStore` / `FileRegistryStore` implement `RegistryStore`
//! - `RecordingFeeGateway` implements `FeeTransferGateway`

pub mod fee_gateway;
pub mod file_store;
pub mod memory_store;

pub use fee_gateway::*;
pub use file_store::*;
pub use memory_store::*;
