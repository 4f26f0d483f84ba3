//! Runtime-side adapters.

pub mod ledger;

pub use ledger::JsonlFeeLedger;
