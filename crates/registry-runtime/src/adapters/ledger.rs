//! # Fee Ledger Adapter
//!
//! Settles registration fees by appending one JSON record per transfer to a
//! ledger file. The runtime has no token system; downstream tooling reconciles
//! the ledger.

use parking_lot::Mutex;
use registry_engine::domain::entities::FeeTransfer;
use registry_engine::ports::outbound::FeeTransferGateway;
use shared_types::PaymentError;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Append-only JSON-lines fee ledger.
pub struct JsonlFeeLedger {
    path: PathBuf,
    file: Mutex<File>,
}

impl JsonlFeeLedger {
    /// Opens (or creates) the ledger at `path`.
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    /// Ledger file location.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FeeTransferGateway for JsonlFeeLedger {
    fn transfer(&self, transfer: &FeeTransfer) -> Result<(), PaymentError> {
        let mut line = serde_json::to_string(transfer)
            .map_err(|e| PaymentError::Rejected(e.to_string()))?;
        line.push('\n');

        let mut file = self.file.lock();
        file.write_all(line.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| PaymentError::Unavailable(e.to_string()))?;

        debug!(
            amount = transfer.amount,
            from = %transfer.from,
            to = %transfer.to,
            "Fee transfer recorded"
        );
        Ok(())
    }
}
