//! # Recording Fee Gateway
//!
//! `FeeTransferGateway` that records transfers instead of moving funds.
//! Can be switched to reject transfers to exercise settlement failures.

use crate::domain::entities::FeeTransfer;
use crate::ports::outbound::FeeTransferGateway;
use parking_lot::Mutex;
use shared_types::PaymentError;
use std::sync::atomic::{AtomicBool, Ordering};

/// In-memory transfer log.
#[derive(Debug, Default)]
pub struct RecordingFeeGateway {
    transfers: Mutex<Vec<FeeTransfer>>,
    rejecting: AtomicBool,
}

impl RecordingFeeGateway {
    /// Creates a gateway that accepts every transfer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, transfers fail with `PaymentError::Rejected` and are not recorded.
    pub fn set_rejecting(&self, rejecting: bool) {
        self.rejecting.store(rejecting, Ordering::SeqCst);
    }

    /// Transfers accepted so far, oldest first.
    #[must_use]
    pub fn transfers(&self) -> Vec<FeeTransfer> {
        self.transfers.lock().clone()
    }
}

impl FeeTransferGateway for RecordingFeeGateway {
    fn transfer(&self, transfer: &FeeTransfer) -> Result<(), PaymentError> {
        if self.rejecting.load(Ordering::SeqCst) {
            return Err(PaymentError::Rejected(format!(
                "{} -> {} ({}) refused",
                transfer.from, transfer.to, transfer.amount
            )));
        }
        self.transfers.lock().push(transfer.clone());
        Ok(())
    }
}
