//! # Property Registry Service
//!
//! Host-side wrapper around [`RegistryState`]. Serializes calls behind a
//! single lock, settles registration fees through the payment gateway,
//! and flushes every committed change to the store.
//!
//! ## Transactions
//!
//! Each mutating call runs against a draft copy of the state, in this order:
//!
//! 1. Domain operation on the draft
//! 2. Flush of the draft (when `flush_on_commit` is set)
//! 3. Fee settlement (registrations only)
//! 4. Swap of the draft into the live state
//!
//! Any failure discards the draft. The fee is only requested once the
//! change is durable; if the gateway then refuses it, the previous state is
//! flushed back.

use crate::adapters::{InMemoryRegistryStore, RecordingFeeGateway};
use crate::domain::entities::{FeeTransfer, Property, PropertyUpdate, RegisterPropertyRequest};
use crate::domain::state::RegistryState;
use crate::domain::validation::limits;
use crate::domain::value_objects::PropertyId;
use crate::errors::ServiceError;
use crate::ports::inbound::PropertyRegistryApi;
use crate::ports::outbound::{FeeTransferGateway, RegistryStore};

use parking_lot::Mutex;
use shared_types::{CallContext, Principal};
use std::str::FromStr;
use tracing::{error, info, instrument, warn};

/// How a registration treats the fee transfer it owes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeeSettlement {
    /// Commit only after the gateway confirms the transfer.
    #[default]
    Confirmed,
    /// Commit regardless; a failed transfer is logged and counted.
    FireAndForget,
}

impl FromStr for FeeSettlement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirmed" => Ok(Self::Confirmed),
            "fire-and-forget" => Ok(Self::FireAndForget),
            other => Err(format!(
                "unknown fee settlement {other:?} (expected \"confirmed\" or \"fire-and-forget\")"
            )),
        }
    }
}

/// Registry Service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Capacity ceiling for a fresh registry.
    pub max_properties: u64,
    /// Registration fee for a fresh registry.
    pub registration_fee: u64,
    /// Fee settlement policy.
    pub fee_settlement: FeeSettlement,
    /// Save state to the store after every committed change.
    pub flush_on_commit: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_properties: limits::DEFAULT_MAX_PROPERTIES,
            registration_fee: limits::DEFAULT_REGISTRATION_FEE,
            fee_settlement: FeeSettlement::Confirmed,
            flush_on_commit: true,
        }
    }
}

impl ServiceConfig {
    /// Rejects configurations the registry cannot operate with.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_properties == 0 {
            return Err("max_properties must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Statistics for the Registry Service.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    /// Committed registrations.
    pub registrations: u64,
    /// Committed updates.
    pub updates: u64,
    /// Operations rejected for any reason.
    pub rejected_operations: u64,
    /// Fee transfers the gateway did not confirm.
    pub failed_fee_transfers: u64,
}

/// The main Registry Service.
pub struct PropertyRegistryService<G: FeeTransferGateway, S: RegistryStore> {
    config: ServiceConfig,
    state: Mutex<RegistryState>,
    gateway: G,
    store: S,
    stats: Mutex<ServiceStats>,
}

impl<G: FeeTransferGateway, S: RegistryStore> PropertyRegistryService<G, S> {
    /// Opens the service, resuming from the store's snapshot if it has one.
    ///
    /// A resumed registry keeps its persisted ceiling and fee; `config`
    /// values only seed a fresh registry.
    pub fn open(config: ServiceConfig, gateway: G, store: S) -> Result<Self, ServiceError> {
        let state = match store.load()? {
            Some(snapshot) => {
                let state = RegistryState::from_snapshot(snapshot)?;
                info!(
                    properties = state.property_count(),
                    authority = ?state.authority_contract(),
                    "Resumed registry from store"
                );
                state
            }
            None => {
                info!(
                    max_properties = config.max_properties,
                    registration_fee = config.registration_fee,
                    "Starting empty registry"
                );
                RegistryState::new(config.max_properties, config.registration_fee)
            }
        };
        Ok(Self {
            config,
            state: Mutex::new(state),
            gateway,
            store,
            stats: Mutex::new(ServiceStats::default()),
        })
    }

    /// Get current service statistics.
    pub fn stats(&self) -> ServiceStats {
        self.stats.lock().clone()
    }

    /// Service configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Payment gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// State store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Copy of the current state.
    pub fn state(&self) -> RegistryState {
        self.state.lock().clone()
    }

    /// Saves the current state regardless of `flush_on_commit`.
    pub fn flush(&self) -> Result<(), ServiceError> {
        let snapshot = self.state.lock().to_snapshot();
        self.store.save(&snapshot)?;
        Ok(())
    }

    /// Runs `op` on a draft of the state and swaps the draft in only if
    /// `op` and the flush both succeed.
    fn transact<T>(
        &self,
        op: impl FnOnce(&mut RegistryState) -> Result<T, ServiceError>,
    ) -> Result<T, ServiceError> {
        self.transact_then(op, |_| Ok(()))
    }

    /// Like [`Self::transact`], with `settle` run after the draft is flushed
    /// and before it is swapped in.
    ///
    /// A failed `settle` writes the previous state back to the store.
    fn transact_then<T>(
        &self,
        op: impl FnOnce(&mut RegistryState) -> Result<T, ServiceError>,
        settle: impl FnOnce(&T) -> Result<(), ServiceError>,
    ) -> Result<T, ServiceError> {
        let mut live = self.state.lock();
        let mut draft = live.clone();

        let outcome = op(&mut draft)
            .and_then(|value| {
                if self.config.flush_on_commit {
                    self.store.save(&draft.to_snapshot()).map_err(|e| {
                        error!(error = %e, "Failed to flush registry state, discarding change");
                        ServiceError::from(e)
                    })?;
                }
                Ok(value)
            })
            .and_then(|value| match settle(&value) {
                Ok(()) => Ok(value),
                Err(err) => {
                    if self.config.flush_on_commit {
                        self.store.save(&live.to_snapshot()).map_err(|e| {
                            error!(error = %e, "Failed to restore registry state after settlement failure");
                            ServiceError::from(e)
                        })?;
                    }
                    Err(err)
                }
            });

        match outcome {
            Ok(value) => {
                *live = draft;
                Ok(value)
            }
            Err(err) => {
                self.stats.lock().rejected_operations += 1;
                Err(err)
            }
        }
    }

    fn settle_fee(&self, transfer: &FeeTransfer) -> Result<(), ServiceError> {
        match self.gateway.transfer(transfer) {
            Ok(()) => Ok(()),
            Err(err) => {
                self.stats.lock().failed_fee_transfers += 1;
                match self.config.fee_settlement {
                    FeeSettlement::Confirmed => {
                        warn!(
                            error = %err,
                            from = %transfer.from,
                            amount = transfer.amount,
                            "Fee transfer not confirmed, registration aborted"
                        );
                        Err(err.into())
                    }
                    FeeSettlement::FireAndForget => {
                        warn!(
                            error = %err,
                            from = %transfer.from,
                            amount = transfer.amount,
                            "Fee transfer failed, registration committed anyway"
                        );
                        Ok(())
                    }
                }
            }
        }
    }
}

/// Create a service with in-memory adapters (for testing).
#[must_use]
pub fn create_test_service() -> PropertyRegistryService<RecordingFeeGateway, InMemoryRegistryStore>
{
    let config = ServiceConfig::default();
    PropertyRegistryService {
        state: Mutex::new(RegistryState::new(
            config.max_properties,
            config.registration_fee,
        )),
        config,
        gateway: RecordingFeeGateway::new(),
        store: InMemoryRegistryStore::new(),
        stats: Mutex::new(ServiceStats::default()),
    }
}

// =============================================================================
// PropertyRegistryApi Implementation
// =============================================================================

impl<G: FeeTransferGateway, S: RegistryStore> PropertyRegistryApi
    for PropertyRegistryService<G, S>
{
    #[instrument(skip(self, ctx), fields(caller = %ctx.caller, height = ctx.height))]
    fn set_authority_contract(
        &self,
        ctx: &CallContext,
        authority: Principal,
    ) -> Result<(), ServiceError> {
        let result = self.transact(|state| {
            state
                .set_authority_contract(authority.clone())
                .map_err(ServiceError::from)
        });
        match &result {
            Ok(()) => info!(%authority, "Authority contract configured"),
            Err(err) => warn!(error = %err, code = err.code(), "Authority change rejected"),
        }
        result
    }

    #[instrument(skip(self, ctx), fields(caller = %ctx.caller, height = ctx.height))]
    fn set_registration_fee(&self, ctx: &CallContext, amount: u64) -> Result<(), ServiceError> {
        let result = self.transact(|state| {
            state
                .set_registration_fee(&ctx.caller, amount)
                .map_err(ServiceError::from)
        });
        match &result {
            Ok(()) => info!(amount, "Registration fee changed"),
            Err(err) => warn!(error = %err, code = err.code(), "Fee change rejected"),
        }
        result
    }

    #[instrument(
        skip(self, ctx, request),
        fields(caller = %ctx.caller, height = ctx.height, location = %request.location)
    )]
    fn register_property(
        &self,
        ctx: &CallContext,
        request: RegisterPropertyRequest,
    ) -> Result<PropertyId, ServiceError> {
        let result = self.transact_then(
            |state| {
                let pending = state.prepare_registration(ctx, &request)?;
                Ok(state.commit_registration(pending)?)
            },
            |registration| self.settle_fee(&registration.fee_transfer),
        );
        match &result {
            Ok(registration) => {
                self.stats.lock().registrations += 1;
                info!(
                    property_id = registration.id,
                    fee = registration.fee_transfer.amount,
                    authority = %registration.fee_transfer.to,
                    "Property registered"
                );
            }
            Err(err) => warn!(error = %err, code = err.code(), "Registration rejected"),
        }
        result.map(|registration| registration.id)
    }

    #[instrument(skip(self, ctx), fields(caller = %ctx.caller, height = ctx.height))]
    fn update_property(
        &self,
        ctx: &CallContext,
        id: PropertyId,
        new_location: String,
        new_description: String,
    ) -> Result<(), ServiceError> {
        let result = self.transact(|state| {
            state
                .update_property(ctx, id, new_location.clone(), new_description.clone())
                .map_err(ServiceError::from)
        });
        match &result {
            Ok(()) => {
                self.stats.lock().updates += 1;
                info!(property_id = id, location = %new_location, "Property updated");
            }
            Err(err) => warn!(property_id = id, error = %err, code = err.code(), "Update rejected"),
        }
        result
    }

    fn get_property(&self, id: PropertyId) -> Option<Property> {
        self.state.lock().get_property(id).cloned()
    }

    fn get_property_update(&self, id: PropertyId) -> Option<PropertyUpdate> {
        self.state.lock().get_property_update(id).cloned()
    }

    fn get_property_count(&self) -> u64 {
        self.state.lock().property_count()
    }

    fn verify_property(&self, id: PropertyId) -> bool {
        self.state.lock().verify_property(id)
    }

    fn get_registration_fee(&self) -> u64 {
        self.state.lock().registration_fee()
    }

    fn get_authority_contract(&self) -> Option<Principal> {
        self.state.lock().authority_contract().cloned()
    }

    fn get_property_id_by_location(&self, location: &str) -> Option<PropertyId> {
        self.state.lock().property_id_by_location(location)
    }
}

// =============================================================================
// TESTS
// =============================================================================
