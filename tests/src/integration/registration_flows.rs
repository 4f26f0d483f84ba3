//! # Registration Flows
//!
//! Registry behaviour observed through [`PropertyRegistryService`] with the
//! in-memory store and the recording fee gateway:
//!
//! 1. **Authority bootstrap**: write-once authority, fee changes gated on it
//! 2. **Registration**: ids, fee transfers, uniqueness, capacity ceiling
//! 3. **Updates**: ownership gate, self-rename, index maintenance
//! 4. **Host guarantees**: rejected payments, concurrent callers

#[cfg(test)]
mod tests {
    use registry_engine::prelude::*;
    use std::sync::Arc;
    use std::thread;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    type TestService = PropertyRegistryService<RecordingFeeGateway, InMemoryRegistryStore>;

    const AUTHORITY: &str = "A";
    const OWNER: &str = "ST2OWNER";

    fn service_with_capacity(max_properties: u64) -> TestService {
        let config = ServiceConfig {
            max_properties,
            ..ServiceConfig::default()
        };
        PropertyRegistryService::open(
            config,
            RecordingFeeGateway::new(),
            InMemoryRegistryStore::new(),
        )
        .unwrap()
    }

    fn ctx(caller: &str, height: u64) -> CallContext {
        CallContext::new(Principal::new(caller).unwrap(), height)
    }

    fn request(location: &str) -> RegisterPropertyRequest {
        RegisterPropertyRequest {
            location: location.to_string(),
            description: "Beachfront villa".to_string(),
            legal_hash: vec![7u8; 32],
            total_tokens: 1000,
            value: 500_000,
            currency: "USD".to_string(),
            property_type: "beach".to_string(),
            capacity: 8,
            amenities: "Pool".to_string(),
        }
    }

    fn authorized_service(max_properties: u64) -> TestService {
        let service = service_with_capacity(max_properties);
        service
            .set_authority_contract(&ctx("ST1DEPLOYER", 1), Principal::new(AUTHORITY).unwrap())
            .unwrap();
        service
    }

    fn registry_error(err: &ServiceError) -> RegistryError {
        err.as_registry().cloned().unwrap()
    }

    fn assert_invariants(service: &TestService) {
        let result = check_all_invariants(&service.state());
        assert!(result.is_valid(), "invariants violated: {result:?}");
    }

    // =============================================================================
    // AUTHORITY BOOTSTRAP
    // =============================================================================

    #[test]
    fn test_authority_is_write_once() {
        let service = authorized_service(1000);

        for candidate in ["A", "B", "ST1DEPLOYER"] {
            let err = service
                .set_authority_contract(&ctx("ST9ANY", 2), Principal::new(candidate).unwrap())
                .unwrap_err();
            assert_eq!(registry_error(&err), RegistryError::AlreadyConfigured);
        }
        assert_eq!(service.get_authority_contract(), Some(Principal::new(AUTHORITY).unwrap()));
    }

    #[test]
    fn test_registration_fee_gated_on_authority() {
        let service = service_with_capacity(1000);
        let err = service
            .set_registration_fee(&ctx(AUTHORITY, 1), 50)
            .unwrap_err();
        assert_eq!(registry_error(&err), RegistryError::NotAuthorized);

        service
            .set_authority_contract(&ctx("ST1DEPLOYER", 2), Principal::new(AUTHORITY).unwrap())
            .unwrap();
        service.set_registration_fee(&ctx(AUTHORITY, 3), 50).unwrap();
        assert_eq!(service.get_registration_fee(), 50);

        service
            .register_property(&ctx(OWNER, 4), request("L1"))
            .unwrap();
        assert_eq!(service.gateway().transfers()[0].amount, 50);
    }

    // =============================================================================
    // REGISTRATION
    // =============================================================================

    #[test]
    fn test_register_scenario_records_fee_and_rejects_duplicate() {
        let service = authorized_service(1000);

        let id = service
            .register_property(&ctx(OWNER, 10), request("L1"))
            .unwrap();
        assert_eq!(id, 0);

        assert_eq!(
            service.gateway().transfers(),
            vec![FeeTransfer {
                amount: 1000,
                from: Principal::new(OWNER).unwrap(),
                to: Principal::new(AUTHORITY).unwrap(),
            }]
        );

        let property = service.get_property(0).unwrap();
        assert_eq!(property.owner, Principal::new(OWNER).unwrap());
        assert_eq!(property.timestamp, 10);
        assert!(property.status);
        assert_eq!(property.currency, Currency::Usd);
        assert_eq!(property.property_type, PropertyType::Beach);
        assert_eq!(property.capacity, 8);

        let before = service.state().to_snapshot();
        let err = service
            .register_property(&ctx("ST3OTHER", 11), request("L1"))
            .unwrap_err();
        assert_eq!(
            registry_error(&err),
            RegistryError::PropertyAlreadyExists("L1".to_string())
        );
        assert_eq!(service.state().to_snapshot(), before);
        assert_eq!(service.gateway().transfers().len(), 1);
    }

    #[test]
    fn test_registration_before_authority_fails() {
        let service = service_with_capacity(1000);
        let err = service
            .register_property(&ctx(OWNER, 1), request("L1"))
            .unwrap_err();

        assert_eq!(registry_error(&err), RegistryError::AuthorityNotVerified);
        assert_eq!(service.get_property_count(), 0);
        assert!(service.gateway().transfers().is_empty());
    }

    #[test]
    fn test_legal_hash_length_boundary() {
        let service = authorized_service(1000);

        for len in [0, 31, 33] {
            let mut req = request("L1");
            req.legal_hash = vec![1u8; len];
            let err = service.register_property(&ctx(OWNER, 1), req).unwrap_err();
            assert_eq!(registry_error(&err), RegistryError::InvalidLegalHash(len));
        }

        let id = service.register_property(&ctx(OWNER, 1), request("L1")).unwrap();
        assert!(service.verify_property(id));
    }

    #[test]
    fn test_ids_are_sequential() {
        let service = authorized_service(1000);

        let ids: Vec<_> = (0..5)
            .map(|i| {
                service
                    .register_property(&ctx(OWNER, i), request(&format!("Lot {i}")))
                    .unwrap()
            })
            .collect();

        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
        assert_eq!(service.get_property_count(), 5);
        assert!(!service.verify_property(5));
        assert_eq!(service.get_property_id_by_location("Lot 3"), Some(3));
        assert_eq!(service.stats().registrations, 5);
    }

    #[test]
    fn test_capacity_ceiling_precedes_field_checks() {
        let service = authorized_service(3);
        for i in 0..3 {
            service
                .register_property(&ctx(OWNER, 1), request(&format!("L{i}")))
                .unwrap();
        }

        let err = service
            .register_property(&ctx(OWNER, 2), request("L-new"))
            .unwrap_err();
        assert_eq!(registry_error(&err), RegistryError::CapacityExceeded { max: 3 });

        let mut invalid = request("");
        invalid.legal_hash.clear();
        let err = service.register_property(&ctx(OWNER, 2), invalid).unwrap_err();
        assert_eq!(registry_error(&err), RegistryError::CapacityExceeded { max: 3 });

        assert_eq!(service.get_property_count(), 3);
        assert_invariants(&service);
    }

    // =============================================================================
    // UPDATES
    // =============================================================================

    #[test]
    fn test_ownership_gate() {
        let service = authorized_service(1000);
        let id = service.register_property(&ctx(OWNER, 1), request("L1")).unwrap();
        let before = service.state().to_snapshot();

        for intruder in [AUTHORITY, "ST1DEPLOYER", "ST3OTHER"] {
            let err = service
                .update_property(&ctx(intruder, 5), id, "L2".into(), "Taken over".into())
                .unwrap_err();
            assert_eq!(registry_error(&err), RegistryError::NotAuthorized);
        }

        assert_eq!(service.state().to_snapshot(), before);
        assert_eq!(service.get_property_id_by_location("L1"), Some(id));
        assert!(service.get_property_update(id).is_none());
    }

    #[test]
    fn test_update_unknown_property() {
        let service = authorized_service(1000);
        let err = service
            .update_property(&ctx(OWNER, 1), 0, "L1".into(), "D".into())
            .unwrap_err();
        assert_eq!(registry_error(&err), RegistryError::PropertyNotFound(0));
    }

    #[test]
    fn test_self_rename_allowed() {
        let service = authorized_service(1000);
        let id = service.register_property(&ctx(OWNER, 1), request("L1")).unwrap();

        service
            .update_property(&ctx(OWNER, 9), id, "L1".into(), "Renovated".into())
            .unwrap();

        let property = service.get_property(id).unwrap();
        assert_eq!(property.location, "L1");
        assert_eq!(property.description, "Renovated");
        assert_eq!(property.timestamp, 9);
        assert_eq!(service.get_property_id_by_location("L1"), Some(id));
        assert_invariants(&service);
    }

    #[test]
    fn test_relocation_moves_index_and_records_update() {
        let service = authorized_service(1000);
        let first = service.register_property(&ctx(OWNER, 1), request("L1")).unwrap();
        let second = service
            .register_property(&ctx("ST3OTHER", 2), request("L2"))
            .unwrap();

        let err = service
            .update_property(&ctx(OWNER, 3), first, "L2".into(), "Clash".into())
            .unwrap_err();
        assert_eq!(
            registry_error(&err),
            RegistryError::PropertyAlreadyExists("L2".to_string())
        );

        service
            .update_property(&ctx(OWNER, 4), first, "L3".into(), "Moved".into())
            .unwrap();
        assert_eq!(service.get_property_id_by_location("L1"), None);
        assert_eq!(service.get_property_id_by_location("L3"), Some(first));
        assert_eq!(service.get_property_id_by_location("L2"), Some(second));

        let update = service.get_property_update(first).unwrap();
        assert_eq!(update.update_location, "L3");
        assert_eq!(update.update_description, "Moved");
        assert_eq!(update.update_timestamp, 4);
        assert_eq!(update.updater, Principal::new(OWNER).unwrap());

        // The vacated location is free again.
        let third = service
            .register_property(&ctx("ST4NEW", 5), request("L1"))
            .unwrap();
        assert_eq!(third, 2);
        assert_invariants(&service);
    }

    // =============================================================================
    // HOST GUARANTEES
    // =============================================================================

    #[test]
    fn test_rejected_fee_transfer_aborts_registration() {
        let service = authorized_service(1000);
        service.gateway().set_rejecting(true);

        let err = service
            .register_property(&ctx(OWNER, 1), request("L1"))
            .unwrap_err();
        assert_eq!(err.code(), codes::PAYMENT_FAILED);
        assert_eq!(service.get_property_count(), 0);
        assert_eq!(service.get_property_id_by_location("L1"), None);

        service.gateway().set_rejecting(false);
        assert_eq!(
            service.register_property(&ctx(OWNER, 2), request("L1")).unwrap(),
            0
        );
    }

    #[test]
    fn test_concurrent_callers_are_serialized() {
        let service = Arc::new(authorized_service(1000));

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let service = Arc::clone(&service);
                thread::spawn(move || {
                    (0..10)
                        .map(|i| {
                            service
                                .register_property(
                                    &ctx(&format!("ST{t}"), i),
                                    request(&format!("T{t}-L{i}")),
                                )
                                .unwrap()
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        ids.sort_unstable();

        assert_eq!(ids, (0..80).collect::<Vec<_>>());
        assert_eq!(service.get_property_count(), 80);
        assert_eq!(service.gateway().transfers().len(), 80);
        assert_invariants(&service);
    }
}
