//! # Persistence Flows
//!
//! Restarts against a [`FileRegistryStore`]: committed state survives, the
//! persisted ceiling and fee win over fresh configuration, and damaged state
//! files refuse to open.

#[cfg(test)]
mod tests {
    use registry_engine::prelude::*;
    use std::path::Path;
    use tempfile::TempDir;

    type FileService = PropertyRegistryService<RecordingFeeGateway, FileRegistryStore>;

    fn open(path: &Path, config: ServiceConfig) -> Result<FileService, ServiceError> {
        PropertyRegistryService::open(config, RecordingFeeGateway::new(), FileRegistryStore::new(path))
    }

    fn ctx(caller: &str, height: u64) -> CallContext {
        CallContext::new(Principal::new(caller).unwrap(), height)
    }

    fn request(location: &str) -> RegisterPropertyRequest {
        RegisterPropertyRequest {
            location: location.to_string(),
            description: "Ski chalet".to_string(),
            legal_hash: LegalHash::of_document(location.as_bytes()).as_bytes().to_vec(),
            total_tokens: 250,
            value: 90_000,
            currency: "BTC".to_string(),
            property_type: "mountain".to_string(),
            capacity: 12,
            amenities: String::new(),
        }
    }

    fn seed(path: &Path) {
        let service = open(path, ServiceConfig::default()).unwrap();
        service
            .set_authority_contract(&ctx("ST1DEPLOYER", 1), Principal::new("ST1AUTH").unwrap())
            .unwrap();
        service.set_registration_fee(&ctx("ST1AUTH", 2), 75).unwrap();
        service.register_property(&ctx("ST2OWNER", 3), request("Aspen")).unwrap();
        service.register_property(&ctx("ST3OWNER", 4), request("Zermatt")).unwrap();
        service
            .update_property(&ctx("ST2OWNER", 5), 0, "Vail".into(), "Moved".into())
            .unwrap();
    }

    #[test]
    fn test_restart_resumes_committed_state() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("registry.bin");
        seed(&path);

        let service = open(&path, ServiceConfig::default()).unwrap();
        assert_eq!(service.get_property_count(), 2);
        assert_eq!(service.get_authority_contract(), Some(Principal::new("ST1AUTH").unwrap()));
        assert_eq!(service.get_registration_fee(), 75);
        assert_eq!(service.get_property_id_by_location("Vail"), Some(0));
        assert_eq!(service.get_property_id_by_location("Aspen"), None);
        assert_eq!(service.get_property_update(0).unwrap().update_timestamp, 5);

        let property = service.get_property(1).unwrap();
        assert_eq!(property.legal_hash, LegalHash::of_document(b"Zermatt"));
        assert_eq!(property.property_type, PropertyType::Mountain);

        let id = service
            .register_property(&ctx("ST4OWNER", 6), request("Aspen"))
            .unwrap();
        assert_eq!(id, 2);
        assert_eq!(service.gateway().transfers()[0].amount, 75);
    }

    #[test]
    fn test_resumed_registry_keeps_persisted_limits() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("registry.bin");
        seed(&path);

        let config = ServiceConfig {
            max_properties: 2,
            registration_fee: 1,
            ..ServiceConfig::default()
        };
        let service = open(&path, config).unwrap();

        assert_eq!(service.state().max_properties(), 1000);
        assert_eq!(service.get_registration_fee(), 75);
        assert!(service
            .register_property(&ctx("ST4OWNER", 6), request("Aspen"))
            .is_ok());
    }

    #[test]
    fn test_rejected_operation_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("registry.bin");
        seed(&path);
        let before = std::fs::read(&path).unwrap();

        let service = open(&path, ServiceConfig::default()).unwrap();
        let err = service
            .register_property(&ctx("ST4OWNER", 6), request("Zermatt"))
            .unwrap_err();
        assert_eq!(err.code(), codes::PROPERTY_ALREADY_EXISTS);

        assert_eq!(std::fs::read(&path).unwrap(), before);
    }

    #[test]
    fn test_deferred_flush() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("registry.bin");
        let config = ServiceConfig {
            flush_on_commit: false,
            ..ServiceConfig::default()
        };

        let service = open(&path, config.clone()).unwrap();
        service
            .set_authority_contract(&ctx("ST1DEPLOYER", 1), Principal::new("ST1AUTH").unwrap())
            .unwrap();
        service.register_property(&ctx("ST2OWNER", 2), request("Aspen")).unwrap();
        assert!(!path.exists());

        service.flush().unwrap();
        drop(service);

        let reopened = open(&path, config).unwrap();
        assert!(reopened.verify_property(0));
    }

    #[test]
    fn test_failed_flush_requests_no_fee() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("registry.bin");
        let service = open(&path, ServiceConfig::default()).unwrap();
        service
            .set_authority_contract(&ctx("ST1DEPLOYER", 1), Principal::new("ST1AUTH").unwrap())
            .unwrap();

        // A directory where the state file should be makes the rename fail.
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        let err = service
            .register_property(&ctx("ST2OWNER", 2), request("Aspen"))
            .unwrap_err();
        assert_eq!(err.code(), codes::STORAGE_FAILED);
        assert_eq!(service.get_property_count(), 0);
        assert!(service.gateway().transfers().is_empty());
    }

    #[test]
    fn test_garbage_state_file_fails_to_open() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("registry.bin");
        std::fs::write(&path, b"definitely not bincode").unwrap();

        let err = open(&path, ServiceConfig::default()).err().unwrap();
        assert_eq!(err.code(), codes::STORAGE_FAILED);
    }

    #[test]
    fn test_inconsistent_snapshot_fails_to_open() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("registry.bin");
        seed(&path);

        let store = FileRegistryStore::new(&path);
        let mut snapshot = store.load().unwrap().unwrap();
        snapshot.properties_by_location.insert("Nowhere".into(), 1);
        snapshot.property_updates.remove(&0);
        snapshot.next_property_id = 7;
        store.save(&snapshot).unwrap();

        let err = open(&path, ServiceConfig::default()).err().unwrap();
        assert_eq!(err.code(), codes::CORRUPT_SNAPSHOT);
        match err {
            ServiceError::Snapshot(snapshot_err) => {
                assert!(snapshot_err
                    .violations
                    .iter()
                    .any(|v| matches!(v, InvariantViolation::IdCounterMismatch { .. })));
                assert!(snapshot_err
                    .violations
                    .iter()
                    .any(|v| matches!(v, InvariantViolation::DanglingLocation { .. })));
            }
            other => panic!("expected snapshot error, got {other:?}"),
        }
    }
}
