//! # Runtime Sessions
//!
//! Drives the JSON-lines command loop against the same adapters the runtime
//! binary wires up: a [`FileRegistryStore`] and a [`JsonlFeeLedger`] inside a
//! data directory configured through `PR_*` variables.
//!
//! [`FileRegistryStore`]: registry_engine::adapters::FileRegistryStore
//! [`JsonlFeeLedger`]: registry_runtime::adapters::JsonlFeeLedger

#[cfg(test)]
mod tests {
    use registry_engine::prelude::*;
    use registry_runtime::adapters::JsonlFeeLedger;
    use registry_runtime::{run, RuntimeConfig};
    use serde_json::{json, Value};
    use std::path::Path;
    use tempfile::TempDir;

    fn config_for(dir: &Path) -> RuntimeConfig {
        let dir = dir.to_string_lossy().into_owned();
        RuntimeConfig::from_lookup(move |key| match key {
            "PR_DATA_DIR" => Some(dir.clone()),
            "PR_REGISTRATION_FEE" => Some("300".to_string()),
            _ => None,
        })
        .unwrap()
    }

    /// Runs one session over `lines` and returns the parsed responses.
    fn session(config: &RuntimeConfig, lines: &[Value]) -> Vec<Value> {
        let ledger = JsonlFeeLedger::open(config.storage.ledger_path()).unwrap();
        let store = FileRegistryStore::new(config.storage.state_path());
        let service = PropertyRegistryService::open(config.service.clone(), ledger, store).unwrap();

        let input: String = lines.iter().map(|l| format!("{l}\n")).collect();
        let mut output = Vec::new();
        run(&service, input.as_bytes(), &mut output).unwrap();

        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    fn register(caller: &str, location: &str, height: u64) -> Value {
        json!({
            "op": "register",
            "caller": caller,
            "height": height,
            "location": location,
            "description": "Loft",
            "legal_hash": format!("0x{}", "ab".repeat(32)),
            "total_tokens": 10,
            "value": 42,
            "currency": "STX",
            "property_type": "urban",
            "capacity": 2,
        })
    }

    #[test]
    fn test_two_sessions_share_state_and_ledger() {
        let dir = TempDir::new().unwrap();
        let config = config_for(dir.path());

        let first = session(
            &config,
            &[
                json!({"op": "set_authority", "caller": "ST1DEPLOYER", "height": 1, "authority": "ST1AUTH"}),
                register("ST2OWNER", "Downtown 1", 2),
                register("ST3OWNER", "Downtown 1", 3),
                register("ST3OWNER", "Downtown 2", 4),
            ],
        );
        assert_eq!(first[0], json!({"ok": true, "value": true}));
        assert_eq!(first[1], json!({"ok": true, "value": 0}));
        assert_eq!(first[2]["code"], codes::PROPERTY_ALREADY_EXISTS);
        assert_eq!(first[3], json!({"ok": true, "value": 1}));

        let second = session(
            &config,
            &[
                json!({"op": "count"}),
                json!({"op": "set_authority", "caller": "ST9", "height": 5, "authority": "ST9"}),
                json!({"op": "update", "caller": "ST2OWNER", "height": 6, "id": 0, "location": "Uptown", "description": "Loft"}),
                json!({"op": "get", "id": 0}),
                register("ST4OWNER", "Downtown 1", 7),
                json!({"op": "get_fee"}),
                json!({"op": "get_authority"}),
                json!({"op": "get_id_by_location", "location": "Downtown 2"}),
            ],
        );
        assert_eq!(second[0], json!({"ok": true, "value": 2}));
        assert_eq!(second[1]["code"], codes::ALREADY_CONFIGURED);
        assert_eq!(second[2], json!({"ok": true, "value": true}));
        assert_eq!(second[3]["value"]["location"], "Uptown");
        assert_eq!(second[3]["value"]["timestamp"], 6);
        assert_eq!(second[3]["value"]["legal_hash"], "ab".repeat(32));
        assert_eq!(second[4], json!({"ok": true, "value": 2}));
        assert_eq!(second[5], json!({"ok": true, "value": 300}));
        assert_eq!(second[6], json!({"ok": true, "value": "ST1AUTH"}));
        assert_eq!(second[7], json!({"ok": true, "value": 1}));

        let ledger = std::fs::read_to_string(config.storage.ledger_path()).unwrap();
        let transfers: Vec<Value> = ledger
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(transfers.len(), 3);
        assert_eq!(
            transfers[0],
            json!({"amount": 300, "from": "ST2OWNER", "to": "ST1AUTH"})
        );
    }
}
