//! # Persistence Flows
//!
//! File-backed preferences under the router: legacy migration on first
//! open, durability across restarts, and concurrent writers.

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;
    use std::sync::Arc;

    use ab_01_trusted_senders::{
        FilePreferenceStore, PreferenceStore, TrustedSenderApi, TrustedSenderPolicy,
        CURRENT_STORAGE_VERSION, KEY_STORAGE_VERSION,
    };
    use ab_02_command_engine::{CommandEngine, ExecutionResult, ManualScheduler, MockAudioControl};
    use ab_03_inbound_router::{CommandAuditStore, InboundMessage, InboundRouter, InboundRouterApi};

    fn policy_at(path: &Path) -> TrustedSenderPolicy<FilePreferenceStore> {
        TrustedSenderPolicy::open(Arc::new(FilePreferenceStore::open(path).unwrap())).unwrap()
    }

    fn write_legacy(path: &Path, senders: &[&str]) {
        let legacy = serde_json::json!({
            "entries": {
                "senders": { "string_set": senders }
            }
        });
        fs::write(path, serde_json::to_vec_pretty(&legacy).unwrap()).unwrap();
    }

    #[test]
    fn test_legacy_entries_migrated_on_first_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trusted_senders.json");
        write_legacy(
            &path,
            &["+1 (555) 123-4567", "15551234567", " 15551234567 ", "", "n/a"],
        );

        let policy = policy_at(&path);
        let listed: Vec<String> = policy
            .trusted_senders()
            .unwrap()
            .into_iter()
            .map(|n| n.into_inner())
            .collect();
        assert_eq!(listed, vec!["+15551234567", "15551234567"]);

        let store = FilePreferenceStore::open(&path).unwrap();
        assert_eq!(
            store.snapshot().unwrap().get_int(KEY_STORAGE_VERSION).unwrap(),
            Some(CURRENT_STORAGE_VERSION)
        );
    }

    #[test]
    fn test_migration_not_rerun_after_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trusted_senders.json");
        write_legacy(&path, &["+1 (555) 123-4567"]);

        drop(policy_at(&path));
        let after_first = fs::read(&path).unwrap();

        drop(policy_at(&path));
        assert_eq!(fs::read(&path).unwrap(), after_first);
    }

    #[test]
    fn test_allow_list_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trusted_senders.json");

        let policy = policy_at(&path);
        assert!(policy.add_trusted_sender("15550000000").unwrap());
        assert!(policy.add_trusted_sender("+44 20 7946 0958").unwrap());
        assert!(policy.remove_trusted_sender("15550000000").unwrap());
        drop(policy);

        let reopened = policy_at(&path);
        assert!(reopened.is_trusted("+442079460958").unwrap());
        assert!(!reopened.is_trusted("15550000000").unwrap());
    }

    #[test]
    fn test_two_handles_no_lost_updates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trusted_senders.json");
        let a = Arc::new(policy_at(&path));
        let b = Arc::new(policy_at(&path));

        let threads: Vec<_> = (0..8)
            .map(|i| {
                let policy = if i % 2 == 0 { a.clone() } else { b.clone() };
                std::thread::spawn(move || {
                    for j in 0..5 {
                        policy
                            .add_trusted_sender(&format!("1555000{}{}", i, j))
                            .unwrap();
                    }
                })
            })
            .collect();
        for t in threads {
            t.join().unwrap();
        }

        assert_eq!(a.trusted_senders().unwrap().len(), 40);
        assert_eq!(policy_at(&path).trusted_senders().unwrap().len(), 40);
    }

    #[tokio::test]
    async fn test_router_over_file_stores() {
        let dir = tempfile::tempdir().unwrap();
        let trusted_path = dir.path().join("trusted_senders.json");
        let audit_path = dir.path().join("command_audit.json");

        let policy = Arc::new(policy_at(&trusted_path));
        policy.add_trusted_sender("15550000000").unwrap();

        let audio = Arc::new(MockAudioControl::new());
        let engine = CommandEngine::new(audio.clone(), Arc::new(ManualScheduler::new()));
        let audit = Arc::new(CommandAuditStore::new(Arc::new(
            FilePreferenceStore::open(&audit_path).unwrap(),
        )));
        let router = InboundRouter::new(policy.clone(), Arc::new(engine)).with_auditor(audit);

        let outcome = router
            .route(InboundMessage::new("15550000000", "trusted add 19998887777"))
            .await;
        assert!(!outcome.is_dropped());

        let outcome = router
            .route(InboundMessage::new("19998887777", "volume max"))
            .await;
        assert_eq!(outcome.execution_result(), ExecutionResult::Executed);
        drop(router);

        // both writes reached disk
        assert!(policy_at(&trusted_path).is_trusted("19998887777").unwrap());
        let audit_store = Arc::new(FilePreferenceStore::open(&audit_path).unwrap());
        let audit = CommandAuditStore::new(audit_store);
        let last = audit.last().unwrap().unwrap();
        assert_eq!(last.sender.as_deref(), Some("19998887777"));
        assert_eq!(last.body, "volume max");
        assert_eq!(last.result, "EXECUTED");
    }
}
