//! # Persistence
//!
//! Promotions survive a restart through the durable backends.

#[cfg(test)]
mod tests {
    use crate::fixtures::{config, random_infohashes, Authority};
    use gate_approval::{AdmissionApi, AdmissionService, Decision, DenyReason};
    use gate_storage::{
        ApprovalBackend, BackendConfig, FileBackedBackend, Namespace, EMPTY_MARKER,
    };
    use gate_telemetry::ApprovalMetrics;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn metrics() -> Arc<ApprovalMetrics> {
        Arc::new(ApprovalMetrics::new())
    }

    #[tokio::test]
    async fn test_n_promotions_persist_n_entries() {
        let dir = tempdir().unwrap();
        let backend = BackendConfig::File {
            path: dir.path().join("approvals.db"),
        };
        let authority = Authority::new();
        let ids = random_infohashes(50);

        {
            let cfg = config(&[], &[], &[&authority], backend.clone());
            let service = AdmissionService::from_config(&cfg, metrics()).unwrap();
            for id in &ids {
                assert_eq!(service.decide(id, Some(&authority.sign(id))), Decision::Allow);
            }
            service.shutdown().await.unwrap();
        }

        let file = FileBackedBackend::open(dir.path().join("approvals.db")).unwrap();
        assert_eq!(file.list_keys(Namespace::Allowed).unwrap().len(), ids.len());
    }

    #[tokio::test]
    async fn test_promotion_survives_restart() {
        let dir = tempdir().unwrap();
        let backend = BackendConfig::File {
            path: dir.path().join("approvals.db"),
        };
        let authority = Authority::new();
        let ids = random_infohashes(3);

        {
            let cfg = config(&[], &[], &[&authority], backend.clone());
            let service = AdmissionService::from_config(&cfg, metrics()).unwrap();
            for id in &ids {
                service.decide(id, Some(&authority.sign(id)));
            }
            service.shutdown().await.unwrap();
        }

        // Restart without the authority: hydrated ids are still admitted
        let cfg = config(&[], &[], &[], backend);
        let m = metrics();
        let service = AdmissionService::from_config(&cfg, m.clone()).unwrap();
        for id in &ids {
            assert_eq!(service.decide(id, None), Decision::Allow);
        }
        assert_eq!(m.allowlist_size.get(), 3);
        service.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_stored_denials_apply() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("approvals.db");
        let ids = random_infohashes(2);

        {
            let file = FileBackedBackend::open(&path).unwrap();
            file.put(Namespace::Denied, ids[0].as_bytes(), EMPTY_MARKER)
                .unwrap();
            // Stored in both namespaces: deny wins
            file.put(Namespace::Denied, ids[1].as_bytes(), EMPTY_MARKER)
                .unwrap();
            file.put(Namespace::Allowed, ids[1].as_bytes(), EMPTY_MARKER)
                .unwrap();
        }

        let cfg = config(&[ids[0]], &[], &[], BackendConfig::File { path });
        let service = AdmissionService::from_config(&cfg, metrics()).unwrap();

        for id in &ids {
            assert_eq!(
                service.decide(id, None),
                Decision::Deny(DenyReason::Unapproved)
            );
        }
        service.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_locked_file_is_backend_unavailable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("approvals.db");
        let _holder = FileBackedBackend::open(&path).unwrap();

        let cfg = config(&[], &[], &[], BackendConfig::File { path });
        let result = AdmissionService::from_config(&cfg, metrics());

        assert!(matches!(
            result,
            Err(gate_approval::ApprovalError::BackendUnavailable(_))
        ));
    }

    #[cfg(feature = "rocksdb")]
    #[tokio::test]
    async fn test_rocksdb_round_trip() {
        use gate_storage::RocksDbConfig;

        let dir = tempdir().unwrap();
        let backend = BackendConfig::Rocksdb(RocksDbConfig::for_testing(dir.path()));
        let authority = Authority::new();
        let ids = random_infohashes(10);

        {
            let cfg = config(&[], &[], &[&authority], backend.clone());
            let service = AdmissionService::from_config(&cfg, metrics()).unwrap();
            for id in &ids {
                service.decide(id, Some(&authority.sign(id)));
            }
            service.shutdown().await.unwrap();
        }

        let cfg = config(&[], &[], &[], backend);
        let service = AdmissionService::from_config(&cfg, metrics()).unwrap();
        assert_eq!(service.store().allowed_len(), ids.len());
        service.shutdown().await.unwrap();
    }
}
