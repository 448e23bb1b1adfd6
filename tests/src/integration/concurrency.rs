//! # Concurrency
//!
//! Many request threads deciding at once against one shared service.

#[cfg(test)]
mod tests {
    use crate::fixtures::{config, random_infohashes, Authority};
    use gate_approval::{AdmissionApi, AdmissionService, Decision};
    use gate_storage::{BackendConfig, InMemoryBackend, Namespace};
    use gate_telemetry::ApprovalMetrics;
    use std::sync::Arc;

    const THREADS: usize = 8;
    const PER_THREAD: usize = 64;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_promotions_of_disjoint_ids() {
        let authority = Arc::new(Authority::new());
        let ids = random_infohashes(THREADS * PER_THREAD);
        let backend = Arc::new(InMemoryBackend::new());
        let metrics = Arc::new(ApprovalMetrics::new());
        let cfg = config(&[], &[], &[authority.as_ref()], BackendConfig::Memory);
        let service = Arc::new(
            AdmissionService::new(&cfg, backend.clone(), Arc::clone(&metrics)).unwrap(),
        );

        std::thread::scope(|scope| {
            for chunk in ids.chunks(PER_THREAD) {
                let service = Arc::clone(&service);
                let authority = Arc::clone(&authority);
                scope.spawn(move || {
                    for id in chunk {
                        let sig = authority.sign(id);
                        assert_eq!(service.decide(id, Some(&sig)), Decision::Allow);
                    }
                });
            }
        });

        for id in &ids {
            assert_eq!(service.decide(id, None), Decision::Allow);
        }
        assert_eq!(service.store().allowed_len(), ids.len());
        assert_eq!(metrics.promotions.get() as usize, ids.len());

        service.shutdown().await.unwrap();
        let persisted = metrics.writes_persisted.get() as usize;
        let dropped = metrics.writes_dropped.get() as usize;
        assert_eq!(persisted + dropped, ids.len());
        assert_eq!(backend.len(Namespace::Allowed), persisted);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_promotions_of_same_id() {
        let authority = Arc::new(Authority::new());
        let id = random_infohashes(1)[0];
        let sig = authority.sign(&id);
        let backend = Arc::new(InMemoryBackend::new());
        let metrics = Arc::new(ApprovalMetrics::new());
        let cfg = config(&[], &[], &[authority.as_ref()], BackendConfig::Memory);
        let service = Arc::new(
            AdmissionService::new(&cfg, backend.clone(), Arc::clone(&metrics)).unwrap(),
        );

        std::thread::scope(|scope| {
            for _ in 0..THREADS {
                let service = Arc::clone(&service);
                let sig = sig.as_str();
                scope.spawn(move || {
                    assert_eq!(service.decide(&id, Some(sig)), Decision::Allow);
                });
            }
        });

        assert_eq!(metrics.promotions.get(), 1);
        service.shutdown().await.unwrap();
        assert_eq!(backend.len(Namespace::Allowed), 1);
    }
}
